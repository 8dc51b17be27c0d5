pub mod admin_policy;
pub mod enrollment_service;
pub mod registration_service;
pub mod roster_service;
pub mod schedule_service;
