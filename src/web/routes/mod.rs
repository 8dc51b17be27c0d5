pub mod enrollment;
pub mod registration;
pub mod roster;
pub mod schedule;
