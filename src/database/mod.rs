pub mod identity_repo;
pub mod registrant_repo;
pub mod roster_repo;
pub mod schedule_repo;
