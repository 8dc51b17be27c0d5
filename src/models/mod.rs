pub mod identities;
pub mod registrants;
pub mod roster;
pub mod schedule_entries;

pub use identities::IdentityRow;
pub use registrants::RegistrantRow;
pub use roster::RosterJoinRow;
pub use schedule_entries::ScheduleEntryRow;
