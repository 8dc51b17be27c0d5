/// One grid row: a registrant left-joined to their schedule entry.
/// Schedule columns are NULL for registrants who never scheduled anything.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RosterJoinRow {
    pub email: String,
    pub full_name: Option<String>,
    pub age: Option<i64>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub date_of_birth: Option<String>,
    pub schedule_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub activity_name: Option<String>,
}
