#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScheduleEntryRow {
    pub id: i64,
    pub registrant_email: String,
    pub schedule_date: String,
    pub start_time: String,
    pub end_time: String,
    pub activity_name: String,
}
