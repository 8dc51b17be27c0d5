use sqlx::SqlitePool;

use crate::models::RosterJoinRow;

const SQL_LOAD_ROSTER: &str = r#"
SELECT
    r.email,
    r.full_name,
    r.age,
    r.address,
    r.country,
    r.location,
    r.date_of_birth,
    s.schedule_date,
    s.start_time,
    s.end_time,
    s.activity_name
FROM registrants r
LEFT JOIN schedule_entries s ON s.registrant_email = r.email
ORDER BY r.id
"#;

pub async fn load_roster(pool: &SqlitePool) -> sqlx::Result<Vec<RosterJoinRow>> {
    sqlx::query_as::<_, RosterJoinRow>(SQL_LOAD_ROSTER)
        .fetch_all(pool)
        .await
}
