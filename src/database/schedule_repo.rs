use sqlx::sqlite::SqliteExecutor;

use crate::models::ScheduleEntryRow;

const SQL_FIND_ENTRY_BY_EMAIL: &str = r#"
SELECT
    id,
    registrant_email,
    schedule_date,
    start_time,
    end_time,
    activity_name
FROM schedule_entries
WHERE registrant_email = ?1
ORDER BY id
LIMIT 1
"#;

const SQL_LIST_ENTRIES_BY_DATE: &str = r#"
SELECT
    id,
    registrant_email,
    schedule_date,
    start_time,
    end_time,
    activity_name
FROM schedule_entries
WHERE schedule_date = ?1
"#;

const SQL_INSERT_ENTRY: &str = r#"
INSERT INTO schedule_entries (
  registrant_email,
  schedule_date,
  start_time,
  end_time,
  activity_name
) VALUES (?, ?, ?, ?, ?)
"#;

const SQL_UPDATE_ENTRY_SLOT: &str = r#"
UPDATE schedule_entries SET
  schedule_date = ?,
  start_time = ?,
  end_time = ?,
  activity_name = ?
WHERE id = ?
"#;

/// Slot fields overwritten as a whole on every (re)scheduling action.
pub struct ScheduleSlot<'a> {
    pub schedule_date: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub activity_name: &'a str,
}

pub async fn find_by_email(
    executor: impl SqliteExecutor<'_>,
    email: &str,
) -> sqlx::Result<Option<ScheduleEntryRow>> {
    sqlx::query_as::<_, ScheduleEntryRow>(SQL_FIND_ENTRY_BY_EMAIL)
        .bind(email)
        .fetch_optional(executor)
        .await
}

/// All entries on a date, whoever owns them. The conflict check is global.
pub async fn list_by_date(
    executor: impl SqliteExecutor<'_>,
    schedule_date: &str,
) -> sqlx::Result<Vec<ScheduleEntryRow>> {
    sqlx::query_as::<_, ScheduleEntryRow>(SQL_LIST_ENTRIES_BY_DATE)
        .bind(schedule_date)
        .fetch_all(executor)
        .await
}

pub async fn insert_entry(
    executor: impl SqliteExecutor<'_>,
    email: &str,
    slot: ScheduleSlot<'_>,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ENTRY)
        .bind(email)
        .bind(slot.schedule_date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.activity_name)
        .execute(executor)
        .await?;
    Ok(res.last_insert_rowid())
}

pub async fn update_slot(
    executor: impl SqliteExecutor<'_>,
    entry_id: i64,
    slot: ScheduleSlot<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_ENTRY_SLOT)
        .bind(slot.schedule_date)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .bind(slot.activity_name)
        .bind(entry_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
