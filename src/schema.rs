use sqlx::SqlitePool;

const SQL_CREATE_REGISTRANTS: &str = r#"
CREATE TABLE IF NOT EXISTS registrants (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  email TEXT NOT NULL UNIQUE,
  identity_id TEXT,
  full_name TEXT,
  address TEXT,
  age INTEGER,
  date_of_birth TEXT,
  country TEXT,
  location TEXT
)
"#;

const SQL_CREATE_SCHEDULE_ENTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS schedule_entries (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  registrant_email TEXT NOT NULL UNIQUE,
  schedule_date TEXT NOT NULL,
  start_time TEXT NOT NULL,
  end_time TEXT NOT NULL,
  activity_name TEXT NOT NULL
)
"#;

const SQL_CREATE_IDENTITIES: &str = r#"
CREATE TABLE IF NOT EXISTS identities (
  id TEXT PRIMARY KEY,
  login_name TEXT NOT NULL UNIQUE
)
"#;

/// Applies the campaign schema. Safe to run on every startup; the UNIQUE
/// keys on email are what keeps the upserts single-row.
pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_REGISTRANTS).execute(pool).await?;
    sqlx::query(SQL_CREATE_SCHEDULE_ENTRIES).execute(pool).await?;
    sqlx::query(SQL_CREATE_IDENTITIES).execute(pool).await?;
    Ok(())
}
