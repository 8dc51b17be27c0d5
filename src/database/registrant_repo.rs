use sqlx::sqlite::SqliteExecutor;

use crate::models::RegistrantRow;

const SQL_FIND_REGISTRANT_BY_EMAIL: &str = r#"
SELECT
    id,
    email,
    identity_id,
    full_name,
    address,
    age,
    date_of_birth,
    country,
    location
FROM registrants
WHERE email = ?1
ORDER BY id
LIMIT 1
"#;

const SQL_INSERT_REGISTRANT: &str = r#"
INSERT INTO registrants (
  email,
  identity_id,
  full_name,
  address,
  age,
  date_of_birth,
  country,
  location
) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

const SQL_UPDATE_REGISTRANT_PROFILE: &str = r#"
UPDATE registrants SET
  identity_id = ?,
  full_name = ?,
  address = ?,
  age = ?,
  date_of_birth = ?,
  country = ?,
  location = ?
WHERE id = ?
"#;

/// Mutable profile fields, written as a whole on both insert and update.
/// The email key itself is never rewritten.
pub struct RegistrantProfile<'a> {
    pub identity_id: &'a str,
    pub full_name: &'a str,
    pub address: &'a str,
    pub age: i64,
    pub date_of_birth: &'a str,
    pub country: &'a str,
    pub location: &'a str,
}

pub async fn find_by_email(
    executor: impl SqliteExecutor<'_>,
    email: &str,
) -> sqlx::Result<Option<RegistrantRow>> {
    sqlx::query_as::<_, RegistrantRow>(SQL_FIND_REGISTRANT_BY_EMAIL)
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn insert_registrant(
    executor: impl SqliteExecutor<'_>,
    email: &str,
    profile: RegistrantProfile<'_>,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_REGISTRANT)
        .bind(email)
        .bind(profile.identity_id)
        .bind(profile.full_name)
        .bind(profile.address)
        .bind(profile.age)
        .bind(profile.date_of_birth)
        .bind(profile.country)
        .bind(profile.location)
        .execute(executor)
        .await?;
    Ok(res.last_insert_rowid())
}

pub async fn update_profile(
    executor: impl SqliteExecutor<'_>,
    registrant_id: i64,
    profile: RegistrantProfile<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_REGISTRANT_PROFILE)
        .bind(profile.identity_id)
        .bind(profile.full_name)
        .bind(profile.address)
        .bind(profile.age)
        .bind(profile.date_of_birth)
        .bind(profile.country)
        .bind(profile.location)
        .bind(registrant_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
