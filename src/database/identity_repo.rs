use sqlx::sqlite::SqliteExecutor;

use crate::models::IdentityRow;

const SQL_FIND_IDENTITY_BY_LOGIN: &str = r#"
SELECT id, login_name
FROM identities
WHERE login_name = ?1
"#;

const SQL_INSERT_IDENTITY: &str = r#"
INSERT INTO identities (id, login_name) VALUES (?, ?)
"#;

pub async fn find_by_login(
    executor: impl SqliteExecutor<'_>,
    login_name: &str,
) -> sqlx::Result<Option<IdentityRow>> {
    sqlx::query_as::<_, IdentityRow>(SQL_FIND_IDENTITY_BY_LOGIN)
        .bind(login_name)
        .fetch_optional(executor)
        .await
}

pub async fn insert_identity(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    login_name: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_IDENTITY)
        .bind(id)
        .bind(login_name)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
