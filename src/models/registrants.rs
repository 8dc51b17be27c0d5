#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistrantRow {
    pub id: i64,
    pub email: String,
    pub identity_id: Option<String>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub age: Option<i64>,
    pub date_of_birth: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
}
