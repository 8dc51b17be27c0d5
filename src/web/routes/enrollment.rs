use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::services::enrollment_service;
use crate::services::enrollment_service::EnrollmentState;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckEnrollmentBody {
    pub email: String,
}

pub async fn check_enrollment_handler(
    State(state): State<AppState>,
    Json(body): Json<CheckEnrollmentBody>,
) -> Result<Json<Value>, AppError> {
    let status = enrollment_service::check_email(&state.pool, &state.admins, &body.email).await?;

    let response = match status.state {
        EnrollmentState::Registered { is_admin } => json!({
            "registered": true,
            "is_admin": is_admin,
            "full_name": status.full_name,
        }),
        _ => json!({
            "registered": false,
            "is_admin": Value::Null,
            "full_name": Value::Null,
        }),
    };
    Ok(Json(response))
}
