pub mod routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::AppError;
use crate::services::admin_policy::AdminPolicy;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub admins: AdminPolicy,
}

/// Remote failures collapse into one generic body; callers only learn
/// succeeded vs. failed. Validation and conflict rejections keep their
/// user-facing detail.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            AppError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response()
            }
            AppError::ExistenceCheck(e) => {
                warn!("existence check failed: {}", e);
                generic_failure()
            }
            AppError::Write(e) => {
                warn!("write failed: {}", e);
                generic_failure()
            }
        }
    }
}

fn generic_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "There was an error while submitting your form." })),
    )
        .into_response()
}
