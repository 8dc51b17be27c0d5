use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::services::registration_service;
use crate::services::registration_service::{RegistrationOutcome, RegistrationSubmission};
use crate::web::AppState;

pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegistrationSubmission>,
) -> Result<Json<RegistrationOutcome>, AppError> {
    let outcome = registration_service::register(&state.pool, &body).await?;
    Ok(Json(outcome))
}
