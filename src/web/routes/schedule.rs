use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::services::schedule_service;
use crate::services::schedule_service::ScheduleSubmission;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleLookupQuery {
    pub email: String,
}

/// Prefill lookup for the schedule form; `entry` is null for a registrant
/// who has not scheduled anything yet.
pub async fn schedule_lookup_handler(
    State(state): State<AppState>,
    Query(query): Query<ScheduleLookupQuery>,
) -> Result<Json<Value>, AppError> {
    let view = schedule_service::load_for_email(&state.pool, &query.email).await?;
    Ok(Json(json!({ "entry": view })))
}

pub async fn schedule_handler(
    State(state): State<AppState>,
    Json(body): Json<ScheduleSubmission>,
) -> Result<Json<Value>, AppError> {
    let outcome = schedule_service::schedule(&state.pool, &body).await?;
    Ok(Json(json!({ "was_update": outcome.was_update })))
}
