use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::services::roster_service;
use crate::services::roster_service::{RosterColumn, RosterRowView, SortDirection};
use crate::web::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct RosterQuery {
    pub sort: Option<String>,
    pub dir: Option<String>,
}

/// The full registration grid. An unknown sort column is ignored rather
/// than rejected, matching the grid's forgiving column handling.
pub async fn roster_handler(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<Vec<RosterRowView>>, AppError> {
    let sort = query
        .sort
        .as_deref()
        .and_then(RosterColumn::parse)
        .map(|column| (column, SortDirection::parse(query.dir.as_deref())));

    let rows = roster_service::load_roster(&state.pool, sort).await?;
    Ok(Json(rows))
}
