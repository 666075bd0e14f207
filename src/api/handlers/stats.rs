//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns counters and metadata for a short code or alias.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// Expired links are reported too, with `expired: true`.
///
/// # Errors
///
/// Returns 404 Not Found if nothing answers to `code`.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.link_service.stats(&code).await?;

    Ok(Json(StatsResponse::new(link, Utc::now())))
}
