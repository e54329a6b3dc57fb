//! Handlers for link info and statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves link metadata and click statistics.
///
/// # Endpoints
///
/// `GET /urls/{code}` and `GET /urls/{code}/stats`
///
/// Reads the database directly (bypassing the cache) so the click counter is
/// accurate, and never increments it. Expired links are still reported, with
/// `isExpired: true`.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.stats.get_stats(&code).await?;
    let short_url = state.shortener.short_url(&link.code);

    Ok(Json(StatsResponse::from_link(link, short_url)))
}
