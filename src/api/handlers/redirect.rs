//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with 302 Found rather than a permanent redirect: a permanent
/// redirect would let clients cache the target and bypass click accounting.
///
/// # Errors
///
/// Returns 404 Not Found for unknown codes and 410 Gone for expired links.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Redirect request for short code: {}", code);

    let target_url = state.resolver.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target_url)]))
}
