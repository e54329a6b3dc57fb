//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/very/long/url",
///   "customAlias": "promo",
///   "expiresInHours": 24
/// }
/// ```
///
/// `customAlias` and `expiresInHours` are optional.
///
/// # Errors
///
/// Returns 400 Bad Request on validation failure and 409 Conflict when the
/// requested alias is already in use.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state
        .shortener
        .shorten(
            payload.original_url,
            payload.custom_alias,
            payload.expires_in_hours,
        )
        .await?;

    let short_url = state.shortener.short_url(&link.code);

    let response = ShortenResponse {
        short_code: link.code,
        short_url,
        original_url: link.target_url,
        created_at: link.created_at,
        expires_at: link.expires_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
