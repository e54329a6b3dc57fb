//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"), length(max = 2048))]
    pub original_url: String,

    /// Optional caller-chosen short code (1-10 base62 characters).
    #[validate(length(max = 10))]
    pub custom_alias: Option<String>,

    /// Optional expiry in hours from now. Non-positive values mean no expiry.
    pub expires_in_hours: Option<i64>,
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}
