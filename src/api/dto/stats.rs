//! DTOs for link info and statistics endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Link metadata with its click counter.
///
/// Served by both `GET /urls/{code}` and `GET /urls/{code}/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
}

impl StatsResponse {
    /// Builds the response from a link and its public URL form.
    pub fn from_link(link: Link, short_url: String) -> Self {
        let is_expired = link.is_expired();
        Self {
            short_code: link.code,
            short_url,
            original_url: link.target_url,
            click_count: link.click_count,
            created_at: link.created_at,
            expires_at: link.expires_at,
            is_expired,
        }
    }
}
