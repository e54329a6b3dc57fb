//! Link statistics service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service for link metadata and click statistics.
///
/// Always reads the database directly, bypassing the cache: accuracy of the
/// click counter matters more than latency on this path. Never mutates state.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Retrieves a link with its current click count.
    ///
    /// Works for expired links too; expiry is reported, not enforced, here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    pub async fn get_stats(&self, code: &str) -> Result<Link, AppError> {
        self.links.find_by_code(code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })
    }

    /// Reports database connectivity for the health endpoint.
    pub async fn store_healthy(&self) -> bool {
        self.links.ping().await
    }
}
