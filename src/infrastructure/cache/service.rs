//! Cache service trait, payload, and error types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The payload stored per short code.
///
/// Carries `expires_at` alongside the target URL so the expiry predicate is
/// evaluated on every cache hit, not only on misses. Without it a stale entry
/// could keep serving an expired link for the rest of its TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedLink {
    pub target_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short link lookups.
///
/// The cache is an accelerator, never a dependency for correctness:
/// implementations must be thread-safe and fail open, degrading every error
/// or timeout to a miss so resolution falls through to the database.
/// Concurrent workers may race to populate the same key after a miss;
/// last-write-wins is acceptable since both derived the value from the same
/// authoritative row.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached link payload for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` on cache hit
    /// - `Ok(None)` on cache miss, error, or timeout (fail-open behavior)
    async fn get_link(&self, short_code: &str) -> CacheResult<Option<CachedLink>>;

    /// Stores a link payload with optional TTL override.
    ///
    /// Implementations should log errors and return `Ok(())` rather than
    /// disrupting the request flow.
    async fn set_link(
        &self,
        short_code: &str,
        link: &CachedLink,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached entry.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
