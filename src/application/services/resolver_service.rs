//! Short link resolution service with click accounting.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, CachedLink};

/// Service resolving short codes to target URLs.
///
/// Implements the cache-aside read path: cache first, database on miss with
/// read-through population. The cache is an optimization, never a dependency;
/// every cache failure degrades to a database lookup.
pub struct ResolverService {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    cache_ttl_seconds: u64,
}

impl ResolverService {
    /// Creates a new resolver service.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            links,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Resolves a short code to its target URL, counting the click.
    ///
    /// # Algorithm
    ///
    /// 1. Cache lookup; errors and timeouts are already degraded to a miss
    ///    by the cache layer.
    /// 2. On miss, database lookup; unknown code → [`AppError::NotFound`].
    ///    The found record is written back to the cache with a bounded TTL
    ///    (fire-and-forget; racing writers are fine since both derived the
    ///    payload from the same row).
    /// 3. The expiry predicate runs against the resolved record — cached or
    ///    fresh — before anything else: an expired link is never counted and
    ///    returns [`AppError::Expired`]. The cached payload carries
    ///    `expires_at` precisely so this check works on hits.
    /// 4. Atomic click increment against the database, never the cache. An
    ///    increment failure is logged as an operational error but does not
    ///    block the redirect: the caller-visible contract is "redirect", not
    ///    "redirect with guaranteed count".
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let resolved = match self.cache.get_link(code).await.ok().flatten() {
            Some(cached) => cached,
            None => {
                let link = self.links.find_by_code(code).await?.ok_or_else(|| {
                    AppError::not_found("Short link not found", json!({ "code": code }))
                })?;

                let payload = CachedLink {
                    target_url: link.target_url,
                    expires_at: link.expires_at,
                };

                let cache = self.cache.clone();
                let key = code.to_string();
                let entry = payload.clone();
                let ttl = self.cache_ttl_seconds;
                tokio::spawn(async move {
                    if let Err(e) = cache.set_link(&key, &entry, Some(ttl)).await {
                        error!("Failed to cache link {}: {}", key, e);
                    }
                });

                payload
            }
        };

        if resolved
            .expires_at
            .is_some_and(|e| chrono::Utc::now() >= e)
        {
            debug!("Refusing expired link: {}", code);
            return Err(AppError::expired(
                "Short link has expired",
                json!({ "code": code }),
            ));
        }

        match self.links.increment_clicks(code).await {
            Ok(true) => {}
            Ok(false) => warn!("Click increment matched no row for {}", code),
            Err(e) => error!("Click increment failed for {}: {}", code, e),
        }

        Ok(resolved.target_url)
    }

    /// Reports cache backend health for the health endpoint.
    pub async fn cache_healthy(&self) -> bool {
        self.cache.health_check().await
    }
}
