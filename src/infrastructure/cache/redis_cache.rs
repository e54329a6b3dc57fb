//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService, CachedLink};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Redis cache implementation for fast link lookups.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. All operations are fail-open: errors are logged but don't propagate
/// to callers, and each operation carries a deadline so a hung Redis node is
/// indistinguishable from a miss.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and
    /// configures default TTL and per-operation timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(
        redis_url: &str,
        default_ttl_seconds: u64,
        op_timeout_ms: u64,
    ) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            op_timeout: Duration::from_millis(op_timeout_ms),
            key_prefix: "link:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_link(&self, short_code: &str) -> CacheResult<Option<CachedLink>> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        let result = tokio::time::timeout(self.op_timeout, conn.get::<_, Option<String>>(&key));

        match result.await {
            Ok(Ok(Some(payload))) => match serde_json::from_str::<CachedLink>(&payload) {
                Ok(link) => {
                    debug!("Cache HIT: {}", short_code);
                    Ok(Some(link))
                }
                Err(e) => {
                    // An undecodable entry is treated as a miss and evicted.
                    warn!("Corrupt cache entry for {}: {}", short_code, e);
                    let _ = conn.del::<_, i32>(&key).await;
                    Ok(None)
                }
            },
            Ok(Ok(None)) => {
                debug!("Cache MISS: {}", short_code);
                Ok(None)
            }
            Ok(Err(e)) => {
                error!("Redis GET error for {}: {}", short_code, e);
                Ok(None)
            }
            Err(_) => {
                warn!("Redis GET timed out for {}", short_code);
                Ok(None)
            }
        }
    }

    async fn set_link(
        &self,
        short_code: &str,
        link: &CachedLink,
        ttl: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);

        let payload = match serde_json::to_string(link) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to serialize cache entry for {}: {}", short_code, e);
                return Ok(());
            }
        };

        let result = tokio::time::timeout(
            self.op_timeout,
            conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds),
        );

        match result.await {
            Ok(Ok(())) => {
                debug!("Cache SET: {} (TTL: {}s)", short_code, ttl_seconds);
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Redis SET error for {}: {}", short_code, e);
                Ok(())
            }
            Err(_) => {
                warn!("Redis SET timed out for {}", short_code);
                Ok(())
            }
        }
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        match tokio::time::timeout(self.op_timeout, conn.del::<_, i32>(&key)).await {
            Ok(Ok(deleted)) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", short_code);
                }
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Redis DEL error for {}: {}", short_code, e);
                Ok(())
            }
            Err(_) => {
                warn!("Redis DEL timed out for {}", short_code);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        matches!(
            tokio::time::timeout(self.op_timeout, conn.ping::<()>()).await,
            Ok(Ok(()))
        )
    }
}
