//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, service wiring, and the Axum
//! server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;

use crate::application::services::{ResolverService, ShortenerService, StatsService};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::PgLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache (or NullCache fallback)
/// - Services and shared state
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or server bind
/// fail. A Redis connection failure is not fatal; caching is disabled
/// instead.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(
            redis_url,
            config.cache_ttl_seconds,
            config.cache_op_timeout_ms,
        )
        .await
        {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let links: Arc<dyn crate::domain::repositories::LinkRepository> =
        Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let shortener = Arc::new(ShortenerService::new(
        links.clone(),
        config.base_url.clone(),
    ));
    let resolver = Arc::new(ResolverService::new(
        links.clone(),
        cache,
        config.cache_ttl_seconds,
    ));
    let stats = Arc::new(StatsService::new(links));

    let state = AppState::new(shortener, resolver, stats);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
