//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{ResolverService, ShortenerService, StatsService};

/// Application state shared across all request handlers.
///
/// Services are constructed once at startup from the immutable configuration
/// and cloned cheaply per request via `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub resolver: Arc<ResolverService>,
    pub stats: Arc<StatsService>,
}

impl AppState {
    /// Creates the application state from its services.
    pub fn new(
        shortener: Arc<ShortenerService>,
        resolver: Arc<ResolverService>,
        stats: Arc<StatsService>,
    ) -> Self {
        Self {
            shortener,
            resolver,
            stats,
        }
    }
}
