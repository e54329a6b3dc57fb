//! Router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`            - Create a short link
//! - `GET  /{code}`             - Short link redirect (302)
//! - `GET  /urls/{code}`        - Link info
//! - `GET  /urls/{code}/stats`  - Link info with click statistics
//! - `GET  /health`             - Component health checks

use axum::{
    Router,
    routing::{get, post},
};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler, stats_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// Fixed routes (`/shorten`, `/health`, `/urls`) are registered before the
/// `/{code}` catch-all; axum prefers the more specific match, so those path
/// segments are effectively reserved codes.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/urls/{code}", get(stats_handler))
        .route("/urls/{code}/stats", get(stats_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
