//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: all components healthy
/// - **503 Service Unavailable**: one or more components degraded
///
/// A degraded cache still reports `503` here for operator visibility even
/// though resolution itself degrades to database lookups.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = if state.stats.store_healthy().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Connected".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Database unreachable".to_string()),
        }
    };

    let cache_check = if state.resolver.cache_healthy().await {
        CheckStatus {
            status: "ok".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Cache unreachable".to_string()),
        }
    };

    let all_healthy = db_check.status == "ok" && cache_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
