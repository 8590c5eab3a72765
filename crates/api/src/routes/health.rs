//! Health check endpoint handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub upstream: UpstreamHealth,
}

/// Upstream configuration status.
///
/// The service holds no connections open between requests, so health reports
/// configuration rather than live connectivity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UpstreamHealth {
    pub configured: bool,
    pub base_url: String,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Full health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream = &state.config.upstream;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: UpstreamHealth {
            configured: !upstream.base_url.is_empty(),
            base_url: upstream.base_url.clone(),
        },
    })
}

/// Liveness probe endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe endpoint.
///
/// The service is stateless; it can accept traffic as soon as it is up.
pub async fn ready() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ready".to_string(),
    })
}
