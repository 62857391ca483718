//! Health check and readiness endpoints
//!
//! Provides health and readiness probes for load balancer integration.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status ("healthy" or "unhealthy")
    pub status: String,
    /// Server version
    pub version: String,
    /// Deployment environment
    pub environment: String,
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Engine limits applied to requests
    pub limits: Limits,
}

/// Request limits reported by the health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Largest Monte Carlo iteration count accepted
    pub monte_carlo_max_iterations: usize,
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Ready status
    pub ready: bool,
}

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}

/// GET /health - Health check endpoint
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        environment: state.config.environment.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        limits: Limits {
            monte_carlo_max_iterations: state.config.monte_carlo_max_iterations,
        },
    };

    (StatusCode::OK, Json(response))
}

/// GET /ready - Readiness probe endpoint
async fn ready_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(ReadyResponse { ready: true }))
}
