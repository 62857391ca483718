//! Route modules for the econ server
//!
//! This module contains endpoint group-specific routers:
//! - estimation: effort estimators and the combined report
//! - financial: investment metrics and budget analysis
//! - risk: sensitivity, Monte Carlo and decision trees
//! - health: health check and readiness endpoints

pub mod estimation;
pub mod financial;
pub mod health;
pub mod risk;

use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    let open_cors = !config.environment.is_production();
    let state = AppState::new(config);

    let router = Router::new()
        .merge(health::routes())
        .merge(estimation::routes())
        .merge(financial::routes())
        .merge(risk::routes())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Browser clients in development talk to the API from another origin
    if open_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    pub fn create_test_state() -> AppState {
        AppState::new(Arc::new(ServerConfig::default()))
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<T: DeserializeOwned>(
        router: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, T) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_build_router_creates_valid_router() {
        let router = build_router(Arc::new(ServerConfig::default()));

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_merges_all_route_groups() {
        let router = build_router(Arc::new(ServerConfig::default()));

        for uri in [
            "/api/v1/estimates",
            "/api/v1/financials",
            "/api/v1/risk/decision-tree",
        ] {
            // Every group is mounted: a non-JSON body is rejected, not 404
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(
                response.status(),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let router = build_router(Arc::new(ServerConfig::default()));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/unknown/path")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_only_outside_production() {
        let preflight = || {
            Request::builder()
                .method("OPTIONS")
                .uri("/health")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap()
        };

        let dev = build_router(Arc::new(ServerConfig::default()));
        let response = dev.oneshot(preflight()).await.unwrap();
        assert!(response.headers().contains_key("access-control-allow-origin"));

        let mut config = ServerConfig::default();
        config.environment = crate::config::Environment::Production;
        let prod = build_router(Arc::new(config));
        let response = prod.oneshot(preflight()).await.unwrap();
        assert!(!response.headers().contains_key("access-control-allow-origin"));
    }

    #[test]
    fn test_app_state_config_access() {
        let mut config = ServerConfig::default();
        config.port = 9999;
        let state = AppState::new(Arc::new(config));

        assert_eq!(state.config.port, 9999);
        assert!(state.start_time.elapsed().as_secs() < 60);
    }
}
