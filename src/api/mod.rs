//! HTTP API module for the public service
//!
//! # Endpoints
//! - `GET /health` — health check
//! - `GET /` — record a visit
//! - `GET /recent-visits` — last 10 recorded visits
//! - `GET /test-connection` — TCP probe against the configured target
//! - `GET /ecs-private-service` — forward to the private ECS service

pub mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::store::VisitStore;

/// Timeout applied to outbound HTTP calls
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Application state shared with endpoints
pub struct AppState {
    pub config: RuntimeConfig,
    pub store: VisitStore,
    pub http: reqwest::Client,
}

impl AppState {
    /// Builds the shared state with a timeout-bounded HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: RuntimeConfig, store: VisitStore) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(AppState {
            config,
            store,
            http,
        })
    }
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::register_visit))
        .route("/health", get(handlers::health_check))
        .route("/recent-visits", get(handlers::recent_visits))
        .route("/test-connection", get(handlers::test_connection))
        .route("/ecs-private-service", get(handlers::private_service_proxy))
        .with_state(state)
}
