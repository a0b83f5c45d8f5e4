//! HTTP API module for the private ECS service
//!
//! # Endpoints
//! - `GET /health` — health check
//! - `GET /` — normalized task metadata from the ECS agent

mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::health_check;
use crate::config::PrivateConfig;
use crate::error::Result;

/// Timeout applied to metadata endpoint calls
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Application state shared with endpoints
pub struct PrivateState {
    pub config: PrivateConfig,
    pub http: reqwest::Client,
}

impl PrivateState {
    /// Builds the shared state with a timeout-bounded HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: PrivateConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(PrivateState { config, http })
    }
}

/// Creates the private-service Axum router with all endpoints
pub fn create_private_router(state: Arc<PrivateState>) -> Router {
    Router::new()
        .route("/", get(handlers::task_metadata))
        .route("/health", get(health_check))
        .with_state(state)
}
