use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

use super::super::AppState;
use crate::probe::probe_target;

/// GET /test-connection
///
/// TCP connect probe against the configured target. The outcome — success,
/// refusal, or timeout — is reported as text with status 200 either way.
pub async fn test_connection(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let outcome = probe_target(&state.config.target_host, state.config.target_port).await;
    (StatusCode::OK, Json(json!({ "Response": outcome })))
}
