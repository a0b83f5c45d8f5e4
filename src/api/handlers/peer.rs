use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

use super::super::AppState;
use crate::error::{AppError, Result};

/// GET /ecs-private-service
///
/// Forwards a GET to the configured private-service URL and echoes its
/// body. Failures map to distinct statuses: 500 when the URL is not
/// configured, 502 on connection or upstream-status failures, 504 on
/// timeout.
pub async fn private_service_proxy(State(state): State<Arc<AppState>>) -> Result<Response> {
    let url = state
        .config
        .private_service_url
        .as_deref()
        .ok_or_else(|| AppError::Config("ECSPRIVATESERVICE is not set".to_string()))?;

    tracing::debug!("Forwarding request to private service at {}", url);
    let body = state
        .http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok((StatusCode::OK, Json(json!({ "Response": body }))).into_response())
}
