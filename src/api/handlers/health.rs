use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(rename = "Status")]
    pub status: String,
}

/// GET /health
///
/// Static healthy payload, served regardless of configuration state and
/// without touching any external collaborator.
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "Healthy".to_string(),
    };

    (StatusCode::OK, Json(response))
}
