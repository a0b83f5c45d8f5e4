//! Error types for the App Runner VPC demo services

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secrets Manager lookup or secret payload error
    #[error("Secrets error: {0}")]
    Secrets(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Outbound HTTP call error
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Incomplete or malformed task metadata payload
    #[error("Task metadata error: {0}")]
    Metadata(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl AppError {
    /// HTTP status this error maps to when it reaches a handler boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Secrets(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Metadata(_) => StatusCode::BAD_GATEWAY,
            AppError::Io(_) | AppError::AddrParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let message = self.to_string();
        tracing::error!("Request failed: {}", message);
        (status, Json(json!({ "Response": message }))).into_response()
    }
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;
