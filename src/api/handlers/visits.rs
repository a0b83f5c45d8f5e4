use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

use super::super::AppState;
use crate::store::RECENT_VISITS_LIMIT;

/// GET /
///
/// Records one visit (current UTC time, caller's `User-Agent`) and
/// acknowledges. In best-effort mode a failed insert is logged and the
/// caller still gets the acknowledgement; in strict mode it becomes a 500.
pub async fn register_visit(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    // A missing or non-UTF-8 header is recorded as an empty string.
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if let Err(e) = state.store.record_visit(user_agent).await {
        tracing::error!("Failed to record visit: {}", e);
        if state.config.strict_visits {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "Response": "Error, unable to register visit" })),
            )
                .into_response();
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "Response": "Registered request" })),
    )
        .into_response()
}

/// GET /recent-visits
///
/// Returns up to 10 visits, newest first.
pub async fn recent_visits(State(state): State<Arc<AppState>>) -> Response {
    match state.store.recent_visits(RECENT_VISITS_LIMIT).await {
        Ok(visits) => (StatusCode::OK, Json(json!({ "Response": visits }))).into_response(),
        Err(e) => {
            tracing::error!("Failed to list recent visits: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "Response": "Error, unable to produce recent visits" })),
            )
                .into_response()
        }
    }
}
