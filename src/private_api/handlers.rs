use axum::{Json, extract::State};
use std::sync::Arc;

use super::PrivateState;
use crate::error::{AppError, Result};
use crate::metadata::{self, TaskMetadata};

/// GET /
///
/// Fetches the task document from the ECS metadata endpoint and returns
/// the normalized subset. An unset metadata URI is a configuration error;
/// unreachable or incomplete metadata maps through [`AppError`] to 502/504
/// rather than crashing the handler.
pub async fn task_metadata(State(state): State<Arc<PrivateState>>) -> Result<Json<TaskMetadata>> {
    let base_uri = state
        .config
        .metadata_base_uri
        .as_deref()
        .ok_or_else(|| AppError::Config("ECS_CONTAINER_METADATA_URI_V4 is not set".to_string()))?;

    let metadata = metadata::fetch_task(&state.http, base_uri).await?;
    Ok(Json(metadata))
}
