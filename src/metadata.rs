//! ECS task metadata retrieval and normalization
//!
//! The ECS agent exposes a local metadata endpoint per task; its base URI
//! arrives in `ECS_CONTAINER_METADATA_URI_V4`. The `/task` document is
//! normalized down to the handful of fields the demo reports. Index-style
//! access into the payload is confined to [`TaskMetadata::from_task`],
//! which turns every missing piece into a descriptive error instead of a
//! panic.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Raw `/task` document, reduced to the fields we consume
#[derive(Debug, Deserialize)]
pub struct TaskDescription {
    #[serde(rename = "TaskARN")]
    pub task_arn: Option<String>,
    #[serde(rename = "Cluster")]
    pub cluster: Option<String>,
    #[serde(rename = "LaunchType")]
    pub launch_type: Option<String>,
    #[serde(rename = "Containers", default)]
    pub containers: Vec<ContainerDescription>,
}

#[derive(Debug, Deserialize)]
pub struct ContainerDescription {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Networks", default)]
    pub networks: Vec<NetworkDescription>,
}

#[derive(Debug, Deserialize)]
pub struct NetworkDescription {
    #[serde(rename = "IPv4Addresses", default)]
    pub ipv4_addresses: Vec<String>,
}

/// Normalized subset returned by the private service root route
///
/// Key names are part of the wire contract. The first three fields mirror
/// the metadata document and may be null; the container-derived fields are
/// required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMetadata {
    #[serde(rename = "TaskArn")]
    pub task_arn: Option<String>,
    #[serde(rename = "Cluster")]
    pub cluster: Option<String>,
    #[serde(rename = "LaunchType")]
    pub launch_type: Option<String>,
    #[serde(rename = "ServiceName")]
    pub service_name: String,
    #[serde(rename = "IpAddress")]
    pub ip_address: String,
}

impl TaskMetadata {
    /// Extracts the reported fields from a task document
    ///
    /// # Errors
    ///
    /// Returns `AppError::Metadata` when the document has no containers,
    /// the first container has no name or no network attachment, or the
    /// first network carries no IPv4 address.
    pub fn from_task(task: TaskDescription) -> Result<Self> {
        let container = task
            .containers
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Metadata("task reports no containers".to_string()))?;

        let service_name = container
            .name
            .ok_or_else(|| AppError::Metadata("first container has no name".to_string()))?;

        let network = container.networks.into_iter().next().ok_or_else(|| {
            AppError::Metadata(format!(
                "container '{service_name}' has no network attachments"
            ))
        })?;

        let ip_address = network.ipv4_addresses.into_iter().next().ok_or_else(|| {
            AppError::Metadata(format!(
                "container '{service_name}' network has no IPv4 address"
            ))
        })?;

        Ok(TaskMetadata {
            task_arn: task.task_arn,
            cluster: task.cluster,
            launch_type: task.launch_type,
            service_name,
            ip_address,
        })
    }
}

/// Fetches `<base_uri>/task` and normalizes the response
///
/// # Errors
///
/// Maps transport failures and non-2xx statuses to `AppError::Upstream`
/// and malformed or incomplete documents to `AppError::Metadata`.
pub async fn fetch_task(client: &reqwest::Client, base_uri: &str) -> Result<TaskMetadata> {
    let url = format!("{}/task", base_uri.trim_end_matches('/'));
    tracing::debug!("Fetching task metadata from {}", url);

    let raw = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let task: TaskDescription = serde_json::from_str(&raw)
        .map_err(|e| AppError::Metadata(format!("invalid task document: {e}")))?;

    TaskMetadata::from_task(task)
}
