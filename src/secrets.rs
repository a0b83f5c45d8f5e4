//! Secrets Manager lookup for database credentials
//!
//! On App Runner the database credentials are not passed as plain
//! environment variables; the service receives a secret reference in
//! `DBSECRETSNAME` and fetches the value once at startup. Authentication
//! uses the ambient AWS credential chain (instance role on App Runner).

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Database secret shape produced by RDS credential rotation
#[derive(Debug, Clone, Deserialize)]
pub struct DbSecret {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

/// Fetches and parses the database secret
///
/// # Errors
///
/// Returns `AppError::Secrets` when the lookup fails, the secret has no
/// string payload, or the payload is not the expected JSON shape. Callers
/// treat any error here as fatal at startup.
pub async fn fetch_db_secret(secret_id: &str) -> Result<DbSecret> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_secretsmanager::Client::new(&aws_config);

    let output = client
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .map_err(|e| AppError::Secrets(format!("failed to fetch secret '{secret_id}': {e}")))?;

    let payload = output.secret_string().ok_or_else(|| {
        AppError::Secrets(format!("secret '{secret_id}' has no string payload"))
    })?;

    parse_db_secret(payload)
        .map_err(|e| AppError::Secrets(format!("secret '{secret_id}' is malformed: {e}")))
}

/// Parses a secret string into [`DbSecret`]
fn parse_db_secret(raw: &str) -> std::result::Result<DbSecret, serde_json::Error> {
    serde_json::from_str(raw)
}
