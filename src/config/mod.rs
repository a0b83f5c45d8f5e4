// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the App Runner VPC demo services
//!
//! Loads configuration from environment variables once at startup. On App
//! Runner the database half is overlaid from a Secrets Manager secret.

use crate::error::{AppError, Result};
use crate::secrets::{self, DbSecret};


/// Default configuration values
pub mod defaults {
    pub const BIND_ADDR: &str = "0.0.0.0:8080";
    pub const TARGET_HOST: &str = "0.0.0.0";
    pub const TARGET_PORT: u16 = 8080;
    pub const TABLE_NAME: &str = "access";
    pub const DB_NAME: &str = "apprunnerdemo";
}

/// Environment variable names used by the services
pub mod env_vars {
    pub const BIND_ADDR: &str = "BIND_ADDR";
    pub const TARGET_HOST: &str = "TARGET";
    pub const TARGET_PORT: &str = "TARGETPORT";
    pub const TABLE_NAME: &str = "TABLE_NAME";
    pub const DB_NAME: &str = "DB_NAME";
    pub const DB_USER: &str = "DB_USER";
    pub const DB_PASS: &str = "DB_PASS";
    pub const DB_HOST: &str = "DB_HOST";
    pub const DB_SECRETS_NAME: &str = "DBSECRETSNAME";
    pub const APP_RUNNER_FLAG: &str = "APPRUNNERSERVICE";
    pub const PRIVATE_SERVICE_URL: &str = "ECSPRIVATESERVICE";
    pub const STRICT_VISITS: &str = "STRICT_VISITS";
    pub const METADATA_URI: &str = "ECS_CONTAINER_METADATA_URI_V4";
}

/// Resolved configuration of the public service
///
/// Immutable for the process lifetime; handlers receive it through the
/// shared application state and never read the environment themselves.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub db_host: String,
    pub db_user: String,
    pub db_pass: String,
    pub db_name: String,
    pub target_host: String,
    pub target_port: u16,
    pub table_name: String,
    pub private_service_url: Option<String>,
    pub strict_visits: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            bind_addr: defaults::BIND_ADDR.to_string(),
            db_host: String::new(),
            db_user: String::new(),
            db_pass: String::new(),
            db_name: defaults::DB_NAME.to_string(),
            target_host: defaults::TARGET_HOST.to_string(),
            target_port: defaults::TARGET_PORT,
            table_name: defaults::TABLE_NAME.to_string(),
            private_service_url: None,
            strict_visits: false,
        }
    }
}

impl RuntimeConfig {
    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        let bind_addr = std::env::var(env_vars::BIND_ADDR)
            .unwrap_or_else(|_| defaults::BIND_ADDR.to_string());

        let target_host = std::env::var(env_vars::TARGET_HOST)
            .unwrap_or_else(|_| defaults::TARGET_HOST.to_string());

        let target_port = match std::env::var(env_vars::TARGET_PORT) {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!(
                    "Failed to parse {}='{}'. Using default port {}.",
                    env_vars::TARGET_PORT,
                    raw,
                    defaults::TARGET_PORT
                );
                defaults::TARGET_PORT
            }),
            Err(_) => defaults::TARGET_PORT,
        };

        RuntimeConfig {
            bind_addr,
            db_host: std::env::var(env_vars::DB_HOST).unwrap_or_default(),
            db_user: std::env::var(env_vars::DB_USER).unwrap_or_default(),
            db_pass: std::env::var(env_vars::DB_PASS).unwrap_or_default(),
            db_name: std::env::var(env_vars::DB_NAME)
                .unwrap_or_else(|_| defaults::DB_NAME.to_string()),
            target_host,
            target_port,
            table_name: std::env::var(env_vars::TABLE_NAME)
                .unwrap_or_else(|_| defaults::TABLE_NAME.to_string()),
            private_service_url: std::env::var(env_vars::PRIVATE_SERVICE_URL).ok(),
            strict_visits: flag_enabled(env_vars::STRICT_VISITS),
        }
    }

    /// Resolves the full runtime configuration
    ///
    /// Reads the environment, then — only when `APPRUNNERSERVICE` is set —
    /// performs one Secrets Manager lookup keyed by `DBSECRETSNAME` and
    /// overlays the database credentials and probe target from the secret.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform flag is set but the secret cannot
    /// be fetched or parsed, or when the table name is not a valid SQL
    /// identifier. Callers treat any error here as fatal.
    pub async fn resolve() -> Result<Self> {
        let mut config = Self::from_env();

        if flag_enabled(env_vars::APP_RUNNER_FLAG) {
            let secret_id = std::env::var(env_vars::DB_SECRETS_NAME).map_err(|_| {
                AppError::Config(format!(
                    "{} must be set when {} is present",
                    env_vars::DB_SECRETS_NAME,
                    env_vars::APP_RUNNER_FLAG
                ))
            })?;
            tracing::info!("Running on App Runner, resolving secret '{}'", secret_id);
            let secret = secrets::fetch_db_secret(&secret_id).await?;
            config.apply_secret(&secret);
        }

        config.validate().map_err(AppError::Config)?;
        Ok(config)
    }

    /// Overlays database credentials and the probe target from a secret
    pub fn apply_secret(&mut self, secret: &DbSecret) {
        self.db_pass = secret.password.clone();
        self.db_user = secret.username.clone();
        self.db_host = secret.host.clone();
        self.target_host = secret.host.clone();
        self.target_port = secret.port;
    }

    /// Validates the resolved configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !crate::store::valid_table_name(&self.table_name) {
            return Err(format!(
                "Invalid table name '{}': expected an SQL identifier",
                self.table_name
            ));
        }
        Ok(())
    }
}

/// Startup configuration of the private service
#[derive(Debug, Clone)]
pub struct PrivateConfig {
    pub bind_addr: String,
    pub metadata_base_uri: Option<String>,
}

impl Default for PrivateConfig {
    fn default() -> Self {
        PrivateConfig {
            bind_addr: defaults::BIND_ADDR.to_string(),
            metadata_base_uri: None,
        }
    }
}

impl PrivateConfig {
    /// Loads configuration from environment variables
    ///
    /// `ECS_CONTAINER_METADATA_URI_V4` is normally injected by the ECS
    /// agent. When it is absent the metadata route reports a configuration
    /// error at request time; the health route stays reachable.
    pub fn from_env() -> Self {
        let metadata_base_uri = std::env::var(env_vars::METADATA_URI).ok();
        if metadata_base_uri.is_none() {
            tracing::warn!(
                "{} is not set. Service will start but / will return an error.",
                env_vars::METADATA_URI
            );
        }

        PrivateConfig {
            bind_addr: std::env::var(env_vars::BIND_ADDR)
                .unwrap_or_else(|_| defaults::BIND_ADDR.to_string()),
            metadata_base_uri,
        }
    }
}

/// True when the variable is set to a non-empty, non-"false" value
fn flag_enabled(name: &str) -> bool {
    match std::env::var(name) {
        Ok(value) => {
            let value = value.trim();
            !value.is_empty() && !value.eq_ignore_ascii_case("false") && value != "0"
        }
        Err(_) => false,
    }
}
