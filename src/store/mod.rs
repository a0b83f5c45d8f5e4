// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Visit persistence against the external PostgreSQL table
//!
//! The table itself is provisioned by the surrounding infrastructure; the
//! service only appends rows and reads the most recent ones back. All
//! values travel as bind parameters. The table name is the single
//! identifier spliced into statements, so it is validated at construction
//! and double-quoted.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::RuntimeConfig;
use crate::error::{AppError, Result};

/// Upper bound on pooled connections
const MAX_CONNECTIONS: u32 = 5;

/// How long a statement may wait for a connection before failing
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Default number of rows returned by [`VisitStore::recent_visits`]
pub const RECENT_VISITS_LIMIT: i64 = 10;

/// One logged root-route request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecord {
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
}

#[derive(sqlx::FromRow)]
struct VisitRow {
    last_update: DateTime<Utc>,
    user_agent: Option<String>,
}

/// Append-only access to the visit table
#[derive(Clone)]
pub struct VisitStore {
    pool: PgPool,
    table: String,
}

impl VisitStore {
    /// Builds a store with a lazy bounded connection pool
    ///
    /// No connection is dialed here: an unreachable or unconfigured
    /// database surfaces as request-time errors on the visit routes while
    /// the health route stays up.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the table name is not a plain
    /// SQL identifier.
    pub fn connect_lazy(config: &RuntimeConfig) -> Result<Self> {
        if !valid_table_name(&config.table_name) {
            return Err(AppError::Config(format!(
                "Invalid table name '{}': expected an SQL identifier",
                config.table_name
            )));
        }

        let options = PgConnectOptions::new()
            .host(&config.db_host)
            .username(&config.db_user)
            .password(&config.db_pass)
            .database(&config.db_name);

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        Ok(VisitStore {
            pool,
            table: config.table_name.clone(),
        })
    }

    /// Inserts one visit row with the current UTC time
    ///
    /// # Errors
    ///
    /// Returns a database error when the insert fails; the caller decides
    /// whether that is fatal to the request (strict mode) or only logged.
    pub async fn record_visit(&self, user_agent: &str) -> Result<()> {
        let statement = format!(
            r#"INSERT INTO "{}" (last_update, user_agent) VALUES ($1, $2)"#,
            self.table
        );
        sqlx::query(&statement)
            .bind(Utc::now())
            .bind(user_agent)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Returns up to `limit` visits, newest first
    pub async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>> {
        let statement = format!(
            r#"SELECT last_update, user_agent FROM "{}" ORDER BY last_update DESC LIMIT $1"#,
            self.table
        );
        let rows: Vec<VisitRow> = sqlx::query_as(&statement)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| VisitRecord {
                timestamp: row.last_update,
                user_agent: row.user_agent.unwrap_or_default(),
            })
            .collect())
    }
}

/// True for plain SQL identifiers: `[A-Za-z_][A-Za-z0-9_]*`
pub fn valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_name_accepts_identifiers() {
        assert!(valid_table_name("access"));
        assert!(valid_table_name("access_log"));
        assert!(valid_table_name("_private"));
        assert!(valid_table_name("t2"));
    }

    #[test]
    fn test_valid_table_name_rejects_metacharacters() {
        assert!(!valid_table_name(""));
        assert!(!valid_table_name("2fast"));
        assert!(!valid_table_name("access; DROP TABLE access"));
        assert!(!valid_table_name("access\""));
        assert!(!valid_table_name("access'--"));
        assert!(!valid_table_name("access log"));
    }

    #[test]
    fn test_connect_lazy_rejects_hostile_table_name() {
        let config = RuntimeConfig {
            table_name: "access\"; DROP TABLE access; --".to_string(),
            ..RuntimeConfig::default()
        };
        let result = VisitStore::connect_lazy(&config);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_connect_lazy_does_not_dial() {
        // Empty DB_HOST: construction must still succeed, errors are
        // deferred to the first statement.
        let store = VisitStore::connect_lazy(&RuntimeConfig::default());
        assert!(store.is_ok());
    }

    #[tokio::test]
    async fn test_record_visit_fails_without_database() {
        let store = VisitStore::connect_lazy(&RuntimeConfig::default()).unwrap();
        let result = store.record_visit("test-agent").await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[test]
    fn test_visit_record_serializes_contract_keys() {
        let record = VisitRecord {
            timestamp: "2025-06-01T12:00:00Z".parse().unwrap(),
            user_agent: "curl/8.0".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("timestamp").is_some());
        assert_eq!(json["user_agent"], "curl/8.0");
        assert!(json["timestamp"].as_str().unwrap().starts_with("2025-06-01T12:00:00"));
    }
}
