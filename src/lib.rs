// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # App Runner VPC Demo
//!
//! Two minimal HTTP services demonstrating connectivity from AWS App
//! Runner into a VPC: a public demo service that talks to a PostgreSQL
//! database and a private ECS service, and the private service itself,
//! which reports its own task metadata.
//!
//! ## Main modules
//! - `api`: public-service HTTP handlers
//! - `private_api`: private-service HTTP handlers
//! - `config`: configuration management
//! - `error`: error types
//! - `metadata`: ECS task metadata retrieval
//! - `probe`: TCP reachability probe
//! - `secrets`: Secrets Manager lookup
//! - `store`: visit persistence

mod api;
mod config;
mod error;
mod metadata;
mod private_api;
mod probe;
mod secrets;
mod store;

// Re-export commonly used types
/// Service configuration
pub use config::{PrivateConfig, RuntimeConfig};

/// Application error and result type
pub use error::{AppError, Result};

/// Public-service HTTP router and state
pub use api::{AppState, create_router};

/// Private-service HTTP router and state
pub use private_api::{PrivateState, create_private_router};

/// Secrets Manager secret shape
pub use secrets::DbSecret;

/// Visit persistence
pub use store::{RECENT_VISITS_LIMIT, VisitRecord, VisitStore};

/// ECS task metadata types
pub use metadata::{TaskDescription, TaskMetadata};

/// Initializes the tracing subscriber
///
/// Uses `EnvFilter::from_default_env()` so `RUST_LOG` is honored; when it
/// is unset the filter defaults to "info".
pub fn setup_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
