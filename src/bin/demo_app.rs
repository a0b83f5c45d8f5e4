//! Public demo service entry point

use std::net::SocketAddr;
use std::sync::Arc;

use apprunner_vpc_demo::{
    AppState, Result, RuntimeConfig, VisitStore, create_router, setup_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    // Fail fast: never serve with a half-resolved configuration.
    let config = RuntimeConfig::resolve().await.map_err(|e| {
        tracing::error!("Failed to resolve configuration: {}", e);
        e
    })?;
    tracing::info!(
        "Configuration resolved (db '{}' on '{}', probe target {}:{})",
        config.db_name,
        config.db_host,
        config.target_host,
        config.target_port
    );

    let store = VisitStore::connect_lazy(&config)?;
    let state = Arc::new(AppState::new(config.clone(), store)?);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_addr.parse().map_err(|e| {
        tracing::error!("Invalid bind address: {}", e);
        e
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("Demo app starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /                    - Register a visit");
    tracing::info!("  - GET /health              - Health check");
    tracing::info!("  - GET /recent-visits       - Last 10 recorded visits");
    tracing::info!("  - GET /test-connection     - TCP probe against the target");
    tracing::info!("  - GET /ecs-private-service - Forward to the private service");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
