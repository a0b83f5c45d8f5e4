//! Private ECS service entry point

use std::net::SocketAddr;
use std::sync::Arc;

use apprunner_vpc_demo::{
    PrivateConfig, PrivateState, Result, create_private_router, setup_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = PrivateConfig::from_env();
    let state = Arc::new(PrivateState::new(config.clone())?);
    let app = create_private_router(state);

    let addr: SocketAddr = config.bind_addr.parse().map_err(|e| {
        tracing::error!("Invalid bind address: {}", e);
        e
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("Private service starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /       - Task metadata");
    tracing::info!("  - GET /health - Health check");

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
