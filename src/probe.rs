// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! TCP reachability probe against the configured target

use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Probe timeout (2 seconds)
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Attempts a TCP connection to `host:port` and reports the outcome
///
/// Never returns an error: the textual outcome — success, failure, or
/// timeout — is the payload of the `/test-connection` route either way.
pub async fn probe_target(host: &str, port: u16) -> String {
    let addr = format!("{host}:{port}");
    tracing::debug!("Probing TCP connectivity to {}", addr);

    match timeout(PROBE_TIMEOUT, TcpStream::connect(&addr)).await {
        Ok(Ok(_stream)) => format!("Connection to {addr} succeeded"),
        Ok(Err(e)) => format!("Connection to {addr} failed: {e}"),
        Err(_) => format!(
            "Connection to {addr} timed out after {} seconds",
            PROBE_TIMEOUT.as_secs()
        ),
    }
}
