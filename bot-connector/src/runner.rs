//! Server runner: binds the configured address and serves the webhook until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use tracing::{info, instrument, warn};

use crate::client::ConnectorClient;
use crate::config::ConnectorConfig;
use crate::server::{router, ConnectorState};

/// Starts the webhook server with the given chain. Each request runs its turn to completion before responding.
#[instrument(skip(config, handler_chain))]
pub async fn run_server(config: &ConnectorConfig, handler_chain: HandlerChain) -> Result<()> {
    let client = Arc::new(ConnectorClient::new(Duration::from_secs(
        config.request_timeout_secs,
    ))?);
    let app = router(ConnectorState {
        chain: handler_chain,
        client,
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind connector to {}", addr))?;

    info!(addr = %addr, "Connector listening on /api/messages");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("connector server error")?;

    info!("Connector stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
