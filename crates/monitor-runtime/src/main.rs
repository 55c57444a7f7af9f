//! # Reserve-Watch Monitor Runtime
//!
//! Follows an Ethereum node and runs every enabled monitor against each new
//! block and transaction. Findings are written to stdout as JSON lines; logs
//! go through `tracing`.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging + metrics)
//! 2. Load configuration from the environment
//! 3. Connect the JSON-RPC adapter and register monitors
//! 4. Follow the chain head until Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use monitor_runtime::{
    connect, load_config, BlockDriver, JsonLinesSink, JsonRpcChain, MonitorRegistry,
};
use rw_telemetry::{gather_metrics, init_telemetry, TelemetryConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())?;

    let config = load_config().context("Failed to load configuration")?;

    info!("===========================================");
    info!("  Reserve-Watch Monitor Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("RPC endpoint: {}", config.rpc_url);

    let provider = connect(&config.rpc_url, config.request_timeout)
        .context("Failed to build JSON-RPC provider")?;
    let chain = Arc::new(JsonRpcChain::new(provider));
    let registry = MonitorRegistry::from_config(Arc::clone(&chain), &config)
        .context("Failed to construct monitors")?;

    let mut driver = BlockDriver::new(
        chain,
        registry,
        Arc::new(JsonLinesSink),
        config.poll_interval,
        config.start_block,
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let handle = tokio::spawn(async move { driver.run(shutdown_rx).await });

    info!("Runtime is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    info!("Initiating graceful shutdown...");
    if let Err(e) = shutdown_tx.send(true) {
        error!("Failed to send shutdown signal: {}", e);
    }
    handle.await.context("Driver task panicked")?;

    match gather_metrics() {
        Ok(metrics) => info!("Final metrics:\n{}", metrics),
        Err(e) => error!("Failed to gather metrics: {}", e),
    }
    info!("Shutdown complete");
    Ok(())
}
