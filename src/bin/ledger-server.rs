use std::sync::Arc;

use anyhow::{Context, Result};
use cute_ledger_service::{
    config::Config,
    processor::in_memory_processor::InMemoryTransactionProcessor,
    server::{Server, shutdown_signal},
    telemetry,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init(config.log_format);

    let processor = Arc::new(InMemoryTransactionProcessor::default());
    let server = Server::bind(&config, processor).await?;
    info!("ledger server listening on {}", server.local_addr()?);

    server.run_until(shutdown_signal()).await?;
    info!("server exited properly");
    Ok(())
}
