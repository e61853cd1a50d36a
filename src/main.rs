//! relatorios server binary
//!
//! Loads configuration, opens the record store (creating the schema if
//! needed), and serves the REST API until Ctrl+C or SIGTERM.

use anyhow::Context;
use relatorios::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        database = %config.database.resolved_path().display(),
        bind = %config.server.bind_address(),
        "Starting relatorios"
    );

    let store = match SqliteRelatorioStore::open(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize relatorio store");
            return Err(e).context("record store initialization failed");
        }
    };

    let result = ServerBuilder::new()
        .with_store(store.clone())
        .with_config(config.server.clone())
        .serve(&config.server.bind_address())
        .await;

    store.close().await;
    result
}
