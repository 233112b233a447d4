mod config;
mod ingest;
mod reading;
mod registry;
mod scheduler;
mod store;

use crate::config::Config;
use crate::ingest::Ingestor;
use crate::registry::MonitorRegistry;
use crate::store::ReadingStore;
use anyhow::{Context, Result};

fn init_tracing() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,awair_logger=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing()?;

    if let Some(dir) = config.database_dir() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let store = ReadingStore::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;
    store
        .ensure_schema()
        .await
        .context("failed to create the readings table")?;

    let registry =
        MonitorRegistry::parse(&config.monitors_json).context("invalid monitor configuration")?;

    let ingestor =
        Ingestor::new(store, config.http_timeout()).context("failed to build the HTTP client")?;

    let monitor_count = registry.len().await;
    tracing::info!(
        monitors = monitor_count,
        interval_seconds = config.poll_interval_seconds,
        database = %config.database_url,
        "starting polling loop"
    );

    let scheduler_handle = tokio::spawn(scheduler::run(
        config.poll_interval(),
        registry,
        ingestor,
    ));

    tokio::select! {
        res = scheduler_handle => {
            if let Err(err) = res {
                tracing::error!(error = %err, "polling task failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
