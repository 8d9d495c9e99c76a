//! DispoKV - A Store for Disposable Resources
//!
//! This is the main entry point for the DispoKV server.
//! It sets up logging, the repository and the HTTP listener.

use anyhow::Context;
use clap::Parser;
use dispokv::api;
use dispokv::storage::Repository;
use dispokv::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Set up logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(version = dispokv::VERSION, "Starting DispoKV");

    // Create the repository (shared across all requests)
    let repository = Arc::new(Repository::new().with_count_mode(config.count_mode));
    info!(count_mode = %config.count_mode, "Repository initialized");

    let app = api::router(repository.clone(), &config.prefix);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!(
        addr = %config.bind_address(),
        root = %api::api_root(&config.prefix),
        "Ready to accept connections"
    );

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    api::serve(listener, app, shutdown)
        .await
        .context("server error")?;

    let stats = repository.stats();
    info!(
        added = stats.added,
        fetched = stats.fetched,
        consumed = stats.consumed,
        expired = stats.expired,
        deleted = stats.deleted,
        "Server shutdown complete"
    );
    Ok(())
}
