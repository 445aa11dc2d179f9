//! shelf server binary.
//!
//! Usage:
//!   shelf --port 3000
//!
//! Every flag also reads an environment variable (`PORT`, `HOST`, `API_KEY`).
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use shelf::{Config, Server, Store, app};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let store = Arc::new(Store::seeded());
    info!(products = store.len(), "store seeded");

    let server = Server::bind(config.socket_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.socket_addr()))?;

    info!("Server is running on http://localhost:{}", config.port);

    server
        .serve(app(store, config.api_key))
        .await
        .context("server error")
}
