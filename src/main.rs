//! Weatherlog API Server
//!
//! Run with: cargo run --bin weatherlog -- [--config path/to/config.toml]
//!
//! # Configuration
//!
//! Without `--config`, configuration is read from the first of
//! `~/.config/weatherlog/config.toml`, `/etc/weatherlog/config.toml` and
//! `./config.toml` that exists. `WEATHERLOG_*` environment variables override
//! file values; `RUST_LOG` overrides the configured log level.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weatherlog::api::{serve, AppState};
use weatherlog::config::{Config, LoggingConfig};
use weatherlog::storage::{MemoryStore, WeatherRepository};

#[derive(Parser)]
#[command(name = "weatherlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Weather observation record service")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    tracing::info!("Starting Weatherlog v{}", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Loaded config from {:?}", path);
    }

    // Initialize record store
    let store_config = config.storage.to_store_config();
    match store_config.snapshot_path() {
        Some(ref path) => tracing::info!("Snapshot file: {:?}", path),
        None => tracing::info!("Persistence disabled, records are kept in memory only"),
    }
    let store = Arc::new(
        MemoryStore::open(&store_config).context("failed to open record store")?,
    );
    tracing::info!("Record store ready: {}", store.stats().await);

    // Run server
    let api_config = config.api.to_server_config();
    let state = AppState::from_store(store, api_config.clone());
    serve(state, &api_config).await?;

    tracing::info!("Weatherlog stopped");
    Ok(())
}

/// Initialize tracing from the logging config
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("weatherlog={},tower_http={}", logging.level, logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
