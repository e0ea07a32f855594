//! mhdash Dashboard Server
//!
//! Run with: cargo run --bin mhdash [-- --config mhdash.toml]
//!
//! # Configuration
//!
//! Environment variables:
//! - `MHDASH_METRICS_PATH`: Metrics CSV (default: ./merged.csv)
//! - `MHDASH_COORDINATES_PATH`: Coordinates CSV (default: ./coordinates.csv)
//! - `MHDASH_HOST`: Host to bind to (default: 127.0.0.1)
//! - `MHDASH_PORT`: Port to listen on (default: 8050)
//! - `MHDASH_LOG_LEVEL`, `MHDASH_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Overrides the log filter entirely

use clap::Parser;
use mhdash::api::{serve, AppState};
use mhdash::config::{Config, LogFormat, LoggingConfig};
use mhdash::dataset::Dataset;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mhdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mental-health statistics dashboard")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // No subscriber exists yet: config errors surface through the returned error
    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };

    init_tracing(&config.logging);

    tracing::info!("Starting mhdash v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = ?config.data.metrics_path, "Metrics table");
    tracing::info!(path = ?config.data.coordinates_path, "Coordinates table");

    // Nothing to show without data: fail before serving
    let dataset = match Dataset::load(&config.data.metrics_path, &config.data.coordinates_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dataset");
            return Err(e.into());
        }
    };

    let state = AppState::new(Arc::new(dataset));
    serve(state, &config.server).await?;

    tracing::info!("mhdash stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.default_directive().into());

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
