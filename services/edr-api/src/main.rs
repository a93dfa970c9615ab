//! EDR API Server
//!
//! OGC API - Environmental Data Retrieval for station observations.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use edr_api::config::EdrConfig;
use edr_api::loader::load_dataset;
use edr_api::state::AppState;

/// EDR API Server
#[derive(Parser, Debug)]
#[command(name = "edr-api")]
#[command(about = "OGC API - Environmental Data Retrieval server for station observations")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8083", env = "EDR_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "EDR_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Observation dataset (JSON or YAML)
    #[arg(short, long, env = "EDR_DATASET")]
    dataset: PathBuf,

    /// EDR configuration file
    #[arg(short, long, default_value = "config/edr.yaml", env = "EDR_CONFIG")]
    config: PathBuf,

    /// Base URL for links in responses
    #[arg(long, default_value = "http://localhost:8083/edr", env = "EDR_BASE_URL")]
    base_url: String,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting EDR API server");

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let config = EdrConfig::load(&args.config)?;
    let dataset = load_dataset(&args.dataset)?;

    let state = Arc::new(AppState::new(dataset, config, args.base_url).with_metrics(metrics));
    let app = edr_api::router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("EDR API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
