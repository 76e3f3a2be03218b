//! autoscaler-demo: synthetic CPU and memory load over HTTP.
//!
//! This is the application entry point. It loads configuration, initializes
//! tracing, resolves the pod identifier, sets up the Axum router and starts the
//! HTTP server.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use autoscaler_demo::config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER};
use autoscaler_demo::http::start_server;
use autoscaler_demo::{create_router, AppState};

/// autoscaler-demo: an HTTP service that generates load on demand
#[derive(Parser, Debug)]
#[command(name = "autoscaler-demo", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "autoscaler_demo=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Bind address, overrides http.host
    #[arg(long)]
    host: Option<String>,

    /// Listening port, overrides http.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration first: it selects the log format
    let (mut config, config_path) = AppConfig::discover(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let fmt_layer = match config.logging.format {
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(fmt_layer)
        .init();

    match &config_path {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::info!("No configuration file found, using defaults"),
    }

    let state = AppState::new(config.clone());
    tracing::info!(
        pod = %state.pod,
        env_var = %config.pod.env_var,
        load_iterations = config.workload.load_iterations,
        memory_bytes = config.workload.memory_bytes,
        "Resolved instance settings"
    );

    let app = create_router(state);
    start_server(app, &config).await?;

    Ok(())
}
