//! URL Redirect Server
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                  REDIRECTOR                    │
//!                    │                                                │
//!   Client Request   │  ┌─────────┐    ┌────────────────────────────┐ │
//!   ─────────────────┼─▶│  http   │───▶│       resolver chain       │ │
//!                    │  │ server  │    │  store → yaml → json       │ │
//!                    │  └─────────┘    └─────┬──────────────────────┘ │
//!                    │                       │                        │
//!                    │        hit ▼          │          ▼ miss        │
//!   Client Response  │  302 Found + Location │   200 "Hello, world!"  │
//!   ◀────────────────┼───────────────────────┴────────────────────── │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐  │
//!                    │  │           Cross-Cutting Concerns          │  │
//!                    │  │  config │ lifecycle │ stats │ metrics     │  │
//!                    │  └──────────────────────────────────────────┘  │
//!                    └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redirector::config::{self, ServerConfig};
use redirector::http::HttpServer;
use redirector::lifecycle::{self, Shutdown};
use redirector::observability::metrics;

/// Command-line flags; each overrides its file-config counterpart.
#[derive(Debug, Parser)]
#[command(name = "redirector", about = "Path-to-URL redirect server")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON mapping file (flat object of "path": "url" pairs).
    #[arg(long)]
    json: Option<String>,

    /// YAML mapping file (sequence of {path, url} records).
    #[arg(long)]
    yaml: Option<String>,

    /// Persistent store file.
    #[arg(long)]
    db: Option<String>,

    /// Listen address, e.g. 0.0.0.0:8080.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match config::load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("redirector: configuration error: {e}");
                std::process::exit(1);
            }
        },
        None => ServerConfig::default(),
    };
    apply_overrides(&mut config, &args);

    // Initialize tracing subscriber; all diagnostics (including the store's
    // periodic stats) go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "redirector={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("redirector v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        json = %config.sources.json_path,
        yaml = %config.sources.yaml_path,
        db = %config.storage.db_path,
        stats_interval_secs = config.storage.stats_interval_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let app = match lifecycle::build_application(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(&config, Arc::clone(&app.chain));
    server.run(listener, server_shutdown).await?;

    // Server drained; stop the reporter and release the store.
    if let Err(e) = app.store.close().await {
        tracing::warn!(error = %e, "Store close reported an error");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn apply_overrides(config: &mut ServerConfig, args: &Args) {
    if let Some(json) = &args.json {
        config.sources.json_path = json.clone();
    }
    if let Some(yaml) = &args.yaml {
        config.sources.yaml_path = yaml.clone();
    }
    if let Some(db) = &args.db {
        config.storage.db_path = db.clone();
    }
    if let Some(listen) = &args.listen {
        config.listener.bind_address = listen.clone();
    }
}
