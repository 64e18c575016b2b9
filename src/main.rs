//! Greeting service.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │               GREETING SERVICE               │
//!     Client Request       │  ┌─────────┐    ┌───────────┐    ┌────────┐ │
//!     ─────────────────────┼─▶│   net   │───▶│   http    │───▶│ greet  │ │
//!                          │  │listener │    │ request   │    │handler │ │
//!                          │  └─────────┘    │ log + ID  │    └───┬────┘ │
//!                          │                 └───────────┘        │      │
//!     Client Response      │                                      │      │
//!     ◀────────────────────┼──────────────────────────────────────┘      │
//!                          │                                             │
//!                          │  ┌─────────┐ ┌──────────────┐ ┌───────────┐ │
//!                          │  │ config  │ │observability │ │ lifecycle │ │
//!                          │  │+ reload │ │ logs/metrics │ │ shutdown  │ │
//!                          │  └─────────┘ └──────────────┘ └───────────┘ │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use greeting_service::config::{load_config, ConfigWatcher, ServiceConfig};
use greeting_service::http::GreetingServer;
use greeting_service::lifecycle::{shutdown_signal, Shutdown};
use greeting_service::net;
use greeting_service::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "greeting-service", version)]
#[command(about = "HTTP service that greets every request and logs the client address", long_about = None)]
struct Cli {
    /// TOML configuration file; watched for changes when given.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }

    logging::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "greeting-service starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_log = config.request_log.enabled,
        client_address = ?config.request_log.client_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = net::bind(&config.listener).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to start server");
    })?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let _watcher = match &cli.config {
        Some(path) => {
            let (watcher, mut file_updates) = ConfigWatcher::new(path);
            let bind_override = cli.bind.clone();
            tokio::spawn(async move {
                while let Some(mut new_config) = file_updates.recv().await {
                    if let Some(bind) = &bind_override {
                        new_config.listener.bind_address = bind.clone();
                    }
                    if update_tx.send(new_config).is_err() {
                        break;
                    }
                }
            });
            match watcher.run() {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    tracing::warn!(error = %e, "Config watcher unavailable, hot reload disabled");
                    None
                }
            }
        }
        None => None,
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = GreetingServer::new(config);
    server.run(listener, update_rx, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
