//! Products service entry point.
//!
//! # Usage
//!
//! ```bash
//! products-service --port 8080 --data-dir ./data --log-level info
//! ```
//!
//! Environment variables can also be used:
//! - `PRODUCTS_PORT`: Port to listen on
//! - `PRODUCTS_DATA_DIR`: Data directory for SQLite
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: Collector endpoint for telemetry export
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

use std::fs;
use std::sync::Arc;

use products_service::config::Config;
use products_service::server::{run_server, AppState};
use products_service::service::ProductService;
use products_service::storage::ProductStore;
use products_service::telemetry::Telemetry;
use tokio::sync::watch;

/// Print startup banner with version and configuration.
fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        r#"
  products-service v{} - CRUD HTTP API

  Configuration:
    Address:    {}:{}
    Data Dir:   {}
    Collector:  {}
    Log Level:  {}

  Press Ctrl+C to shutdown gracefully.
"#,
        version,
        config.host,
        config.port,
        config.data_dir.display(),
        config.otel_endpoint,
        config.log_level
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();

    // Initialize the telemetry pipeline; a bad collector endpoint is fatal
    let telemetry = Arc::new(Telemetry::init(&config)?);

    // Ensure data directory exists
    fs::create_dir_all(&config.data_dir)?;

    // Print startup banner
    print_banner(&config);

    // Open the store and assemble handler state
    let store = ProductStore::open(config.data_dir.join("products.db"), config.pool_size)?;
    let service = ProductService::new(store, Arc::clone(&telemetry));
    let state = Arc::new(AppState { service });

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn signal handler task
    tokio::spawn(async move {
        // Wait for SIGTERM or SIGINT (Ctrl+C)
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    tracing::info!("Received SIGINT (Ctrl+C), initiating shutdown...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating shutdown...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            ctrl_c.await.expect("failed to listen for ctrl+c");
            tracing::info!("Received Ctrl+C, initiating shutdown...");
        }

        // Signal shutdown
        let _ = shutdown_tx.send(true);
    });

    // Run the server
    run_server(&config, state, shutdown_rx).await?;

    // Flush and close the telemetry pipeline; the handle is unusable after
    // this point
    tracing::info!("Flushing telemetry");
    telemetry.shutdown()?;

    tracing::info!("Products service shutdown complete");
    Ok(())
}
