//! Configuration parsing for the products service.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Sensible defaults for quick start

use clap::Parser;
use std::path::PathBuf;

/// Products service: a CRUD HTTP API with OpenTelemetry instrumentation.
#[derive(Parser, Debug, Clone)]
#[command(name = "products-service")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "PRODUCTS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PRODUCTS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Data directory for SQLite database
    #[arg(short, long, env = "PRODUCTS_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Size of the SQLite connection pool
    #[arg(long, env = "PRODUCTS_POOL_SIZE", default_value_t = 5)]
    pub pool_size: u32,

    /// OpenTelemetry collector endpoint for trace/metric/log export
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_endpoint: String,
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            log_level: "info".into(),
            pool_size: 5,
            otel_endpoint: "http://localhost:4317".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.otel_endpoint, "http://localhost:4317");
    }
}
