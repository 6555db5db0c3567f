//! products-service: a CRUD HTTP service for products with OpenTelemetry
//! instrumentation.
//!
//! Products are stored in SQLite; traces, metrics, and logs are exported to
//! an OpenTelemetry collector over OTLP/gRPC.
//!
//! # Architecture
//!
//! - **HTTP-Native**: REST surface served by axum with graceful shutdown
//! - **Durable**: Products persisted in SQLite with WAL journaling
//! - **Observable**: Explicitly injected telemetry handle; the read path is
//!   wrapped in manually scoped spans and a request counter
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`mapper`]: Pure record/view transforms
//! - [`model`]: Product record, draft, view, and price types
//! - [`server`]: HTTP router and server lifecycle
//! - [`service`]: Business operations (instrumented read path, writes)
//! - [`storage`]: SQLite persistence layer
//! - [`telemetry`]: OpenTelemetry provider bootstrap and span scoping

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // storage::store::StoreError is fine
    clippy::must_use_candidate,      // Not all functions need #[must_use]
    clippy::missing_errors_doc,      // Error docs can be verbose
    clippy::missing_panics_doc       // Panic docs can be verbose
)]

pub mod config;
pub mod mapper;
pub mod model;
pub mod server;
pub mod service;
pub mod storage;
pub mod telemetry;

/// Get the current Unix timestamp in milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_millis() as i64
}
