//! OpenTelemetry provider bootstrap.
//!
//! Builds the tracer, meter, and logger providers against a single OTLP
//! collector endpoint and hands them out as one explicitly injected handle.
//! Each signal gets the processor its shape calls for: spans are exported
//! synchronously, metrics are read periodically, log records are batched.

pub mod span;

use std::time::Duration;

use opentelemetry::metrics::{Counter, MeterProvider as _};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::logs::LoggerProvider;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::{self as sdktrace, TracerProvider};
use opentelemetry_sdk::Resource;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Instrumentation scope name reported with every signal.
const INSTRUMENTATION_NAME: &str = "products-service";

/// Flush interval for the periodic metric reader.
const METRIC_INTERVAL: Duration = Duration::from_secs(15);

/// Error type for telemetry lifecycle operations.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to initialize telemetry: {0}")]
    Init(String),

    #[error("failed to shut down telemetry: {0}")]
    Shutdown(String),
}

/// Process-wide telemetry handle.
///
/// Constructed once at startup and shared by reference; all contained
/// providers and instruments are safe for concurrent use. After
/// [`Telemetry::shutdown`] the handle must not be used again.
pub struct Telemetry {
    tracer: sdktrace::Tracer,
    db_requests: Counter<u64>,
    tracer_provider: TracerProvider,
    meter_provider: SdkMeterProvider,
    logger_provider: LoggerProvider,
}

impl Telemetry {
    /// Build the full OTLP pipeline against the configured collector and
    /// install the global `tracing` subscriber (console format plus the
    /// bridge routing log events into the logger provider).
    ///
    /// Fails fast: any exporter that cannot be constructed aborts startup.
    /// There is no degraded mode and no runtime retry.
    pub fn init(config: &Config) -> Result<Self, TelemetryError> {
        let resource = Resource::new(vec![KeyValue::new("service.name", "products-service")]);
        let endpoint = &config.otel_endpoint;

        // Traces: synchronous export, one span at a time.
        let span_exporter = opentelemetry_otlp::new_exporter()
            .tonic()
            .with_endpoint(endpoint)
            .with_protocol(Protocol::Grpc)
            .build_span_exporter()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;

        let tracer_provider = TracerProvider::builder()
            .with_config(sdktrace::Config::default().with_resource(resource.clone()))
            .with_simple_exporter(span_exporter)
            .build();

        // Metrics: periodic reader on a fixed interval.
        let meter_provider = opentelemetry_otlp::new_pipeline()
            .metrics(opentelemetry_sdk::runtime::Tokio)
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(endpoint)
                    .with_protocol(Protocol::Grpc),
            )
            .with_resource(resource.clone())
            .with_period(METRIC_INTERVAL)
            .build()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;

        // Logs: batched export.
        let log_exporter = opentelemetry_otlp::new_exporter()
            .tonic()
            .with_endpoint(endpoint)
            .with_protocol(Protocol::Grpc)
            .build_log_exporter()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;

        let logger_provider = LoggerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(log_exporter, opentelemetry_sdk::runtime::Tokio)
            .build();

        let telemetry = Self::from_parts(tracer_provider, meter_provider, logger_provider);
        telemetry.install_subscriber(&config.log_level);
        Ok(telemetry)
    }

    /// Assemble a handle from already-built providers.
    ///
    /// Used by [`Telemetry::init`] and by tests that substitute in-memory
    /// exporters. Does not touch global subscriber state.
    pub fn from_parts(
        tracer_provider: TracerProvider,
        meter_provider: SdkMeterProvider,
        logger_provider: LoggerProvider,
    ) -> Self {
        let tracer = tracer_provider.tracer(INSTRUMENTATION_NAME);
        let meter = meter_provider.meter(INSTRUMENTATION_NAME);
        let db_requests = meter
            .u64_counter("app.db.requests")
            .with_description("Read requests against the product store")
            .with_unit("1")
            .init();

        Self {
            tracer,
            db_requests,
            tracer_provider,
            meter_provider,
            logger_provider,
        }
    }

    /// Install the global tracing subscriber: RUST_LOG-style filtering, a
    /// console formatter, and the OpenTelemetry log bridge.
    ///
    /// # Panics
    ///
    /// Panics if a subscriber has already been installed.
    fn install_subscriber(&self, log_level: &str) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        let bridge = OpenTelemetryTracingBridge::new(&self.logger_provider);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .with(bridge)
            .init();

        tracing::info!(service = INSTRUMENTATION_NAME, "Telemetry initialized");
    }

    /// The tracer used for manual span scoping.
    pub fn tracer(&self) -> &sdktrace::Tracer {
        &self.tracer
    }

    /// Count one read request, independent of its outcome.
    pub fn record_db_request(&self) {
        self.db_requests.add(1, &[]);
    }

    /// Flush and shut down all three providers.
    ///
    /// One-shot: the handle must not be used after this returns.
    pub fn shutdown(&self) -> Result<(), TelemetryError> {
        self.tracer_provider
            .shutdown()
            .map_err(|e| TelemetryError::Shutdown(e.to_string()))?;
        self.meter_provider
            .shutdown()
            .map_err(|e| TelemetryError::Shutdown(e.to_string()))?;
        self.logger_provider
            .shutdown()
            .map_err(|e| TelemetryError::Shutdown(e.to_string()))?;
        Ok(())
    }
}
