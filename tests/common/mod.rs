//! Test utilities and fixtures for products-service tests.
//!
//! Provides:
//! - Temporary database fixtures
//! - Telemetry handles wired to in-memory exporters
//! - Draft builders

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use opentelemetry_sdk::logs::LoggerProvider;
use opentelemetry_sdk::metrics::{ManualReader, PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::runtime;
use opentelemetry_sdk::testing::metrics::InMemoryMetricsExporter;
use opentelemetry_sdk::testing::trace::InMemorySpanExporter;
use opentelemetry_sdk::trace::TracerProvider;
use tempfile::TempDir;

use products_service::model::{Price, ProductDraft};
use products_service::storage::ProductStore;
use products_service::telemetry::Telemetry;

/// Test fixture that manages a temporary database directory.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestFixture {
    /// Temporary directory for test database
    pub temp_dir: TempDir,
    /// Path to the database file
    pub db_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with a temporary database directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        Self { temp_dir, db_path }
    }

    /// Open a product store on the fixture database.
    pub fn store(&self) -> ProductStore {
        ProductStore::open(&self.db_path, 5).expect("failed to open store")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Telemetry handle whose spans land in an in-memory exporter.
///
/// Metrics are recorded but not exported; logs are dropped.
pub fn telemetry_with_span_capture() -> (Arc<Telemetry>, InMemorySpanExporter) {
    let span_exporter = InMemorySpanExporter::default();
    let tracer_provider = TracerProvider::builder()
        .with_simple_exporter(span_exporter.clone())
        .build();

    let meter_provider = SdkMeterProvider::builder()
        .with_reader(ManualReader::builder().build())
        .build();

    let logger_provider = LoggerProvider::builder().build();

    let telemetry = Telemetry::from_parts(tracer_provider, meter_provider, logger_provider);
    (Arc::new(telemetry), span_exporter)
}

/// Telemetry handle whose metrics land in an in-memory exporter.
///
/// Returns a clone of the meter provider so tests can force a flush.
/// Must be called from within a tokio runtime.
pub fn telemetry_with_metric_capture() -> (Arc<Telemetry>, InMemoryMetricsExporter, SdkMeterProvider)
{
    let span_exporter = InMemorySpanExporter::default();
    let tracer_provider = TracerProvider::builder()
        .with_simple_exporter(span_exporter)
        .build();

    let metric_exporter = InMemoryMetricsExporter::default();
    let reader = PeriodicReader::builder(metric_exporter.clone(), runtime::Tokio).build();
    let meter_provider = SdkMeterProvider::builder().with_reader(reader).build();
    let provider_handle = meter_provider.clone();

    let logger_provider = LoggerProvider::builder().build();

    let telemetry = Telemetry::from_parts(tracer_provider, meter_provider, logger_provider);
    (Arc::new(telemetry), metric_exporter, provider_handle)
}

/// Build a valid draft with the given title.
pub fn draft(title: &str, price: f64) -> ProductDraft {
    ProductDraft {
        title: title.to_string(),
        description: Some(format!("{title} description")),
        price: Price::try_from(price).expect("invalid test price"),
    }
}
