// SPDX-License-Identifier: MIT
//! The telemetry collector: named application events over OTLP.
//!
//! The collector is identified by an instrumentation key and accepts named
//! events with free-text messages. Events are buffered by a batch exporter
//! and transmitted asynchronously; [`OtlpCollector::flush`] is a bounded wait
//! for the local queue to drain, not a delivery guarantee; the remote end
//! may still drop or delay what was handed over.
//!
//! The collector owns its tracer provider outright. Nothing is registered
//! globally; callers hold the handle and shut it down explicitly.
//!
//! # Threading Model
//! The batch exporter spawns a worker thread (blocking HTTP client). No async
//! runtime handle is required beyond constructing the collector inside a
//! Tokio context.

use anyhow::Result;
use opentelemetry::trace::{Span as _, SpanKind, Tracer as _, TracerProvider as _};
use opentelemetry::KeyValue;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use serde::Deserialize;

/// Configuration for the telemetry collector.
///
/// Values are sourced from environment variables if available:
/// * `OTEL_EXPORTER_OTLP_ENDPOINT` – base endpoint (e.g. `http://localhost:4318`).
/// * `OTEL_SERVICE_NAME` – service name resource attribute.
/// * `TELEMETRY_INSTRUMENTATION_KEY` – instrumentation key resource attribute.
///
/// Defaults are used when variables are absent; the optional configuration
/// file overrides both. All fields are owned strings to simplify passing
/// across threads and avoiding lifetime issues.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Base OTLP endpoint (without per-signal suffix). Example: `http://localhost:4318`.
    pub endpoint: String,
    /// Instrumentation key identifying this application to the collector.
    pub instrumentation_key: String,
    /// Service name reported in resource attributes (`service.name`).
    pub service_name: String,
    /// Service version reported in resource attributes (`service.version`).
    pub service_version: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4318".to_string()),
            instrumentation_key: std::env::var("TELEMETRY_INSTRUMENTATION_KEY")
                .unwrap_or_else(|_| "local-dev".to_string()),
            service_name: std::env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "speaker-demo".to_string()),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Destination for named application events, injected into the composition
/// root.
pub trait EventCollector: Send + Sync {
    /// Submit one named event with a free-text message.
    fn track_event(&self, name: &str, message: &str) -> Result<()>;

    /// Drain the local event queue to the exporter. Bounded wait; delivery at
    /// the remote end is still best-effort.
    fn flush(&self) -> Result<()>;
}

/// OTLP-backed [`EventCollector`].
///
/// Each tracked event becomes one zero-duration span named after the event,
/// carrying the message as an attribute; the instrumentation key rides in the
/// resource attributes. Always call [`OtlpCollector::shutdown`] at a
/// controlled point before process exit, or final batches may be lost.
pub struct OtlpCollector {
    provider: SdkTracerProvider,
}

impl OtlpCollector {
    /// Build the exporter and batch provider for `cfg`.
    ///
    /// # Errors
    /// Returns an error if the exporter builder fails (e.g. invalid endpoint
    /// URL).
    pub fn new(cfg: &TelemetryConfig) -> Result<Self> {
        let resource = Resource::builder()
            .with_service_name(cfg.service_name.clone())
            .with_attributes([
                KeyValue::new("service.version", cfg.service_version.clone()),
                KeyValue::new(
                    "telemetry.instrumentation_key",
                    cfg.instrumentation_key.clone(),
                ),
            ])
            .build();

        // HTTP binary OTLP, per-signal suffix appended here
        let base = cfg.endpoint.trim_end_matches('/');
        let exporter = SpanExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(format!("{}/v1/traces", base))
            .build()?;

        let provider = SdkTracerProvider::builder()
            .with_batch_exporter(exporter)
            .with_resource(resource)
            .build();

        Ok(Self { provider })
    }

    /// Flush and shut down the provider.
    ///
    /// Returns `Ok(())` if the provider shut down cleanly; otherwise an error
    /// naming the failing component.
    pub fn shutdown(self) -> Result<()> {
        if let Err(e) = self.provider.shutdown() {
            anyhow::bail!("telemetry collector: {e}");
        }
        Ok(())
    }
}

impl EventCollector for OtlpCollector {
    fn track_event(&self, name: &str, message: &str) -> Result<()> {
        let tracer = self.provider.tracer("speaker-demo");
        let builder = tracer
            .span_builder(name.to_string())
            .with_kind(SpanKind::Internal)
            .with_attributes([
                KeyValue::new("event.name", name.to_string()),
                KeyValue::new("message", message.to_string()),
            ]);
        let mut span = tracer.build(builder);
        span.end();
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Err(e) = self.provider.force_flush() {
            anyhow::bail!("telemetry flush: {e}");
        }
        Ok(())
    }
}
