// SPDX-License-Identifier: MIT
//! The logging sink: record model, sink trait, and subscriber setup.
//!
//! Components never touch global logger state directly; each one receives an
//! explicit [`LogSink`] handle and writes [`LogRecord`]s through it. The
//! production sink ([`TracingSink`]) forwards records to `tracing`, whose
//! subscriber is installed once by [`init_logging`]:
//!
//! * a compact console formatting layer, always on;
//! * an optional JSON file layer behind a non-blocking appender, when the
//!   configuration names a log file.
//!
//! [`init_logging`] returns a [`LoggingHandle`] whose [`LoggingHandle::shutdown`]
//! flushes the file appender's buffer. Call it last, on every exit path, or
//! buffered lines may be lost on process exit.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Severity of a [`LogRecord`], mirroring the `tracing` levels in use here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

/// One structured log record: a severity, a message template, and named fields.
///
/// The template uses `{field}` placeholders resolved against `fields` by
/// [`LogRecord::render`]. Fields keep their insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    pub template: &'static str,
    pub fields: Vec<(&'static str, String)>,
}

impl LogRecord {
    pub fn new(
        severity: Severity,
        template: &'static str,
        fields: Vec<(&'static str, String)>,
    ) -> Self {
        Self {
            severity,
            template,
            fields,
        }
    }

    /// Informational record, the only severity the demo scenario emits.
    pub fn info(template: &'static str, fields: Vec<(&'static str, String)>) -> Self {
        Self::new(Severity::Info, template, fields)
    }

    /// Render the template with each `{field}` placeholder substituted.
    ///
    /// Placeholders with no matching field are left verbatim.
    pub fn render(&self) -> String {
        let mut out = self.template.to_string();
        for (key, value) in &self.fields {
            out = out.replace(&format!("{{{key}}}"), value);
        }
        out
    }
}

/// Failure raised by a sink on write. Fatal for this demo: never retried.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("logging sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination for structured log records, injected into components that log.
pub trait LogSink: Send + Sync {
    fn write(&self, record: LogRecord) -> Result<(), SinkError>;
}

/// Production [`LogSink`] forwarding records to the installed `tracing`
/// subscriber. Writes cannot fail here; failures belong to test doubles and
/// to sinks with real I/O of their own.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }

    /// Convenience constructor for the `Arc<dyn LogSink>` shape the
    /// composition root consumes.
    pub fn handle() -> Arc<dyn LogSink> {
        Arc::new(Self)
    }
}

impl LogSink for TracingSink {
    fn write(&self, record: LogRecord) -> Result<(), SinkError> {
        let message = record.render();
        match record.severity {
            Severity::Debug => tracing::debug!(fields = ?record.fields, "{message}"),
            Severity::Info => tracing::info!(fields = ?record.fields, "{message}"),
            Severity::Warn => tracing::warn!(fields = ?record.fields, "{message}"),
            Severity::Error => tracing::error!(fields = ?record.fields, "{message}"),
        }
        Ok(())
    }
}

/// Logging destinations and minimum severity, from the optional config file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum severity directive, `EnvFilter` syntax. `RUST_LOG` wins when set.
    pub min_level: String,
    /// Optional log file path; `None` means console only.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            min_level: "info".to_string(),
            file: None,
        }
    }
}

/// Handle for the installed logging pipeline.
///
/// Holds the file appender's worker guard; dropping it flushes buffered
/// output. Keep the handle alive for the whole program and call
/// [`LoggingHandle::shutdown`] just before exit.
pub struct LoggingHandle {
    guard: Option<WorkerGuard>,
}

impl LoggingHandle {
    /// Flush buffered log output and stop the appender worker.
    pub fn shutdown(self) {
        drop(self.guard);
    }
}

/// Install the global `tracing` subscriber per `cfg`.
///
/// # Errors
/// Returns an error if the severity directive does not parse, the file path
/// has no file name component, or a subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig) -> Result<LoggingHandle> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.min_level))
        .with_context(|| format!("invalid log filter directive {:?}", cfg.min_level))?;

    // Console formatting: plain compact single-line output.
    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let (file_layer, guard) = match &cfg.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log file path {} has no file name", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(rolling::never(dir, name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false).json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("installing the tracing subscriber")?;

    Ok(LoggingHandle { guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_named_fields() {
        let record = LogRecord::info(
            "{name} said {text}",
            vec![("name", "Sky".into()), ("text", "Hello".into())],
        );
        assert_eq!(record.render(), "Sky said Hello");
    }

    #[test]
    fn render_leaves_unknown_placeholders_verbatim() {
        let record = LogRecord::info("{name} said {text}", vec![("name", "Sky".into())]);
        assert_eq!(record.render(), "Sky said {text}");
    }

    #[test]
    fn info_constructor_sets_severity() {
        let record = LogRecord::info("hi", vec![]);
        assert_eq!(record.severity, Severity::Info);
    }

    #[test]
    fn tracing_sink_write_is_infallible() {
        let sink = TracingSink::new();
        let record = LogRecord::info("hi", vec![]);
        assert!(sink.write(record).is_ok());
    }

    #[test]
    fn default_config_is_console_only_at_info() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.min_level, "info");
        assert!(cfg.file.is_none());
    }
}
