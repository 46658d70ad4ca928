// SPDX-License-Identifier: MIT
//! Demo crate wiring structured logging and application telemetry together
//! in a console program.
//!
//! There is one trivial domain object, [`speaker::Speaker`], which emits a
//! single informational log record through an injected [`logging::LogSink`].
//! The composition root ([`app::run`]) drives a fixed linear scenario:
//! construct the speaker, speak once, submit one named event to an
//! [`telemetry::EventCollector`], flush. The binary's entry point acquires
//! the real collaborators (a `tracing`-backed sink and an OTLP-backed
//! collector), maps any failure to a non-zero exit status, and shuts the
//! logging pipeline down on every path.
//!
//! Collaborators are passed as explicit handles; no DI container, no ambient
//! logger state reached from components.
//!
//! # Quick Start
//! ```no_run
//! use std::sync::Arc;
//! use speaker_demo::logging::{init_logging, LoggingConfig, TracingSink};
//! use speaker_demo::telemetry::{OtlpCollector, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let logging = init_logging(&LoggingConfig::default())?;
//!     let collector = OtlpCollector::new(&TelemetryConfig::default())?;
//!     speaker_demo::app::run(TracingSink::handle(), &collector)?;
//!     collector.shutdown()?;
//!     logging.shutdown();
//!     Ok(())
//! }
//! ```
pub mod app;
pub mod config;
pub mod logging;
pub mod speaker;
pub mod telemetry;
pub mod testutil;

#[cfg(test)]
mod tests {
    use super::telemetry::{OtlpCollector, TelemetryConfig};

    #[tokio::test]
    async fn collector_builds_and_shuts_down() {
        let collector = OtlpCollector::new(&TelemetryConfig::default()).expect("collector init");
        collector.shutdown().expect("shutdown");
    }
}
