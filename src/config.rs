// SPDX-License-Identifier: MIT
//! Optional JSON configuration file.
//!
//! A `speaker-demo.json` in the working directory supplies settings for the
//! logging and telemetry collaborators. Absence is not an error: the demo
//! starts with defaults (and their environment-variable overrides).

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Deserialize;

use crate::logging::LoggingConfig;
use crate::telemetry::TelemetryConfig;

/// Default file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "speaker-demo.json";

/// Top-level configuration, all sections optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the default configuration. A file that exists
    /// but cannot be read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load("no-such-config.json").expect("load");
        assert_eq!(config.logging.min_level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "logging": {{ "min_level": "debug", "file": "demo.log" }},
                "telemetry": {{ "instrumentation_key": "abc-123" }}
            }}"#
        )
        .expect("write");

        let config = AppConfig::load(file.path()).expect("load");
        assert_eq!(config.logging.min_level, "debug");
        assert_eq!(
            config.logging.file.as_deref(),
            Some(Path::new("demo.log"))
        );
        assert_eq!(config.telemetry.instrumentation_key, "abc-123");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write");

        let err = AppConfig::load(file.path()).expect_err("parse failure");
        assert!(err.to_string().contains("parsing config file"));
    }
}
