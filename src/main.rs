// SPDX-License-Identifier: MIT
use std::io::Read as _;

use anyhow::{Context as _, Result};
use speaker_demo::app;
use speaker_demo::config::{AppConfig, DEFAULT_CONFIG_FILE};
use speaker_demo::logging::{init_logging, TracingSink};
use speaker_demo::telemetry::OtlpCollector;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(DEFAULT_CONFIG_FILE)?;
    let logging = init_logging(&config.logging)?;
    info!("speaker demo starting");

    let result = run_demo(&config);
    match &result {
        Ok(()) => {
            info!("speaker demo finished");
            wait_for_acknowledgment();
        }
        // Logged once here, then re-raised for a non-zero exit.
        Err(err) => {
            let detail = format!("{err:#}");
            error!(error = %detail, "speaker demo failed");
        }
    }

    // Unconditional: flushes buffered log lines on success and failure alike.
    logging.shutdown();
    result
}

/// Acquire the telemetry collector and run the scenario against it.
///
/// The collector is shut down whether or not the scenario succeeded, so a
/// failed run still flushes whatever it managed to queue.
fn run_demo(config: &AppConfig) -> Result<()> {
    let collector = OtlpCollector::new(&config.telemetry)
        .context("constructing the telemetry collector")?;

    let run_result = app::run(TracingSink::handle(), &collector);
    let shutdown_result = collector.shutdown();
    run_result.and(shutdown_result)
}

/// Demo convenience: hold the console open until the user reacts.
fn wait_for_acknowledgment() {
    println!("press enter to exit");
    let _ = std::io::stdin().read(&mut [0u8; 1]);
}
