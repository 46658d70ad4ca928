// SPDX-License-Identifier: MIT
//! The composition root: the fixed demo scenario, run once.
//!
//! Control flow is strictly linear: construct the speaker, speak, track one
//! telemetry event, flush. No branching, no loops, no retries; the first
//! failing step aborts the run and propagates its error.

use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::logging::LogSink;
use crate::speaker::Speaker;
use crate::telemetry::EventCollector;

/// Display name assigned to the speaker.
pub const SPEAKER_NAME: &str = "Sky";
/// Text the speaker is asked to say.
pub const GREETING: &str = "Hello";
/// Name of the telemetry event submitted for the greeting.
pub const GREETING_EVENT: &str = "speaker-greeting";

/// Run the demo scenario against the injected collaborators.
///
/// Emits exactly one log record through `sink` and submits exactly one named
/// event to `collector`, then flushes the collector. The flush is a bounded
/// wait for the local queue to drain; delivery at the remote end remains
/// best-effort and is not confirmed here.
pub fn run(sink: Arc<dyn LogSink>, collector: &dyn EventCollector) -> Result<()> {
    let mut speaker = Speaker::new(sink);
    speaker.name = SPEAKER_NAME.to_string();

    speaker
        .speak(GREETING)
        .context("emitting the greeting log record")?;

    let message = format!("{} sent a greeting", speaker.name);
    collector
        .track_event(GREETING_EVENT, &message)
        .context("submitting the greeting telemetry event")?;

    collector
        .flush()
        .context("flushing pending telemetry events")?;

    Ok(())
}
