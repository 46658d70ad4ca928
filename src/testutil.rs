// SPDX-License-Identifier: MIT
//! Collaborator doubles for tests: recording and failing sinks/collectors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;

use crate::logging::{LogRecord, LogSink, SinkError};
use crate::telemetry::EventCollector;

/// [`LogSink`] storing every record for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().expect("record lock").clone()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, record: LogRecord) -> Result<(), SinkError> {
        self.records.lock().expect("record lock").push(record);
        Ok(())
    }
}

/// [`LogSink`] whose every write fails.
#[derive(Debug, Default)]
pub struct FailingSink;

impl LogSink for FailingSink {
    fn write(&self, _record: LogRecord) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("sink closed".to_string()))
    }
}

/// [`EventCollector`] storing submitted events and counting flushes.
#[derive(Debug, Default)]
pub struct RecordingCollector {
    events: Mutex<Vec<(String, String)>>,
    flushes: AtomicUsize,
}

impl RecordingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitted `(name, message)` pairs, in order.
    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().expect("event lock").clone()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl EventCollector for RecordingCollector {
    fn track_event(&self, name: &str, message: &str) -> Result<()> {
        self.events
            .lock()
            .expect("event lock")
            .push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// [`EventCollector`] whose event submission always fails.
#[derive(Debug, Default)]
pub struct FailingCollector;

impl EventCollector for FailingCollector {
    fn track_event(&self, _name: &str, _message: &str) -> Result<()> {
        anyhow::bail!("collector rejected the event")
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
