// SPDX-License-Identifier: MIT
//! The one domain object of the demo.

use std::sync::Arc;

use crate::logging::{LogRecord, LogSink, SinkError};

/// Holds a display name and emits one informational log record on request.
///
/// The name has no format constraint and may be reassigned freely before
/// [`Speaker::speak`]; an unset name simply logs an empty `name` field.
pub struct Speaker {
    pub name: String,
    sink: Arc<dyn LogSink>,
}

impl Speaker {
    /// Create a speaker bound to a logging sink, with an empty name.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            name: String::new(),
            sink,
        }
    }

    /// Emit exactly one informational record with `name` and `text` fields.
    ///
    /// A sink write failure propagates unchanged; there is no retry and no
    /// suppression.
    pub fn speak(&self, text: &str) -> Result<(), SinkError> {
        self.sink.write(LogRecord::info(
            "{name} said {text}",
            vec![("name", self.name.clone()), ("text", text.to_string())],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Severity;
    use crate::testutil::{FailingSink, RecordingSink};

    fn fields(record: &LogRecord) -> Vec<(&'static str, String)> {
        record.fields.clone()
    }

    #[test]
    fn speak_emits_one_info_record_with_name_and_text() {
        let sink = Arc::new(RecordingSink::new());
        let mut speaker = Speaker::new(sink.clone());
        speaker.name = "Sky".to_string();

        speaker.speak("Hello").expect("speak");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Info);
        assert_eq!(
            fields(&records[0]),
            vec![("name", "Sky".to_string()), ("text", "Hello".to_string())]
        );
    }

    #[test]
    fn renaming_changes_only_the_name_field() {
        let sink = Arc::new(RecordingSink::new());
        let mut speaker = Speaker::new(sink.clone());
        speaker.name = "Sky".to_string();
        speaker.speak("Hello").expect("speak");

        speaker.name = "River".to_string();
        speaker.speak("Hello").expect("speak");

        let records = sink.records();
        assert_eq!(fields(&records[0])[0], ("name", "Sky".to_string()));
        assert_eq!(fields(&records[1])[0], ("name", "River".to_string()));
        assert_eq!(fields(&records[0])[1], fields(&records[1])[1]);
    }

    #[test]
    fn changing_text_changes_only_the_text_field() {
        let sink = Arc::new(RecordingSink::new());
        let mut speaker = Speaker::new(sink.clone());
        speaker.name = "Sky".to_string();
        speaker.speak("Hello").expect("speak");
        speaker.speak("Goodbye").expect("speak");

        let records = sink.records();
        assert_eq!(fields(&records[0])[0], fields(&records[1])[0]);
        assert_eq!(fields(&records[1])[1], ("text", "Goodbye".to_string()));
    }

    #[test]
    fn unset_name_logs_an_empty_name_field() {
        let sink = Arc::new(RecordingSink::new());
        let speaker = Speaker::new(sink.clone());
        speaker.speak("Hello").expect("speak");

        assert_eq!(fields(&sink.records()[0])[0], ("name", String::new()));
    }

    #[test]
    fn sink_failure_surfaces_from_speak() {
        let mut speaker = Speaker::new(Arc::new(FailingSink));
        speaker.name = "Sky".to_string();

        let err = speaker.speak("Hello").expect_err("sink failure");
        assert!(matches!(err, SinkError::Unavailable(_)));
    }
}
