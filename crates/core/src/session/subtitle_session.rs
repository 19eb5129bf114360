use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::alignment::domain::alignment_engine::{AlignmentEngine, PositionChange};
use crate::alignment::domain::alignment_table::AlignmentTable;
use crate::alignment::domain::segment::Segmenter;
use crate::document::domain::document_reader::DocumentError;
use crate::session::session_logger::{SessionLogger, StatusKind};
use crate::subtitle::domain::subtitle_sink::SubtitleSink;
use crate::transcript::domain::transcript_event::{TranscriptEvent, TranscriptSourceError};

/// Which of the two texts a document supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Original,
    Translated,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Original => write!(f, "Original"),
            DocumentRole::Translated => write!(f, "Translated"),
        }
    }
}

/// Which texts were absent when listening was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingText {
    Original,
    Translated,
    Both,
}

impl fmt::Display for MissingText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingText::Original => write!(f, "original text"),
            MissingText::Translated => write!(f, "translated text"),
            MissingText::Both => write!(f, "original and translated texts"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot start listening: missing {0}")]
    MissingInput(MissingText),
    #[error("speech recognition error: {0}")]
    TranscriptSource(#[from] TranscriptSourceError),
}

enum SessionState {
    Idle,
    Listening(AlignmentEngine),
}

/// Holds the loaded text pair and drives one listening session at a time.
///
/// Lifecycle: `Idle -> Listening` on [`start`](Self::start) (both texts must
/// be loaded), back to `Idle` on [`stop`](Self::stop), when the source ends,
/// or on an unrecoverable source error. The engine and its position exist
/// only while listening; updates delivered while idle are ignored.
pub struct SubtitleSession {
    segmenter: Segmenter,
    original_text: String,
    translated_text: String,
    table: Arc<AlignmentTable>,
    state: SessionState,
    sink: Box<dyn SubtitleSink>,
    logger: Box<dyn SessionLogger>,
}

impl SubtitleSession {
    pub fn new(sink: Box<dyn SubtitleSink>, logger: Box<dyn SessionLogger>) -> Self {
        Self::with_segmenter(Segmenter::default(), sink, logger)
    }

    pub fn with_segmenter(
        segmenter: Segmenter,
        sink: Box<dyn SubtitleSink>,
        logger: Box<dyn SessionLogger>,
    ) -> Self {
        Self {
            segmenter,
            original_text: String::new(),
            translated_text: String::new(),
            table: Arc::new(AlignmentTable::default()),
            state: SessionState::Idle,
            sink,
            logger,
        }
    }

    /// Replaces one side's text wholesale and rebuilds the table.
    ///
    /// While listening, the running engine switches to the new table and
    /// its position is reset.
    pub fn load(&mut self, role: DocumentRole, name: &str, text: String) {
        match role {
            DocumentRole::Original => self.original_text = text,
            DocumentRole::Translated => self.translated_text = text,
        }
        self.rebuild_table();
        self.logger
            .status(&format!("{role} text loaded: {name}"), StatusKind::Info);
    }

    /// Reports an ingestion failure; the previously loaded text is kept.
    pub fn load_failed(&mut self, role: DocumentRole, error: &DocumentError) {
        let message = format!("Error loading {} text: {error}", role.to_string().to_lowercase());
        self.logger.status(&message, StatusKind::Error);
    }

    pub fn table(&self) -> &AlignmentTable {
        &self.table
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, SessionState::Listening(_))
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            SessionState::Listening(engine) => engine.current_index(),
            SessionState::Idle => None,
        }
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if let Some(missing) = self.missing_text() {
            self.logger.status(
                "Please upload both original and translated texts first.",
                StatusKind::Error,
            );
            return Err(SessionError::MissingInput(missing));
        }
        if self.is_listening() {
            log::debug!("start() while already listening; ignored");
            return Ok(());
        }

        log::info!("Starting session with {} aligned segments", self.table.len());
        self.state = SessionState::Listening(AlignmentEngine::new(self.table.clone()));
        Ok(())
    }

    /// Ends the session and discards the tracked position. Safe to call
    /// when not listening.
    pub fn stop(&mut self) {
        if !self.is_listening() {
            return;
        }
        self.state = SessionState::Idle;
        self.logger.status("Stopped listening", StatusKind::Info);
    }

    /// Matches one transcript snapshot and forwards any position change to
    /// the sink. A no-op while idle.
    pub fn on_transcript_update(&mut self, transcript: &str) -> Option<PositionChange> {
        let SessionState::Listening(engine) = &mut self.state else {
            return None;
        };

        let t0 = Instant::now();
        let change = engine.on_transcript_update(transcript);
        self.logger
            .timing("match", t0.elapsed().as_secs_f64() * 1000.0);
        self.logger
            .metric("transcript_chars", transcript.chars().count() as f64);

        if let Some(ref change) = change {
            log::debug!("Position -> {}: {}", change.index, change.source);
            self.logger.metric("position", change.index as f64);
            self.sink.show(change);
        }
        change
    }

    /// Applies one event from the transcript source.
    ///
    /// Unrecoverable source errors end the session and are returned; every
    /// other event yields at most a position change.
    pub fn handle_event(
        &mut self,
        event: TranscriptEvent,
    ) -> Result<Option<PositionChange>, SessionError> {
        if !self.is_listening() {
            return Ok(None);
        }

        match event {
            TranscriptEvent::Started => {
                self.logger.status("Listening...", StatusKind::Info);
                Ok(None)
            }
            TranscriptEvent::Snapshot(transcript) => Ok(self.on_transcript_update(&transcript)),
            TranscriptEvent::Ended => {
                self.stop();
                Ok(None)
            }
            TranscriptEvent::Error(error) => {
                self.logger.status(
                    &format!("Speech recognition error: {error}"),
                    StatusKind::Error,
                );
                if error.is_recoverable() {
                    Ok(None)
                } else {
                    self.stop();
                    Err(SessionError::TranscriptSource(error))
                }
            }
        }
    }

    /// Emits the logger's end-of-session summary.
    pub fn summary(&self) {
        self.logger.summary();
    }

    fn missing_text(&self) -> Option<MissingText> {
        match (self.original_text.is_empty(), self.translated_text.is_empty()) {
            (true, true) => Some(MissingText::Both),
            (true, false) => Some(MissingText::Original),
            (false, true) => Some(MissingText::Translated),
            (false, false) => None,
        }
    }

    fn rebuild_table(&mut self) {
        self.table = Arc::new(AlignmentTable::build_with(
            &self.segmenter,
            &self.original_text,
            &self.translated_text,
        ));
        if let SessionState::Listening(engine) = &mut self.state {
            log::info!("Text reloaded while listening; position reset");
            engine.replace_table(self.table.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // ─── Stubs ───

    struct RecordingSink {
        shown: Arc<Mutex<Vec<String>>>,
    }

    impl SubtitleSink for RecordingSink {
        fn display(&mut self, text: &str) {
            self.shown.lock().unwrap().push(text.to_string());
        }
    }

    struct RecordingLogger {
        statuses: Arc<Mutex<Vec<(StatusKind, String)>>>,
    }

    impl SessionLogger for RecordingLogger {
        fn status(&mut self, message: &str, kind: StatusKind) {
            self.statuses.lock().unwrap().push((kind, message.to_string()));
        }
        fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
        fn metric(&mut self, _name: &str, _value: f64) {}
    }

    struct Harness {
        session: SubtitleSession,
        shown: Arc<Mutex<Vec<String>>>,
        statuses: Arc<Mutex<Vec<(StatusKind, String)>>>,
    }

    impl Harness {
        fn new() -> Self {
            let shown = Arc::new(Mutex::new(Vec::new()));
            let statuses = Arc::new(Mutex::new(Vec::new()));
            let session = SubtitleSession::new(
                Box::new(RecordingSink {
                    shown: shown.clone(),
                }),
                Box::new(RecordingLogger {
                    statuses: statuses.clone(),
                }),
            );
            Self {
                session,
                shown,
                statuses,
            }
        }

        fn loaded() -> Self {
            let mut h = Self::new();
            h.session.load(
                DocumentRole::Original,
                "speech.txt",
                "Welcome to the meeting. Today we discuss the budget. Thank you for coming."
                    .to_string(),
            );
            h.session.load(
                DocumentRole::Translated,
                "discours.txt",
                "Bienvenue à la réunion. Aujourd'hui nous discutons du budget. Merci d'être venus."
                    .to_string(),
            );
            h
        }

        fn shown(&self) -> Vec<String> {
            self.shown.lock().unwrap().clone()
        }

        fn last_status(&self) -> Option<(StatusKind, String)> {
            self.statuses.lock().unwrap().last().cloned()
        }
    }

    #[test]
    fn test_start_without_texts_fails() {
        let mut h = Harness::new();
        assert_eq!(
            h.session.start(),
            Err(SessionError::MissingInput(MissingText::Both))
        );
        assert!(!h.session.is_listening());
        assert_eq!(
            h.last_status(),
            Some((
                StatusKind::Error,
                "Please upload both original and translated texts first.".to_string()
            ))
        );
    }

    #[test]
    fn test_start_with_empty_translation_fails() {
        let mut h = Harness::new();
        h.session
            .load(DocumentRole::Original, "a.txt", "Some source sentence.".to_string());
        h.session.load(DocumentRole::Translated, "b.txt", String::new());
        assert_eq!(
            h.session.start(),
            Err(SessionError::MissingInput(MissingText::Translated))
        );
    }

    #[test]
    fn test_start_after_loading_succeeds() {
        let mut h = Harness::loaded();
        assert!(h.session.start().is_ok());
        assert!(h.session.is_listening());
        assert_eq!(h.session.current_index(), None);
    }

    #[test]
    fn test_missing_input_is_recoverable() {
        let mut h = Harness::new();
        assert!(h.session.start().is_err());
        h.session
            .load(DocumentRole::Original, "a.txt", "Some source sentence.".to_string());
        h.session
            .load(DocumentRole::Translated, "b.txt", "Une phrase source.".to_string());
        assert!(h.session.start().is_ok());
    }

    #[test]
    fn test_load_reports_status() {
        let h = Harness::loaded();
        assert_eq!(
            h.last_status(),
            Some((StatusKind::Info, "Translated text loaded: discours.txt".to_string()))
        );
        assert_eq!(h.session.table().len(), 3);
    }

    #[test]
    fn test_load_failure_reports_error_and_keeps_text() {
        let mut h = Harness::loaded();
        h.session.load_failed(
            DocumentRole::Original,
            &DocumentError::UnsupportedFormat("odt".to_string()),
        );
        assert_eq!(
            h.last_status(),
            Some((
                StatusKind::Error,
                "Error loading original text: Unsupported file type: .odt".to_string()
            ))
        );
        assert_eq!(h.session.table().len(), 3);
    }

    #[test]
    fn test_update_forwards_translation_to_sink() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        let change = h.session.on_transcript_update("today we discuss the budget").unwrap();
        assert_eq!(change.index, 1);
        assert_eq!(h.shown(), vec!["Aujourd'hui nous discutons du budget"]);
    }

    #[test]
    fn test_repeated_snapshot_displays_once() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        h.session.on_transcript_update("welcome to the meeting");
        h.session.on_transcript_update("welcome to the meeting");
        assert_eq!(h.shown().len(), 1);
    }

    #[test]
    fn test_update_while_idle_is_noop() {
        let mut h = Harness::loaded();
        assert!(h.session.on_transcript_update("welcome to the meeting").is_none());
        assert!(h.shown().is_empty());
    }

    #[test]
    fn test_update_after_stop_is_noop() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        h.session.stop();
        assert!(h.session.on_transcript_update("welcome to the meeting").is_none());
        assert!(h.shown().is_empty());
    }

    #[test]
    fn test_stop_twice_is_safe() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        h.session.stop();
        h.session.stop();
        assert!(!h.session.is_listening());
        let stops = h
            .statuses
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, m)| m == "Stopped listening")
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_stop_when_never_started_is_safe() {
        let mut h = Harness::new();
        h.session.stop();
        assert!(!h.session.is_listening());
    }

    #[test]
    fn test_restart_discards_position() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        h.session.on_transcript_update("thank you for coming");
        h.session.stop();
        h.session.start().unwrap();
        assert_eq!(h.session.current_index(), None);
        assert!(h.session.on_transcript_update("thank you for coming").is_some());
        assert_eq!(h.shown().len(), 2);
    }

    #[test]
    fn test_reload_while_listening_swaps_table() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        h.session.on_transcript_update("thank you for coming");
        h.session.load(
            DocumentRole::Original,
            "v2.txt",
            "Brand new opening line. Second new line here.".to_string(),
        );
        assert_eq!(h.session.current_index(), None);
        let change = h.session.on_transcript_update("brand new opening line").unwrap();
        assert_eq!(change.index, 0);
        assert_eq!(change.translated, "Bienvenue à la réunion");
    }

    #[test]
    fn test_started_event_reports_listening() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        h.session.handle_event(TranscriptEvent::Started).unwrap();
        assert_eq!(
            h.last_status(),
            Some((StatusKind::Info, "Listening...".to_string()))
        );
    }

    #[test]
    fn test_snapshot_event_matches() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        let change = h
            .session
            .handle_event(TranscriptEvent::Snapshot("welcome to the meeting".into()))
            .unwrap();
        assert_eq!(change.map(|c| c.index), Some(0));
    }

    #[test]
    fn test_ended_event_returns_to_idle() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        h.session.handle_event(TranscriptEvent::Ended).unwrap();
        assert!(!h.session.is_listening());
    }

    #[test]
    fn test_recoverable_error_keeps_listening() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        let result = h.session.handle_event(TranscriptEvent::Error(
            TranscriptSourceError::Transport("network".into()),
        ));
        assert_eq!(result, Ok(None));
        assert!(h.session.is_listening());
        assert_eq!(
            h.statuses.lock().unwrap().last().map(|(k, _)| *k),
            Some(StatusKind::Error)
        );
    }

    #[test]
    fn test_fatal_error_stops_and_discards_position() {
        let mut h = Harness::loaded();
        h.session.start().unwrap();
        h.session.on_transcript_update("today we discuss the budget");
        let error = TranscriptSourceError::PermissionDenied("not-allowed".into());
        let result = h.session.handle_event(TranscriptEvent::Error(error.clone()));
        assert_eq!(result, Err(SessionError::TranscriptSource(error)));
        assert!(!h.session.is_listening());
        assert_eq!(h.session.current_index(), None);
    }

    #[test]
    fn test_events_while_idle_are_ignored() {
        let mut h = Harness::loaded();
        let result = h.session.handle_event(TranscriptEvent::Error(
            TranscriptSourceError::Unsupported("none".into()),
        ));
        assert_eq!(result, Ok(None));
        assert!(h.statuses.lock().unwrap().iter().all(|(k, _)| *k == StatusKind::Info));
    }
}
