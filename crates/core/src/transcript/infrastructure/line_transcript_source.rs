use std::io::BufRead;

use crate::transcript::domain::transcript_event::{
    transcript_snapshot, TranscriptEvent, TranscriptSourceError,
};
use crate::transcript::domain::transcript_source::{EmitFn, TranscriptSource};

/// Reads recognition results one per line (e.g. piped from a recognizer).
///
/// Each line is a finalized result. After every line the source emits the
/// cumulative snapshot: all results so far, joined with single spaces.
pub struct LineTranscriptSource<R> {
    input: R,
    results: Vec<String>,
}

impl<R: BufRead + Send> LineTranscriptSource<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            results: Vec::new(),
        }
    }
}

impl<R: BufRead + Send> TranscriptSource for LineTranscriptSource<R> {
    fn stream(&mut self, emit: EmitFn<'_>) {
        if !emit(TranscriptEvent::Started) {
            return;
        }

        let mut line = String::new();
        loop {
            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    let result = line.trim();
                    if result.is_empty() {
                        continue;
                    }
                    self.results.push(result.to_string());
                    let snapshot = transcript_snapshot(&self.results);
                    if !emit(TranscriptEvent::Snapshot(snapshot)) {
                        return;
                    }
                }
                Err(e) => {
                    log::warn!("Transcript input failed: {e}");
                    if !emit(TranscriptEvent::Error(TranscriptSourceError::Transport(
                        e.to_string(),
                    ))) {
                        return;
                    }
                    break;
                }
            }
        }

        emit(TranscriptEvent::Ended);
    }
}
