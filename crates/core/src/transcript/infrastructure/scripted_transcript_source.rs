use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::transcript::domain::transcript_event::TranscriptEvent;
use crate::transcript::domain::transcript_source::{EmitFn, TranscriptSource};

/// Replays a fixed list of snapshots, e.g. a recorded session.
///
/// Each snapshot is delivered as-is, with an optional pause before each one
/// to approximate live pacing.
pub struct ScriptedTranscriptSource {
    snapshots: Vec<String>,
    delay: Duration,
}

impl ScriptedTranscriptSource {
    pub fn new(snapshots: Vec<String>) -> Self {
        Self {
            snapshots,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// One snapshot per non-blank line.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let snapshots = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self::new(snapshots))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl TranscriptSource for ScriptedTranscriptSource {
    fn stream(&mut self, emit: EmitFn<'_>) {
        if !emit(TranscriptEvent::Started) {
            return;
        }
        for snapshot in &self.snapshots {
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            if !emit(TranscriptEvent::Snapshot(snapshot.clone())) {
                return;
            }
        }
        emit(TranscriptEvent::Ended);
    }
}
