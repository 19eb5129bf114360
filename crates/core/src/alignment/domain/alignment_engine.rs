use std::sync::Arc;

use super::alignment_table::AlignmentTable;

/// The speaker's tracked position moved to a new segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionChange {
    pub index: usize,
    pub source: String,
    pub translated: String,
}

/// Tracks which source segment the speaker has reached.
///
/// Every transcript snapshot is re-scanned against the whole table from
/// index 0, and the lowest-index entry whose lower-cased source text is a
/// substring of the lower-cased transcript wins. The scan is not resumed
/// from the current position, so a transcript that still contains an early
/// segment's wording can move the position backward. Callers must not
/// assume the reported index is monotonic.
///
/// Not thread-safe by contract: updates are expected one at a time from a
/// single consumer.
pub struct AlignmentEngine {
    table: Arc<AlignmentTable>,
    lowered: Vec<String>,
    current_index: Option<usize>,
}

impl AlignmentEngine {
    pub fn new(table: Arc<AlignmentTable>) -> Self {
        let lowered = lower_sources(&table);
        Self {
            table,
            lowered,
            current_index: None,
        }
    }

    pub fn table(&self) -> &AlignmentTable {
        &self.table
    }

    /// `None` until the first match of the session.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Forgets the current position; the next match always emits.
    pub fn reset(&mut self) {
        self.current_index = None;
    }

    /// Swaps in a freshly built table and resets the position.
    pub fn replace_table(&mut self, table: Arc<AlignmentTable>) {
        self.lowered = lower_sources(&table);
        self.table = table;
        self.reset();
    }

    /// Index of the first entry whose source text the transcript contains.
    pub fn find_match(&self, transcript: &str) -> Option<usize> {
        let transcript = transcript.to_lowercase();
        self.lowered
            .iter()
            .position(|source| transcript.contains(source.as_str()))
    }

    /// Processes one full transcript snapshot.
    ///
    /// Returns a change only when the matched index differs from the current
    /// one; no match, or a repeat of the same index, returns `None`.
    pub fn on_transcript_update(&mut self, transcript: &str) -> Option<PositionChange> {
        let index = self.find_match(transcript)?;
        if self.current_index == Some(index) {
            return None;
        }

        if let Some(previous) = self.current_index {
            if index < previous {
                log::debug!("Position moved backward: {previous} -> {index}");
            }
        }
        self.current_index = Some(index);

        let entry = self.table.get(index)?;
        Some(PositionChange {
            index,
            source: entry.source.to_string(),
            translated: entry.translated.to_string(),
        })
    }
}

fn lower_sources(table: &AlignmentTable) -> Vec<String> {
    table
        .iter()
        .map(|entry| entry.source.as_str().to_lowercase())
        .collect()
}
