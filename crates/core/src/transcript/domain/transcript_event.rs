use thiserror::Error;

/// Failures reported by a transcript source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSourceError {
    /// Speech recognition is not available in this environment.
    #[error("speech recognition unsupported: {0}")]
    Unsupported(String),
    #[error("microphone permission denied: {0}")]
    PermissionDenied(String),
    /// A transient delivery failure; the source keeps running.
    #[error("transport error: {0}")]
    Transport(String),
}

impl TranscriptSourceError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TranscriptSourceError::Transport(_))
    }
}

/// What a transcript source pushes to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    Started,
    /// The full cumulative transcript so far, not a delta.
    Snapshot(String),
    Ended,
    Error(TranscriptSourceError),
}

/// Joins the recognition results of one utterance stream into a snapshot.
pub fn transcript_snapshot<S: AsRef<str>>(results: &[S]) -> String {
    results
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}
