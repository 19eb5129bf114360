/// Fragments whose trimmed length is at or below this many characters are
/// punctuation noise, not sentences.
pub const MIN_SEGMENT_CHARS: usize = 5;

pub const TEXT_EXTENSIONS: &[&str] = &["txt"];
pub const PDF_EXTENSIONS: &[&str] = &["pdf"];
pub const WORD_EXTENSIONS: &[&str] = &["docx", "doc"];

/// Capacity of the transcript event queue between source and session.
pub const TRANSCRIPT_QUEUE_CAPACITY: usize = 64;

/// How often the session loop re-checks for cancellation while the
/// transcript source is silent.
pub const CANCEL_POLL_INTERVAL_MS: u64 = 20;
