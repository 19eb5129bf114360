use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::shared::constants::MIN_SEGMENT_CHARS;

/// A sentence-like unit of text: trimmed, original casing preserved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment(String);

impl Segment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A run of sentence-terminating punctuation counts as one delimiter, so
/// ellipses and `?!` never yield empty pieces between them.
fn delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("delimiter pattern is a valid regex"))
}

/// Splits raw text into ordered sentence segments.
///
/// Pieces whose trimmed length is at or below `min_chars` are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segmenter {
    min_chars: usize,
}

impl Segmenter {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    pub fn segment(&self, text: &str) -> Vec<Segment> {
        delimiter()
            .split(text)
            .map(str::trim)
            .filter(|piece| piece.chars().count() > self.min_chars)
            .map(|piece| Segment(piece.to_string()))
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(MIN_SEGMENT_CHARS)
    }
}
