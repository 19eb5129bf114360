use std::io::Write;

use crate::alignment::domain::alignment_engine::PositionChange;
use crate::subtitle::domain::subtitle_sink::SubtitleSink;

/// Writes one subtitle per line to any byte stream (typically stdout).
pub struct WriterSubtitleSink<W> {
    out: W,
    show_source: bool,
}

impl<W: Write + Send> WriterSubtitleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_source: false,
        }
    }

    /// Also print the matched source sentence above each translation.
    pub fn with_source(mut self, show_source: bool) -> Self {
        self.show_source = show_source;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        let result = writeln!(self.out, "{line}").and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("Failed to write subtitle: {e}");
        }
    }
}

impl<W: Write + Send> SubtitleSink for WriterSubtitleSink<W> {
    fn display(&mut self, text: &str) {
        self.write_line(text);
    }

    fn show(&mut self, change: &PositionChange) {
        if self.show_source {
            let header = format!("[{}] {}", change.index, change.source);
            self.write_line(&header);
        }
        self.display(&change.translated);
    }
}
