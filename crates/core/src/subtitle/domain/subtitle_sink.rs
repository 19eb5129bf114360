use crate::alignment::domain::alignment_engine::PositionChange;

/// Domain interface for whatever renders the current subtitle.
///
/// Fire-and-forget: the session never inspects the outcome, so rendering
/// failures are the sink's own concern.
pub trait SubtitleSink: Send {
    fn display(&mut self, text: &str);

    /// Called once per position change. Default: display the translation.
    fn show(&mut self, change: &PositionChange) {
        self.display(&change.translated);
    }
}
