use super::transcript_event::TranscriptEvent;

/// Callback a source pushes events into. Returns `false` once the consumer
/// has stopped listening, after which the source should return promptly.
pub type EmitFn<'a> = &'a mut dyn FnMut(TranscriptEvent) -> bool;

/// Domain interface for a live speech-to-text producer.
///
/// A source delivers `Started`, any number of `Snapshot`s and `Error`s, and
/// finally `Ended`. It must never call `emit` concurrently with itself; the
/// consumer relies on events arriving as one ordered stream.
pub trait TranscriptSource: Send {
    fn stream(&mut self, emit: EmitFn<'_>);
}
