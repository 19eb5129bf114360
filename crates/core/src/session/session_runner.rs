use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::session::subtitle_session::{SessionError, SubtitleSession};
use crate::shared::constants::{CANCEL_POLL_INTERVAL_MS, TRANSCRIPT_QUEUE_CAPACITY};
use crate::transcript::domain::transcript_event::TranscriptEvent;
use crate::transcript::domain::transcript_source::TranscriptSource;

/// Counts for one completed listening session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub snapshots: usize,
    pub position_changes: usize,
    pub last_index: Option<usize>,
}

/// How the consumer loop ended.
enum Exit {
    /// The source ended or hung up; its thread is finishing on its own.
    SourceDone,
    /// Stopped early; the source may still be blocked waiting for input.
    Interrupted,
}

/// Runs a listening session over a transcript source.
///
/// Layout: `source thread → bounded queue → caller thread [session]`
///
/// The source pushes events from its own thread; the calling thread is the
/// only consumer and applies them strictly in order, so the session is
/// never touched concurrently.
pub struct SessionRunner {
    queue_capacity: usize,
}

impl SessionRunner {
    pub fn new() -> Self {
        Self {
            queue_capacity: TRANSCRIPT_QUEUE_CAPACITY,
        }
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Starts the session, consumes events until the source ends, the
    /// session stops, or `cancelled` is set, then stops the session.
    ///
    /// Fails with `MissingInput` before the source is spawned if either
    /// text is missing, and with `TranscriptSource` on an unrecoverable
    /// source error.
    pub fn run(
        &self,
        session: &mut SubtitleSession,
        source: Box<dyn TranscriptSource>,
        cancelled: Arc<AtomicBool>,
    ) -> Result<RunSummary, SessionError> {
        session.start()?;

        let (event_tx, event_rx) = crossbeam_channel::bounded::<TranscriptEvent>(self.queue_capacity);
        let producer_cancelled = cancelled.clone();
        let handle = thread::spawn(move || {
            let mut source = source;
            source.stream(&mut |event| {
                !producer_cancelled.load(Ordering::Relaxed) && event_tx.send(event).is_ok()
            });
        });

        let mut summary = RunSummary::default();
        let (exit, result) = consume(session, &event_rx, &cancelled, &mut summary);
        drop(event_rx);
        session.stop();

        match exit {
            Exit::SourceDone => {
                if handle.join().is_err() {
                    log::warn!("Transcript source thread panicked");
                }
            }
            Exit::Interrupted => {
                log::debug!("Leaving transcript source to exit on its next event");
            }
        }

        log::info!(
            "Session ended: {} snapshots, {} position changes",
            summary.snapshots,
            summary.position_changes
        );
        result.map(|_| summary)
    }
}

impl Default for SessionRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn consume(
    session: &mut SubtitleSession,
    event_rx: &Receiver<TranscriptEvent>,
    cancelled: &AtomicBool,
    summary: &mut RunSummary,
) -> (Exit, Result<(), SessionError>) {
    let poll = Duration::from_millis(CANCEL_POLL_INTERVAL_MS);
    loop {
        if cancelled.load(Ordering::Relaxed) {
            return (Exit::Interrupted, Ok(()));
        }
        // A silent source sends nothing; wake up periodically to see a cancel.
        let event = match event_rx.recv_timeout(poll) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return (Exit::SourceDone, Ok(())),
        };

        let ended = matches!(event, TranscriptEvent::Ended);
        if matches!(event, TranscriptEvent::Snapshot(_)) {
            summary.snapshots += 1;
        }

        match session.handle_event(event) {
            Ok(Some(change)) => {
                summary.position_changes += 1;
                summary.last_index = Some(change.index);
            }
            Ok(None) => {}
            Err(e) => return (Exit::Interrupted, Err(e)),
        }

        if ended {
            return (Exit::SourceDone, Ok(()));
        }
        if !session.is_listening() {
            return (Exit::Interrupted, Ok(()));
        }
    }
}
