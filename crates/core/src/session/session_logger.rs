use std::collections::HashMap;
use std::time::Instant;

/// Severity of a user-facing status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Cross-cutting logger for session events.
///
/// Decouples the session from where status lines and measurements end up
/// (terminal, log file, a GUI status bar).
pub trait SessionLogger: Send {
    /// Report a user-facing status line.
    fn status(&mut self, message: &str, kind: StatusKind);

    /// Record how long a named stage took for one transcript update.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. transcript length).
    fn metric(&mut self, name: &str, value: f64);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn status(&mut self, _message: &str, _kind: StatusKind) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
}

/// Running count, sum and peak of one stage's timings or one metric's samples.
///
/// Constant size however long the session runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregate {
    pub count: usize,
    pub sum: f64,
    pub max: f64,
}

impl Aggregate {
    fn record(&mut self, value: f64) {
        self.max = if self.count == 0 { value } else { self.max.max(value) };
        self.count += 1;
        self.sum += value;
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Logger that forwards statuses to the `log` facade and keeps per-stage
/// timings and metrics for a summary at the end of the session.
pub struct LogSessionLogger {
    timings: HashMap<String, Aggregate>,
    metrics: HashMap<String, Aggregate>,
    last_status: Option<(StatusKind, String)>,
    error_count: usize,
    start_time: Instant,
}

impl LogSessionLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            last_status: None,
            error_count: 0,
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!("Session summary ({elapsed_s:.1}s total):")];

        let mut stages: Vec<_> = self.timings.iter().collect();
        stages.sort_by(|a, b| a.0.cmp(b.0));
        for (stage, agg) in stages {
            lines.push(format!(
                "  {stage:12}: {:5} runs  avg {:7.3}ms  max {:7.3}ms  total {:8.1}ms",
                agg.count,
                agg.average(),
                agg.max,
                agg.sum
            ));
        }

        let mut names: Vec<_> = self.metrics.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        for (name, agg) in names {
            lines.push(format!(
                "  {name}: {} samples, avg {:.1}",
                agg.count,
                agg.average()
            ));
        }

        if self.error_count > 0 {
            lines.push(format!("  errors: {}", self.error_count));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<Aggregate> {
        self.timings.get(stage).copied()
    }

    pub fn metrics_for(&self, name: &str) -> Option<Aggregate> {
        self.metrics.get(name).copied()
    }

    /// The most recent status line, as a status bar would show it.
    pub fn last_status(&self) -> Option<(StatusKind, &str)> {
        self.last_status
            .as_ref()
            .map(|(kind, message)| (*kind, message.as_str()))
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }
}

impl Default for LogSessionLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLogger for LogSessionLogger {
    fn status(&mut self, message: &str, kind: StatusKind) {
        match kind {
            StatusKind::Info => log::info!("{message}"),
            StatusKind::Error => {
                log::error!("{message}");
                self.error_count += 1;
            }
        }
        self.last_status = Some((kind, message.to_string()));
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
