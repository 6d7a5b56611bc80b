//! Telemetry system for sepsischeck
//!
//! Records the network exchange of each submission and prints it to
//! stderr at the requested verbosity.

use crate::cli::Verbosity;
use crate::types::ModelKind;
use chrono::{DateTime, Local};
use colored::Colorize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    ProbeSent {
        url: String,
        timestamp: Instant,
    },
    ProbeCompleted {
        /// None when the connection itself failed
        status: Option<u16>,
        duration_ms: u64,
        timestamp: Instant,
    },
    ScoringSent {
        model: ModelKind,
        url: String,
        timestamp: Instant,
    },
    ScoringCompleted {
        status: u16,
        duration_ms: u64,
        timestamp: Instant,
    },
    Failure {
        reason: String,
        timestamp: Instant,
    },
}

impl TelemetryEvent {
    pub fn timestamp(&self) -> Instant {
        match self {
            TelemetryEvent::ProbeSent { timestamp, .. }
            | TelemetryEvent::ProbeCompleted { timestamp, .. }
            | TelemetryEvent::ScoringSent { timestamp, .. }
            | TelemetryEvent::ScoringCompleted { timestamp, .. }
            | TelemetryEvent::Failure { timestamp, .. } => *timestamp,
        }
    }

    /// Single-line description for the trace
    pub fn describe(&self) -> String {
        match self {
            TelemetryEvent::ProbeSent { url, .. } => format!("GET {}", url),
            TelemetryEvent::ProbeCompleted {
                status: Some(code),
                duration_ms,
                ..
            } => format!("probe answered {} in {}ms", code, duration_ms),
            TelemetryEvent::ProbeCompleted {
                status: None,
                duration_ms,
                ..
            } => format!("probe got no answer after {}ms", duration_ms),
            TelemetryEvent::ScoringSent { model, url, .. } => {
                format!("POST {} ({})", url, model)
            }
            TelemetryEvent::ScoringCompleted {
                status,
                duration_ms,
                ..
            } => format!("scoring answered {} in {}ms", status, duration_ms),
            TelemetryEvent::Failure { reason, .. } => format!("failed: {}", reason),
        }
    }
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub probes_sent: usize,
    pub probes_succeeded: usize,
    pub scoring_requests: usize,
    pub scoring_succeeded: usize,
    pub failures: usize,
}

/// Telemetry collector
#[derive(Debug, Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
    started_at: DateTime<Local>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
            started_at: Local::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = lock(&self.stats);
            match &event {
                TelemetryEvent::ProbeSent { .. } => stats.probes_sent += 1,
                TelemetryEvent::ProbeCompleted { status, .. } => {
                    if *status == Some(200) {
                        stats.probes_succeeded += 1;
                    }
                }
                TelemetryEvent::ScoringSent { .. } => stats.scoring_requests += 1,
                TelemetryEvent::ScoringCompleted { status, .. } => {
                    if *status == 200 {
                        stats.scoring_succeeded += 1;
                    }
                }
                TelemetryEvent::Failure { .. } => stats.failures += 1,
            }
        }

        lock(&self.events).push(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        lock(&self.stats).clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn event_count(&self) -> usize {
        lock(&self.events).len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = lock(&self.events);
        let start = events.len().saturating_sub(n);
        events[start..].to_vec()
    }

    /// Events recorded since index `from`
    pub fn events_since(&self, from: usize) -> Vec<TelemetryEvent> {
        let events = lock(&self.events);
        events.get(from..).map(<[_]>::to_vec).unwrap_or_default()
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Verbosity-gated telemetry output on stderr
pub struct TelemetryDisplay {
    collector: TelemetryCollector,
    verbosity: Verbosity,
}

impl TelemetryDisplay {
    pub fn new(collector: TelemetryCollector, verbosity: Verbosity) -> Self {
        Self {
            collector,
            verbosity,
        }
    }

    pub fn event_count(&self) -> usize {
        self.collector.event_count()
    }

    /// Print the events recorded since `from` (verbose and above)
    pub fn print_trace(&self, from: usize) {
        if !self.verbosity.show_events() {
            return;
        }
        for event in self.collector.events_since(from) {
            let offset = event
                .timestamp()
                .saturating_duration_since(self.collector.start_time)
                .as_millis();
            eprintln!("{} {}", format!("[{:>6}ms]", offset).dimmed(), event.describe());
        }
    }

    /// Session summary (very verbose only)
    pub fn print_summary(&self) {
        if !self.verbosity.show_details() {
            return;
        }
        let stats = self.collector.get_stats();
        eprintln!();
        eprintln!("Session Summary");
        eprintln!("─────────────────────────────────────");
        eprintln!("Started:           {}", self.collector.started_at().format("%Y-%m-%d %H:%M:%S"));
        eprintln!("Duration:          {:?}", self.collector.elapsed());
        eprintln!("Probes:            {}/{} ok", stats.probes_succeeded, stats.probes_sent);
        eprintln!("Predictions:       {}/{} ok", stats.scoring_succeeded, stats.scoring_requests);
        eprintln!("Failures:          {}", stats.failures);
    }
}
