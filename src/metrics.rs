// Performance metrics module
//
// Lightweight counters for observing organizer behaviour over a session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Organizer runtime metrics.
///
/// Uses atomic operations so the counters can be read from observers while
/// the engine works, without touching the state lock. Collected for the
/// lifetime of the owning manager and typically logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Full filter/sort/repair passes executed
    pub organize_passes: AtomicU64,

    /// Change events delivered to at least one subscriber
    pub events_broadcast: AtomicU64,

    /// Change events dropped because nobody was subscribed
    pub events_unobserved: AtomicU64,

    /// Selection slots cleared by the repair pass
    pub selections_repaired: AtomicU64,

    /// Filter/sort/selection requests rejected without a state change
    pub rejected_requests: AtomicU64,

    /// Manager creation time
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            organize_passes: AtomicU64::new(0),
            events_broadcast: AtomicU64::new(0),
            events_unobserved: AtomicU64::new(0),
            selections_repaired: AtomicU64::new(0),
            rejected_requests: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_organize_pass(&self) {
        self.organize_passes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_broadcast(&self) {
        self.events_broadcast.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_unobserved(&self) {
        self.events_unobserved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_selections_repaired(&self, cleared: usize) {
        if cleared > 0 {
            self.selections_repaired.fetch_add(cleared as u64, Ordering::Relaxed);
        }
    }

    pub fn record_rejected_request(&self) {
        self.rejected_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a one-line summary of all counters at info level.
    pub fn log_summary(&self) {
        tracing::info!(
            organize_passes = self.organize_passes.load(Ordering::Relaxed),
            events_broadcast = self.events_broadcast.load(Ordering::Relaxed),
            events_unobserved = self.events_unobserved.load(Ordering::Relaxed),
            selections_repaired = self.selections_repaired.load(Ordering::Relaxed),
            rejected_requests = self.rejected_requests.load(Ordering::Relaxed),
            uptime_secs = self.uptime().as_secs(),
            "organizer metrics summary"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
