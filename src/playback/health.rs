//! Health counters for the pull loop

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

fn now_micros() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

/// Counters shared between the pull loop and observers.
///
/// All fields use atomic operations for thread-safe access.
pub struct FeedHealth {
    /// Number of frames fetched, encoded and handed to the sink
    frames_rendered: AtomicU64,

    /// Number of fetch cycles skipped on a transport failure
    transport_errors: AtomicU64,

    /// Total frame bytes fetched
    bytes_fetched: AtomicU64,

    /// Timestamp (Unix microseconds) of the last rendered frame
    last_frame_time: AtomicU64,
}

impl FeedHealth {
    /// Create a new health instance.
    pub fn new() -> Self {
        Self {
            frames_rendered: AtomicU64::new(0),
            transport_errors: AtomicU64::new(0),
            bytes_fetched: AtomicU64::new(0),
            last_frame_time: AtomicU64::new(now_micros()),
        }
    }

    /// Record a successfully rendered frame.
    pub fn record_frame(&self, size: usize) {
        self.frames_rendered.fetch_add(1, Ordering::Relaxed);
        self.bytes_fetched.fetch_add(size as u64, Ordering::Relaxed);
        self.last_frame_time.store(now_micros(), Ordering::Relaxed);
    }

    /// Record a fetch cycle lost to a transport failure.
    pub fn record_transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the number of rendered frames.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered.load(Ordering::Relaxed)
    }

    /// Get the number of transport errors.
    pub fn transport_errors(&self) -> u64 {
        self.transport_errors.load(Ordering::Relaxed)
    }

    /// Get the total frame bytes fetched.
    pub fn bytes_fetched(&self) -> u64 {
        self.bytes_fetched.load(Ordering::Relaxed)
    }

    /// Check if no frame has been rendered for the given duration.
    pub fn is_stalled(&self, threshold: Duration) -> bool {
        let last = self.last_frame_time.load(Ordering::Relaxed);
        let elapsed = now_micros().saturating_sub(last);
        elapsed > threshold.as_micros() as u64
    }

    /// Get a snapshot of the counters.
    pub fn summary(&self) -> HealthSummary {
        HealthSummary {
            frames_rendered: self.frames_rendered(),
            transport_errors: self.transport_errors(),
            bytes_fetched: self.bytes_fetched(),
        }
    }
}

impl Default for FeedHealth {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the feed counters.
#[derive(Debug, Clone)]
pub struct HealthSummary {
    pub frames_rendered: u64,
    pub transport_errors: u64,
    pub bytes_fetched: u64,
}

impl std::fmt::Display for HealthSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feed: {} frames rendered, {} transport errors, {} bytes fetched",
            self.frames_rendered, self.transport_errors, self.bytes_fetched
        )
    }
}
