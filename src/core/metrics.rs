//! Sink metrics for observability
//!
//! Counters for records handed to a buffering sink: how many were written,
//! dropped because the buffer was full, or failed inside the wrapped sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// Delivery counters of a buffering sink
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::SinkMetrics;
///
/// let metrics = SinkMetrics::new();
/// metrics.record_emitted();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.emitted_count(), 1);
/// assert_eq!(metrics.drop_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct SinkMetrics {
    emitted: AtomicU64,
    dropped: AtomicU64,
    failed: AtomicU64,
    queue_full_events: AtomicU64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
        }
    }

    /// Records written by the wrapped sink
    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    /// Records discarded because the buffer was full
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Records the wrapped sink rejected or panicked on
    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    /// Returns the previous count
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage of records dropped, 0.0 when nothing was handled
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.emitted_count() as f64 + self.failed_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
    }
}

impl Default for SinkMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SinkMetrics {
    /// Snapshot of the current counts
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            failed: AtomicU64::new(self.failed_count()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
        }
    }
}
