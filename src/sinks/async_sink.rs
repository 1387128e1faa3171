//! Asynchronous sink wrapper
//!
//! [`AsyncSink`] hands records to a background worker through a bounded
//! channel, so a log call never waits on the wrapped sink's I/O. When the
//! buffer is full, records below [`LogLevel::Error`] are dropped and counted;
//! error records wait for space instead.

use crate::core::{Cause, LogLevel, LogSink, LoggerError, Result, SinkMetrics};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout used when the sink is dropped
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const BATCH_SIZE: usize = 50;

struct Record {
    level: LogLevel,
    text: String,
    cause: Option<Cause>,
}

pub struct AsyncSink {
    inner: Arc<dyn LogSink>,
    sender: RwLock<Option<Sender<Record>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    metrics: Arc<SinkMetrics>,
}

impl AsyncSink {
    /// Wrap `inner`, buffering up to `capacity` records
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_structured_logger::prelude::*;
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let sink = Arc::new(AsyncSink::new(ConsoleSink::new(), 1024).unwrap());
    /// let logger = StructuredLogger::new(sink.clone());
    /// logger.info("started").unwrap();
    ///
    /// if !sink.shutdown(Duration::from_secs(1)) {
    ///     eprintln!("pending records were lost");
    /// }
    /// ```
    pub fn new<S: LogSink + 'static>(inner: S, capacity: usize) -> Result<Self> {
        Self::from_shared(Arc::new(inner), capacity)
    }

    pub fn from_shared(inner: Arc<dyn LogSink>, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::config("AsyncSink", "capacity must be positive"));
        }

        let (sender, receiver) = bounded(capacity);
        let metrics = Arc::new(SinkMetrics::new());

        let worker_sink = Arc::clone(&inner);
        let worker_metrics = Arc::clone(&metrics);
        let handle = thread::Builder::new()
            .name("structured-log-sink".to_string())
            .spawn(move || Self::run(worker_sink, receiver, worker_metrics))?;

        Ok(Self {
            inner,
            sender: RwLock::new(Some(sender)),
            worker: Mutex::new(Some(handle)),
            metrics,
        })
    }

    fn run(sink: Arc<dyn LogSink>, receiver: Receiver<Record>, metrics: Arc<SinkMetrics>) {
        let mut batch = Vec::with_capacity(BATCH_SIZE);

        while let Ok(record) = receiver.recv() {
            batch.push(record);
            while batch.len() < BATCH_SIZE {
                match receiver.try_recv() {
                    Ok(record) => batch.push(record),
                    Err(_) => break,
                }
            }

            for record in batch.drain(..) {
                Self::deliver(sink.as_ref(), &record, &metrics);
            }

            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }

    /// Emit one record with panic isolation
    fn deliver(sink: &dyn LogSink, record: &Record, metrics: &SinkMetrics) {
        let result = catch_unwind(AssertUnwindSafe(|| {
            sink.emit(record.level, &record.text, record.cause.as_ref())
        }));

        match result {
            Ok(Ok(())) => {
                metrics.record_emitted();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
                metrics.record_failed();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}. Later records are still delivered.",
                    sink.name(),
                    panic_msg
                );
                metrics.record_failed();
            }
        }
    }

    fn handle_full(&self, sender: &Sender<Record>, record: Record) -> Result<()> {
        self.metrics.record_queue_full();

        if record.level == LogLevel::Error {
            return sender.send(record).map_err(|_| LoggerError::SinkStopped);
        }

        let dropped = self.metrics.record_dropped();
        if dropped == 0 || (dropped + 1).is_multiple_of(1000) {
            eprintln!(
                "[LOGGER WARNING] Queue full, {} records dropped. \
                 Consider increasing the sink capacity.",
                dropped + 1
            );
        }
        Ok(())
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Stop accepting records and wait for the worker to drain the buffer
    ///
    /// Returns `false` if the worker did not finish within `timeout` or
    /// panicked. Calling it again after a successful shutdown returns `true`.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        drop(self.sender.write().take());

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!("[LOGGER ERROR] Sink worker panicked during shutdown: {:?}", e);
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Sink worker did not finish within {:?}. \
                         Some records may be lost.",
                        timeout
                    );
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        if let Err(e) = self.inner.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }
        true
    }
}

impl LogSink for AsyncSink {
    fn name(&self) -> &str {
        "async"
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        self.inner.is_enabled(level)
    }

    fn emit(&self, level: LogLevel, text: &str, cause: Option<&Cause>) -> Result<()> {
        let guard = self.sender.read();
        let sender = guard.as_ref().ok_or(LoggerError::SinkStopped)?;

        let record = Record {
            level,
            text: text.to_string(),
            cause: cause.cloned(),
        };
        match sender.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(record)) => self.handle_full(sender, record),
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::SinkStopped),
        }
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }
}

impl Drop for AsyncSink {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Sink shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    /// Blocks every emit until the gate is opened
    struct GatedSink {
        gate: Receiver<()>,
        inner: Arc<MemorySink>,
    }

    impl LogSink for GatedSink {
        fn name(&self) -> &str {
            "gated"
        }

        fn is_enabled(&self, _level: LogLevel) -> bool {
            true
        }

        fn emit(&self, level: LogLevel, text: &str, cause: Option<&Cause>) -> Result<()> {
            let _ = self.gate.recv();
            self.inner.emit(level, text, cause)
        }
    }

    fn gated(capacity: usize) -> (AsyncSink, Sender<()>, Arc<MemorySink>) {
        let (open, gate) = bounded(0);
        let memory = Arc::new(MemorySink::new());
        let sink = AsyncSink::new(
            GatedSink {
                gate,
                inner: Arc::clone(&memory),
            },
            capacity,
        )
        .unwrap();
        (sink, open, memory)
    }

    #[test]
    fn test_records_are_delivered_in_order() {
        let memory = Arc::new(MemorySink::new());
        let sink = AsyncSink::from_shared(memory.clone(), 100).unwrap();

        for i in 0..20 {
            sink.emit(LogLevel::Info, &i.to_string(), None).unwrap();
        }
        assert!(sink.shutdown(Duration::from_secs(5)));

        let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(memory.texts(), expected);
        assert_eq!(sink.metrics().emitted_count(), 20);
    }

    #[test]
    fn test_emit_after_shutdown_fails() {
        let sink = AsyncSink::new(MemorySink::new(), 10).unwrap();
        assert!(sink.shutdown(Duration::from_secs(5)));

        let err = sink.emit(LogLevel::Info, "late", None).unwrap_err();
        assert!(matches!(err, LoggerError::SinkStopped));
        assert!(sink.shutdown(Duration::from_secs(1)));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(
            AsyncSink::new(MemorySink::new(), 0),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_full_buffer_drops_non_error_records() {
        let (sink, open, memory) = gated(1);

        for i in 0..10 {
            sink.emit(LogLevel::Info, &i.to_string(), None).unwrap();
        }
        drop(open);
        assert!(sink.shutdown(Duration::from_secs(5)));

        let metrics = sink.metrics();
        assert!(metrics.dropped_count() >= 5, "dropped {}", metrics.dropped_count());
        assert_eq!(metrics.emitted_count() + metrics.dropped_count(), 10);
        assert_eq!(memory.len() as u64, metrics.emitted_count());
        assert!(metrics.queue_full_events() >= metrics.dropped_count());
    }

    #[test]
    fn test_error_records_are_never_dropped() {
        let (sink, open, memory) = gated(1);
        let sink = Arc::new(sink);

        for _ in 0..5 {
            sink.emit(LogLevel::Info, "filler", None).unwrap();
        }

        let producer = {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..3 {
                    sink.emit(LogLevel::Error, &format!("error {}", i), None)
                        .unwrap();
                }
            })
        };

        thread::sleep(Duration::from_millis(50));
        drop(open);
        producer.join().unwrap();
        assert!(sink.shutdown(Duration::from_secs(5)));

        let errors: Vec<String> = memory
            .records()
            .into_iter()
            .filter(|r| r.level == LogLevel::Error)
            .map(|r| r.text)
            .collect();
        assert_eq!(errors, vec!["error 0", "error 1", "error 2"]);
    }

    #[test]
    fn test_panicking_sink_is_isolated() {
        struct Flaky(Arc<MemorySink>);

        impl LogSink for Flaky {
            fn name(&self) -> &str {
                "flaky"
            }

            fn is_enabled(&self, _level: LogLevel) -> bool {
                true
            }

            fn emit(&self, level: LogLevel, text: &str, cause: Option<&Cause>) -> Result<()> {
                if text == "panic" {
                    panic!("sink exploded");
                }
                if text == "fail" {
                    return Err(LoggerError::sink("rejected"));
                }
                self.0.emit(level, text, cause)
            }
        }

        let memory = Arc::new(MemorySink::new());
        let sink = AsyncSink::new(Flaky(memory.clone()), 10).unwrap();

        sink.emit(LogLevel::Info, "before", None).unwrap();
        sink.emit(LogLevel::Info, "panic", None).unwrap();
        sink.emit(LogLevel::Info, "fail", None).unwrap();
        sink.emit(LogLevel::Info, "after", None).unwrap();
        assert!(sink.shutdown(Duration::from_secs(5)));

        assert_eq!(memory.texts(), vec!["before", "after"]);
        assert_eq!(sink.metrics().failed_count(), 2);
        assert_eq!(sink.metrics().emitted_count(), 2);
    }

    #[test]
    fn test_level_gating_delegates_to_inner() {
        let sink = AsyncSink::new(MemorySink::with_min_level(LogLevel::Warn), 4).unwrap();
        assert!(!sink.is_enabled(LogLevel::Info));
        assert!(sink.is_enabled(LogLevel::Error));
    }
}
