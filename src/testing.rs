//! Capturing logger for tests
//!
//! [`TestStructuredLogger`] records what code under test logs, without
//! formatting it, so assertions can compare whole [`LogEntry`] values.

use crate::core::{EntryBuilder, LogEntry, LogLevel, Result, StructuredLog, ValueTree};
use parking_lot::Mutex;

/// Logger recording every enabled entry in memory
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
/// use rust_structured_logger::testing::TestStructuredLogger;
///
/// let logger = TestStructuredLogger::new();
/// logger
///     .info_with("user created", |entry| {
///         entry.with("id", 42)?;
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(
///     logger.entries(),
///     vec![LogEntry::new(LogLevel::Info, "user created").with("id", 42)]
/// );
/// ```
#[derive(Debug)]
pub struct TestStructuredLogger {
    min_level: LogLevel,
    entries: Mutex<Vec<LogEntry>>,
}

impl TestStructuredLogger {
    /// Logger capturing every level
    pub fn new() -> Self {
        Self::with_min_level(LogLevel::Trace)
    }

    pub fn with_min_level(min_level: LogLevel) -> Self {
        Self {
            min_level,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Text of each entry, e.g. `INFO: {message=started, port=80}`
    pub fn text_entries(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.to_string()).collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for TestStructuredLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredLog for TestStructuredLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log_with<F>(&self, level: LogLevel, message: impl Into<String>, customize: F) -> Result<()>
    where
        F: FnOnce(&mut EntryBuilder) -> Result<()>,
    {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let mut entry = EntryBuilder::new(message);
        customize(&mut entry)?;

        let tree = entry.snapshot().unwrap_or_else(ValueTree::new);
        let cause = entry.cause().cloned();
        self.entries
            .lock()
            .push(LogEntry::from_tree(level, tree, cause));
        Ok(())
    }
}
