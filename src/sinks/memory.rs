//! In-memory sink

use crate::core::{Cause, LogLevel, LogSink, Result};
use parking_lot::{Mutex, RwLock};

/// One record received by a [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedRecord {
    pub level: LogLevel,
    pub text: String,
    pub cause: Option<Cause>,
}

/// Keeps every emitted record in memory
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = StructuredLogger::new(sink.clone());
///
/// logger.info("ready").unwrap();
/// assert_eq!(sink.texts(), vec![r#"{"message":"ready"}"#.to_string()]);
/// ```
#[derive(Debug)]
pub struct MemorySink {
    min_level: RwLock<LogLevel>,
    records: Mutex<Vec<EmittedRecord>>,
}

impl MemorySink {
    /// Sink accepting every level
    pub fn new() -> Self {
        Self::with_min_level(LogLevel::Trace)
    }

    pub fn with_min_level(level: LogLevel) -> Self {
        Self {
            min_level: RwLock::new(level),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn records(&self) -> Vec<EmittedRecord> {
        self.records.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    fn emit(&self, level: LogLevel, text: &str, cause: Option<&Cause>) -> Result<()> {
        self.records.lock().push(EmittedRecord {
            level,
            text: text.to_string(),
            cause: cause.cloned(),
        });
        Ok(())
    }
}
