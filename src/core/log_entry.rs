//! Captured log entry structure

use super::cause::Cause;
use super::entry_builder::{ValueTree, MESSAGE_KEY};
use super::log_level::LogLevel;
use super::value::Value;
use std::fmt;

/// An unformatted log entry: level, built value tree and optional cause
///
/// Used by capturing loggers to record what was logged, and by tests to
/// describe what is expected.
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::{LogEntry, LogLevel};
///
/// let entry = LogEntry::new(LogLevel::Info, "user created").with("id", 42);
/// assert_eq!(entry.to_string(), "INFO: {id=42, message=user created}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    level: LogLevel,
    message: ValueTree,
    cause: Option<Cause>,
}

impl LogEntry {
    /// Entry holding only the message text
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        let mut tree = ValueTree::new();
        tree.insert(MESSAGE_KEY.to_string(), Value::Text(message.into()));
        Self::from_tree(level, tree, None)
    }

    pub fn from_tree(level: LogLevel, message: ValueTree, cause: Option<Cause>) -> Self {
        Self {
            level,
            message,
            cause,
        }
    }

    /// Add a top-level value, replacing any previous value under `key`
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.message.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &ValueTree {
        &self.message
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{", self.level)?;
        for (index, (key, value)) in self.message.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")?;

        if let Some(cause) = &self.cause {
            write!(f, " {}", cause)?;
        }
        Ok(())
    }
}
