//! Core structured logging types and traits

pub mod cause;
pub mod config;
pub mod entry_builder;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;
pub mod value;

pub use cause::Cause;
pub use config::{LoggerConfig, DEFAULT_MAX_DEPTH};
pub use entry_builder::{EntryBuilder, ValueTree, CAUSE_KEY, MESSAGE_KEY};
pub use error::{EntryKind, LoggerError, Result};
pub use formatter::{EntryFormatter, JsonEntryFormatter};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{StructuredLog, StructuredLogger, StructuredLoggerBuilder};
pub use metrics::SinkMetrics;
pub use sink::LogSink;
pub use timestamp::TimestampFormat;
pub use value::{Decimal, Float, Integer, Numeric, PrimitiveArray, Value};
