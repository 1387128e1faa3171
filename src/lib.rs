//! # Rust Structured Logger
//!
//! Structured logging where each log call carries a message plus typed
//! metrics, optionally grouped into nested namespaces, and at most one cause.
//! The entry is rendered as compact, escaped, depth-bounded JSON-like text and
//! handed to a sink.
//!
//! ## Features
//!
//! - **Zero cost when disabled**: customization closures only run for enabled levels
//! - **Namespaced metrics**: nested groups with per-node name collision checks
//! - **Typed values**: every Rust value maps to one fixed output shape
//! - **Multiple Sinks**: console, in-memory, asynchronous and `tracing`
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = StructuredLogger::new(sink.clone());
//!
//! logger
//!     .warn_with("Slow query", |entry| {
//!         entry.with("millis", 1250)?;
//!         entry.ns("db")?.with("table", "orders")?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(
//!     sink.texts()[0],
//!     r#"{"db":{"table":"orders"},"message":"Slow query","millis":1250}"#
//! );
//! ```

pub mod core;
pub mod lifecycle;
pub mod macros;
pub mod sinks;
pub mod testing;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "tracing")]
    pub use crate::sinks::TracingSink;
    pub use crate::sinks::{AsyncSink, MemorySink};

    pub use crate::core::{
        Cause, EntryBuilder, EntryFormatter, JsonEntryFormatter, LogEntry, LogLevel, LogSink,
        LoggerConfig, LoggerError, Result, StructuredLog, StructuredLogger,
        StructuredLoggerBuilder, Value,
    };
}

pub use crate::core::{
    Cause, EntryBuilder, EntryFormatter, JsonEntryFormatter, LogEntry, LogLevel, LogSink,
    LoggerConfig, LoggerError, Result, StructuredLog, StructuredLogger, StructuredLoggerBuilder,
    Value,
};
