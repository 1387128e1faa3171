//! Logging macros for ergonomic structured log calls.
//!
//! Each macro accepts either a format string, like `println!`, or a message
//! followed by `;` and `key => value` metrics. All of them return the
//! facade's `Result`.
//!
//! # Examples
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use rust_structured_logger::info;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = StructuredLogger::new(sink.clone());
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//! info!(logger, "Request served"; "status" => 200, "path" => "/health").unwrap();
//!
//! assert_eq!(
//!     sink.texts()[1],
//!     r#"{"message":"Request served","path":"/health","status":200}"#
//! );
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = rust_structured_logger::testing::TestStructuredLogger::new();
/// use rust_structured_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// log!(logger, LogLevel::Warn, "Retrying"; "attempt" => 2).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {{
        use $crate::core::StructuredLog as _;
        $logger.log_with($level, $msg, |entry| {
            $( entry.with($key, $value)?; )+
            Ok(())
        })
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::core::StructuredLog as _;
        $logger.log($level, format!($($arg)+))
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # let logger = rust_structured_logger::testing::TestStructuredLogger::new();
/// use rust_structured_logger::info;
/// info!(logger, "Processing {} items", 100).unwrap();
/// info!(logger, "Batch done"; "items" => 100, "failed" => 0).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # let logger = rust_structured_logger::testing::TestStructuredLogger::new();
/// use rust_structured_logger::error;
/// error!(logger, "Failed to connect to {}", "db-1").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogEntry, LogLevel};
    use crate::testing::TestStructuredLogger;

    #[test]
    fn test_log_macro() {
        let logger = TestStructuredLogger::new();
        log!(logger, LogLevel::Info, "Test message").unwrap();
        log!(logger, LogLevel::Info, "Formatted: {}", 42).unwrap();

        assert_eq!(
            logger.entries(),
            vec![
                LogEntry::new(LogLevel::Info, "Test message"),
                LogEntry::new(LogLevel::Info, "Formatted: 42"),
            ]
        );
    }

    #[test]
    fn test_key_value_form() {
        let logger = TestStructuredLogger::new();
        let user = "alice";
        info!(logger, "Login"; "user" => user, "attempt" => 2,).unwrap();

        assert_eq!(
            logger.entries(),
            vec![LogEntry::new(LogLevel::Info, "Login")
                .with("user", "alice")
                .with("attempt", 2)]
        );
    }

    #[test]
    fn test_key_value_conflict_is_reported() {
        let logger = TestStructuredLogger::new();
        let result = warn!(logger, "Dup"; "k" => 1, "k" => 2);

        assert!(result.is_err());
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_level_macros() {
        let logger = TestStructuredLogger::new();
        trace!(logger, "t").unwrap();
        debug!(logger, "d {}", 1).unwrap();
        info!(logger, "i").unwrap();
        warn!(logger, "w").unwrap();
        error!(logger, "e"; "code" => 500).unwrap();

        let levels: Vec<LogLevel> = logger.entries().iter().map(|e| e.level()).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_disabled_level_does_not_evaluate_metrics() {
        let logger = TestStructuredLogger::with_min_level(LogLevel::Error);
        let mut evaluated = false;
        info!(logger, "skipped"; "x" => {
            evaluated = true;
            1
        })
        .unwrap();

        assert!(!evaluated);
        assert!(logger.entries().is_empty());
    }
}
