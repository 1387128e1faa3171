//! Console sink implementation

use crate::core::{Cause, LogLevel, LogSink, Result, TimestampFormat};
use chrono::Utc;
use colored::Colorize;
use parking_lot::RwLock;

/// Writes one line per entry to stdout, or stderr for errors
///
/// A cause, when present, follows on the next lines as its error chain.
pub struct ConsoleSink {
    min_level: RwLock<LogLevel>,
    use_colors: bool,
    timestamp_format: Option<TimestampFormat>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            min_level: RwLock::new(LogLevel::Info),
            use_colors: true,
            timestamp_format: Some(TimestampFormat::default()),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_min_level(self, level: LogLevel) -> Self {
        *self.min_level.write() = level;
        self
    }

    /// Set the timestamp prefix, or `None` to omit it
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_structured_logger::sinks::ConsoleSink;
    /// use rust_structured_logger::core::TimestampFormat;
    ///
    /// let sink = ConsoleSink::new()
    ///     .with_timestamp_format(Some(TimestampFormat::Rfc3339));
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: Option<TimestampFormat>) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub(crate) fn format_line(&self, level: LogLevel, text: &str, cause: Option<&Cause>) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", level.to_str())
                .color(level.color_code())
                .to_string()
        } else {
            format!("{:5}", level.to_str())
        };

        let mut line = match &self.timestamp_format {
            Some(format) => format!("[{}] [{}] {}", format.format(&Utc::now()), level_str, text),
            None => format!("[{}] {}", level_str, text),
        };

        if let Some(cause) = cause {
            line.push('\n');
            line.push_str(&cause.trace());
        }
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    fn emit(&self, level: LogLevel, text: &str, cause: Option<&Cause>) -> Result<()> {
        let output = self.format_line(level, text, cause);
        match level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}
