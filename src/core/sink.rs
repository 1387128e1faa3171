//! Sink trait for formatted log output

use super::{cause::Cause, error::Result, log_level::LogLevel};

/// Destination of formatted entries
///
/// Each level is independently enabled or disabled by the sink. A cause, when
/// present, is delivered separately from the formatted text.
pub trait LogSink: Send + Sync {
    fn name(&self) -> &str;

    fn is_enabled(&self, level: LogLevel) -> bool;

    fn emit(&self, level: LogLevel, text: &str, cause: Option<&Cause>) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
