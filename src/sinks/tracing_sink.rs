//! Sink forwarding formatted entries to `tracing`

use crate::core::{Cause, LogLevel, LogSink, Result};
use tracing::field::display;
use tracing::Level;

/// Target of events emitted by [`TracingSink`]
pub const TRACING_TARGET: &str = "structured_log";

/// Emits each entry as a `tracing` event at the matching level
///
/// The formatted entry is the event message; a cause is attached as the
/// `cause` field holding its error chain. Level gating follows the installed
/// subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(target: TRACING_TARGET, Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: TRACING_TARGET, Level::DEBUG),
            LogLevel::Info => tracing::enabled!(target: TRACING_TARGET, Level::INFO),
            LogLevel::Warn => tracing::enabled!(target: TRACING_TARGET, Level::WARN),
            LogLevel::Error => tracing::enabled!(target: TRACING_TARGET, Level::ERROR),
        }
    }

    fn emit(&self, level: LogLevel, text: &str, cause: Option<&Cause>) -> Result<()> {
        let cause = cause.map(|c| display(c.trace()));
        match level {
            LogLevel::Trace => {
                tracing::event!(target: TRACING_TARGET, Level::TRACE, cause, "{}", text)
            }
            LogLevel::Debug => {
                tracing::event!(target: TRACING_TARGET, Level::DEBUG, cause, "{}", text)
            }
            LogLevel::Info => {
                tracing::event!(target: TRACING_TARGET, Level::INFO, cause, "{}", text)
            }
            LogLevel::Warn => {
                tracing::event!(target: TRACING_TARGET, Level::WARN, cause, "{}", text)
            }
            LogLevel::Error => {
                tracing::event!(target: TRACING_TARGET, Level::ERROR, cause, "{}", text)
            }
        }
        Ok(())
    }
}
