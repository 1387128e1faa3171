//! Standard lifecycle log messages
//!
//! Services log these messages so that external tooling, such as system
//! tests waiting for a service to become ready, can recognise lifecycle
//! events. Messages take the form `lifecycle.<target>.<event>`, lowercased.

use std::fmt;

/// Target type identifying a service instance
pub const SERVICE_TYPE: &str = "service";

/// A lifecycle event that has a standard log message
pub trait LoggableLifecycle {
    /// Name of the event, e.g. `started`
    fn event_name(&self) -> &str;

    /// Standard message for this event happening to a `target_type`
    ///
    /// ```
    /// use rust_structured_logger::lifecycle::{BasicLifecycle, LoggableLifecycle, SERVICE_TYPE};
    ///
    /// assert_eq!(
    ///     BasicLifecycle::Started.log_message(SERVICE_TYPE),
    ///     "lifecycle.service.started"
    /// );
    /// ```
    fn log_message(&self, target_type: &str) -> String {
        lifecycle_log_message(target_type, self.event_name())
    }
}

/// Build a standard lifecycle message for custom lifecycle types
pub fn lifecycle_log_message(target_type: &str, event: &str) -> String {
    format!(
        "lifecycle.{}.{}",
        target_type.to_lowercase(),
        event.to_lowercase()
    )
}

/// Basic lifecycle events of a long running instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicLifecycle {
    Starting,
    Started,
    Stopping,
    Stopped,
}

impl BasicLifecycle {
    pub const ALL: [BasicLifecycle; 4] = [
        BasicLifecycle::Starting,
        BasicLifecycle::Started,
        BasicLifecycle::Stopping,
        BasicLifecycle::Stopped,
    ];
}

impl LoggableLifecycle for BasicLifecycle {
    fn event_name(&self) -> &str {
        match self {
            BasicLifecycle::Starting => "starting",
            BasicLifecycle::Started => "started",
            BasicLifecycle::Stopping => "stopping",
            BasicLifecycle::Stopped => "stopped",
        }
    }
}

impl fmt::Display for BasicLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}
