//! The single error value attachable to a log entry

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A shareable error attached to a log entry as its cause
///
/// Cloning is cheap: clones share the same underlying error, and equality
/// is identity of that shared error.
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::Cause;
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
/// let cause = Cause::new(io);
/// assert_eq!(cause.to_string(), "config.toml");
/// ```
#[derive(Clone)]
pub struct Cause(Arc<dyn Error + Send + Sync + 'static>);

impl Cause {
    /// Wrap an error value
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Create a cause from a plain message
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::new(MessageError(message.to_string()))
    }

    /// Wrap an already boxed error
    pub fn from_boxed(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self(Arc::from(error))
    }

    /// Borrow the underlying error
    pub fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    /// Multi-line text of the error followed by its chain of sources
    pub fn trace(&self) -> String {
        let mut text = self.0.to_string();
        let mut source = self.0.source();
        while let Some(err) = source {
            text.push_str("\nCaused by: ");
            text.push_str(&err.to_string());
            source = err.source();
        }
        text
    }
}

impl<E> From<E> for Cause
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for MessageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct RequestError {
        #[source]
        source: std::io::Error,
    }

    #[test]
    fn test_trace_single_error() {
        let cause = Cause::msg("boom");
        assert_eq!(cause.trace(), "boom");
    }

    #[test]
    fn test_trace_follows_source_chain() {
        let cause = Cause::new(RequestError {
            source: std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timed out"),
        });

        assert_eq!(cause.trace(), "request failed\nCaused by: socket timed out");
    }

    #[test]
    fn test_clone_shares_identity() {
        let cause = Cause::msg("a");
        let clone = cause.clone();

        assert_eq!(cause, clone);
        assert_ne!(cause, Cause::msg("a"));
    }

    #[test]
    fn test_from_boxed() {
        let boxed: Box<dyn Error + Send + Sync> = "plain".into();
        let cause = Cause::from_boxed(boxed);
        assert_eq!(cause.to_string(), "plain");
    }
}
