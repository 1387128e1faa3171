//! Error types for the structured logger

use super::cause::Cause;
use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// The kind of name already registered within an entry node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Metric,
    Namespace,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Metric => f.write_str("metric"),
            EntryKind::Namespace => f.write_str("namespace"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A metric key or namespace name is already taken within the same node
    #[error("Name '{name}' clashes with existing {existing} name")]
    NamingConflict { name: String, existing: EntryKind },

    /// A second cause was attached somewhere in the entry tree
    #[error("Cause already set: {first}")]
    CauseAlreadySet { first: Cause },

    /// Serialization recursed deeper than the configured maximum
    #[error("Max depth of {max_depth} exceeded")]
    DepthExceeded { max_depth: usize },

    /// A mapping with a null key was serialized
    #[error("null key in {map} at depth {depth}")]
    InvalidKey { map: String, depth: usize },

    /// Blank key, blank namespace or otherwise malformed argument
    #[error("Invalid {name}: {message}")]
    InvalidArgument { name: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// String escaping error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Text formatting error
    #[error("Format error: {0}")]
    FmtError(#[from] fmt::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Sink already shut down
    #[error("Log sink already stopped")]
    SinkStopped,

    /// Sink delivery failure
    #[error("Sink error: {0}")]
    SinkError(String),
}

impl LoggerError {
    /// Create a naming conflict error
    pub fn naming_conflict(name: impl Into<String>, existing: EntryKind) -> Self {
        LoggerError::NamingConflict {
            name: name.into(),
            existing,
        }
    }

    /// Create a duplicate cause error carrying the first cause
    pub fn cause_already_set(first: Cause) -> Self {
        LoggerError::CauseAlreadySet { first }
    }

    /// Create a depth exceeded error
    pub fn depth_exceeded(max_depth: usize) -> Self {
        LoggerError::DepthExceeded { max_depth }
    }

    /// Create a null map key error
    pub fn invalid_key(map: impl Into<String>, depth: usize) -> Self {
        LoggerError::InvalidKey {
            map: map.into(),
            depth,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LoggerError::SinkError(msg.into())
    }
}
