//! Logger configuration
//!
//! Settings are read once when a logger is built and are immutable afterwards.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default maximum nesting depth of a formatted entry
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Environment variable overriding [`LoggerConfig::max_depth`]
pub const MAX_DEPTH_ENV: &str = "STRUCTURED_LOG_MAX_DEPTH";

/// Environment variable overriding [`LoggerConfig::cause_in_message`]
pub const CAUSE_IN_MESSAGE_ENV: &str = "STRUCTURED_LOG_CAUSE_IN_MESSAGE";

/// Environment variable overriding [`LoggerConfig::root_namespace`]
pub const ROOT_NAMESPACE_ENV: &str = "STRUCTURED_LOG_ROOT_NAMESPACE";

/// Structured logger settings
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::LoggerConfig;
///
/// let config: LoggerConfig = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
/// assert_eq!(config.max_depth, 4);
/// assert!(!config.cause_in_message);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Deepest nesting level that may be formatted
    pub max_depth: usize,

    /// Fold the cause into the formatted entry instead of passing it to the
    /// sink separately
    pub cause_in_message: bool,

    /// Namespace that all customization is redirected into
    pub root_namespace: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cause_in_message: false,
            root_namespace: None,
        }
    }
}

impl LoggerConfig {
    /// Load settings from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(MAX_DEPTH_ENV) {
            config.max_depth = parse_setting(MAX_DEPTH_ENV, &value)?;
        }
        if let Some(value) = lookup(CAUSE_IN_MESSAGE_ENV) {
            config.cause_in_message = parse_setting(CAUSE_IN_MESSAGE_ENV, &value)?;
        }
        if let Some(value) = lookup(ROOT_NAMESPACE_ENV) {
            config.root_namespace = Some(value.trim().to_string());
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if let Some(ns) = &self.root_namespace {
            if ns.trim().is_empty() {
                return Err(LoggerError::config("root_namespace", "must not be blank"));
            }
        }
        Ok(())
    }
}

fn parse_setting<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| LoggerError::config(name, format!("'{}': {}", value, e)))
}
