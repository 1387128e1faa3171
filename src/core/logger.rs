//! Level-gated structured logger
//!
//! A log call checks the sink's level first. Only when the level is enabled is
//! an [`EntryBuilder`] created and the caller's customization run, so
//! customizations with side effects never execute for disabled levels.

use super::{
    cause::Cause,
    config::LoggerConfig,
    entry_builder::{EntryBuilder, CAUSE_KEY},
    error::Result,
    formatter::{EntryFormatter, JsonEntryFormatter},
    log_level::LogLevel,
    sink::LogSink,
    value::Value,
};
use std::fmt;
use std::sync::Arc;

/// Structured logging facade
///
/// Implementors supply [`StructuredLog::is_enabled`] and
/// [`StructuredLog::log_with`]; the per-level methods are provided.
pub trait StructuredLog {
    fn is_enabled(&self, level: LogLevel) -> bool;

    /// Log `message` at `level`, letting `customize` attach metrics,
    /// namespaces and a cause
    ///
    /// `customize` is only invoked when `level` is enabled. Any error it
    /// returns aborts the call without emitting anything.
    fn log_with<F>(&self, level: LogLevel, message: impl Into<String>, customize: F) -> Result<()>
    where
        F: FnOnce(&mut EntryBuilder) -> Result<()>;

    fn log(&self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        self.log_with(level, message, |_| Ok(()))
    }

    #[inline]
    fn trace(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Trace, message)
    }

    #[inline]
    fn trace_with<F>(&self, message: impl Into<String>, customize: F) -> Result<()>
    where
        F: FnOnce(&mut EntryBuilder) -> Result<()>,
    {
        self.log_with(LogLevel::Trace, message, customize)
    }

    #[inline]
    fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    #[inline]
    fn debug_with<F>(&self, message: impl Into<String>, customize: F) -> Result<()>
    where
        F: FnOnce(&mut EntryBuilder) -> Result<()>,
    {
        self.log_with(LogLevel::Debug, message, customize)
    }

    #[inline]
    fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    fn info_with<F>(&self, message: impl Into<String>, customize: F) -> Result<()>
    where
        F: FnOnce(&mut EntryBuilder) -> Result<()>,
    {
        self.log_with(LogLevel::Info, message, customize)
    }

    #[inline]
    fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Warn, message)
    }

    #[inline]
    fn warn_with<F>(&self, message: impl Into<String>, customize: F) -> Result<()>
    where
        F: FnOnce(&mut EntryBuilder) -> Result<()>,
    {
        self.log_with(LogLevel::Warn, message, customize)
    }

    #[inline]
    fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    #[inline]
    fn error_with<F>(&self, message: impl Into<String>, customize: F) -> Result<()>
    where
        F: FnOnce(&mut EntryBuilder) -> Result<()>,
    {
        self.log_with(LogLevel::Error, message, customize)
    }
}

/// Structured logger formatting entries and handing them to a [`LogSink`]
///
/// Cloning is cheap and clones share the sink and formatter.
#[derive(Clone)]
pub struct StructuredLogger {
    sink: Arc<dyn LogSink>,
    formatter: Arc<dyn EntryFormatter>,
    root_namespace: Option<String>,
}

impl StructuredLogger {
    /// Logger with default formatting writing to `sink`
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            formatter: Arc::new(JsonEntryFormatter::new()),
            root_namespace: None,
        }
    }

    /// Create a builder for StructuredLogger
    ///
    /// # Example
    /// ```
    /// use rust_structured_logger::prelude::*;
    ///
    /// let logger = StructuredLogger::builder()
    ///     .sink(MemorySink::new())
    ///     .max_depth(4)
    ///     .root_namespace("billing")
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> StructuredLoggerBuilder {
        StructuredLoggerBuilder::new()
    }

    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    pub fn root_namespace(&self) -> Option<&str> {
        self.root_namespace.as_deref()
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }
}

impl StructuredLog for StructuredLogger {
    #[inline]
    fn is_enabled(&self, level: LogLevel) -> bool {
        self.sink.is_enabled(level)
    }

    fn log_with<F>(&self, level: LogLevel, message: impl Into<String>, customize: F) -> Result<()>
    where
        F: FnOnce(&mut EntryBuilder) -> Result<()>,
    {
        if !self.sink.is_enabled(level) {
            return Ok(());
        }

        let mut root = EntryBuilder::new(message);
        match &self.root_namespace {
            Some(name) => customize(root.ns(name.as_str())?)?,
            None => customize(&mut root)?,
        }

        let mut cause: Option<Cause> = root.cause().cloned();
        if self.formatter.cause_in_message() {
            if let Some(cause) = cause.take() {
                root.with(CAUSE_KEY, cause)?;
            }
        }

        let tree = root.snapshot().map_or(Value::Null, Value::from);
        let text = self.formatter.format(&tree)?;
        self.sink.emit(level, &text, cause.as_ref())
    }
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("sink", &self.sink.name())
            .field("cause_in_message", &self.formatter.cause_in_message())
            .field("root_namespace", &self.root_namespace)
            .finish()
    }
}

/// Builder for constructing StructuredLogger with a fluent API
pub struct StructuredLoggerBuilder {
    config: LoggerConfig,
    sink: Option<Arc<dyn LogSink>>,
    formatter: Option<Arc<dyn EntryFormatter>>,
}

impl StructuredLoggerBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
            formatter: None,
        }
    }

    /// Set the sink formatted entries are written to
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: LogSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Set a sink that is also held elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace all settings, e.g. with [`LoggerConfig::from_env`]
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn cause_in_message(mut self, enabled: bool) -> Self {
        self.config.cause_in_message = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_namespace(mut self, name: impl Into<String>) -> Self {
        self.config.root_namespace = Some(name.into());
        self
    }

    /// Use a custom formatter
    ///
    /// Overrides the max depth and cause settings, which only configure the
    /// default formatter.
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: EntryFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Build the StructuredLogger
    pub fn build(self) -> Result<StructuredLogger> {
        self.config.validate()?;

        let sink = match self.sink {
            Some(sink) => sink,
            None => default_sink()?,
        };

        let config = self.config;
        let formatter = self.formatter.unwrap_or_else(|| {
            Arc::new(
                JsonEntryFormatter::new()
                    .with_max_depth(config.max_depth)
                    .with_cause_in_message(config.cause_in_message),
            )
        });

        Ok(StructuredLogger {
            sink,
            formatter,
            root_namespace: config.root_namespace.map(|name| name.trim().to_string()),
        })
    }
}

impl Default for StructuredLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "console")]
fn default_sink() -> Result<Arc<dyn LogSink>> {
    Ok(Arc::new(crate::sinks::ConsoleSink::new()))
}

#[cfg(not(feature = "console"))]
fn default_sink() -> Result<Arc<dyn LogSink>> {
    Err(super::error::LoggerError::config(
        "StructuredLoggerBuilder",
        "no sink configured",
    ))
}
