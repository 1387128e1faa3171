//! Sink implementations

pub mod async_sink;
#[cfg(feature = "console")]
pub mod console;
pub mod memory;
#[cfg(feature = "tracing")]
pub mod tracing_sink;

pub use async_sink::{AsyncSink, DEFAULT_SHUTDOWN_TIMEOUT};
#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use memory::{EmittedRecord, MemorySink};
#[cfg(feature = "tracing")]
pub use tracing_sink::{TracingSink, TRACING_TARGET};
