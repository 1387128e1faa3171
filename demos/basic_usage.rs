//! Basic structured logger usage example
//!
//! Demonstrates logging with metrics, nested namespaces, an attached cause
//! and level gating on the console sink.
//!
//! Run with: cargo run --example basic_usage

use rust_structured_logger::prelude::*;
use rust_structured_logger::{info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Structured Logger - Basic Usage Example ===\n");

    let console = Arc::new(ConsoleSink::new().with_min_level(LogLevel::Trace));
    let logger = StructuredLogger::new(console.clone());

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message")?;
    logger.debug("This is a debug message")?;
    logger.info("This is an info message")?;
    logger.warn("This is a warning message")?;
    logger.error("This is an error message")?;

    println!("\n2. Attaching metrics:");
    logger.info_with("Request processed", |entry| {
        entry.with("status", 200)?.with("latency_ms", 12.5)?;
        entry.ns("http")?.with("method", "GET")?.with("path", "/users")?;
        Ok(())
    })?;
    info!(logger, "Cache warmed"; "entries" => 1024, "hit_ratio" => 0.93)?;

    println!("\n3. Attaching a cause:");
    let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "db unreachable");
    logger.error_with("Query failed", |entry| {
        entry.ns("db")?.with("table", "users")?;
        entry.with_cause(cause)?;
        Ok(())
    })?;

    println!("\n4. Rejected entries:");
    let result = logger.info_with("Duplicate key", |entry| {
        entry.with("id", 1)?;
        entry.with("id", 2)?;
        Ok(())
    });
    if let Err(e) = result {
        println!("   Entry rejected: {}", e);
    }

    println!("\n5. Raising the minimum level:");
    console.set_min_level(LogLevel::Warn);
    println!("   Minimum level set to WARN - info won't show:");
    logger.info("Info message (hidden)")?;
    warn!(logger, "Disk usage at {}%", 91)?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
