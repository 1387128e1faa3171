//! Async logging example
//!
//! Demonstrates handing records to a background worker from several threads.
//!
//! Run with: cargo run --example async_logging

use rust_structured_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Structured Logger - Async Logging Example ===\n");

    let sink = Arc::new(AsyncSink::new(ConsoleSink::new(), 1000)?);
    let logger = StructuredLogger::new(sink.clone());

    println!("1. High-performance async logging:");
    for i in 0..100 {
        logger.info_with("Message", |entry| {
            entry.with("seq", i)?;
            Ok(())
        })?;
    }
    println!("   Logged 100 messages asynchronously");

    println!("\n2. Multi-threaded logging:");
    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger = logger.clone();
        handles.push(thread::spawn(move || -> Result<()> {
            for i in 0..20 {
                logger.info_with("Worker message", |entry| {
                    entry.ns("worker")?.with("id", thread_id)?.with("seq", i)?;
                    Ok(())
                })?;
            }
            Ok(())
        }));
    }

    for handle in handles {
        match handle.join() {
            Ok(result) => result?,
            Err(_) => eprintln!("worker thread panicked"),
        }
    }
    println!("   All threads completed");

    println!("\n3. Shutting down:");
    if sink.shutdown(Duration::from_secs(5)) {
        let metrics = sink.metrics();
        println!(
            "   Delivered {} records, dropped {} ({:.2}%)",
            metrics.emitted_count(),
            metrics.dropped_count(),
            metrics.drop_rate()
        );
    } else {
        println!("   Worker did not finish in time");
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
