//! Namespaces, root namespace and cause placement example
//!
//! Demonstrates a logger configured from the environment, with all metrics
//! redirected into a root namespace and the cause folded into the entry.
//!
//! Run with: STRUCTURED_LOG_ROOT_NAMESPACE=billing cargo run --example namespaces

use rust_structured_logger::core::Decimal;
use rust_structured_logger::lifecycle::{BasicLifecycle, LoggableLifecycle, SERVICE_TYPE};
use rust_structured_logger::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("invoice {id} could not be charged")]
struct ChargeError {
    id: u64,
    #[source]
    source: std::io::Error,
}

fn main() -> Result<()> {
    println!("=== Structured Logger - Namespaces Example ===\n");

    let config = LoggerConfig::from_env()?;
    println!("Loaded configuration: {:?}\n", config);

    let logger = StructuredLogger::builder()
        .sink(ConsoleSink::new())
        .config(config)
        .cause_in_message(true)
        .build()?;

    for event in [BasicLifecycle::Starting, BasicLifecycle::Started] {
        logger.info(event.log_message(SERVICE_TYPE))?;
    }

    logger.info_with("Invoice created", |entry| {
        entry.with("id", 1001u64)?;
        let customer = entry.ns("customer")?;
        customer.with("id", 77)?.with("tier", "gold")?;
        customer.ns("address")?.with("country", "NZ")?;
        entry.ns("amount")?.with("value", "19.99".parse::<Decimal>()?)?.with("currency", "NZD")?;
        Ok(())
    })?;

    logger.error_with("Charge failed", |entry| {
        entry.with("id", 1001u64)?;
        entry.with_cause(ChargeError {
            id: 1001,
            source: std::io::Error::new(std::io::ErrorKind::TimedOut, "gateway timeout"),
        })?;
        Ok(())
    })?;

    for event in [BasicLifecycle::Stopping, BasicLifecycle::Stopped] {
        logger.info(event.log_message(SERVICE_TYPE))?;
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
