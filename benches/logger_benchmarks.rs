//! Criterion benchmarks for rust_structured_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_structured_logger::core::{Cause, LogSink, Result};
use rust_structured_logger::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Accepts every record and discards it
struct NullSink {
    min_level: LogLevel,
}

impl LogSink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn emit(&self, _level: LogLevel, text: &str, _cause: Option<&Cause>) -> Result<()> {
        black_box(text);
        Ok(())
    }
}

fn null_logger(min_level: LogLevel) -> StructuredLogger {
    StructuredLogger::new(Arc::new(NullSink { min_level }))
}

// ============================================================================
// Level Gating Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger(LogLevel::Warn);

    group.bench_function("disabled_plain", |b| {
        b.iter(|| logger.debug(black_box("Debug message")));
    });

    group.bench_function("disabled_with_metrics", |b| {
        b.iter(|| {
            logger.debug_with(black_box("Debug message"), |entry| {
                entry.with("user", "alice")?.with("attempt", 3)?;
                Ok(())
            })
        });
    });

    group.bench_function("enabled_plain", |b| {
        b.iter(|| logger.warn(black_box("Warning message")));
    });

    group.bench_function("enabled_with_metrics", |b| {
        b.iter(|| {
            logger.warn_with(black_box("Warning message"), |entry| {
                entry.with("user", "alice")?.with("attempt", 3)?;
                Ok(())
            })
        });
    });

    group.finish();
}

// ============================================================================
// Entry Building Benchmarks
// ============================================================================

fn bench_entry_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry_building");
    group.throughput(Throughput::Elements(1));

    group.bench_function("flat_10_metrics", |b| {
        b.iter(|| {
            let mut entry = EntryBuilder::new("flat");
            for i in 0..10 {
                entry.with(format!("key{}", i), i)?;
            }
            black_box(entry.snapshot());
            Ok::<(), LoggerError>(())
        });
    });

    group.bench_function("nested_namespaces", |b| {
        b.iter(|| {
            let mut entry = EntryBuilder::new("nested");
            entry
                .ns("http")?
                .with("method", "GET")?
                .with("status", 200)?;
            entry.ns("db")?.ns("pool")?.with("active", 4)?;
            entry.with_cause(Cause::msg("timeout"))?;
            black_box(entry.snapshot());
            Ok::<(), LoggerError>(())
        });
    });

    group.finish();
}

// ============================================================================
// Serialization Benchmarks
// ============================================================================

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    group.throughput(Throughput::Elements(1));

    let formatter = JsonEntryFormatter::new();

    let mut flat = BTreeMap::new();
    flat.insert("message", Value::from("Request processed"));
    flat.insert("status", Value::from(200));
    flat.insert("latency", Value::from(12.5));
    flat.insert("cached", Value::from(false));
    let flat = Value::from(flat);

    group.bench_function("flat_entry", |b| {
        b.iter(|| formatter.format(black_box(&flat)));
    });

    let escaped = Value::from("line one\nline \"two\"\twith tab");
    group.bench_function("escaped_text", |b| {
        b.iter(|| formatter.format(black_box(&escaped)));
    });

    let primitives = Value::from([0i64; 256]);
    group.bench_function("primitive_array_256", |b| {
        b.iter(|| formatter.format(black_box(&primitives)));
    });

    let mut deep = Value::from(1);
    for level in 0..8 {
        let mut map = BTreeMap::new();
        map.insert(format!("level{}", level), deep);
        deep = Value::from(map);
    }
    group.bench_function("max_depth_entry", |b| {
        b.iter(|| formatter.format(black_box(&deep)));
    });

    group.finish();
}

// ============================================================================
// Async Sink Benchmarks
// ============================================================================

fn bench_async_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_logging");
    group.throughput(Throughput::Elements(1));

    let sink = Arc::new(
        AsyncSink::new(NullSink { min_level: LogLevel::Trace }, 10_000)
            .expect("Failed to create async sink"),
    );
    let logger = StructuredLogger::new(sink.clone());

    group.bench_function("info_with_metrics", |b| {
        b.iter(|| {
            logger.info_with(black_box("Async message"), |entry| {
                entry.with("id", 42)?;
                Ok(())
            })
        });
    });

    group.finish();
    sink.shutdown(std::time::Duration::from_secs(5));
}

criterion_group!(
    benches,
    bench_level_filtering,
    bench_entry_building,
    bench_serialization,
    bench_async_logging
);
criterion_main!(benches);
