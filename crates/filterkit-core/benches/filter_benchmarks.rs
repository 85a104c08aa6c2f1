//! Benchmarks for the hot filter paths
//!
//! Pattern translation, date rendering and batching run once per template
//! evaluation, so these cover the cost a host pays per call.
//!
//! Copyright (c) 2025 Filterkit Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use filterkit_core::pattern::translate;
use filterkit_core::{Context, FilterRegistry, Value};
use serde_json::json;

fn create_large_sequence(len: usize) -> Value {
    (0..len)
        .map(|i| json!({"id": i, "name": format!("Item {}", i)}))
        .map(Value::from)
        .collect()
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");

    let patterns = vec![
        ("date", "yyyy-MM-dd"),
        ("date_time", "yyyy-MM-dd hh:mm:ss"),
        ("literal_heavy", "'Day' d 'of' MM, 'year' yyyy (h:mm)"),
    ];

    for (name, pattern) in patterns {
        group.bench_with_input(BenchmarkId::new("translate", name), pattern, |b, pattern| {
            b.iter(|| translate(black_box(pattern)))
        });
    }

    group.finish();
}

fn bench_date_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_filters");
    let registry = FilterRegistry::builtin();
    let ctx = Context::new();

    let cases = vec![
        ("date", Value::from("2023-07-04"), vec![Value::from("dd/MM/yyyy")]),
        ("dateTime", Value::from("2023-07-04 14:05:09"), vec![]),
        ("time", Value::from("14:05:09"), vec![Value::from("h:mm")]),
        ("date_modify", Value::from("2023-07-04"), vec![Value::from("+1 month -2 days")]),
    ];

    for (name, subject, args) in cases {
        group.bench_function(name, |b| {
            b.iter(|| registry.apply(name, &ctx, black_box(&subject), &args))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let registry = FilterRegistry::builtin();
    let ctx = Context::new();

    for len in [10, 1_000, 10_000] {
        let items = create_large_sequence(len);
        group.bench_with_input(BenchmarkId::new("size_3_fill", len), &items, |b, items| {
            b.iter(|| registry.apply("batch", &ctx, black_box(items), &[Value::from(3), Value::Null]))
        });
    }

    group.finish();
}

fn bench_collection_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_filters");
    let registry = FilterRegistry::builtin();
    let ctx = Context::new();
    let items = create_large_sequence(1_000);

    group.bench_function("get", |b| {
        b.iter(|| registry.apply("get", &ctx, black_box(&items), &[Value::from(500)]))
    });
    group.bench_function("merge", |b| {
        b.iter(|| registry.apply("merge", &ctx, black_box(&items), &[items.clone()]))
    });
    group.bench_function("json_encode", |b| {
        b.iter(|| registry.apply("json_encode", &ctx, black_box(&items), &[]))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_translate,
    bench_date_filters,
    bench_batch,
    bench_collection_filters
);
criterion_main!(benches);
