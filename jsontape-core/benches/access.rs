//! Benchmarks comparing access patterns over the same JSON text.
//!
//! Compares:
//! - targeted lookup through the lazy views (one member of a wide object)
//! - full materialization into an owned tree
//! - parsing into `serde_json::Value`, the baseline owned representation
//!
//! Run with: cargo bench --bench access

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsontape_core::{parse, AllocationStrategy, Document};

/// Object with `width` members, each holding a small record.
fn wide_object(width: usize) -> String {
    let members: Vec<String> = (0..width)
        .map(|i| format!(r#""key{i:05}": {{"id": {i}, "name": "item {i}", "score": {i}.5, "tags": ["a", "b"]}}"#))
        .collect();
    format!("{{{}}}", members.join(", "))
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for width in [10, 1000] {
        let text = wide_object(width);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("single", width), &text, |b, text| {
            b.iter(|| parse(AllocationStrategy::Single, black_box(text.as_bytes())))
        });
        group.bench_with_input(BenchmarkId::new("dynamic", width), &text, |b, text| {
            b.iter(|| parse(AllocationStrategy::Dynamic, black_box(text.as_bytes())))
        });
        group.bench_with_input(BenchmarkId::new("serde_json", width), &text, |b, text| {
            b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(text)))
        });
    }
    group.finish();
}

fn bench_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("access");
    for width in [10, 1000] {
        let text = wide_object(width);
        let doc = Document::parse(text.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let key = format!("key{:05}", width / 2);

        group.bench_with_input(BenchmarkId::new("lazy_lookup", width), &key, |b, key| {
            b.iter(|| {
                let root = doc.root().as_object()?;
                root.get(black_box(key))?.as_object()?.get("score")?.as_f64()
            })
        });
        group.bench_with_input(BenchmarkId::new("materialize_lookup", width), &key, |b, key| {
            b.iter(|| {
                let value = doc.materialize();
                value.get(black_box(key))?.get("score")?.as_f64()
            })
        });
        group.bench_with_input(BenchmarkId::new("serde_json_lookup", width), &key, |b, key| {
            b.iter(|| json.get(black_box(key))?.get("score")?.as_f64())
        });
    }
    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let text = wide_object(1000);
    let doc = Document::parse(text.as_bytes()).unwrap();

    c.bench_function("iterate_entries", |b| {
        b.iter(|| {
            let root = doc.root().as_object().unwrap();
            root.entries()
                .filter_map(|(_, v)| v.as_object()?.get("id")?.as_i32())
                .sum::<i32>()
        })
    });
}

criterion_group!(benches, bench_parse, bench_access, bench_iterate);
criterion_main!(benches);
