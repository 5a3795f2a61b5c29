//! Benchmarks for the conversion hot paths: property normalization and the
//! ancestor-pruning match. Both run once per directory on large trees, so
//! their per-call cost bounds how much of a run is spent outside the
//! external `svn` calls.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use svn2gitignore::patterns::{normalize_property, segment_matches};

fn bench_normalize(c: &mut Criterion) {
    let raw = "*.tmp\n*.log\r\nbuild\\output\n\n  target  \n".repeat(40);
    c.bench_function("normalize_property", |b| {
        b.iter(|| normalize_property(black_box("src/deeply/nested/dir"), black_box(&raw)))
    });
}

fn bench_prune_match(c: &mut Criterion) {
    let patterns = ["*.tmp", "build", "cache-??", "[Dd]ebug", "node_modules"];
    let names: Vec<String> = (0..200).map(|i| format!("dir{:03}", i)).collect();

    c.bench_function("segment_matches", |b| {
        b.iter(|| {
            let mut pruned = 0usize;
            for name in &names {
                if patterns.iter().any(|p| segment_matches(p, black_box(name))) {
                    pruned += 1;
                }
            }
            pruned
        })
    });
}

criterion_group!(benches, bench_normalize, bench_prune_match);
criterion_main!(benches);
