//! Criterion benchmarks for the settings document codec and typed accessors.
//!
//! Run with:
//! ```bash
//! cargo bench --package xmlconf-core --bench store_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xmlconf_core::format::{parse_document, render_document};
use xmlconf_core::{ConfigStore, Settings};

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn make_settings(count: usize) -> Settings {
    (0..count)
        .map(|i| (format!("Setting{i}"), format!("{}", i as f64 * 1.5)))
        .collect()
}

fn make_store(count: usize) -> ConfigStore {
    let mut store = ConfigStore::new("");
    for (key, value) in make_settings(count) {
        store.add_setting(key, value);
    }
    store
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_document");
    for count in [2usize, 50, 500] {
        let settings = make_settings(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &settings, |b, s| {
            b.iter(|| render_document(black_box(s)).expect("render"))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");
    for count in [2usize, 50, 500] {
        let xml = render_document(&make_settings(count)).expect("render");
        group.bench_with_input(BenchmarkId::from_parameter(count), &xml, |b, x| {
            b.iter(|| parse_document(black_box(x)).expect("parse"))
        });
    }
    group.finish();
}

fn bench_typed_access(c: &mut Criterion) {
    let mut store = make_store(50);
    store.add_setting("FullScreen", "Yes");

    c.bench_function("read_double_rounded", |b| {
        b.iter(|| store.read_double(black_box("Setting25"), black_box(2)))
    });
    c.bench_function("read_boolean", |b| {
        b.iter(|| store.read_boolean(black_box("FullScreen")))
    });
    c.bench_function("write_double_trimmed", |b| {
        b.iter(|| store.write_double(black_box("Setting10"), black_box(3.1230000), 4))
    });
}

criterion_group!(benches, bench_render, bench_parse, bench_typed_access);
criterion_main!(benches);
