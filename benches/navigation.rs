// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for navigation target computation.
//!
//! Measures the performance of:
//! - Page targets for a listing descriptor
//! - Cursor targets across a large album
//! - Link rendering for both sequence kinds

use criterion::{criterion_group, criterion_main, Criterion};
use minori::application::query::{CursorSequence, Navigator, PageSequence, Route};
use minori::domain::{Address, PageDescriptor};
use std::hint::black_box;

fn album_items(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("image-{i:05}")).collect()
}

fn bench_page_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");
    let descriptor = PageDescriptor::for_page(37, 16, 1_000);
    let navigator = Navigator::new(Route::Bookshelf, "http://img");

    group.bench_function("page_targets", |b| {
        b.iter(|| black_box(PageSequence::new(black_box(descriptor)).targets()));
    });

    group.bench_function("page_links", |b| {
        b.iter(|| black_box(navigator.render(black_box(&descriptor))));
    });

    group.finish();
}

/// Cursor lookups are linear in the album size.
fn bench_cursor_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");
    let items = album_items(2_000);
    let middle = items[1_000].clone();
    let sequence = CursorSequence::new(items, middle);
    let navigator = Navigator::new(Route::Viewer("album".into()), "http://img");

    group.bench_function("cursor_targets", |b| {
        b.iter(|| black_box(sequence.targets()));
    });

    group.bench_function("cursor_links", |b| {
        b.iter(|| black_box(navigator.render_cursor(&sequence, Some("image-01000.png"))));
    });

    group.bench_function("cursor_neighbours", |b| {
        b.iter(|| black_box(sequence.neighbours(black_box(3))));
    });

    group.finish();
}

fn bench_address_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");

    group.bench_function("address_parse", |b| {
        b.iter(|| black_box(Address::parse(black_box("#album-0042:image-01000"))));
    });

    group.finish();
}

criterion_group!(benches, bench_page_targets, bench_cursor_targets, bench_address_parse);
criterion_main!(benches);
