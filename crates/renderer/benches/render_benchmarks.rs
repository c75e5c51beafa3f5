//! Benchmarks for mesh decoding and field rendering.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mesh_format::{decode_str, Bounds, Grid};
use renderer::contour::{contour_levels, generate_all_contours, ContourConfig};
use renderer::{render_heatmap, render_surface, AxisCoordinates, RenderStyle};
use test_utils::generators::{create_peak_field, mesh_text};

const SIZES: [usize; 3] = [64, 256, 512];

fn peak_grid(size: usize) -> Grid {
    Grid::new(
        "bench",
        Bounds::new(-5.0, -5.0, 5.0, 5.0),
        size,
        size,
        create_peak_field(size, size),
    )
    .unwrap()
}

// =============================================================================
// DECODE BENCHMARKS
// =============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in SIZES {
        let text = mesh_text("0", (-5.0, -5.0, 5.0, 5.0), size, size, &create_peak_field(size, size));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode_str", size), &text, |b, text| {
            b.iter(|| decode_str(black_box(text)).unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// CONTOUR BENCHMARKS
// =============================================================================

fn bench_contours(c: &mut Criterion) {
    let mut group = c.benchmark_group("contours");

    for size in SIZES {
        let data = create_peak_field(size, size);
        let config = ContourConfig {
            levels: contour_levels(0.0, 1.0, 5),
            ..ContourConfig::default()
        };
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("generate_all", size), &data, |b, data| {
            b.iter(|| generate_all_contours(black_box(data), size, size, &config));
        });
    }

    group.finish();
}

// =============================================================================
// PROJECTION BENCHMARKS
// =============================================================================

fn bench_heatmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heatmap");
    group.sample_size(20);
    let style = RenderStyle::default();

    for size in SIZES {
        let grid = peak_grid(size);
        let coords = AxisCoordinates::from_grid(&grid);

        group.bench_with_input(BenchmarkId::new("with_contours", size), &grid, |b, grid| {
            b.iter(|| render_heatmap(black_box(grid), &coords, true, &style).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("plain", size), &grid, |b, grid| {
            b.iter(|| render_heatmap(black_box(grid), &coords, false, &style).unwrap());
        });
    }

    group.finish();
}

fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");
    group.sample_size(20);
    let style = RenderStyle::default();

    for size in SIZES {
        let grid = peak_grid(size);
        let coords = AxisCoordinates::from_grid(&grid);

        group.bench_with_input(BenchmarkId::new("render", size), &grid, |b, grid| {
            b.iter(|| render_surface(black_box(grid), &coords, &style).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_contours, bench_heatmap, bench_surface);
criterion_main!(benches);
