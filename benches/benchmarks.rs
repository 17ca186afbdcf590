//! Performance benchmarks for symbol construction and rendering.
//!
//! Measures the hot paths:
//! - QR matrix construction
//! - SVG emission for each dot shape
//! - PNG rasterization and encoding
//! - Hex/HSV conversions behind the color picker

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qrforge::color;
use qrforge::design::{DotShape, EcLevel, QrDesign};
use qrforge::qr;
use qrforge::render;

/// A payload long enough to need a mid-size symbol.
fn long_payload_design() -> QrDesign {
    let mut design = QrDesign::default();
    design.data = "https://example.com/catalog?item=".repeat(8);
    design.ec_level = EcLevel::Q;
    design
}

/// Benchmark QR matrix construction for a short URL payload.
fn bench_qr_build_short(c: &mut Criterion) {
    let design = QrDesign::default();

    c.bench_function("qr_build_short", |b| {
        b.iter(|| qr::build(black_box(&design)))
    });
}

/// Benchmark QR matrix construction for a payload spanning a larger symbol.
fn bench_qr_build_long(c: &mut Criterion) {
    let design = long_payload_design();

    c.bench_function("qr_build_long", |b| {
        b.iter(|| qr::build(black_box(&design)))
    });
}

/// Benchmark SVG emission for each dot shape over the same symbol.
fn bench_svg_shapes(c: &mut Criterion) {
    let mut design = long_payload_design();
    let outcome = qr::build(&design).unwrap();

    for shape in DotShape::ALL {
        design.dot_shape = shape;
        c.bench_function(&format!("svg_{}", shape.value()), |b| {
            b.iter(|| black_box(render::svg(black_box(&design), black_box(&outcome))))
        });
    }
}

/// Benchmark PNG rasterization (the per-pixel coverage loop).
fn bench_png_raster(c: &mut Criterion) {
    let design = QrDesign::default();
    let outcome = qr::build(&design).unwrap();

    c.bench_function("png_raster", |b| {
        b.iter(|| render::png(black_box(&design), black_box(&outcome)))
    });
}

/// Benchmark full PNG output including compression.
fn bench_png_encode(c: &mut Criterion) {
    let design = QrDesign::default();
    let outcome = qr::build(&design).unwrap();

    c.bench_function("png_encode", |b| {
        b.iter(|| render::png_bytes(black_box(&design), black_box(&outcome)))
    });
}

/// Benchmark the picker's hex -> HSV -> hex round trip for 256 colors.
fn bench_color_round_trip(c: &mut Criterion) {
    // Generate 256 test colors spanning the color space
    let hexes: Vec<String> = (0u8..=255)
        .map(|i: u8| {
            let r = i;
            let g = i.wrapping_mul(97);
            let b = i.wrapping_mul(193);
            format!("#{r:02x}{g:02x}{b:02x}")
        })
        .collect();

    c.bench_function("color_round_trip_256", |b| {
        b.iter(|| {
            for hex in &hexes {
                let hsva = color::hsva_or_default(black_box(hex));
                black_box(color::hsva_to_hex(hsva));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_qr_build_short,
    bench_qr_build_long,
    bench_svg_shapes,
    bench_png_raster,
    bench_png_encode,
    bench_color_round_trip,
);

criterion_main!(benches);
