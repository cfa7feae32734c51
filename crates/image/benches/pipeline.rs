//! Benchmarks for the pixel passes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};
use resizer_image::{
    compose, make_color_transparent, scan, Color, OutputFormat, ScanMode, SourceKind,
    TransformOptions, TransformRequest,
};

fn framed(size: u32) -> RgbaImage {
    let border = size / 8;
    RgbaImage::from_fn(size, size, |x, y| {
        let inside = x >= border && y >= border && x < size - border && y < size - border;
        if inside { Rgba([40, 90, 160, 255]) } else { Rgba([255, 255, 255, 255]) }
    })
}

fn bench_scan(c: &mut Criterion) {
    let img = framed(1024);

    c.bench_function("scan_color_key_1024", |b| {
        b.iter(|| scan(black_box(&img), ScanMode::color_key(Color::WHITE)))
    });

    c.bench_function("scan_alpha_1024", |b| b.iter(|| scan(black_box(&img), ScanMode::Alpha)));
}

fn bench_rewrite(c: &mut Criterion) {
    let img = framed(1024);

    c.bench_function("make_color_transparent_1024", |b| {
        b.iter_batched(
            || img.clone(),
            |mut buf| make_color_transparent(&mut buf, Color::WHITE),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_compose(c: &mut Criterion) {
    let img = framed(1024);
    let opts = TransformOptions {
        auto_crop: true,
        format: OutputFormat::Png,
        ..TransformOptions::sized(512, 384)
    };

    c.bench_function("compose_crop_resize_key_1024", |b| {
        b.iter(|| {
            let request = TransformRequest::new(&img, SourceKind::OpaqueLossy, &opts).unwrap();
            compose(black_box(&request)).unwrap()
        })
    });
}

criterion_group!(benches, bench_scan, bench_rewrite, bench_compose);
criterion_main!(benches);
