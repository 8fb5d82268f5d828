use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};
use snapstrip_core::prelude::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

fn booth_assignment() -> Assignment {
    let mut assignment = Assignment::new(3);
    let _ = assignment.set_photo(0, solid(900, 1200, [200, 60, 60, 255]));
    let _ = assignment.set_photo(1, solid(1800, 600, [60, 200, 60, 255]));
    let _ = assignment.set_photo(2, solid(640, 640, [60, 60, 200, 255]));
    assignment
}

fn bench_render_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_filters");
    let template = solid(1500, 1050, [245, 245, 245, 255]);
    let assignment = booth_assignment();

    group.throughput(Throughput::Elements(3));
    for filter in [
        ResizeFilter::Nearest,
        ResizeFilter::Triangle,
        ResizeFilter::CatmullRom,
    ] {
        group.bench_with_input(
            BenchmarkId::new("full_strip", format!("{filter:?}")),
            &filter,
            |b, &filter| {
                b.iter(|| {
                    let cfg = StripConfig::builder()
                        .filter(filter)
                        .build()
                        .expect("valid config");
                    black_box(render(&template, &assignment, &cfg).expect("render"))
                });
            },
        );
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let cfg = StripConfig::default();
    let sizes = [(900u32, 1200u32), (1800, 600), (640, 640)];
    group.bench_function("three_slots", |b| {
        b.iter(|| black_box(plan(&sizes, &cfg).expect("plan")));
    });
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let template = solid(1500, 1050, [245, 245, 245, 255]);
    let cfg = StripConfig::default();
    let out = render(&template, &booth_assignment(), &cfg).expect("render");

    group.bench_function("jpeg_q92", |b| {
        b.iter(|| {
            black_box(encode_surface(&out.surface, EncodeFormat::default()).expect("encode"))
        });
    });
    group.bench_function("png", |b| {
        b.iter(|| black_box(encode_surface(&out.surface, EncodeFormat::Png).expect("encode")));
    });
    group.finish();
}

criterion_group!(benches, bench_render_filters, bench_plan, bench_encode);
criterion_main!(benches);
