//! Criterion microbenches for vlprep coordinate handling.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Fragment rewriting over conversation text (point and bbox)
//! - smart_resize dimension calculation

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use vlprep::coord::{
    adjust_bboxes_in_text, adjust_points_in_text, smart_resize, AdjustContext, CoordRegime,
    Dimensions,
};

// A realistic assistant turn: several entries, mixed keys, surrounding prose.
const CONVERSATION_FIXTURE: &str = r#"Here are the detected objects: [
{"point_2d": [412, 233], "label": "mug"},
{"point_2d": [518, 301], "label": "mug"},
{"bbox_2d": [100, 100, 300, 300], "label": "tray"},
{"bbox_2d": [40, 60, 540, 410], "label": "table"},
{"point_2d": [98, 77], "label": "spoon"}
]"#;

fn adjust_ctx() -> AdjustContext {
    AdjustContext::new(
        Dimensions::new(600, 800),
        Dimensions::new(450, 600),
        CoordRegime::Absolute,
    )
}

/// Benchmark point fragment rewriting.
fn bench_rewrite_points(c: &mut Criterion) {
    let ctx = adjust_ctx();
    let mut group = c.benchmark_group("rewrite");
    group.throughput(Throughput::Bytes(CONVERSATION_FIXTURE.len() as u64));

    group.bench_function("adjust_points_in_text", |b| {
        b.iter(|| {
            let out = adjust_points_in_text(black_box(CONVERSATION_FIXTURE), &ctx);
            black_box(out)
        })
    });

    group.finish();
}

/// Benchmark bbox fragment rewriting.
fn bench_rewrite_bboxes(c: &mut Criterion) {
    let ctx = adjust_ctx();
    let mut group = c.benchmark_group("rewrite");
    group.throughput(Throughput::Bytes(CONVERSATION_FIXTURE.len() as u64));

    group.bench_function("adjust_bboxes_in_text", |b| {
        b.iter(|| {
            let out = adjust_bboxes_in_text(black_box(CONVERSATION_FIXTURE), &ctx);
            black_box(out)
        })
    });

    group.finish();
}

/// Benchmark the resize dimension calculator.
fn bench_smart_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");

    group.bench_function("smart_resize", |b| {
        b.iter(|| {
            let dims = smart_resize(
                black_box(1200),
                black_box(1600),
                28,
                256 * 28 * 28,
                1280 * 28 * 28,
            )
            .unwrap();
            black_box(dims)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rewrite_points,
    bench_rewrite_bboxes,
    bench_smart_resize
);
criterion_main!(benches);
