use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mossetrack_rs::{BoundingBox, FourierBasis, GrayFrame, MosseTracker};
use nalgebra::DMatrix;

/* ----------------------------------------------------------------------------
 * Synthetic input
 * ---------------------------------------------------------------------------- */

fn ring_frame(width: usize, height: usize, cx: f64, cy: f64, radius: f64) -> GrayFrame {
    let pixels = DMatrix::from_fn(height, width, |r, c| {
        let d = (r as f64 - cy).hypot(c as f64 - cx) - radius;
        30.0 + 200.0 * (-d * d / 4.0).exp()
    });
    GrayFrame::from_matrix(pixels).unwrap()
}

fn bench_forward_dft(c: &mut Criterion) {
    let mut group = c.benchmark_group("dft_forward");
    for size in [16usize, 32, 64] {
        let basis = FourierBasis::new(size, size).unwrap();
        let input = DMatrix::from_fn(size, size, |r, c| ((r * 31 + c * 17) % 23) as f64);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, x| {
            b.iter(|| basis.forward_real(x).unwrap());
        });
    }
    group.finish();
}

fn bench_mosse_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("mosse_next");
    for size in [16usize, 32, 64] {
        let (fw, fh) = (size * 6, size * 6);
        let origin = size * 2;
        let center = origin as f64 + size as f64 / 2.0;
        let radius = size as f64 / 4.0;
        let frames: Vec<GrayFrame> = (0..10)
            .map(|i| ring_frame(fw, fh, center + i as f64, center, radius))
            .collect();
        let bbox = BoundingBox::new(origin, origin, size, size);

        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                let mut tracker = MosseTracker::init(&frames[0], bbox).unwrap();
                for frame in frames.iter().skip(1) {
                    let _ = tracker.next(frame);
                }
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(3));
    targets = bench_forward_dft, bench_mosse_next
}
criterion_main!(benches);
