use criterion::{Criterion, black_box, criterion_group, criterion_main};
use iv_core::Point;
use iv_curve::{FitConfig, fit_path};

// Pixel-rounded spiral, long enough to force many splits.
fn spiral(n: usize) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 * 0.02;
        let r = 10.0 + 4.0 * t;
        let p = Point::new((r * t.cos()).round() as i32, (r * t.sin()).round() as i32);
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

fn bench_fit(c: &mut Criterion) {
    let pts = spiral(4000);
    let polyline = FitConfig::default();
    let bezier = FitConfig::bezier();

    c.bench_function("iv_curve_fit_polyline_spiral", |b| {
        b.iter(|| black_box(fit_path(black_box(&pts), &polyline).num_segments()));
    });

    c.bench_function("iv_curve_fit_bezier_spiral", |b| {
        b.iter(|| black_box(fit_path(black_box(&pts), &bezier).num_segments()));
    });
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
