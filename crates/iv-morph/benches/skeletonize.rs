use criterion::{Criterion, black_box, criterion_group, criterion_main};
use iv_core::{PixelSet, Point};
use iv_morph::{group_components, skeletonize};

// Thick strokes: a grid of 7-pixel-wide bars plus two diagonals.
fn synthetic_strokes(width: i32, height: i32) -> PixelSet {
    let mut out = PixelSet::new();
    for y in 0..height {
        for x in 0..width {
            let bar = (y % 64) < 7 || (x % 96) < 7;
            let diag = (x - y).abs() < 5 || (x + y - width).abs() < 5;
            if bar || diag {
                out.insert(Point::new(x, y));
            }
        }
    }
    out
}

fn bench_group_components(c: &mut Criterion) {
    let mask = synthetic_strokes(512, 384);

    c.bench_function("iv_morph_group_components_512x384", |b| {
        b.iter(|| {
            let groups = group_components(black_box(&mask));
            black_box(groups.len());
        });
    });
}

fn bench_skeletonize(c: &mut Criterion) {
    let mask = synthetic_strokes(512, 384);
    let groups = group_components(&mask);

    c.bench_function("iv_morph_skeletonize_512x384", |b| {
        b.iter(|| {
            let mut kept = 0usize;
            for g in &groups {
                kept += skeletonize(black_box(g)).len();
            }
            black_box(kept);
        });
    });
}

criterion_group!(benches, bench_group_components, bench_skeletonize);
criterion_main!(benches);
