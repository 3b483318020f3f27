use iv_core::{Color, ColorLookup, Point};
use rand::Rng;

/// Draws per path when the caller does not say otherwise.
pub const DEFAULT_COLOR_SAMPLES: usize = 10;

/// Average color of a path from a few random pixels.
///
/// Draws `min(samples, points.len())` indices uniformly with replacement.
/// Pixels the lookup cannot resolve are skipped; with no valid draw at all
/// the result is opaque black.
pub fn sample_color<C, R>(points: &[Point], lookup: &C, rng: &mut R, samples: usize) -> Color
where
    C: ColorLookup + ?Sized,
    R: Rng + ?Sized,
{
    let draws = samples.min(points.len());
    let mut sum = [0u32; 3];
    let mut valid = 0u32;

    for _ in 0..draws {
        let p = points[rng.random_range(0..points.len())];
        if let Some(rgb) = lookup.color_at(p) {
            for (acc, v) in sum.iter_mut().zip(rgb) {
                *acc += v as u32;
            }
            valid += 1;
        }
    }

    if valid == 0 {
        return Color::BLACK;
    }

    let channel = |s: u32| s as f32 / valid as f32 / 255.0;
    Color::opaque(channel(sum[0]), channel(sum[1]), channel(sum[2]))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use iv_core::{Color, Point, Rgb8};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::sample_color;

    fn line(n: i32) -> Vec<Point> {
        (0..n).map(|x| Point::new(x, 0)).collect()
    }

    #[test]
    fn uniform_color_is_reproduced_exactly() {
        let lookup = |_: Point| Some([255u8, 0, 51]);
        let mut rng = StdRng::seed_from_u64(1);
        let c = sample_color(&line(30), &lookup, &mut rng, 10);
        assert_eq!(c, Color::opaque(1.0, 0.0, 0.2));
    }

    #[test]
    fn no_points_or_no_valid_samples_fall_back_to_black() {
        let mut rng = StdRng::seed_from_u64(2);
        let some = |_: Point| Some([9u8, 9, 9]);
        let none = |_: Point| None::<Rgb8>;

        assert_eq!(sample_color(&[], &some, &mut rng, 10), Color::BLACK);
        assert_eq!(sample_color(&line(5), &none, &mut rng, 10), Color::BLACK);
        assert_eq!(sample_color(&line(5), &some, &mut rng, 0), Color::BLACK);
    }

    #[test]
    fn missing_pixels_are_excluded_from_the_average() {
        // Even x resolve to white, odd x are missing.
        let lookup = |p: Point| (p.x % 2 == 0).then_some([255u8, 255, 255]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let c = sample_color(&line(40), &lookup, &mut rng, 10);
            assert!(c == Color::opaque(1.0, 1.0, 1.0) || c == Color::BLACK);
        }
    }

    #[test]
    fn mixed_colors_stay_in_range() {
        let mut map: HashMap<Point, Rgb8> = HashMap::new();
        for (i, p) in line(20).into_iter().enumerate() {
            map.insert(p, [(i * 13) as u8, 255 - (i * 7) as u8, 128]);
        }
        let mut rng = StdRng::seed_from_u64(4);
        let c = sample_color(&line(20), &map, &mut rng, 10);

        for v in [c.r, c.g, c.b] {
            assert!((0.0..=1.0).contains(&v));
        }
        assert_eq!(c.a, 1.0);
        assert!((c.b - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn same_seed_same_color() {
        let lookup = |p: Point| Some([(p.x * 6) as u8, 0, 0]);
        let a = sample_color(&line(40), &lookup, &mut StdRng::seed_from_u64(9), 10);
        let b = sample_color(&line(40), &lookup, &mut StdRng::seed_from_u64(9), 10);
        assert_eq!(a, b);
    }
}
