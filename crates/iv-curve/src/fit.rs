use kurbo::{CubicBez, Line, ParamCurve, ParamCurveDeriv, ParamCurveNearest, PathSeg, Point, Vec2};

use crate::path::VectorPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// One line segment per pair of consecutive points.
    #[default]
    Polyline,
    /// Piecewise cubic approximation within `error_threshold`.
    Bezier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    pub mode: FitMode,
    /// Largest allowed distance, in pixels, between an input point and the
    /// fitted curve. Only used by [`FitMode::Bezier`].
    pub error_threshold: f64,
    /// Newton reparameterization rounds tried before splitting.
    pub max_reparam_iters: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            mode: FitMode::Polyline,
            error_threshold: 7.0,
            max_reparam_iters: 4,
        }
    }
}

impl FitConfig {
    pub fn bezier() -> Self {
        Self {
            mode: FitMode::Bezier,
            ..Default::default()
        }
    }
}

/// Fits a traced point run with line or cubic segments.
///
/// Consecutive duplicates are collapsed first; fewer than two distinct
/// points give an empty path.
pub fn fit_path(points: &[iv_core::Point], cfg: &FitConfig) -> VectorPath {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        let q = Point::new(p.x as f64, p.y as f64);
        if pts.last() != Some(&q) {
            pts.push(q);
        }
    }
    if pts.len() < 2 {
        return VectorPath::new();
    }

    let segments = match cfg.mode {
        FitMode::Polyline => pts
            .windows(2)
            .map(|w| PathSeg::Line(Line::new(w[0], w[1])))
            .collect(),
        FitMode::Bezier => fit_bezier(&pts, cfg),
    };
    VectorPath::from_segments(segments)
}

fn fit_bezier(pts: &[Point], cfg: &FitConfig) -> Vec<PathSeg> {
    let n = pts.len();
    let mut out = Vec::new();

    let t_start = unit(pts[1] - pts[0]).unwrap_or(Vec2::new(1.0, 0.0));
    let t_end = unit(pts[n - 2] - pts[n - 1]).unwrap_or(Vec2::new(-1.0, 0.0));
    fit_cubic(pts, t_start, t_end, cfg, &mut out);

    log::trace!("fitted {} points with {} segments", n, out.len());
    out
}

fn fit_cubic(pts: &[Point], t_start: Vec2, t_end: Vec2, cfg: &FitConfig, out: &mut Vec<PathSeg>) {
    let n = pts.len();
    if n == 2 {
        out.push(PathSeg::Line(Line::new(pts[0], pts[1])));
        return;
    }

    let mut u = chord_length_params(pts);
    let mut bez = generate_bezier(pts, &u, t_start, t_end);
    let (mut err, mut split) = max_error(pts, &bez);
    if err < cfg.error_threshold {
        out.push(PathSeg::Cubic(bez));
        return;
    }

    if err < 4.0 * cfg.error_threshold {
        for _ in 0..cfg.max_reparam_iters {
            reparameterize(pts, &mut u, &bez);
            bez = generate_bezier(pts, &u, t_start, t_end);
            (err, split) = max_error(pts, &bez);
            if err < cfg.error_threshold {
                out.push(PathSeg::Cubic(bez));
                return;
            }
        }
    }

    let t_center = center_tangent(pts, split);
    fit_cubic(&pts[..=split], t_start, t_center, cfg, out);
    fit_cubic(&pts[split..], -t_center, t_end, cfg, out);
}

fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    (len > f64::EPSILON).then(|| v / len)
}

fn chord_length_params(pts: &[Point]) -> Vec<f64> {
    let mut u = Vec::with_capacity(pts.len());
    u.push(0.0);
    for w in pts.windows(2) {
        let prev = u[u.len() - 1];
        u.push(prev + (w[1] - w[0]).hypot());
    }

    let total = u[u.len() - 1];
    if total > 0.0 {
        for v in &mut u {
            *v /= total;
        }
    }
    u
}

fn bernstein(t: f64) -> [f64; 4] {
    let mt = 1.0 - t;
    [mt * mt * mt, 3.0 * t * mt * mt, 3.0 * t * t * mt, t * t * t]
}

/// Least-squares handle lengths along fixed end tangents.
fn generate_bezier(pts: &[Point], u: &[f64], t_start: Vec2, t_end: Vec2) -> CubicBez {
    let first = pts[0];
    let last = pts[pts.len() - 1];

    let mut c = [[0.0f64; 2]; 2];
    let mut x = [0.0f64; 2];
    for (p, &t) in pts.iter().zip(u) {
        let b = bernstein(t);
        let a0 = t_start * b[1];
        let a1 = t_end * b[2];

        c[0][0] += a0.dot(a0);
        c[0][1] += a0.dot(a1);
        c[1][1] += a1.dot(a1);

        let tmp = p.to_vec2() - (first.to_vec2() * (b[0] + b[1]) + last.to_vec2() * (b[2] + b[3]));
        x[0] += a0.dot(tmp);
        x[1] += a1.dot(tmp);
    }
    c[1][0] = c[0][1];

    let det_c = c[0][0] * c[1][1] - c[1][0] * c[0][1];
    let (alpha_l, alpha_r) = if det_c.abs() > 1e-12 {
        (
            (x[0] * c[1][1] - x[1] * c[0][1]) / det_c,
            (c[0][0] * x[1] - c[1][0] * x[0]) / det_c,
        )
    } else {
        (0.0, 0.0)
    };

    let seg_len = (last - first).hypot();
    let eps = 1e-6 * seg_len;
    if !(alpha_l > eps && alpha_r > eps) {
        // Wu-Barsky: handles at a third of the chord.
        let d = seg_len / 3.0;
        return CubicBez::new(first, first + t_start * d, last + t_end * d, last);
    }

    CubicBez::new(
        first,
        first + t_start * alpha_l,
        last + t_end * alpha_r,
        last,
    )
}

/// Largest point-to-curve distance and the interior index where it occurs.
fn max_error(pts: &[Point], bez: &CubicBez) -> (f64, usize) {
    let n = pts.len();
    let mut worst = 0.0;
    let mut split = n / 2;
    for (i, &p) in pts.iter().enumerate().take(n - 1).skip(1) {
        let d = bez.nearest(p, 1e-6).distance_sq.sqrt();
        if d > worst {
            worst = d;
            split = i;
        }
    }
    (worst, split)
}

/// One Newton-Raphson step per point towards the closest curve parameter.
fn reparameterize(pts: &[Point], u: &mut [f64], bez: &CubicBez) {
    let d1 = bez.deriv();
    let d2 = d1.deriv();
    for (p, t) in pts.iter().zip(u.iter_mut()) {
        let q = bez.eval(*t) - *p;
        let q1 = d1.eval(*t).to_vec2();
        let q2 = d2.eval(*t).to_vec2();
        let denom = q1.dot(q1) + q.dot(q2);
        if denom.abs() > 1e-12 {
            let next = *t - q.dot(q1) / denom;
            if next.is_finite() {
                *t = next.clamp(0.0, 1.0);
            }
        }
    }
}

fn center_tangent(pts: &[Point], i: usize) -> Vec2 {
    unit(pts[i - 1] - pts[i + 1])
        .or_else(|| unit(pts[i - 1] - pts[i]))
        .unwrap_or(Vec2::new(1.0, 0.0))
}
