use kurbo::{Line, ParamCurve, ParamCurveExtrema, PathSeg, Point, Rect};

/// Distance below which two outlines count as touching.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

const MAX_DEPTH: u32 = 48;
const CURVE_SAMPLES: usize = 16;

pub(crate) fn boxes_overlap(a: Rect, b: Rect, tol: f64) -> bool {
    a.x0 <= b.x1 + tol && b.x0 <= a.x1 + tol && a.y0 <= b.y1 + tol && b.y0 <= a.y1 + tol
}

/// Bounding-box pruned subdivision. Line pairs are solved directly; any
/// other pair splits its larger member in half until both pieces fit in the
/// tolerance or the depth limit is hit.
pub(crate) fn segments_intersect(a: PathSeg, b: PathSeg, tol: f64) -> bool {
    subdivide(a, b, tol, 0)
}

fn subdivide(a: PathSeg, b: PathSeg, tol: f64, depth: u32) -> bool {
    let box_a = a.bounding_box();
    let box_b = b.bounding_box();
    if !boxes_overlap(box_a, box_b, tol) {
        return false;
    }

    if let (PathSeg::Line(la), PathSeg::Line(lb)) = (a, b) {
        return lines_intersect(la, lb, tol);
    }

    let size_a = box_a.width().max(box_a.height());
    let size_b = box_b.width().max(box_b.height());
    if depth >= MAX_DEPTH || (size_a <= tol && size_b <= tol) {
        return true;
    }

    if size_a >= size_b {
        subdivide(a.subsegment(0.0..0.5), b, tol, depth + 1)
            || subdivide(a.subsegment(0.5..1.0), b, tol, depth + 1)
    } else {
        subdivide(a, b.subsegment(0.0..0.5), tol, depth + 1)
            || subdivide(a, b.subsegment(0.5..1.0), tol, depth + 1)
    }
}

fn lines_intersect(a: Line, b: Line, tol: f64) -> bool {
    let da = a.p1 - a.p0;
    let db = b.p1 - b.p0;
    let denom = da.cross(db);

    if denom.abs() > 1e-12 {
        let r = b.p0 - a.p0;
        let t = r.cross(db) / denom;
        let u = r.cross(da) / denom;
        let slack_a = tol / da.hypot().max(tol);
        let slack_b = tol / db.hypot().max(tol);
        return (-slack_a..=1.0 + slack_a).contains(&t) && (-slack_b..=1.0 + slack_b).contains(&u);
    }

    // Parallel or degenerate: touching means an endpoint is within reach.
    point_segment_distance(a.p0, b) <= tol
        || point_segment_distance(a.p1, b) <= tol
        || point_segment_distance(b.p0, a) <= tol
        || point_segment_distance(b.p1, a) <= tol
}

fn point_segment_distance(p: Point, l: Line) -> f64 {
    let d = l.p1 - l.p0;
    let len2 = d.hypot2();
    if len2 <= f64::EPSILON {
        return (p - l.p0).hypot();
    }
    let t = ((p - l.p0).dot(d) / len2).clamp(0.0, 1.0);
    (p - l.eval(t)).hypot()
}

/// Polyline approximation: line endpoints as-is, curves sampled uniformly.
pub(crate) fn flatten(segments: &[PathSeg]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();
    let mut push = |p: Point| {
        if out.last() != Some(&p) {
            out.push(p);
        }
    };

    for seg in segments {
        match seg {
            PathSeg::Line(l) => push(l.p0),
            _ => {
                for k in 0..CURVE_SAMPLES {
                    push(seg.eval(k as f64 / CURVE_SAMPLES as f64));
                }
            }
        }
    }
    if let Some(last) = segments.last() {
        push(last.end());
    }
    out
}

/// Even-odd test against the closed polygon `poly`.
pub(crate) fn point_in_polygon(p: Point, poly: &[Point]) -> bool {
    let Some(&last) = poly.last() else {
        return false;
    };

    let mut inside = false;
    let mut prev = last;
    for &cur in poly {
        if (cur.y > p.y) != (prev.y > p.y) {
            let x_cross = (prev.x - cur.x) * (p.y - cur.y) / (prev.y - cur.y) + cur.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        prev = cur;
    }
    inside
}
