use kurbo::{BezPath, ParamCurve, ParamCurveExtrema, PathSeg, Point, Rect};

use crate::geom;

/// Ordered run of line and cubic segments.
///
/// Consecutive segments share endpoints. An empty path has no segments and
/// no geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorPath {
    segments: Vec<PathSeg>,
}

impl VectorPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSeg>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSeg] {
        &self.segments
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.segments.first().map(|s| s.start())
    }

    pub fn end_point(&self) -> Option<Point> {
        self.segments.last().map(|s| s.end())
    }

    /// Tight bounds over all segments, `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.segments
            .iter()
            .map(|s| s.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut out = BezPath::new();
        let Some(start) = self.start_point() else {
            return out;
        };

        out.move_to(start);
        for seg in &self.segments {
            match *seg {
                PathSeg::Line(l) => out.line_to(l.p1),
                PathSeg::Quad(q) => out.quad_to(q.p1, q.p2),
                PathSeg::Cubic(c) => out.curve_to(c.p1, c.p2, c.p3),
            }
        }
        out
    }

    /// Whether any segment of `self` crosses or touches any segment of
    /// `other`, within [`geom::DEFAULT_TOLERANCE`].
    pub fn intersects(&self, other: &VectorPath) -> bool {
        self.intersects_with_tolerance(other, geom::DEFAULT_TOLERANCE)
    }

    pub fn intersects_with_tolerance(&self, other: &VectorPath, tolerance: f64) -> bool {
        let (Some(a), Some(b)) = (self.bounding_box(), other.bounding_box()) else {
            return false;
        };
        if !geom::boxes_overlap(a, b, tolerance) {
            return false;
        }

        self.segments.iter().any(|sa| {
            other
                .segments
                .iter()
                .any(|sb| geom::segments_intersect(*sa, *sb, tolerance))
        })
    }

    /// Whether `other` lies strictly inside the region outlined by `self`.
    ///
    /// `self` is closed implicitly from its end back to its start and filled
    /// with the even-odd rule. Every sample of `other` must be inside and the
    /// two outlines must not cross.
    pub fn contains(&self, other: &VectorPath) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        let outline = geom::flatten(&self.segments);
        if outline.len() < 3 {
            return false;
        }

        let all_inside = geom::flatten(&other.segments)
            .into_iter()
            .all(|p| geom::point_in_polygon(p, &outline));
        if !all_inside {
            return false;
        }

        let mut closed = self.clone();
        if let (Some(s), Some(e)) = (self.start_point(), self.end_point())
            && s != e
        {
            closed.segments.push(PathSeg::Line(kurbo::Line::new(e, s)));
        }
        !closed.intersects(other)
    }
}

/// Piece of `seg` between parameters `t1` and `t2`.
///
/// Parameters are clamped to `[0, 1]`; NaN counts as `0`. When `t1 > t2`
/// the piece is returned reversed, running from `t1` back to `t2`.
pub fn split_range(seg: PathSeg, t1: f64, t2: f64) -> PathSeg {
    let t1 = sanitize_t(t1);
    let t2 = sanitize_t(t2);
    if t1 > t2 {
        return split_range(seg, t2, t1).reverse();
    }
    seg.subsegment(t1..t2)
}

fn sanitize_t(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}
