use iv_core::Point;

/// Ordered, duplicate-free run of skeleton pixels.
///
/// Consecutive points are 8-adjacent. A path always holds at least one point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokePath {
    points: Vec<Point>,
}

impl StrokePath {
    pub(crate) fn from_points(points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty());
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

impl AsRef<[Point]> for StrokePath {
    fn as_ref(&self) -> &[Point] {
        &self.points
    }
}
