use std::collections::HashSet;
use std::collections::hash_set;

use crate::point::{Connectivity, DIRS_C4, Point};

/// Sparse set of pixel coordinates.
///
/// Used for the full stroke mask, for single connected components and for
/// skeletons. Membership is the only query; there is no backing bitmap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelSet {
    points: HashSet<Point>,
}

impl PixelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: HashSet::with_capacity(capacity),
        }
    }

    /// Scans a `width x height` grid and keeps the points where `pred` holds.
    pub fn from_predicate(width: usize, height: usize, mut pred: impl FnMut(Point) -> bool) -> Self {
        let mut out = Self::new();
        for y in 0..height {
            for x in 0..width {
                let p = Point::new(x as i32, y as i32);
                if pred(p) {
                    out.insert(p);
                }
            }
        }
        out
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    pub fn insert(&mut self, p: Point) -> bool {
        self.points.insert(p)
    }

    pub fn remove(&mut self, p: Point) -> bool {
        self.points.remove(&p)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates in unspecified order. Use [`PixelSet::sorted`] when order matters.
    pub fn iter(&self) -> hash_set::Iter<'_, Point> {
        self.points.iter()
    }

    /// Points in row-major order.
    pub fn sorted(&self) -> Vec<Point> {
        let mut out: Vec<Point> = self.points.iter().copied().collect();
        out.sort_unstable();
        out
    }

    /// Whether the neighbor of `p` in ring direction `dir` is a member.
    /// Neighbors past the `i32` range are never members.
    #[inline]
    pub fn has_neighbor(&self, p: Point, dir: u8) -> bool {
        p.step(dir).is_some_and(|n| self.contains(n))
    }

    /// Number of members among `p`'s neighbors under `connectivity`.
    pub fn degree(&self, p: Point, connectivity: Connectivity) -> usize {
        connectivity
            .dirs()
            .iter()
            .filter(|&&d| self.has_neighbor(p, d))
            .count()
    }

    /// Whether some 4-neighbor of `p` lies outside the set.
    pub fn is_boundary(&self, p: Point) -> bool {
        DIRS_C4.iter().any(|&d| !self.has_neighbor(p, d))
    }

    pub fn is_disjoint(&self, other: &PixelSet) -> bool {
        self.points.is_disjoint(&other.points)
    }

    /// Axis-aligned bounds as `(min, max)` corners, inclusive.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut it = self.points.iter();
        let first = *it.next()?;
        let (mut lo, mut hi) = (first, first);
        for p in it {
            lo.x = lo.x.min(p.x);
            lo.y = lo.y.min(p.y);
            hi.x = hi.x.max(p.x);
            hi.y = hi.y.max(p.y);
        }
        Some((lo, hi))
    }
}

impl FromIterator<Point> for PixelSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point> for PixelSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PixelSet {
    type Item = &'a Point;
    type IntoIter = hash_set::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
