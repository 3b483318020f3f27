use core::cmp::Ordering;

/// Direction offsets in ring order: E, NE, N, NW, W, SW, S, SE.
///
/// `y` grows downwards, so "north" is `dy = -1`.
pub const DX: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
pub const DY: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Ring indices of the four axis-aligned directions (E, N, W, S).
pub const DIRS_C4: [u8; 4] = [0, 2, 4, 6];
pub const DIRS_C8: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    C4,
    C8,
}

impl Connectivity {
    #[inline]
    pub fn dirs(self) -> &'static [u8] {
        match self {
            Connectivity::C4 => &DIRS_C4,
            Connectivity::C8 => &DIRS_C8,
        }
    }
}

/// Integer pixel coordinate.
///
/// Points are plain keys: nothing assumes they index into a buffer, and
/// negative coordinates are valid. Ordering is row-major (`y`, then `x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point shifted by `(dx, dy)`, or `None` when that leaves the `i32`
    /// range. Pixels on the edge of the coordinate space simply have fewer
    /// neighbors.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Neighbor in ring direction `dir` (see [`DX`]/[`DY`]).
    #[inline]
    pub fn step(self, dir: u8) -> Option<Self> {
        let d = (dir & 7) as usize;
        self.checked_offset(DX[d], DY[d])
    }

    pub fn neighbors4(self) -> impl Iterator<Item = Point> {
        DIRS_C4.into_iter().filter_map(move |d| self.step(d))
    }

    pub fn neighbors8(self) -> impl Iterator<Item = Point> {
        DIRS_C8.into_iter().filter_map(move |d| self.step(d))
    }

    /// Chebyshev distance is 1.
    pub fn is_adjacent8(self, other: Point) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }

    /// Manhattan distance is 1.
    pub fn is_adjacent4(self, other: Point) -> bool {
        matches!(
            (self.x.abs_diff(other.x), self.y.abs_diff(other.y)),
            (0, 1) | (1, 0)
        )
    }

    /// Sum used to pick canonical tracing seeds.
    #[inline]
    pub fn diagonal_rank(self) -> i64 {
        self.x as i64 + self.y as i64
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
