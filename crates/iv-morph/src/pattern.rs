use std::sync::OnceLock;

use iv_core::{PixelSet, Point};

/// One cell of a hit-or-miss template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Present,
    Absent,
    Any,
}

const I: Cell = Cell::Present;
const O: Cell = Cell::Absent;
const X: Cell = Cell::Any;

const CENTER_BIT: u16 = 1 << 4;
const FULL_MASK: u16 = 0x1ff;

/// 3x3 membership matrix around a pixel, packed row-major into 9 bits.
///
/// Bit `row * 3 + col` is set when that cell is in the set; the center is
/// bit 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighborhood(u16);

impl Neighborhood {
    pub fn of(pixels: &PixelSet, p: Point) -> Self {
        let mut bits = 0u16;
        for row in 0..3 {
            for col in 0..3 {
                let hit = p
                    .checked_offset(col - 1, row - 1)
                    .is_some_and(|q| pixels.contains(q));
                if hit {
                    bits |= 1 << (row * 3 + col);
                }
            }
        }
        Self(bits)
    }

    pub fn from_bits(bits: u16) -> Self {
        Self(bits & FULL_MASK)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn is_set(self, col: usize, row: usize) -> bool {
        self.0 & (1 << (row * 3 + col)) != 0
    }

    /// Members among the eight surrounding cells.
    pub fn neighbor_count(self) -> u32 {
        (self.0 & !CENTER_BIT).count_ones()
    }
}

/// Fixed 3x3 template of present / absent / don't-care cells.
///
/// Cells are stored row-major with the center at index 4. Matching is
/// exact on present and absent cells; `Any` always matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    cells: [Cell; 9],
    care: u16,
    value: u16,
}

impl Pattern {
    pub const fn new(cells: [Cell; 9]) -> Self {
        let mut care = 0u16;
        let mut value = 0u16;
        let mut i = 0;
        while i < 9 {
            match cells[i] {
                Cell::Present => {
                    care |= 1 << i;
                    value |= 1 << i;
                }
                Cell::Absent => care |= 1 << i,
                Cell::Any => {}
            }
            i += 1;
        }
        Self { cells, care, value }
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    #[inline]
    pub fn matches(&self, nb: Neighborhood) -> bool {
        nb.0 & self.care == self.value
    }

    /// Quarter turn clockwise (with `y` growing downwards, N moves to E).
    pub fn rotated(&self) -> Self {
        let mut out = [Cell::Any; 9];
        for row in 0..3 {
            for col in 0..3 {
                let (nc, nr) = (2 - row, col);
                out[nr * 3 + nc] = self.cells[row * 3 + col];
            }
        }
        Self::new(out)
    }

    /// The template and its three further quarter turns.
    pub fn rotations(&self) -> [Pattern; 4] {
        let r1 = self.rotated();
        let r2 = r1.rotated();
        let r3 = r2.rotated();
        [*self, r1, r2, r3]
    }
}

// Pixels that must survive thinning. Anything not matched here is a simple
// point (removal keeps both the 8-connected foreground and the 4-connected
// background intact) that is not a line endpoint.
const KEEP_TEMPLATES: [[Cell; 9]; 10] = [
    // interior: every 4-neighbor present
    [X, I, X, I, I, I, X, I, X],
    // isolated pixel
    [O, O, O, O, I, O, O, O, O],
    // endpoint through an edge neighbor
    [O, I, O, O, I, O, O, O, O],
    // endpoint through a corner neighbor
    [I, O, O, O, I, O, O, O, O],
    // bridge between two sides, open above and below
    [X, O, X, I, I, I, X, O, X],
    // isolated NE corner plus W
    [X, O, I, I, I, O, X, X, X],
    // isolated NE corner plus S
    [X, O, I, X, I, O, X, I, X],
    // isolated NE corner plus NW
    [I, O, I, X, I, O, X, X, X],
    // isolated NE corner plus SE
    [X, O, I, X, I, O, X, X, I],
    // isolated NE corner plus SW
    [X, O, I, X, I, O, I, X, X],
];

// Tips of thin lines: one neighbor, or an edge neighbor with the corner
// right next to it.
const TIP_TEMPLATES: [[Cell; 9]; 4] = [
    [O, I, O, O, I, O, O, O, O],
    [I, O, O, O, I, O, O, O, O],
    [O, I, I, O, I, O, O, O, O],
    [I, I, O, O, I, O, O, O, O],
];

/// Hit-or-miss tables shared by thinning and tracing.
#[derive(Debug)]
pub struct PatternLibrary {
    keep: Vec<Pattern>,
    tips: Vec<Pattern>,
}

static LIBRARY: OnceLock<PatternLibrary> = OnceLock::new();

impl PatternLibrary {
    /// The process-wide library, built on first use.
    pub fn get() -> &'static PatternLibrary {
        LIBRARY.get_or_init(|| PatternLibrary {
            keep: expand(&KEEP_TEMPLATES),
            tips: expand(&TIP_TEMPLATES),
        })
    }

    pub fn keep_patterns(&self) -> &[Pattern] {
        &self.keep
    }

    pub fn tip_patterns(&self) -> &[Pattern] {
        &self.tips
    }

    /// Removing this pixel could break topology or erase an endpoint.
    pub fn must_keep(&self, nb: Neighborhood) -> bool {
        self.keep.iter().any(|p| p.matches(nb))
    }

    /// The pixel is a genuine endpoint of a thin line.
    pub fn is_tip(&self, nb: Neighborhood) -> bool {
        self.tips.iter().any(|p| p.matches(nb))
    }
}

fn expand(templates: &[[Cell; 9]]) -> Vec<Pattern> {
    let mut out: Vec<Pattern> = Vec::new();
    for cells in templates {
        for rot in Pattern::new(*cells).rotations() {
            if !out.contains(&rot) {
                out.push(rot);
            }
        }
    }
    out
}
