use std::collections::BTreeSet;

use iv_core::{PixelSet, Point};

use crate::pattern::{Neighborhood, PatternLibrary};

// Sub-pass order: N, E, S, W as ring directions.
const SIDES: [u8; 4] = [2, 0, 6, 4];

/// Thins one 4-connected component down to a one-pixel-wide skeleton.
///
/// Boundary pixels are peeled one at a time, side by side, until a full pass
/// over all four sides removes nothing. A pixel is only removed when its
/// neighborhood matches no `keep` pattern, so the 8-connected skeleton has
/// the same number of components as the 4-connected input.
pub fn skeletonize(component: &PixelSet) -> PixelSet {
    let lib = PatternLibrary::get();
    let mut pixels = component.clone();
    if pixels.is_empty() {
        return pixels;
    }

    let mut frontier: BTreeSet<Point> = pixels
        .iter()
        .copied()
        .filter(|&p| pixels.is_boundary(p))
        .collect();

    let mut passes = 0usize;
    loop {
        passes += 1;
        let mut removed = 0usize;

        for side in SIDES {
            let candidates: Vec<Point> = frontier
                .iter()
                .copied()
                .filter(|&p| !pixels.has_neighbor(p, side))
                .collect();

            for p in candidates {
                if !pixels.contains(p) {
                    continue;
                }
                if lib.must_keep(Neighborhood::of(&pixels, p)) {
                    continue;
                }

                pixels.remove(p);
                frontier.remove(&p);
                removed += 1;
                for n in p.neighbors8() {
                    if pixels.contains(n) {
                        frontier.insert(n);
                    }
                }
            }
        }

        if removed == 0 {
            break;
        }
    }

    log::trace!(
        "skeletonize: {} -> {} pixels in {passes} passes",
        component.len(),
        pixels.len()
    );
    pixels
}
