use iv_core::{Connectivity, PixelSet, Point};

/// Partitions `pixels` into maximal 4-connected groups.
///
/// Groups are emitted in row-major order of their first pixel. Every input
/// pixel lands in exactly one group; empty input yields no groups.
pub fn group_components(pixels: &PixelSet) -> Vec<PixelSet> {
    group_components_with(pixels, Connectivity::C4)
}

pub fn group_components_with(pixels: &PixelSet, connectivity: Connectivity) -> Vec<PixelSet> {
    let dirs = connectivity.dirs();
    let mut seen = PixelSet::with_capacity(pixels.len());
    let mut stack = Vec::new();
    let mut groups = Vec::new();

    for start in pixels.sorted() {
        if seen.contains(start) {
            continue;
        }

        let mut group = PixelSet::new();
        seen.insert(start);
        stack.clear();
        stack.push(start);

        while let Some(p) = stack.pop() {
            group.insert(p);
            for nb in dirs.iter().filter_map(|&dir| p.step(dir)) {
                if pixels.contains(nb) && seen.insert(nb) {
                    stack.push(nb);
                }
            }
        }

        groups.push(group);
    }

    log::trace!(
        "grouped {} pixels into {} {:?} components",
        pixels.len(),
        groups.len(),
        connectivity
    );
    groups
}

/// Number of connected components without materializing them.
pub fn count_components(pixels: &PixelSet, connectivity: Connectivity) -> usize {
    let dirs = connectivity.dirs();
    let mut seen = PixelSet::with_capacity(pixels.len());
    let mut stack: Vec<Point> = Vec::new();
    let mut count = 0;

    for &start in pixels {
        if !seen.insert(start) {
            continue;
        }
        count += 1;
        stack.push(start);
        while let Some(p) = stack.pop() {
            for nb in dirs.iter().filter_map(|&dir| p.step(dir)) {
                if pixels.contains(nb) && seen.insert(nb) {
                    stack.push(nb);
                }
            }
        }
    }

    count
}
