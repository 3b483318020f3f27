use std::collections::VecDeque;

use iv_core::{DIRS_C4, PixelSet, Point};
use iv_morph::{Neighborhood, PatternLibrary};

use crate::path::StrokePath;

// Diagonal ring directions, tried after the axis-aligned ones.
const DIRS_DIAG: [u8; 4] = [1, 3, 5, 7];

#[derive(Debug, Clone, Copy)]
enum Start {
    /// Already marked visited by a branch; always opens a new path.
    Claimed(Point),
    /// Alternative left behind on a simple step; dropped if reached meanwhile.
    Open(Point),
}

/// Splits a skeleton into ordered point runs, breaking at branch pixels.
///
/// Every input pixel ends up in exactly one path, exactly once. Walks start
/// from line tips where possible so open strokes come out end to end. A pixel
/// with three or more live neighbors terminates the current path and each
/// of those neighbors starts a path of its own.
///
/// Paths that stop at a branch pixel are reversed, so the branch pixel leads
/// and the path runs outwards from it. Only one path can hold a branch pixel;
/// the others start on the neighbor next to it.
pub fn trace_skeleton(skeleton: &PixelSet) -> Vec<StrokePath> {
    walk(skeleton, |_, _| {})
}

/// The tracing loop. `visit` sees every pixel once, as it becomes the head of
/// the current path, together with its live neighbors at that moment.
fn walk(skeleton: &PixelSet, mut visit: impl FnMut(Point, &[Point])) -> Vec<StrokePath> {
    let mut paths = Vec::new();
    if skeleton.is_empty() {
        return paths;
    }

    let lib = PatternLibrary::get();
    let mut remaining = skeleton.clone();

    // Canonical seed order: smallest x + y first, ties row-major.
    let mut order = skeleton.sorted();
    order.sort_by_key(|p| (p.diagonal_rank(), p.y, p.x));
    let mut cursor = 0usize;

    let mut stack: Vec<Start> = Vec::new();
    let mut live = Vec::with_capacity(8);

    loop {
        while cursor < order.len() && !remaining.contains(order[cursor]) {
            cursor += 1;
        }
        let Some(&canonical) = order.get(cursor) else {
            break;
        };

        let seed = find_tip(&remaining, canonical, lib).unwrap_or(canonical);
        remaining.remove(seed);
        stack.push(Start::Claimed(seed));

        while let Some(start) = stack.pop() {
            let first = match start {
                Start::Claimed(p) => p,
                Start::Open(p) => {
                    if !remaining.remove(p) {
                        continue;
                    }
                    p
                }
            };

            let mut points = vec![first];
            let mut cur = first;
            let mut at_branch = false;
            loop {
                live_neighbors(&remaining, cur, &mut live);
                visit(cur, &live);
                match live.len() {
                    0 => break,
                    1 | 2 => {
                        let next = live[0];
                        if let Some(&alt) = live.get(1) {
                            stack.push(Start::Open(alt));
                        }
                        remaining.remove(next);
                        points.push(next);
                        cur = next;
                    }
                    _ => {
                        for &n in live.iter().rev() {
                            remaining.remove(n);
                            stack.push(Start::Claimed(n));
                        }
                        at_branch = true;
                        break;
                    }
                }
            }

            if at_branch {
                points.reverse();
            }
            paths.push(StrokePath::from_points(points));
        }
    }

    log::trace!(
        "traced {} skeleton pixels into {} paths",
        skeleton.len(),
        paths.len()
    );
    paths
}

/// Breadth-first search from `start` for the nearest pixel that looks like a
/// line tip among the untraced pixels.
fn find_tip(remaining: &PixelSet, start: Point, lib: &PatternLibrary) -> Option<Point> {
    let mut seen = PixelSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);

    while let Some(p) = queue.pop_front() {
        if lib.is_tip(Neighborhood::of(remaining, p)) {
            return Some(p);
        }
        for n in p.neighbors8() {
            if remaining.contains(n) && seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    None
}

/// Untraced 8-neighbors of `p`, axis-aligned first. A diagonal is left out
/// when it is also reachable through one of its two flanking 4-neighbors.
fn live_neighbors(remaining: &PixelSet, p: Point, out: &mut Vec<Point>) {
    out.clear();
    for dir in DIRS_C4 {
        if let Some(n) = p.step(dir)
            && remaining.contains(n)
        {
            out.push(n);
        }
    }
    for dir in DIRS_DIAG {
        let Some(n) = p.step(dir) else {
            continue;
        };
        if !remaining.contains(n) {
            continue;
        }
        let shortcut = remaining.has_neighbor(p, dir - 1) || remaining.has_neighbor(p, dir + 1);
        if !shortcut {
            out.push(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use iv_core::{PixelSet, Point};
    use iv_morph::{group_components, skeletonize};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{live_neighbors, trace_skeleton, walk};
    use crate::StrokePath;

    fn set(points: impl IntoIterator<Item = (i32, i32)>) -> PixelSet {
        points.into_iter().map(Point::from).collect()
    }

    fn assert_complete(skeleton: &PixelSet, paths: &[StrokePath]) {
        let mut seen = HashSet::new();
        for path in paths {
            assert!(!path.is_empty());
            for &p in path.points() {
                assert!(skeleton.contains(p), "{p:?} not in skeleton");
                assert!(seen.insert(p), "{p:?} traced twice");
            }
            for w in path.points().windows(2) {
                assert!(w[0].is_adjacent8(w[1]), "gap between {:?} and {:?}", w[0], w[1]);
            }
        }
        assert_eq!(seen.len(), skeleton.len());
    }

    #[test]
    fn empty_skeleton_has_no_paths() {
        assert!(trace_skeleton(&PixelSet::new()).is_empty());
    }

    #[test]
    fn single_pixel_is_one_path() {
        let paths = trace_skeleton(&set([(3, 3)]));
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].points(), &[Point::new(3, 3)]);
    }

    #[test]
    fn straight_line_traces_end_to_end() {
        let line = set((0..11).map(|x| (x, 5)));
        let paths = trace_skeleton(&line);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 11);
        assert_eq!(paths[0].first(), Point::new(0, 5));
        assert_eq!(paths[0].last(), Point::new(10, 5));
    }

    #[test]
    fn tracing_starts_from_a_tip() {
        // The canonical pixel (0, 0) is the corner of an L, not an end.
        let l = set((0..5).map(|x| (x, 0)).chain((1..5).map(|y| (0, y))));
        let paths = trace_skeleton(&l);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 9);
        assert_eq!(paths[0].first(), Point::new(4, 0));
        assert_eq!(paths[0].last(), Point::new(0, 4));
    }

    #[test]
    fn plus_splits_at_the_center() {
        let mut plus = PixelSet::new();
        for d in -3..=3 {
            plus.insert(Point::new(5 + d, 5));
            plus.insert(Point::new(5, 5 + d));
        }
        let paths = trace_skeleton(&plus);

        assert_eq!(paths.len(), 4);
        assert_complete(&plus, &paths);

        let center = Point::new(5, 5);
        let holder: Vec<&StrokePath> = paths
            .iter()
            .filter(|p| p.points().contains(&center))
            .collect();
        assert_eq!(holder.len(), 1);
        assert_eq!(holder[0].first(), center);

        // Every arm runs from the center out to its tip.
        for path in &paths {
            assert_eq!(path.len(), if path.first() == center { 4 } else { 3 });
            assert!(path.first() == center || path.first().is_adjacent4(center));
            let tip = path.last();
            assert_eq!((tip.x - 5).abs() + (tip.y - 5).abs(), 3);
        }
    }

    #[test]
    fn t_junction_gives_bar_and_stem() {
        let t = set((0..7).map(|x| (x, 0)).chain((1..5).map(|y| (3, y))));
        let paths = trace_skeleton(&t);

        assert_eq!(paths.len(), 2);
        assert_complete(&t, &paths);
        assert_eq!(paths[0].len(), 7);
        assert_eq!(paths[0].first(), Point::new(0, 0));
        assert_eq!(paths[0].last(), Point::new(6, 0));
        assert_eq!(
            paths[1].points(),
            &[
                Point::new(3, 1),
                Point::new(3, 2),
                Point::new(3, 3),
                Point::new(3, 4)
            ]
        );
    }

    #[test]
    fn closed_loop_is_one_path() {
        let mut square = PixelSet::new();
        for i in 0..5 {
            square.insert(Point::new(i, 0));
            square.insert(Point::new(i, 4));
            square.insert(Point::new(0, i));
            square.insert(Point::new(4, i));
        }
        // The open start left at the seed is reached from the other side and skipped.
        let paths = trace_skeleton(&square);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 16);
        assert_eq!(paths[0].first(), Point::new(0, 0));
        assert_eq!(paths[0].last(), Point::new(0, 1));
    }

    #[test]
    fn staircase_walks_through_corners() {
        let stairs = set([(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (3, 2)]);
        let paths = trace_skeleton(&stairs);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 6);
    }

    #[test]
    fn diagonal_behind_a_side_neighbor_is_not_a_branch() {
        // Three untraced neighbors, but SE is also reachable through S.
        let remaining = set([(0, 1), (1, 1), (1, -1)]);
        let mut live = Vec::new();
        live_neighbors(&remaining, Point::new(0, 0), &mut live);
        assert_eq!(live, vec![Point::new(0, 1), Point::new(1, -1)]);

        // Without the side neighbor the diagonal counts.
        let remaining = set([(1, 1), (1, -1)]);
        live_neighbors(&remaining, Point::new(0, 0), &mut live);
        assert_eq!(live, vec![Point::new(1, -1), Point::new(1, 1)]);
    }

    #[test]
    fn line_on_the_edge_of_the_coordinate_range() {
        let line = set((i32::MAX - 5..=i32::MAX).map(|x| (x, i32::MIN)));
        let paths = trace_skeleton(&line);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 6);
        assert_eq!(paths[0].first(), Point::new(i32::MAX - 5, i32::MIN));
        assert_eq!(paths[0].last(), Point::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn disconnected_pieces_are_all_traced() {
        let pieces = set([(0, 0), (1, 0), (10, 10), (20, 3), (20, 4)]);
        let paths = trace_skeleton(&pieces);

        assert_eq!(paths.len(), 3);
        assert_complete(&pieces, &paths);
    }

    #[test]
    fn random_skeletons_are_traced_completely() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..15 {
            let mask = PixelSet::from_predicate(24, 24, |_| rng.random_bool(0.55));
            for group in group_components(&mask) {
                let skel = skeletonize(&group);
                assert_complete(&skel, &trace_skeleton(&skel));
            }
        }
    }

    #[test]
    fn random_skeletons_split_only_at_branches() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..15 {
            let mask = PixelSet::from_predicate(32, 32, |_| rng.random_bool(0.6));
            for group in group_components(&mask) {
                let skel = skeletonize(&group);
                let mut visits: HashMap<Point, Vec<Point>> = HashMap::new();
                let paths = walk(&skel, |p, live| {
                    visits.insert(p, live.to_vec());
                });

                assert_complete(&skel, &paths);
                assert_eq!(visits.len(), skel.len());

                let ends: HashSet<Point> = paths.iter().flat_map(|p| [p.first(), p.last()]).collect();
                for path in &paths {
                    let interior = path.points().iter().skip(1).take(path.len().saturating_sub(2));
                    for p in interior {
                        let live = visits[p].len();
                        assert!((1..=2).contains(&live), "{p:?} had {live} live neighbors mid-path");
                    }
                }
                for (p, live) in &visits {
                    if live.len() >= 3 {
                        assert!(ends.contains(p), "branch {p:?} inside a path");
                        assert!(live.iter().all(|n| ends.contains(n)));
                    }
                }
            }
        }
    }
}
