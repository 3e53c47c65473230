use log::debug;

use super::geometry::{EPSILON, PointInterner, proper_intersection};
use super::types::{EdgeLayout, Point};

/// Crossing points found among a set of edges.
#[derive(Debug, Clone, Default)]
pub(super) struct Intersections {
    /// Points recorded on each edge (same indexing as the edge slice), in
    /// travel order.
    pub(super) per_edge: Vec<Vec<Point>>,
    /// Every distinct point, sorted.
    pub(super) points: Vec<Point>,
}

/// Computes every transversal crossing between pairs of edges.
///
/// Each pair is evaluated once and the resulting point is interned, so both
/// edges, and any third edge through the same spot, share one exact value.
/// Pairs whose x-ranges do not overlap cannot cross and are skipped.
pub(super) fn compute_intersections(edges: &[EdgeLayout]) -> Intersections {
    let mut per_edge: Vec<Vec<Point>> = vec![Vec::new(); edges.len()];
    let mut interner = PointInterner::new();
    let mut pairs_tested = 0usize;

    for (i, a) in edges.iter().enumerate() {
        for (offset, b) in edges[i + 1..].iter().enumerate() {
            if a.max_x() < b.min_x() - EPSILON || b.max_x() < a.min_x() - EPSILON {
                continue;
            }
            pairs_tested += 1;
            let Some(hit) = proper_intersection((a.start, a.end), (b.start, b.end)) else {
                continue;
            };
            let hit = interner.intern(hit);
            let j = i + 1 + offset;
            record(&mut per_edge[i], hit);
            record(&mut per_edge[j], hit);
        }
    }

    for points in &mut per_edge {
        sort_along_edge(points);
    }
    let mut points: Vec<Point> = per_edge.iter().flatten().copied().collect();
    points.sort();
    points.dedup();

    debug!(
        edges = edges.len(), pairs_tested, intersections = interner.len();
        "Computed edge intersections",
    );
    Intersections { per_edge, points }
}

fn record(points: &mut Vec<Point>, hit: Point) {
    if !points.contains(&hit) {
        points.push(hit);
    }
}

/// Orders points by x, then y.
///
/// Edges run between layers at distinct x-positions, so x-order equals
/// travel order; the y tie-break only matters for a vertical edge.
pub(super) fn sort_along_edge(points: &mut [Point]) {
    points.sort();
}
