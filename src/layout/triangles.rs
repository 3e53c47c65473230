use std::collections::BTreeSet;

use crate::config::{LayoutConfig, SearchStrategy};

use super::error::Result;
use super::geometry::point_in_triangle;
use super::search::{SegmentGraph, check_budget, choose, corners, fan_out};
use super::types::ShapeKind;

/// Finds every minimal triangle in one layer-transition.
///
/// A triangle is three segments whose six endpoints collapse to three points.
/// Results are sorted id triples, deduplicated.
pub(super) fn find_triangles(
    graph: &SegmentGraph,
    config: &LayoutConfig,
) -> Result<Vec<[usize; 3]>> {
    let candidates = match config.strategy {
        SearchStrategy::Exhaustive => {
            check_budget(
                graph,
                ShapeKind::Triangle,
                choose(graph.sides.len() as u128, 3),
                config,
            )?;
            exhaustive_candidates(graph, config.parallel)
        }
        SearchStrategy::Adjacency => {
            check_budget(graph, ShapeKind::Triangle, graph.wedge_count(), config)?;
            adjacency_candidates(graph, config.parallel)
        }
    };

    let unique: BTreeSet<[usize; 3]> = candidates.into_iter().collect();
    Ok(unique
        .into_iter()
        .filter(|triangle| encloses_nothing(graph, triangle))
        .collect())
}

/// Every triple of segments, skipping pairs that cannot close a triangle.
fn exhaustive_candidates(graph: &SegmentGraph, parallel: bool) -> Vec<[usize; 3]> {
    let sides = &graph.sides;
    fan_out(sides.len(), parallel, |i| {
        let mut found = Vec::new();
        for j in (i + 1)..sides.len() {
            // Two sides of a triangle always share a corner.
            if corners(&[sides[i], sides[j]]).len() != 3 {
                continue;
            }
            for k in (j + 1)..sides.len() {
                let ids = corners(&[sides[i], sides[j], sides[k]]);
                if ids.len() == 3 {
                    found.push([ids[0], ids[1], ids[2]]);
                }
            }
        }
        found
    })
}

/// Closes every segment `ab` through a common neighbour `c > b`.
fn adjacency_candidates(graph: &SegmentGraph, parallel: bool) -> Vec<[usize; 3]> {
    fan_out(graph.sides.len(), parallel, |side| {
        let (a, b) = graph.sides[side];
        graph
            .common_neighbors(a, b)
            .into_iter()
            .filter(|&c| c > b)
            .map(|c| [a, b, c])
            .collect()
    })
}

fn encloses_nothing(graph: &SegmentGraph, triangle: &[usize; 3]) -> bool {
    let [a, b, c] = triangle.map(|id| graph.point(id));
    let (min_x, max_x) = (a.x.min(b.x).min(c.x), a.x.max(b.x).max(c.x));
    let (min_y, max_y) = (a.y.min(b.y).min(c.y), a.y.max(b.y).max(c.y));
    !graph.points.iter().enumerate().any(|(id, &p)| {
        !triangle.contains(&id)
            && p.x >= min_x
            && p.x <= max_x
            && p.y >= min_y
            && p.y <= max_y
            && point_in_triangle(p, a, b, c)
    })
}
