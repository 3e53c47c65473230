use std::collections::{BTreeSet, HashMap};

use log::debug;
use rayon::prelude::*;

use crate::config::LayoutConfig;

use super::error::{LayoutError, Result};
use super::quadrilaterals::find_quadrilaterals;
use super::triangles::find_triangles;
use super::types::{Point, Segment, Shape, ShapeKind, TransitionSummary};
use super::winding::order_quadrilateral;

/// The segments of one layer-transition, viewed as a graph.
///
/// Points are numbered in canonical order, so sorting ids sorts points. Shape
/// search never looks past one transition; shapes spanning two transitions
/// are out of reach by construction.
#[derive(Debug, Clone)]
pub(super) struct SegmentGraph {
    pub(super) transition: usize,
    pub(super) points: Vec<Point>,
    /// Deduplicated segments as `(low, high)` point ids, sorted.
    pub(super) sides: Vec<(usize, usize)>,
    pub(super) neighbors: Vec<BTreeSet<usize>>,
}

impl SegmentGraph {
    pub(super) fn from_segments<'a>(
        transition: usize,
        segments: impl IntoIterator<Item = &'a Segment>,
    ) -> Self {
        let pairs: Vec<(Point, Point)> = segments
            .into_iter()
            .filter(|segment| segment.start != segment.end)
            .map(|segment| (segment.start, segment.end))
            .collect();

        let mut points: Vec<Point> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        points.sort();
        points.dedup();
        let ids: HashMap<Point, usize> = points
            .iter()
            .enumerate()
            .map(|(idx, point)| (*point, idx))
            .collect();

        let mut sides: Vec<(usize, usize)> = pairs
            .iter()
            .map(|(a, b)| {
                let (a, b) = (ids[a], ids[b]);
                (a.min(b), a.max(b))
            })
            .collect();
        sides.sort_unstable();
        sides.dedup();

        let mut neighbors = vec![BTreeSet::new(); points.len()];
        for &(a, b) in &sides {
            neighbors[a].insert(b);
            neighbors[b].insert(a);
        }

        Self {
            transition,
            points,
            sides,
            neighbors,
        }
    }

    pub(super) fn point(&self, id: usize) -> Point {
        self.points[id]
    }

    pub(super) fn common_neighbors(&self, a: usize, b: usize) -> Vec<usize> {
        self.neighbors[a]
            .intersection(&self.neighbors[b])
            .copied()
            .collect()
    }

    /// Number of two-segment paths; one triangle candidate per path.
    pub(super) fn wedge_count(&self) -> u128 {
        self.neighbors
            .iter()
            .map(|set| choose(set.len() as u128, 2))
            .sum()
    }

    /// Number of four-cycles candidates: pairs of two-paths sharing both ends.
    pub(super) fn opposite_corner_pairs(&self) -> u128 {
        let mut paths: HashMap<(usize, usize), u128> = HashMap::new();
        for set in &self.neighbors {
            let ends: Vec<usize> = set.iter().copied().collect();
            for (idx, &a) in ends.iter().enumerate() {
                for &c in &ends[idx + 1..] {
                    *paths.entry((a, c)).or_default() += 1;
                }
            }
        }
        paths.values().map(|&count| choose(count, 2)).sum()
    }
}

pub(super) fn choose(n: u128, k: u128) -> u128 {
    if k > n {
        return 0;
    }
    (0..k).fold(1u128, |acc, i| acc * (n - i) / (i + 1))
}

pub(super) fn check_budget(
    graph: &SegmentGraph,
    kind: ShapeKind,
    candidates: u128,
    config: &LayoutConfig,
) -> Result<()> {
    match config.max_candidates {
        Some(limit) if candidates > u128::from(limit) => Err(LayoutError::CandidateBudgetExceeded {
            transition: graph.transition,
            kind,
            candidates,
            limit,
        }),
        _ => Ok(()),
    }
}

/// Runs `job` for every index in `0..count` and concatenates the results in
/// index order, on the rayon pool when `parallel` is set.
pub(super) fn fan_out<T, F>(count: usize, parallel: bool, job: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> Vec<T> + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().flat_map_iter(job).collect()
    } else {
        (0..count).flat_map(job).collect()
    }
}

/// Sorted, deduplicated ids touched by a handful of sides.
pub(super) fn corners(sides: &[(usize, usize)]) -> Vec<usize> {
    let mut ids: Vec<usize> = sides.iter().flat_map(|&(a, b)| [a, b]).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

pub(super) struct TransitionShapes {
    pub(super) shapes: Vec<Shape>,
    pub(super) summary: TransitionSummary,
}

/// Searches every layer-transition independently and concatenates the
/// shapes in transition order.
pub(super) fn search_shapes(
    segments: &[Segment],
    transitions: usize,
    config: &LayoutConfig,
) -> Result<(Vec<Shape>, Vec<TransitionSummary>)> {
    let graphs: Vec<SegmentGraph> = (0..transitions)
        .map(|transition| {
            SegmentGraph::from_segments(
                transition,
                segments.iter().filter(|segment| {
                    segment.transition == transition
                        && (config.include_node_vertices || !segment.touches_node)
                }),
            )
        })
        .collect();

    let results: Vec<Result<TransitionShapes>> = if config.parallel {
        graphs
            .par_iter()
            .map(|graph| search_transition(graph, config))
            .collect()
    } else {
        graphs
            .iter()
            .map(|graph| search_transition(graph, config))
            .collect()
    };

    let mut shapes = Vec::new();
    let mut summaries = Vec::with_capacity(transitions);
    for result in results {
        let found = result?;
        shapes.extend(found.shapes);
        summaries.push(found.summary);
    }
    Ok((shapes, summaries))
}

fn search_transition(graph: &SegmentGraph, config: &LayoutConfig) -> Result<TransitionShapes> {
    let triangles = find_triangles(graph, config)?;
    let quadrilaterals = if config.search_quadrilaterals {
        find_quadrilaterals(graph, &triangles, config)?
    } else {
        Vec::new()
    };

    debug!(
        transition = graph.transition,
        points = graph.points.len(),
        segments = graph.sides.len(),
        triangles = triangles.len(),
        quadrilaterals = quadrilaterals.len();
        "Searched layer-transition",
    );

    let summary = TransitionSummary {
        transition: graph.transition,
        segments: graph.sides.len(),
        triangles: triangles.len(),
        quadrilaterals: quadrilaterals.len(),
    };

    let mut shapes = Vec::with_capacity(triangles.len() + quadrilaterals.len());
    shapes.extend(triangles.iter().map(|ids| Shape {
        kind: ShapeKind::Triangle,
        transition: graph.transition,
        vertices: ids.iter().map(|&id| graph.point(id)).collect(),
    }));
    shapes.extend(quadrilaterals.iter().map(|cycle| Shape {
        kind: ShapeKind::Quadrilateral,
        transition: graph.transition,
        vertices: order_quadrilateral(cycle.map(|id| graph.point(id))).to_vec(),
    }));

    Ok(TransitionShapes { shapes, summary })
}
