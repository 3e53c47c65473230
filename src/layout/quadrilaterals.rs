use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::{LayoutConfig, SearchStrategy};

use super::error::Result;
use super::geometry::{collinear, polygon_encloses};
use super::search::{SegmentGraph, check_budget, choose, corners, fan_out};
use super::types::{Point, ShapeKind};

/// Finds every minimal quadrilateral in one layer-transition.
///
/// Candidates are closed four-cycles of segments. A candidate is rejected when
/// three of its corners are collinear, when three of its corners form one of
/// `triangles`, or when it encloses another point of the pool. Results are
/// corner ids in cycle order, one per distinct corner set, sorted by that set.
pub(super) fn find_quadrilaterals(
    graph: &SegmentGraph,
    triangles: &[[usize; 3]],
    config: &LayoutConfig,
) -> Result<Vec<[usize; 4]>> {
    let cycles = match config.strategy {
        SearchStrategy::Exhaustive => {
            check_budget(
                graph,
                ShapeKind::Quadrilateral,
                choose(graph.sides.len() as u128, 4),
                config,
            )?;
            exhaustive_cycles(graph, config.parallel)
        }
        SearchStrategy::Adjacency => {
            check_budget(
                graph,
                ShapeKind::Quadrilateral,
                graph.opposite_corner_pairs(),
                config,
            )?;
            adjacency_cycles(graph, config.parallel)
        }
    };

    let known: HashSet<[usize; 3]> = triangles.iter().copied().collect();
    let mut accepted: BTreeMap<[usize; 4], [usize; 4]> = BTreeMap::new();
    for cycle in cycles {
        let mut key = cycle;
        key.sort_unstable();
        if accepted.contains_key(&key) || !is_minimal(graph, &cycle, &known) {
            continue;
        }
        accepted.insert(key, cycle);
    }
    Ok(accepted.into_values().collect())
}

/// Every quadruple of segments whose eight endpoints collapse to four
/// points, each touched by exactly two of the segments.
fn exhaustive_cycles(graph: &SegmentGraph, parallel: bool) -> Vec<[usize; 4]> {
    let sides = &graph.sides;
    let n = sides.len();
    fan_out(n, parallel, |i| {
        let mut found = Vec::new();
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                // Three sides already spread over five corners can't close.
                if corners(&[sides[i], sides[j], sides[k]]).len() > 4 {
                    continue;
                }
                for l in (k + 1)..n {
                    let quad = [sides[i], sides[j], sides[k], sides[l]];
                    if corners(&quad).len() != 4 {
                        continue;
                    }
                    if let Some(cycle) = cycle_order(&quad) {
                        found.push(cycle);
                    }
                }
            }
        }
        found
    })
}

/// Walks two-segment paths `a-b-c` and pairs up paths sharing both ends.
///
/// Each four-cycle is reached once through each of its diagonals.
fn adjacency_cycles(graph: &SegmentGraph, parallel: bool) -> Vec<[usize; 4]> {
    fan_out(graph.points.len(), parallel, |a| {
        let mut middles: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for &b in &graph.neighbors[a] {
            for &c in graph.neighbors[b].range(a + 1..) {
                middles.entry(c).or_default().push(b);
            }
        }
        let mut found = Vec::new();
        for (c, bs) in middles {
            for (idx, &b) in bs.iter().enumerate() {
                for &d in &bs[idx + 1..] {
                    found.push([a, b, c, d]);
                }
            }
        }
        found
    })
}

/// Orders four sides into a closed cycle, or `None` if they don't form one.
pub(super) fn cycle_order(sides: &[(usize, usize); 4]) -> Option<[usize; 4]> {
    let mut degree: HashMap<usize, usize> = HashMap::new();
    for &(a, b) in sides {
        *degree.entry(a).or_default() += 1;
        *degree.entry(b).or_default() += 1;
    }
    if degree.len() != 4 || degree.values().any(|&d| d != 2) {
        return None;
    }

    let mut used = [true, false, false, false];
    let mut cycle = [sides[0].0, sides[0].1, 0, 0];
    for slot in 2..4 {
        let current = cycle[slot - 1];
        let (idx, &(a, b)) = sides
            .iter()
            .enumerate()
            .find(|(idx, (a, b))| !used[*idx] && (*a == current || *b == current))?;
        used[idx] = true;
        cycle[slot] = if a == current { b } else { a };
    }
    // Degree two everywhere on four corners leaves only one way to close.
    Some(cycle)
}

fn is_minimal(graph: &SegmentGraph, cycle: &[usize; 4], triangles: &HashSet<[usize; 3]>) -> bool {
    let ring: [Point; 4] = cycle.map(|id| graph.point(id));

    for skip in 0..4 {
        let mut rest = [0usize; 3];
        let mut slot = 0;
        for (idx, &id) in cycle.iter().enumerate() {
            if idx != skip {
                rest[slot] = id;
                slot += 1;
            }
        }
        let [a, b, c] = rest.map(|id| graph.point(id));
        if collinear(a, b, c) {
            return false;
        }
        rest.sort_unstable();
        if triangles.contains(&rest) {
            return false;
        }
    }

    !graph
        .points
        .iter()
        .enumerate()
        .any(|(id, &p)| !cycle.contains(&id) && polygon_encloses(&ring, p))
}
