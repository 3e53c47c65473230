use super::intersections::{Intersections, sort_along_edge};
use super::types::{EdgeLayout, Segment};

/// Splits every edge at its intersection points.
///
/// An edge carrying `k` intersections yields `k + 1` segments: the chain runs
/// from one layer node through each intersection, in travel order, to the
/// other layer node.
pub(super) fn segment_edges(edges: &[EdgeLayout], intersections: &Intersections) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (index, edge) in edges.iter().enumerate() {
        let mut chain = Vec::with_capacity(intersections.per_edge[index].len() + 2);
        chain.push(edge.start);
        chain.extend_from_slice(&intersections.per_edge[index]);
        chain.push(edge.end);
        sort_along_edge(&mut chain);

        for pair in chain.windows(2) {
            segments.push(Segment {
                edge: index,
                transition: edge.transition(),
                start: pair[0],
                end: pair[1],
                touches_node: edge.is_endpoint(pair[0]) || edge.is_endpoint(pair[1]),
            });
        }
    }
    segments
}
