mod error;
pub mod geometry;
mod intersections;
mod placement;
mod quadrilaterals;
mod search;
mod segments;
mod triangles;
pub(crate) mod types;
pub mod winding;
pub use error::*;
pub use types::*;
use intersections::*;
use placement::*;
use search::*;
use segments::*;

use log::{debug, info};

use crate::config::LayoutConfig;
use crate::ir::NetworkSpec;

/// Lays out the network and discovers every minimal shape between its layers.
///
/// Stages run in order, each consuming the previous one's output: node
/// placement, bipartite edges, pairwise intersections, segmentation, then the
/// triangle and quadrilateral search per layer-transition.
pub fn compute_layout(network: &NetworkSpec, config: &LayoutConfig) -> Result<Layout> {
    validate_network(network)?;
    info!(
        layers = network.layer_count(), strategy:? = config.strategy;
        "Computing layout",
    );

    let layers = place_layers(network);
    let edges = build_edges(&layers);
    let intersections = compute_intersections(&edges);
    let segments = segment_edges(&edges, &intersections);
    debug!(
        edges = edges.len(), intersections = intersections.points.len(), segments = segments.len();
        "Segmented edges",
    );

    let (shapes, transitions) = search_shapes(&segments, network.transition_count(), config)?;
    info!(
        triangles = transitions.iter().map(|t| t.triangles).sum::<usize>(),
        quadrilaterals = transitions.iter().map(|t| t.quadrilaterals).sum::<usize>();
        "Shape search finished",
    );

    Ok(Layout {
        layers,
        edges,
        intersections: intersections.points,
        segments,
        shapes,
        transitions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchStrategy;

    fn canonical_shapes(layout: &Layout) -> Vec<(ShapeKind, usize, Vec<Point>)> {
        let mut shapes: Vec<_> = layout
            .shapes
            .iter()
            .map(|shape| (shape.kind, shape.transition, shape.canonical()))
            .collect();
        shapes.sort();
        shapes
    }

    #[test]
    fn x_pattern_has_two_triangles() {
        let layout = compute_layout(&NetworkSpec::new([2, 2]), &LayoutConfig::default()).unwrap();
        assert_eq!(layout.intersections, vec![Point::new(0.5, 1.0)]);
        let triangles: Vec<Vec<Point>> = layout.triangles().map(Shape::canonical).collect();
        assert_eq!(
            triangles,
            vec![
                vec![Point::new(0.0, 0.0), Point::new(0.5, 1.0), Point::new(1.0, 0.0)],
                vec![Point::new(0.0, 2.0), Point::new(0.5, 1.0), Point::new(1.0, 2.0)],
            ]
        );
        assert_eq!(layout.quadrilaterals().count(), 0);
    }

    #[test]
    fn skipping_quadrilaterals_keeps_triangles() {
        let network = NetworkSpec::new([3, 3]);
        let config = LayoutConfig {
            search_quadrilaterals: false,
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&network, &config).unwrap();
        assert_eq!(layout.triangles().count(), 10);
        assert_eq!(layout.quadrilaterals().count(), 0);
    }

    #[test]
    fn strategies_and_scheduling_agree() {
        for sizes in [vec![2, 2], vec![3, 3], vec![2, 3, 2], vec![4, 3]] {
            let network = NetworkSpec::new(sizes);
            let reference = compute_layout(&network, &LayoutConfig::default()).unwrap();
            for (strategy, parallel) in [
                (SearchStrategy::Exhaustive, true),
                (SearchStrategy::Exhaustive, false),
                (SearchStrategy::Adjacency, false),
            ] {
                let config = LayoutConfig {
                    strategy,
                    parallel,
                    ..LayoutConfig::default()
                };
                let other = compute_layout(&network, &config).unwrap();
                assert_eq!(canonical_shapes(&reference), canonical_shapes(&other));
            }
        }
    }

    #[test]
    fn inner_segments_only_mode_drops_node_corners() {
        let network = NetworkSpec::new([3, 3]);
        let config = LayoutConfig {
            include_node_vertices: false,
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&network, &config).unwrap();
        let nodes: Vec<Point> = layout.layers.iter().flat_map(|l| l.nodes.clone()).collect();
        assert!(
            layout
                .shapes
                .iter()
                .all(|shape| shape.vertices.iter().all(|v| !nodes.contains(v)))
        );
        assert_eq!(layout.quadrilaterals().count(), 2);
    }

    #[test]
    fn configuration_errors_fail_before_geometry() {
        let err = compute_layout(&NetworkSpec::new([2]), &LayoutConfig::default()).unwrap_err();
        assert_eq!(err, LayoutError::TooFewLayers { found: 1 });
    }

    #[test]
    fn summaries_cover_every_transition() {
        let layout =
            compute_layout(&NetworkSpec::new([2, 3, 2]), &LayoutConfig::default()).unwrap();
        assert_eq!(layout.transitions.len(), 2);
        for summary in &layout.transitions {
            assert_eq!(summary.triangles, 4);
            assert_eq!(summary.quadrilaterals, 1);
        }
    }
}
