use log::debug;

use crate::ir::NetworkSpec;

use super::error::{LayoutError, Result};
use super::geometry::EPSILON;
use super::types::{EdgeId, EdgeLayout, Layer, Point};

pub(super) fn validate_network(network: &NetworkSpec) -> Result<()> {
    let found = network.layer_count();
    if found < 2 {
        return Err(LayoutError::TooFewLayers { found });
    }
    if let Some(layer) = network.layer_sizes.iter().position(|&size| size == 0) {
        return Err(LayoutError::EmptyLayer { layer });
    }
    if let Some(xs) = &network.x_locations {
        if xs.len() != found {
            return Err(LayoutError::XLocationCountMismatch {
                expected: found,
                found: xs.len(),
            });
        }
        if let Some(layer) = xs.iter().position(|x| !x.is_finite()) {
            return Err(LayoutError::NonFiniteXLocation { layer });
        }
        if let Some(transition) = xs
            .windows(2)
            .position(|pair| (pair[0] - pair[1]).abs() <= EPSILON)
        {
            return Err(LayoutError::DegenerateTransition { transition });
        }
    }
    Ok(())
}

/// Places every layer's nodes on a shared grid of `2 * max - 1` slots.
///
/// A layer of `s` nodes spans `2 * s - 1` slots and is centred by an integer
/// offset, taking every second slot. The result is symmetric about the
/// common centre line.
pub(super) fn place_layers(network: &NetworkSpec) -> Vec<Layer> {
    let slot_count = 2 * network.max_layer_size() - 1;
    network
        .layer_sizes
        .iter()
        .enumerate()
        .map(|(index, &size)| {
            let span = 2 * size - 1;
            let offset = (slot_count - span) / 2;
            let x = network.layer_x(index);
            let nodes = (0..size)
                .map(|node| Point::new(x, (offset + node * 2) as f64))
                .collect();
            Layer { index, x, nodes }
        })
        .collect()
}

/// Connects every node of each layer to every node of the next one.
pub(super) fn build_edges(layers: &[Layer]) -> Vec<EdgeLayout> {
    let mut edges = Vec::new();
    for (transition, pair) in layers.windows(2).enumerate() {
        let (left, right) = (&pair[0], &pair[1]);
        for (from, &start) in left.nodes.iter().enumerate() {
            for (to, &end) in right.nodes.iter().enumerate() {
                edges.push(EdgeLayout {
                    id: EdgeId {
                        transition,
                        from,
                        to,
                    },
                    start,
                    end,
                });
            }
        }
        debug!(
            transition,
            edges = left.nodes.len() * right.nodes.len();
            "Built layer-transition edges",
        );
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ys(layer: &Layer) -> Vec<f64> {
        layer.nodes.iter().map(|p| p.y).collect()
    }

    #[test]
    fn layers_are_centred_on_shared_slots() {
        let layers = place_layers(&NetworkSpec::new([1, 3, 2]));
        assert_eq!(ys(&layers[0]), vec![2.0]);
        assert_eq!(ys(&layers[1]), vec![0.0, 2.0, 4.0]);
        assert_eq!(ys(&layers[2]), vec![1.0, 3.0]);
    }

    #[test]
    fn default_x_is_the_layer_index() {
        let layers = place_layers(&NetworkSpec::new([2, 2, 2]));
        let xs: Vec<f64> = layers.iter().map(|layer| layer.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
        assert!(layers[2].nodes.iter().all(|p| p.x == 2.0));
    }

    #[test]
    fn explicit_x_locations_are_used() {
        let network = NetworkSpec::new([2, 1]).with_x_locations([-1.5, 4.0]);
        let layers = place_layers(&network);
        assert!(layers[0].nodes.iter().all(|p| p.x == -1.5));
        assert_eq!(layers[1].nodes, vec![Point::new(4.0, 1.0)]);
    }

    #[test]
    fn layer_positions_are_symmetric() {
        let network = NetworkSpec::new([5, 2, 4, 1, 3]);
        let centre = (2 * network.max_layer_size() - 2) as f64 / 2.0;
        for layer in place_layers(&network) {
            let ys = ys(&layer);
            assert!(ys.windows(2).all(|w| w[0] < w[1]));
            for (low, high) in ys.iter().zip(ys.iter().rev()) {
                assert_eq!(low + high, 2.0 * centre);
            }
        }
    }

    #[test]
    fn edges_form_complete_bipartite_sets() {
        let layers = place_layers(&NetworkSpec::new([2, 3, 1]));
        let edges = build_edges(&layers);
        assert_eq!(edges.len(), 2 * 3 + 3);
        assert_eq!(edges[0].id.to_string(), "layer_0_L0_to_R0");
        assert_eq!(edges[5].id.to_string(), "layer_0_L1_to_R2");
        assert!(edges[6..].iter().all(|edge| edge.transition() == 1));
        assert!(edges[6..].iter().all(|edge| edge.end == Point::new(2.0, 2.0)));
    }

    #[test]
    fn rejects_invalid_networks() {
        assert_eq!(
            validate_network(&NetworkSpec::new([3])),
            Err(LayoutError::TooFewLayers { found: 1 })
        );
        assert_eq!(
            validate_network(&NetworkSpec::new([2, 0, 1])),
            Err(LayoutError::EmptyLayer { layer: 1 })
        );
        assert_eq!(
            validate_network(&NetworkSpec::new([2, 2]).with_x_locations([0.0])),
            Err(LayoutError::XLocationCountMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            validate_network(&NetworkSpec::new([2, 2]).with_x_locations([0.0, f64::NAN])),
            Err(LayoutError::NonFiniteXLocation { layer: 1 })
        );
        assert_eq!(
            validate_network(&NetworkSpec::new([2, 2, 2]).with_x_locations([0.0, 1.0, 1.0])),
            Err(LayoutError::DegenerateTransition { transition: 1 })
        );
    }
}
