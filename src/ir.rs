use serde::{Deserialize, Serialize};

/// The network to lay out: node counts per layer, left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layer_sizes: Vec<usize>,
    /// Explicit x-coordinate per layer; layers sit at their index otherwise.
    pub x_locations: Option<Vec<f64>>,
}

impl NetworkSpec {
    pub fn new(layer_sizes: impl Into<Vec<usize>>) -> Self {
        Self {
            layer_sizes: layer_sizes.into(),
            x_locations: None,
        }
    }

    pub fn with_x_locations(mut self, x_locations: impl Into<Vec<f64>>) -> Self {
        self.x_locations = Some(x_locations.into());
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn transition_count(&self) -> usize {
        self.layer_sizes.len().saturating_sub(1)
    }

    pub fn max_layer_size(&self) -> usize {
        self.layer_sizes.iter().copied().max().unwrap_or(0)
    }

    /// Callers validate the network first; indices past the end panic.
    pub(crate) fn layer_x(&self, layer: usize) -> f64 {
        match &self.x_locations {
            Some(xs) => xs[layer],
            None => layer as f64,
        }
    }
}
