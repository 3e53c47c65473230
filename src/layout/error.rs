use super::types::ShapeKind;

/// Failures surfaced by [`super::compute_layout`].
///
/// Everything except the candidate budget is detected before any geometry
/// is computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("at least 2 layers are required, got {found}")]
    TooFewLayers { found: usize },
    #[error("layer {layer} has no nodes")]
    EmptyLayer { layer: usize },
    #[error("expected {expected} x-locations (one per layer), got {found}")]
    XLocationCountMismatch { expected: usize, found: usize },
    #[error("x-location of layer {layer} is not a finite number")]
    NonFiniteXLocation { layer: usize },
    #[error("layers {transition} and {} share the same x-location", .transition + 1)]
    DegenerateTransition { transition: usize },
    #[error(
        "{kind} search between layers {transition} and {} needs {candidates} candidates, over the limit of {limit}",
        .transition + 1
    )]
    CandidateBudgetExceeded {
        transition: usize,
        kind: ShapeKind,
        candidates: u128,
        limit: u64,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
