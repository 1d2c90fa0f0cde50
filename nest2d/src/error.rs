use thiserror::Error;

/// Reasons a shape is rejected by the geometry kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("contour has {0} distinct vertices, at least 3 are required")]
    TooFewVertices(usize),
    #[error("contour has zero area")]
    ZeroArea,
    #[error("contour intersects itself (edges {edge_a} and {edge_b})")]
    SelfIntersection { edge_a: usize, edge_b: usize },
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors surfaced by placers, selection heuristics and the arranger.
///
/// Only [`NestError::Configuration`] aborts an arrangement, all other variants are scoped to a single item
/// and end up in [`ArrangeResult::unplaced`](crate::entities::ArrangeResult::unplaced).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestError {
    #[error("item {item_id} has invalid geometry: {source}")]
    Geometry {
        item_id: usize,
        #[source]
        source: GeometryError,
    },
    #[error("no feasible placement for item {item_id}: {reason}")]
    InfeasiblePlacement { item_id: usize, reason: String },
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("arrangement cancelled before item {item_id} was placed")]
    Cancelled { item_id: usize },
}

impl NestError {
    pub fn infeasible(item_id: usize, reason: impl Into<String>) -> Self {
        NestError::InfeasiblePlacement {
            item_id,
            reason: reason.into(),
        }
    }

    /// Fatal errors abort the whole arrangement instead of being attributed to a single item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NestError::Configuration(_))
    }
}
