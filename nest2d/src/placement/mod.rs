//! Placement of single items into a [`Pile`].

mod bottom_left;
mod nfp_placer;
mod objective;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entities::{Bin, Item, PItemKey, Pile, PileSnapshot};
use crate::error::{GeometryError, NestError};
use crate::geometry::primitives::{Coord, Point, Rect};
use crate::nfp::NfpLevel;

#[doc(inline)]
pub use bottom_left::{BottomLeftPlacer, available_space_down, available_space_left, down_poly, left_poly};
#[doc(inline)]
pub use nfp_placer::NfpPlacer;
#[doc(inline)]
pub use objective::{BinCenterObjective, BottomLeftObjective, CandidatePile, GravityObjective, ObjectFunction};

/// Places items one by one into a single bin.
pub trait Placer {
    fn new(bin: &Bin, config: &PlacementConfig) -> Self
    where
        Self: Sized;

    /// The pile being built
    fn pile(&self) -> &Pile;

    /// Tries to add `item` to the pile, trying every allowed rotation.
    fn pack(&mut self, item: &Item) -> Result<PItemKey, NestError>;

    fn save(&self) -> PileSnapshot;

    fn restore(&mut self, snapshot: &PileSnapshot);

    /// Closes the pile and hands it over.
    fn finalize(self) -> Pile
    where
        Self: Sized;

    /// Replaces the objective function. Placers which do not score candidates ignore it.
    fn set_objective(&mut self, _objective: Arc<dyn ObjectFunction>) {}
}

/// Reference positions within a rectangle
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Center,
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
    DontAlign,
}

impl Alignment {
    /// The point of `rect` this alignment refers to, `None` for [`Alignment::DontAlign`]
    pub fn point_in(&self, rect: &Rect) -> Option<Point> {
        match self {
            Alignment::Center => Some(rect.center_point()),
            Alignment::BottomLeft => Some(Point(rect.x_min, rect.y_min)),
            Alignment::BottomRight => Some(Point(rect.x_max, rect.y_min)),
            Alignment::TopLeft => Some(Point(rect.x_min, rect.y_max)),
            Alignment::TopRight => Some(Point(rect.x_max, rect.y_max)),
            Alignment::DontAlign => None,
        }
    }

    /// Translation that aligns `inner` with `outer`, zero for [`Alignment::DontAlign`]
    pub fn translation(&self, inner: &Rect, outer: &Rect) -> (Coord, Coord) {
        match (self.point_in(inner), self.point_in(outer)) {
            (Some(from), Some(to)) => (to.0 - from.0, to.1 - from.1),
            _ => (0, 0),
        }
    }
}

/// Built-in objective functions
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    #[default]
    BinCenter,
    Gravity,
    BottomLeft,
}

impl Objective {
    pub fn build(&self) -> Arc<dyn ObjectFunction> {
        match self {
            Objective::BinCenter => Arc::new(BinCenterObjective),
            Objective::Gravity => Arc::new(GravityObjective::default()),
            Objective::BottomLeft => Arc::new(BottomLeftObjective),
        }
    }
}

/// Configuration of the placers
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Rotations (in radians) tried for every item without its own set of allowed rotations
    pub rotations: Vec<f64>,
    /// Where the finished pile is moved to within the bin
    pub alignment: Alignment,
    /// Where the first item is placed
    pub starting_point: Alignment,
    /// Density of the candidate positions sampled along no-fit polygons, in `[0, 1]`
    pub accuracy: f64,
    pub objective: Objective,
    /// Score offset for candidates whose pile would no longer fit the bin
    pub penalty: f64,
    /// Compute no-fit polygons in parallel
    pub parallel: bool,
    pub nfp_level: NfpLevel,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            rotations: vec![0.0],
            alignment: Alignment::Center,
            starting_point: Alignment::Center,
            accuracy: 0.65,
            objective: Objective::BinCenter,
            penalty: 1e6,
            parallel: true,
            nfp_level: NfpLevel::Full,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<(), NestError> {
        if self.rotations.is_empty() {
            return Err(NestError::Configuration("empty rotation set".into()));
        }
        if let Some(r) = self.rotations.iter().find(|r| !r.is_finite()) {
            return Err(NestError::Configuration(format!("non-finite rotation: {r}")));
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(NestError::Configuration(format!(
                "accuracy {} outside [0, 1]",
                self.accuracy
            )));
        }
        if self.penalty.is_nan() || self.penalty <= 0.0 {
            return Err(NestError::Configuration(format!(
                "penalty must be positive, got {}",
                self.penalty
            )));
        }
        Ok(())
    }

    /// Rotations to try for `item`
    pub fn rotations_for<'a>(&'a self, item: &'a Item) -> &'a [f64] {
        match &item.allowed_rotations {
            Some(r) if !r.is_empty() => r,
            _ => &self.rotations,
        }
    }
}

/// Error for an item no rotation could be placed in.
/// Geometry errors are only reported when they occurred in every rotation.
pub(crate) fn unplaceable(
    item_id: usize,
    n_rotations: usize,
    mut geometry_failures: Vec<GeometryError>,
    reason: &str,
) -> NestError {
    match (geometry_failures.len() == n_rotations, geometry_failures.pop()) {
        (true, Some(source)) => NestError::Geometry { item_id, source },
        _ => NestError::infeasible(item_id, reason),
    }
}

/// Whether a shape with bounding box `bbox` could fit in `bin` after translation.
pub fn would_fit(bbox: &Rect, bin: &Rect) -> bool {
    bbox.width() <= bin.width() && bbox.height() <= bin.height()
}
