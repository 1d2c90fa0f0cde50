use std::sync::Arc;

use itertools::Itertools;

use crate::error::GeometryError;
use crate::geometry::d_transformation::rotate_point;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Polygon, SPolygon};

/// Item to be placed in a [`Pile`](crate::entities::Pile)
#[derive(Clone, Debug)]
pub struct Item {
    pub id: usize,
    /// Shape of the item as it was imported
    pub shape_orig: Arc<Polygon>,
    /// Shape used for collision detection.
    /// Equal to `shape_orig`, unless a minimum distance between items is enforced, in which case it is dilated.
    pub shape_cd: Arc<Polygon>,
    /// Rotations (in radians) in which the item may be placed. `None` defers to the placer configuration.
    pub allowed_rotations: Option<Vec<f64>>,
    /// Area of the original shape
    pub area: f64,
}

impl Item {
    pub fn new(id: usize, shape: Polygon, allowed_rotations: Option<Vec<f64>>) -> Self {
        let area = shape.area();
        let shape = Arc::new(shape);
        Item {
            id,
            shape_orig: shape.clone(),
            shape_cd: shape,
            allowed_rotations,
            area,
        }
    }

    /// Replaces the collision detection shape.
    pub fn with_collision_shape(self, shape_cd: Polygon) -> Self {
        Item {
            shape_cd: Arc::new(shape_cd),
            ..self
        }
    }

    /// Collision shape rotated around the origin, snapped to the grid and normalized again.
    pub fn shape_cd_at(&self, rotation: f64) -> Result<Polygon, GeometryError> {
        rotated(&self.shape_cd, rotation)
    }

    /// Original shape rotated around the origin, snapped to the grid and normalized again.
    pub fn shape_orig_at(&self, rotation: f64) -> Result<Polygon, GeometryError> {
        rotated(&self.shape_orig, rotation)
    }
}

fn rotated(shape: &Polygon, rotation: f64) -> Result<Polygon, GeometryError> {
    if rotation == 0.0 {
        return Ok(shape.clone());
    }
    let rotate = |c: &SPolygon| c.vertices.iter().map(|&v| rotate_point(v, rotation)).collect_vec();
    Polygon::from_contours(rotate(&shape.outer), shape.holes.iter().map(rotate).collect())
}
