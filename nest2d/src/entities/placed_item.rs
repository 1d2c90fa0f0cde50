use std::sync::Arc;

use slotmap::new_key_type;

use crate::entities::Item;
use crate::error::GeometryError;
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Polygon, Rect};

new_key_type! {
    /// Unique key for each [`PlacedItem`] in a [`Pile`](crate::entities::Pile)
    pub struct PItemKey;
}

/// Represents an [`Item`] that has been placed in a [`Pile`](crate::entities::Pile)
#[derive(Clone, Debug)]
pub struct PlacedItem {
    /// ID of the type of `Item` that was placed
    pub item_id: usize,
    /// The transformation that was applied to the `Item` before it was placed
    pub d_transf: DTransformation,
    /// The collision shape of the `Item` after it has been transformed and placed
    pub shape: Arc<Polygon>,
    pub bbox: Rect,
    /// Area of the original shape of the `Item`
    pub area: f64,
}

impl PlacedItem {
    pub fn new(item: &Item, d_transf: DTransformation) -> Result<Self, GeometryError> {
        let (dx, dy) = d_transf.translation();
        let shape = item.shape_cd_at(d_transf.rotation())?.translated(dx, dy);
        Ok(Self::from_shape(item, d_transf, shape))
    }

    /// Creates a placed item from a collision shape that is already transformed.
    pub fn from_shape(item: &Item, d_transf: DTransformation, shape: Polygon) -> Self {
        PlacedItem {
            item_id: item.id,
            d_transf,
            bbox: shape.bbox(),
            shape: Arc::new(shape),
            area: item.area,
        }
    }

    /// Same placed item, moved by `(dx, dy)`.
    pub fn translated(&self, dx: i64, dy: i64) -> Self {
        PlacedItem {
            item_id: self.item_id,
            d_transf: self.d_transf.translated(dx, dy),
            shape: Arc::new(self.shape.translated(dx, dy)),
            bbox: self.bbox.translated(dx, dy),
            area: self.area,
        }
    }
}
