use crate::geometry::d_transformation::DTransformation;
use crate::geometry::primitives::Rect;

/// Interior overlap test between `Self` and `T`. Shapes which only share boundary points do not collide.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Euclidean distance between `Self` and `T`, zero when they collide.
pub trait DistanceTo<T> {
    fn distance(&self, other: &T) -> f64;

    fn sq_distance(&self, other: &T) -> f64;
}

/// Shapes that can be rotated and translated onto the integer grid.
pub trait Transformable: Clone {
    fn transform(&mut self, t: &DTransformation) -> &mut Self;

    fn transform_clone(&self, t: &DTransformation) -> Self {
        let mut transformed = self.clone();
        transformed.transform(t);
        transformed
    }
}

/// Overwrites `self` with a transformed copy of `reference`, reusing the allocation of `self`.
pub trait TransformableFrom: Transformable {
    fn transform_from(&mut self, reference: &Self, t: &DTransformation) -> &mut Self;
}

pub trait Shape {
    fn centroid(&self) -> (f64, f64);

    /// Unsigned area enclosed by the shape, holes excluded
    fn area(&self) -> f64;

    fn bbox(&self) -> Rect;
}
