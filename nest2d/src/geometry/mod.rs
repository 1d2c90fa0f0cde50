pub mod convex_hull;
pub mod d_transformation;
pub mod edge_cache;
pub mod geo_enums;
pub mod geo_traits;
pub mod primitives;
pub mod shape_modification;

#[doc(inline)]
pub use d_transformation::DTransformation;
