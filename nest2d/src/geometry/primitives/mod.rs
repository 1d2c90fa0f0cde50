mod edge;
mod point;
mod polygon;
mod rect;
mod simple_polygon;

#[doc(inline)]
pub use edge::Edge;
#[doc(inline)]
pub use point::{Coord, Point};
#[doc(inline)]
pub use polygon::Polygon;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use simple_polygon::{SPolygon, reference_vertex, remove_collinear};
