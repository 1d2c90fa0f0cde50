//! No-fit polygons: the locus of reference-vertex positions at which an orbiting shape touches,
//! but does not overlap, a stationary one.

mod decomposition;
mod minkowski;
mod nfp_cache;
mod union;

use itertools::Itertools;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::primitives::{Point, Polygon, Rect, SPolygon};

#[doc(inline)]
pub use decomposition::{convex_decomposition, triangulate};
#[doc(inline)]
pub use minkowski::{minkowski_sum_convex, nfp_convex};
#[doc(inline)]
pub use nfp_cache::{NfpCache, NfpKey};
#[doc(inline)]
pub use union::{UnionResult, union};

/// How precisely the no-fit polygon of non-convex shapes is computed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NfpLevel {
    /// Exact no-fit polygon, including pockets and holes
    #[default]
    Full,
    /// No-fit polygon of the convex hulls of both shapes
    ConvexHull,
}

/// Computes the no-fit polygon of `orbiting` around `stationary`.
///
/// Placing the reference vertex of `orbiting` (see [`Polygon::reference_vertex`]) on the boundary of the result
/// makes both shapes touch, placing it in the interior makes them overlap.
/// Holes of the input shapes are not taken into account.
/// The result can consist of multiple disjoint polygons, each possibly with holes.
pub fn no_fit_polygon(
    stationary: &Polygon,
    orbiting: &Polygon,
    level: NfpLevel,
) -> Result<UnionResult, GeometryError> {
    let (s, o) = (&stationary.outer, &orbiting.outer);
    match (level, s.is_convex() && o.is_convex()) {
        (_, true) => single(nfp_convex(s, o)?),
        (NfpLevel::ConvexHull, false) => {
            let hull_s = SPolygon::new(convex_hull_from_points(s.vertices.clone()))?;
            let hull_o = SPolygon::new(convex_hull_from_points(o.vertices.clone()))?;
            let nfp = nfp_convex(&hull_s, &hull_o)?;
            //the reference vertex of the hull is the same as the one of the shape itself
            debug_assert_eq!(hull_o.reference_vertex(), o.reference_vertex());
            single(nfp)
        }
        (NfpLevel::Full, false) => nfp_general(s, o),
    }
}

fn single(contour: Vec<Point>) -> Result<UnionResult, GeometryError> {
    Ok(UnionResult {
        polygons: vec![Polygon::from(SPolygon::new(contour)?)],
        inexact: vec![],
    })
}

/// No-fit polygon of two arbitrary simple contours.
///
/// Both contours are decomposed into convex pieces, the no-fit polygons of all pairs of pieces are
/// computed exactly and then merged with [`union`].
pub fn nfp_general(stationary: &SPolygon, orbiting: &SPolygon) -> Result<UnionResult, GeometryError> {
    let reference = orbiting.reference_vertex();
    let pieces_s = convex_decomposition(&stationary.vertices)?;
    let pieces_o = convex_decomposition(&orbiting.vertices)?
        .into_iter()
        .map(|p| p.into_iter().map(|v| -v).collect_vec())
        .collect_vec();

    let sums = pieces_s
        .iter()
        .cartesian_product(pieces_o.iter())
        .map(|(a, b)| minkowski_sum_convex(a, b).and_then(SPolygon::new).map(Polygon::from))
        .collect::<Result<Vec<_>, _>>()?;

    trace!(
        "[NFP] general nfp of {}x{} convex pieces",
        pieces_s.len(),
        pieces_o.len()
    );

    let merged = union(&sums);
    if merged.polygons.is_empty() {
        return Err(GeometryError::Degenerate(
            "union of partial no-fit polygons is empty".into(),
        ));
    }
    let (dx, dy) = (reference.0, reference.1);
    Ok(UnionResult {
        polygons: merged.polygons.iter().map(|p| p.translated(dx, dy)).collect(),
        inexact: merged.inexact.iter().map(|p| p.translated(dx, dy)).collect(),
    })
}

/// Inner-fit rectangle: the region in which the reference point of a shape with bounding box `item_bbox`
/// can be placed such that the shape stays within `bin`.
/// Returns `None` if the shape does not fit.
pub fn ifp_rect(bin: &Rect, item_bbox: &Rect, reference: Point) -> Option<Rect> {
    let x_min = bin.x_min + (reference.0 - item_bbox.x_min);
    let x_max = bin.x_max - (item_bbox.x_max - reference.0);
    let y_min = bin.y_min + (reference.1 - item_bbox.y_min);
    let y_max = bin.y_max - (item_bbox.y_max - reference.1);
    Rect::try_new(x_min, y_min, x_max, y_max).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;

    fn rect_poly(x: i64, y: i64, w: i64, h: i64) -> Polygon {
        Polygon::from(
            SPolygon::new(vec![
                Point(x, y),
                Point(x + w, y),
                Point(x + w, y + h),
                Point(x, y + h),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn ifp_of_item_in_bin() {
        let bin = Rect::try_new(0, 0, 100, 50).unwrap();
        let item_bbox = Rect::try_new(10, 10, 30, 20).unwrap();
        assert_eq!(
            ifp_rect(&bin, &item_bbox, Point(10, 10)),
            Some(Rect::try_new(0, 0, 80, 40).unwrap())
        );
        let too_wide = Rect::try_new(0, 0, 101, 10).unwrap();
        assert_eq!(ifp_rect(&bin, &too_wide, Point(0, 0)), None);
    }

    #[test]
    fn square_nfp() {
        let s = rect_poly(0, 0, 10, 10);
        let o = rect_poly(0, 0, 5, 5);
        let nfp = no_fit_polygon(&s, &o, NfpLevel::Full).unwrap();
        assert_eq!(nfp.polygons.len(), 1);
        assert_eq!(nfp.polygons[0].bbox(), Rect::try_new(-5, -5, 10, 10).unwrap());
    }

    #[test]
    fn convex_hull_level_fills_pockets() {
        let l_shape = Polygon::from(
            SPolygon::new(vec![
                Point(0, 0),
                Point(60, 0),
                Point(60, 20),
                Point(20, 20),
                Point(20, 60),
                Point(0, 60),
            ])
            .unwrap(),
        );
        let sq = rect_poly(0, 0, 20, 20);
        let full = no_fit_polygon(&l_shape, &sq, NfpLevel::Full).unwrap();
        let hull = no_fit_polygon(&l_shape, &sq, NfpLevel::ConvexHull).unwrap();
        assert!(hull.polygons[0].area() > full.polygons[0].area());
        assert_eq!(full.polygons[0].area(), 80.0 * 80.0 - 40.0 * 40.0);
    }
}
