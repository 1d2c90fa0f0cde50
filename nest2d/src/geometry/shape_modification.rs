#[cfg(feature = "separation-distance")]
use geo_offset::Offset;
#[cfg(feature = "separation-distance")]
use itertools::Itertools;
#[cfg(feature = "separation-distance")]
use log::debug;

use anyhow::Result;

use crate::geometry::primitives::Polygon;
#[cfg(feature = "separation-distance")]
use crate::geometry::primitives::{Coord, Point, SPolygon};

/// Dilates the outer contour of a polygon by `distance` and drops its holes.
///
/// The offset contour is computed in floating point and snapped back to the grid. The distance is enlarged by
/// half a grid diagonal so the snapped contour keeps at least `distance` of clearance around the original.
/// Relies on the [`geo_offset`](https://crates.io/crates/geo_offset) crate.
#[cfg(feature = "separation-distance")]
pub fn offset_polygon(poly: &Polygon, distance: f64) -> Result<Polygon> {
    if distance <= 0.0 {
        return Ok(poly.outer_only());
    }

    // Convert the outer contour to a geo_types::Polygon
    let geo_poly = geo_types::Polygon::new(
        poly.outer
            .vertices
            .iter()
            .map(|p| (p.0 as f64, p.1 as f64))
            .collect(),
        vec![],
    );

    // Create the offset geo_types::Polygon(s) and keep the largest one
    let geo_poly_offset = geo_poly
        .offset(distance + std::f64::consts::FRAC_1_SQRT_2)
        .map_err(|e| anyhow::anyhow!("error while offsetting polygon: {:?}", e))?
        .0
        .into_iter()
        .max_by(|a, b| geo_area(a).total_cmp(&geo_area(b)))
        .ok_or_else(|| anyhow::anyhow!("offsetting produced an empty shape"))?;

    let points_offset = geo_poly_offset
        .exterior()
        .coords()
        .map(|c| Point(c.x.round() as Coord, c.y.round() as Coord))
        .collect_vec();

    let outer = SPolygon::new(points_offset)?;
    debug!(
        "[GEO] offset contour by {distance}: {} -> {} vertices",
        poly.outer.n_vertices(),
        outer.n_vertices()
    );
    Ok(Polygon::from(outer))
}

#[cfg(not(feature = "separation-distance"))]
pub fn offset_polygon(poly: &Polygon, distance: f64) -> Result<Polygon> {
    if distance <= 0.0 {
        return Ok(poly.outer_only());
    }
    anyhow::bail!(
        "cannot offset shape without geo_offset dependency, compile with --features separation-distance to enable this"
    )
}

#[cfg(feature = "separation-distance")]
fn geo_area(p: &geo_types::Polygon<f64>) -> f64 {
    p.exterior()
        .lines()
        .map(|l| l.start.x * l.end.y - l.end.x * l.start.y)
        .sum::<f64>()
        .abs()
}
