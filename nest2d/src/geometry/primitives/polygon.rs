use itertools::Itertools;

use crate::error::GeometryError;
use crate::geometry::d_transformation::DTransformation;
use crate::geometry::geo_enums::{GeoPosition, GeoRelation};
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable, TransformableFrom};
use crate::geometry::primitives::{Coord, Edge, Point, Rect, SPolygon};

/// Polygon with an outer contour and zero or more holes.
///
/// The outer contour is counterclockwise and the holes are clockwise, so the filled region lies to the left of
/// every directed edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub outer: SPolygon,
    pub holes: Vec<SPolygon>,
}

impl Polygon {
    pub fn new(outer: SPolygon, holes: Vec<SPolygon>) -> Self {
        debug_assert!(outer.is_ccw());
        debug_assert!(holes.iter().all(|h| !h.is_ccw()));
        Polygon { outer, holes }
    }

    /// Builds a polygon from raw contours, normalizing the orientation of each of them.
    pub fn from_contours(outer: Vec<Point>, holes: Vec<Vec<Point>>) -> Result<Self, GeometryError> {
        let outer = SPolygon::new(outer)?;
        let holes = holes
            .into_iter()
            .map(SPolygon::new_hole)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polygon { outer, holes })
    }

    pub fn contours(&self) -> impl Iterator<Item = &SPolygon> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        self.contours().flat_map(|c| c.edge_iter())
    }

    pub fn vertex_iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.contours().flat_map(|c| c.vertices.iter().copied())
    }

    pub fn n_vertices(&self) -> usize {
        self.contours().map(|c| c.n_vertices()).sum()
    }

    pub fn reference_vertex(&self) -> Point {
        self.outer.reference_vertex()
    }

    pub fn is_convex(&self) -> bool {
        self.holes.is_empty() && self.outer.is_convex()
    }

    /// The same polygon with its holes filled.
    pub fn outer_only(&self) -> Polygon {
        Polygon {
            outer: self.outer.clone(),
            holes: vec![],
        }
    }

    pub fn translated(&self, dx: Coord, dy: Coord) -> Polygon {
        let shift = |c: &SPolygon| SPolygon {
            vertices: c.vertices.iter().map(|v| v.translated(dx, dy)).collect(),
            bbox: c.bbox.translated(dx, dy),
            area: c.area,
        };
        Polygon {
            outer: shift(&self.outer),
            holes: self.holes.iter().map(shift).collect(),
        }
    }

    pub fn position_of(&self, p: &Point) -> GeoPosition {
        self.position_of_scaled(p, 1)
    }

    /// See [`SPolygon::position_of_scaled`].
    pub fn position_of_scaled(&self, p: &Point, scale: Coord) -> GeoPosition {
        match self.outer.position_of_scaled(p, scale) {
            GeoPosition::Interior => {
                for hole in &self.holes {
                    match hole.position_of_scaled(p, scale) {
                        GeoPosition::Interior => return GeoPosition::Exterior,
                        GeoPosition::Boundary => return GeoPosition::Boundary,
                        GeoPosition::Exterior => {}
                    }
                }
                GeoPosition::Interior
            }
            other => other,
        }
    }

    /// Whether the point lies strictly inside the polygon. Points on the boundary are not inside.
    pub fn is_point_inside(&self, p: &Point) -> bool {
        self.position_of(p) == GeoPosition::Interior
    }

    /// Checks every contour for simplicity and verifies the holes are enclosed by the outer contour.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.outer.validate()?;
        for (i, hole) in self.holes.iter().enumerate() {
            hole.validate()?;
            let escapes = hole
                .vertices
                .iter()
                .any(|v| self.outer.position_of(v) == GeoPosition::Exterior);
            let crosses = hole
                .edge_iter()
                .cartesian_product(self.outer.edge_iter().collect_vec())
                .any(|(h, o)| h.crosses(&o));
            if escapes || crosses {
                return Err(GeometryError::Degenerate(format!(
                    "hole {i} is not enclosed by the outer contour"
                )));
            }
        }
        Ok(())
    }

    /// Whether the interiors of both polygons overlap. Polygons that only share boundary points do not intersect.
    pub fn intersects(&self, other: &Polygon) -> bool {
        if !self.bbox().overlaps_open(&other.bbox()) {
            return false;
        }
        any_crossing(self, other) || boundary_enters(self, other) || boundary_enters(other, self)
    }

    /// Whether the boundaries meet without any overlap of the interiors.
    pub fn touches(&self, other: &Polygon) -> bool {
        if !self.bbox().overlaps_closed(&other.bbox()) {
            return false;
        }
        !self.intersects(other) && boundaries_meet(self, other)
    }

    /// Whether `self` is fully contained in `other`, boundary contact allowed.
    pub fn is_inside(&self, other: &Polygon) -> bool {
        if !other.bbox().contains_rect(&self.bbox()) || any_crossing(self, other) {
            return false;
        }
        let self_within = sub_segment_midpoints(self, other)
            .all(|m| other.position_of_scaled(&m.0, 2) != GeoPosition::Exterior);
        let other_outside = sub_segment_midpoints(other, self)
            .all(|m| self.position_of_scaled(&m.0, 2) != GeoPosition::Interior);
        self_within && other_outside
    }

    pub fn relation(&self, other: &Polygon) -> GeoRelation {
        match self.intersects(other) {
            false if self.touches(other) => GeoRelation::Touching,
            false => GeoRelation::Disjoint,
            true if self.is_inside(other) => GeoRelation::Enclosed,
            true if other.is_inside(self) => GeoRelation::Surrounding,
            true => GeoRelation::Intersecting,
        }
    }
}

/// Midpoint of a sub-segment on the doubled grid, together with the sub-segment itself.
struct Midpoint(Point, Edge);

fn any_crossing(a: &Polygon, b: &Polygon) -> bool {
    let b_edges = b.edge_iter().collect_vec();
    a.edge_iter().any(|e_a| {
        let bbox = e_a.bbox();
        b_edges
            .iter()
            .any(|e_b| bbox.overlaps_closed(&e_b.bbox()) && e_a.crosses(e_b))
    })
}

fn boundaries_meet(a: &Polygon, b: &Polygon) -> bool {
    let b_edges = b.edge_iter().collect_vec();
    a.edge_iter()
        .any(|e_a| b_edges.iter().any(|e_b| e_a.collides_with(e_b)))
}

/// Splits the edges of `a` at every vertex of `b` lying on them and yields the midpoints of the pieces.
/// Without proper crossings, each piece lies entirely in the interior, on the boundary or in the exterior of `b`.
fn sub_segment_midpoints<'a>(a: &'a Polygon, b: &'a Polygon) -> impl Iterator<Item = Midpoint> + 'a {
    let b_vertices = b.vertex_iter().collect_vec();
    let b_bbox = b.bbox();
    a.edge_iter()
        .filter(move |e| e.bbox().overlaps_closed(&b_bbox))
        .flat_map(move |e| {
            let dir = e.end - e.start;
            let mut splits = b_vertices
                .iter()
                .filter(|&&v| e.contains_strictly(&v))
                .copied()
                .collect_vec();
            splits.sort_by_key(|v| {
                let d = *v - e.start;
                d.0 as i128 * dir.0 as i128 + d.1 as i128 * dir.1 as i128
            });
            splits.dedup();

            std::iter::once(e.start)
                .chain(splits)
                .chain(std::iter::once(e.end))
                .tuple_windows()
                .map(|(p, q)| Midpoint(p + q, Edge::new(p, q)))
                .collect_vec()
        })
}

/// Whether part of the boundary of `a` runs through the interior of `b`,
/// or along the boundary of `b` with the interiors of both on the same side.
fn boundary_enters(a: &Polygon, b: &Polygon) -> bool {
    sub_segment_midpoints(a, b).any(|Midpoint(m, sub)| {
        match b.position_of_scaled(&m, 2) {
            GeoPosition::Interior => true,
            GeoPosition::Exterior => false,
            GeoPosition::Boundary => b.edge_iter().any(|e_b| {
                let doubled = Edge::new(e_b.start.scaled(2), e_b.end.scaled(2));
                doubled.contains(&m) && sub.same_direction(&e_b)
            }),
        }
    })
}

impl Shape for Polygon {
    fn centroid(&self) -> (f64, f64) {
        let (mut c_x, mut c_y) = (0.0, 0.0);
        let mut area = 0.0;
        for c in self.contours() {
            let a = c.signed_area();
            let (x, y) = c.centroid();
            c_x += x * a;
            c_y += y * a;
            area += a;
        }
        (c_x / area, c_y / area)
    }

    fn area(&self) -> f64 {
        self.outer.area - self.holes.iter().map(|h| h.area).sum::<f64>()
    }

    fn bbox(&self) -> Rect {
        self.outer.bbox
    }
}

impl CollidesWith<Polygon> for Polygon {
    fn collides_with(&self, other: &Polygon) -> bool {
        self.intersects(other)
    }
}

impl CollidesWith<Point> for Polygon {
    fn collides_with(&self, point: &Point) -> bool {
        self.is_point_inside(point)
    }
}

impl Transformable for Polygon {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        self.outer.transform(t);
        self.holes.iter_mut().for_each(|h| {
            h.transform(t);
        });
        self
    }
}

impl TransformableFrom for Polygon {
    fn transform_from(&mut self, reference: &Self, t: &DTransformation) -> &mut Self {
        self.outer.transform_from(&reference.outer, t);
        self.holes
            .iter_mut()
            .zip(reference.holes.iter())
            .for_each(|(h, r)| {
                h.transform_from(r, t);
            });
        self
    }
}

impl From<SPolygon> for Polygon {
    fn from(outer: SPolygon) -> Self {
        Polygon {
            outer,
            holes: vec![],
        }
    }
}
