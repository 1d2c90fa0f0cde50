use itertools::Itertools;

use crate::error::GeometryError;
use crate::geometry::d_transformation::DTransformation;
use crate::geometry::geo_enums::GeoPosition;
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable, TransformableFrom};
use crate::geometry::primitives::{Coord, Edge, Point, Rect};

/// A Simple Polygon is a polygon that does not intersect itself and contains no holes.
/// It is a closed shape with a finite number of vertices and edges.
/// [read more](https://en.wikipedia.org/wiki/Simple_polygon)
///
/// Contours are stored open (the closing vertex is not repeated) and with a fixed orientation:
/// counterclockwise for outer contours, clockwise for holes. With this convention the filled region
/// always lies to the left of every directed edge.
#[derive(Clone, Debug, PartialEq)]
pub struct SPolygon {
    /// Set of points that form the polygon
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    /// Area of its interior (absolute value)
    pub area: f64,
}

impl SPolygon {
    /// Creates a counterclockwise contour, reversing the points if needed.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        SPolygon::with_orientation(points, true)
    }

    /// Creates a clockwise contour, to be used as a hole.
    pub fn new_hole(points: Vec<Point>) -> Result<Self, GeometryError> {
        SPolygon::with_orientation(points, false)
    }

    fn with_orientation(points: Vec<Point>, ccw: bool) -> Result<Self, GeometryError> {
        let mut points = points.into_iter().dedup().collect_vec();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }

        let area2 = SPolygon::signed_area2(&points);
        if area2 == 0 {
            return Err(GeometryError::ZeroArea);
        }
        if (area2 > 0) != ccw {
            points.reverse();
        }

        let bbox = Rect::from_points(&points).ok_or(GeometryError::TooFewVertices(0))?;
        Ok(SPolygon {
            vertices: points,
            bbox,
            area: area2.unsigned_abs() as f64 / 2.0,
        })
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    /// Twice the signed area of the closed contour through `points`, exact.
    pub fn signed_area2(points: &[Point]) -> i128 {
        (0..points.len())
            .map(|i| {
                let Point(x_i, y_i) = points[i];
                let Point(x_j, y_j) = points[(i + 1) % points.len()];
                x_i as i128 * y_j as i128 - x_j as i128 * y_i as i128
            })
            .sum()
    }

    pub fn signed_area(&self) -> f64 {
        SPolygon::signed_area2(&self.vertices) as f64 / 2.0
    }

    pub fn is_ccw(&self) -> bool {
        SPolygon::signed_area2(&self.vertices) > 0
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge::new(self.vertices[i], self.vertices[j])
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Bottom-most vertex, ties broken by the left-most one.
    /// Anchor of the contour when computing and applying no-fit polygons.
    pub fn reference_vertex(&self) -> Point {
        reference_vertex(&self.vertices)
    }

    /// Whether every turn of the contour bends towards its interior (collinear vertices allowed).
    pub fn is_convex(&self) -> bool {
        let n = self.n_vertices();
        let ccw = self.is_ccw();
        (0..n).all(|i| {
            let c = Point::cross(
                self.vertices[(i + n - 1) % n],
                self.vertices[i],
                self.vertices[(i + 1) % n],
            );
            if ccw { c >= 0 } else { c <= 0 }
        })
    }

    /// Position of `p` relative to the region enclosed by the contour, regardless of its orientation.
    pub fn position_of(&self, p: &Point) -> GeoPosition {
        self.position_of_scaled(p, 1)
    }

    /// Same as [`Self::position_of`], with `p` expressed on a grid `scale` times finer than the contour.
    /// Allows exact queries for midpoints of integer segments (`scale == 2`).
    pub fn position_of_scaled(&self, p: &Point, scale: Coord) -> GeoPosition {
        let (px, py) = (p.0 as i128, p.1 as i128);
        let s = scale as i128;
        let n = self.n_vertices();
        let mut inside = false;
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[(i + 1) % n]);
            let (ax, ay) = (a.0 as i128 * s, a.1 as i128 * s);
            let (bx, by) = (b.0 as i128 * s, b.1 as i128 * s);

            let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
            if cross == 0
                && ax.min(bx) <= px
                && px <= ax.max(bx)
                && ay.min(by) <= py
                && py <= ay.max(by)
            {
                return GeoPosition::Boundary;
            }
            //crossing number test with a ray towards +x
            if (ay > py) != (by > py) && (cross > 0) == (by > ay) {
                inside = !inside;
            }
        }
        match inside {
            true => GeoPosition::Interior,
            false => GeoPosition::Exterior,
        }
    }

    /// Verifies the contour is simple: no two edges share a point other than the common vertex of neighbours.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let n = self.n_vertices();
        if n < 3 {
            return Err(GeometryError::TooFewVertices(n));
        }
        if SPolygon::signed_area2(&self.vertices) == 0 {
            return Err(GeometryError::ZeroArea);
        }
        if self.vertices.iter().unique().count() != n {
            let (i, j) = (0..n)
                .tuple_combinations()
                .find(|&(i, j)| self.vertices[i] == self.vertices[j])
                .unwrap_or((0, 0));
            return Err(GeometryError::SelfIntersection {
                edge_a: i,
                edge_b: j,
            });
        }
        for i in 0..n {
            let e_i = self.edge(i);
            for j in (i + 1)..n {
                let e_j = self.edge(j);
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                let invalid = match adjacent {
                    //neighbours share a vertex, they may only overlap when folding back onto each other
                    true => e_i.collinear_with(&e_j) && !e_i.same_direction(&e_j),
                    false => e_i.collides_with(&e_j),
                };
                if invalid {
                    return Err(GeometryError::SelfIntersection {
                        edge_a: i,
                        edge_b: j,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Bottom-most point, ties broken by the left-most one.
pub fn reference_vertex(points: &[Point]) -> Point {
    points
        .iter()
        .copied()
        .min_by_key(|p| (p.1, p.0))
        .unwrap_or_default()
}

/// Removes vertices at which the contour does not turn (including zero-width spikes).
pub fn remove_collinear(points: &[Point]) -> Vec<Point> {
    let mut points = points.iter().copied().dedup().collect_vec();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let mut i = 0;
    let mut since_last_removal = 0;
    while points.len() >= 3 && since_last_removal < points.len() {
        let n = points.len();
        let (prev, cur, next) = (points[(i + n - 1) % n], points[i % n], points[(i + 1) % n]);
        if Point::cross(prev, cur, next) == 0 {
            points.remove(i % n);
            since_last_removal = 0;
        } else {
            i += 1;
            since_last_removal += 1;
        }
        i %= points.len().max(1);
    }
    points
}

impl Shape for SPolygon {
    fn centroid(&self) -> (f64, f64) {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let area = self.signed_area();
        let (mut c_x, mut c_y) = (0.0, 0.0);
        for i in 0..self.n_vertices() {
            let (x_i, y_i): (f64, f64) = self.vertex(i).into();
            let (x_j, y_j): (f64, f64) = self.vertex((i + 1) % self.n_vertices()).into();
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }
        (c_x / (6.0 * area), c_y / (6.0 * area))
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            vertices,
            bbox,
            area,
        } = self;

        vertices.iter_mut().for_each(|v| *v = t.apply(*v));
        if let Some(new_bbox) = Rect::from_points(vertices.iter()) {
            *bbox = new_bbox;
        }
        *area = SPolygon::signed_area2(vertices).unsigned_abs() as f64 / 2.0;

        self
    }
}

impl TransformableFrom for SPolygon {
    fn transform_from(&mut self, reference: &Self, t: &DTransformation) -> &mut Self {
        debug_assert!(self.n_vertices() == reference.n_vertices());
        self.vertices
            .iter_mut()
            .zip(reference.vertices.iter())
            .for_each(|(v, r)| *v = t.apply(*r));
        if let Some(new_bbox) = Rect::from_points(self.vertices.iter()) {
            self.bbox = new_bbox;
        }
        self.area = SPolygon::signed_area2(&self.vertices).unsigned_abs() as f64 / 2.0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: Coord) -> SPolygon {
        SPolygon::new(vec![Point(0, 0), Point(size, 0), Point(size, size), Point(0, size)]).unwrap()
    }

    #[test]
    fn orientation_is_normalized() {
        let cw = vec![Point(0, 0), Point(0, 10), Point(10, 10), Point(10, 0)];
        assert!(SPolygon::new(cw.clone()).unwrap().is_ccw());
        assert!(!SPolygon::new_hole(cw).unwrap().is_ccw());
    }

    #[test]
    fn closing_vertex_is_dropped() {
        let p = SPolygon::new(vec![
            Point(61, 97),
            Point(70, 151),
            Point(176, 151),
            Point(189, 138),
            Point(189, 59),
            Point(70, 59),
            Point(61, 77),
            Point(61, 97),
        ])
        .unwrap();
        assert_eq!(p.n_vertices(), 7);
        assert!(p.signed_area() > 0.0);
    }

    #[test]
    fn degenerate_contours_are_rejected() {
        assert_eq!(
            SPolygon::new(vec![Point(0, 0), Point(1, 1)]),
            Err(GeometryError::TooFewVertices(2))
        );
        assert_eq!(
            SPolygon::new(vec![Point(0, 0), Point(1, 1), Point(2, 2)]),
            Err(GeometryError::ZeroArea)
        );
    }

    #[test]
    fn point_positions() {
        let rect = square(10);
        assert_eq!(rect.position_of(&Point(1, 1)), GeoPosition::Interior);
        assert_eq!(rect.position_of(&Point(3, 3)), GeoPosition::Interior);
        assert_eq!(rect.position_of(&Point(11, 11)), GeoPosition::Exterior);
        assert_eq!(rect.position_of(&Point(11, 12)), GeoPosition::Exterior);
        assert_eq!(rect.position_of(&Point(10, 4)), GeoPosition::Boundary);
        assert_eq!(rect.position_of(&Point(0, 0)), GeoPosition::Boundary);
        //(5, 0.5) on a doubled grid
        assert_eq!(rect.position_of_scaled(&Point(10, 1), 2), GeoPosition::Interior);
    }

    #[test]
    fn bowtie_is_not_simple() {
        let bowtie = SPolygon::new(vec![Point(0, 0), Point(10, 10), Point(10, 0), Point(0, 10)]);
        //the two triangles cancel out exactly
        assert_eq!(bowtie, Err(GeometryError::ZeroArea));

        let uneven = SPolygon::new(vec![Point(0, 0), Point(10, 10), Point(10, 0), Point(0, 20)]).unwrap();
        assert!(matches!(
            uneven.validate(),
            Err(GeometryError::SelfIntersection { .. })
        ));
        assert!(square(4).validate().is_ok());
    }

    #[test]
    fn collinear_vertices_are_removed() {
        let pts = vec![Point(0, 0), Point(5, 0), Point(10, 0), Point(10, 10), Point(0, 10), Point(0, 5)];
        assert_eq!(
            remove_collinear(&pts),
            vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)]
        );
    }
}
