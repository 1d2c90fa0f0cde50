use std::ops::{Add, Neg, Sub};

use crate::geometry::d_transformation::DTransformation;
use crate::geometry::geo_traits::{DistanceTo, Transformable, TransformableFrom};
use crate::geometry::primitives::Edge;

/// Integer coordinate type. Input in physical units is scaled into this space once, at import.
pub type Coord = i64;

/// Geometric primitive representing a point on the integer grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point(pub Coord, pub Coord);

impl Point {
    pub fn x(&self) -> Coord {
        self.0
    }

    pub fn y(&self) -> Coord {
        self.1
    }

    pub fn translated(self, dx: Coord, dy: Coord) -> Point {
        Point(self.0 + dx, self.1 + dy)
    }

    pub fn scaled(self, s: Coord) -> Point {
        Point(self.0 * s, self.1 * s)
    }

    /// Twice the signed area of the triangle (o, a, b): positive when the turn o→a→b is counterclockwise.
    pub fn cross(o: Point, a: Point, b: Point) -> i128 {
        let (ax, ay) = ((a.0 - o.0) as i128, (a.1 - o.1) as i128);
        let (bx, by) = ((b.0 - o.0) as i128, (b.1 - o.1) as i128);
        ax * by - ay * bx
    }

    pub fn dot(o: Point, a: Point, b: Point) -> i128 {
        let (ax, ay) = ((a.0 - o.0) as i128, (a.1 - o.1) as i128);
        let (bx, by) = ((b.0 - o.0) as i128, (b.1 - o.1) as i128);
        ax * bx + ay * by
    }

    pub fn sq_distance_to(&self, other: &Point) -> i128 {
        let dx = (self.0 - other.0) as i128;
        let dy = (self.1 - other.1) as i128;
        dx * dx + dy * dy
    }

    /// Horizontal distance between the point and the segment, measured along the line `y = self.y`.
    ///
    /// Positive when the segment lies to the left of the point. Rounded down when the exact distance is
    /// not on the grid.
    /// Returns `None` when the point's y-coordinate is outside the vertical span of the segment.
    pub fn horizontal_distance(&self, edge: &Edge) -> Option<Coord> {
        let Point(x, y) = *self;
        let (Point(x1, y1), Point(x2, y2)) = (edge.start, edge.end);

        if y < y1.min(y2) || y > y1.max(y2) {
            return None;
        }

        let d = match y1 == y2 {
            true => {
                // the segment is horizontal and lies on the same line as the point
                if x > x1 && x > x2 {
                    (x - x1).min(x - x2)
                } else if x < x1 && x < x2 {
                    -((x1 - x).min(x2 - x))
                } else {
                    0
                }
            }
            false => {
                let num = (x1 - x2) as i128 * (y1 - y) as i128;
                let den = (y1 - y2) as i128;
                x - x1 + floor_div(num, den) as Coord
            }
        };
        Some(d)
    }

    /// Vertical distance between the point and the segment, measured along the line `x = self.x`.
    ///
    /// Positive when the segment lies below the point.
    /// Returns `None` when the point's x-coordinate is outside the horizontal span of the segment.
    pub fn vertical_distance(&self, edge: &Edge) -> Option<Coord> {
        let mirrored = Edge {
            start: Point(edge.start.1, edge.start.0),
            end: Point(edge.end.1, edge.end.0),
        };
        Point(self.1, self.0).horizontal_distance(&mirrored)
    }
}

/// Integer division rounding towards negative infinity
fn floor_div(num: i128, den: i128) -> i128 {
    let q = num / den;
    match num % den != 0 && (num < 0) != (den < 0) {
        true => q - 1,
        false => q,
    }
}

impl DistanceTo<Point> for Point {
    fn distance(&self, other: &Point) -> f64 {
        self.sq_distance(other).sqrt()
    }

    fn sq_distance(&self, other: &Point) -> f64 {
        self.sq_distance_to(other) as f64
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point(-self.0, -self.1)
    }
}

impl From<(Coord, Coord)> for Point {
    fn from(p: (Coord, Coord)) -> Self {
        Point(p.0, p.1)
    }
}

impl From<Point> for (Coord, Coord) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0 as f64, p.1 as f64)
    }
}

impl Transformable for Point {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        *self = t.apply(*self);
        self
    }
}

impl TransformableFrom for Point {
    fn transform_from(&mut self, reference: &Self, t: &DTransformation) -> &mut Self {
        *self = t.apply(*reference);
        self
    }
}
