use crate::geometry::d_transformation::DTransformation;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Transformable};
use crate::geometry::primitives::{Point, Rect};

/// Geometric primitive representing a line segment between two integer points
#[derive(Clone, Debug, PartialEq, Eq, Copy, Hash)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Self {
        debug_assert!(start != end, "degenerate edge at {start:?}");
        Edge { start, end }
    }

    pub fn reverse(mut self) -> Self {
        std::mem::swap(&mut self.start, &mut self.end);
        self
    }

    pub fn x_min(&self) -> i64 {
        self.start.0.min(self.end.0)
    }

    pub fn y_min(&self) -> i64 {
        self.start.1.min(self.end.1)
    }

    pub fn x_max(&self) -> i64 {
        self.start.0.max(self.end.0)
    }

    pub fn y_max(&self) -> i64 {
        self.start.1.max(self.end.1)
    }

    pub fn bbox(&self) -> Rect {
        Rect {
            x_min: self.x_min(),
            y_min: self.y_min(),
            x_max: self.x_max(),
            y_max: self.y_max(),
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Angle of the direction vector with the positive x-axis, in radians within `[0, 2π)`.
    pub fn angle_to_x_axis(&self) -> f64 {
        let dx = (self.end.0 - self.start.0) as f64;
        let dy = (self.end.1 - self.start.1) as f64;
        let angle = dy.atan2(dx);
        if angle < 0.0 {
            angle + 2.0 * std::f64::consts::PI
        } else {
            angle
        }
    }

    /// Whether the point lies on the closed segment.
    pub fn contains(&self, p: &Point) -> bool {
        Point::cross(self.start, self.end, *p) == 0
            && self.x_min() <= p.0
            && p.0 <= self.x_max()
            && self.y_min() <= p.1
            && p.1 <= self.y_max()
    }

    /// Whether the point lies on the segment, excluding both endpoints.
    pub fn contains_strictly(&self, p: &Point) -> bool {
        *p != self.start && *p != self.end && self.contains(p)
    }

    /// Whether both segments cross at a single point interior to both of them.
    pub fn crosses(&self, other: &Edge) -> bool {
        let d1 = Point::cross(self.start, self.end, other.start).signum();
        let d2 = Point::cross(self.start, self.end, other.end).signum();
        let d3 = Point::cross(other.start, other.end, self.start).signum();
        let d4 = Point::cross(other.start, other.end, self.end).signum();
        d1 * d2 < 0 && d3 * d4 < 0
    }

    /// Whether `other` points in the same direction as `self`. Only meaningful for parallel edges.
    pub fn same_direction(&self, other: &Edge) -> bool {
        let (ax, ay) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
        let (bx, by) = (other.end.0 - other.start.0, other.end.1 - other.start.1);
        (ax as i128) * (bx as i128) + (ay as i128) * (by as i128) > 0
    }

    /// Whether both edges lie on the same line.
    pub fn collinear_with(&self, other: &Edge) -> bool {
        Point::cross(self.start, self.end, other.start) == 0
            && Point::cross(self.start, self.end, other.end) == 0
    }
}

impl CollidesWith<Edge> for Edge {
    /// Closed segment intersection: touching endpoints count as a collision.
    fn collides_with(&self, other: &Edge) -> bool {
        if !self.bbox().overlaps_closed(&other.bbox()) {
            return false;
        }
        self.crosses(other)
            || self.contains(&other.start)
            || self.contains(&other.end)
            || other.contains(&self.start)
            || other.contains(&self.end)
    }
}

impl DistanceTo<Point> for Edge {
    fn distance(&self, point: &Point) -> f64 {
        self.sq_distance(point).sqrt()
    }

    fn sq_distance(&self, point: &Point) -> f64 {
        let (x1, y1): (f64, f64) = self.start.into();
        let (x2, y2): (f64, f64) = self.end.into();
        let (px, py): (f64, f64) = (*point).into();

        let (dx, dy) = (x2 - x1, y2 - y1);
        let sq_len = dx * dx + dy * dy;
        let t = match sq_len == 0.0 {
            true => 0.0,
            false => (((px - x1) * dx + (py - y1) * dy) / sq_len).clamp(0.0, 1.0),
        };
        let (cx, cy) = (x1 + t * dx, y1 + t * dy);
        (px - cx).powi(2) + (py - cy).powi(2)
    }
}

impl DistanceTo<Edge> for Point {
    fn distance(&self, edge: &Edge) -> f64 {
        edge.distance(self)
    }

    fn sq_distance(&self, edge: &Edge) -> f64 {
        edge.sq_distance(self)
    }
}

impl Transformable for Edge {
    fn transform(&mut self, t: &DTransformation) -> &mut Self {
        self.start = t.apply(self.start);
        self.end = t.apply(self.end);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case((12, -10), 270.0, 360.0; "fourth quadrant")]
    #[test_case((12, 10), 0.0, 90.0; "first quadrant")]
    #[test_case((-12, 10), 90.0, 180.0; "second quadrant")]
    #[test_case((-12, -10), 180.0, 270.0; "third quadrant")]
    fn angle_to_x_axis_lies_in_quadrant(end: (i64, i64), lo: f64, hi: f64) {
        let deg = Edge::new(Point(0, 0), end.into()).angle_to_x_axis().to_degrees();
        assert!(deg > lo && deg < hi, "{deg}");
    }

    #[test_case((1, 0), 0.0)]
    #[test_case((0, 1), 90.0)]
    #[test_case((-1, 0), 180.0)]
    #[test_case((0, -1), 270.0)]
    fn angle_to_x_axis_on_axes(end: (i64, i64), expected: f64) {
        let deg = Edge::new(Point(0, 0), end.into()).angle_to_x_axis().to_degrees();
        assert!((deg - expected).abs() < 1e-9, "{deg}");
    }

    #[test]
    fn crossing_and_touching_segments() {
        let a = Edge::new(Point(0, 0), Point(10, 10));
        let b = Edge::new(Point(0, 10), Point(10, 0));
        let c = Edge::new(Point(10, 10), Point(20, 0));
        let d = Edge::new(Point(11, 11), Point(20, 20));

        assert!(a.crosses(&b));
        assert!(a.collides_with(&b));
        assert!(!a.crosses(&c));
        assert!(a.collides_with(&c));
        assert!(!a.collides_with(&d));
    }
}
