use anyhow::{Result, ensure};

use crate::geometry::primitives::{Coord, Point, SPolygon};

/// Axis-aligned rectangle on the integer grid. Degenerate (zero width or height) rectangles are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Copy, Hash)]
pub struct Rect {
    pub x_min: Coord,
    pub y_min: Coord,
    pub x_max: Coord,
    pub y_max: Coord,
}

impl Rect {
    pub fn try_new(x_min: Coord, y_min: Coord, x_max: Coord, y_max: Coord) -> Result<Self> {
        ensure!(
            x_min <= x_max && y_min <= y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Smallest rectangle containing all points. Returns `None` for an empty iterator.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Rect {
                    x_min: p.0,
                    y_min: p.1,
                    x_max: p.0,
                    y_max: p.1,
                },
                Some(r) => Rect {
                    x_min: r.x_min.min(p.0),
                    y_min: r.y_min.min(p.1),
                    x_max: r.x_max.max(p.0),
                    y_max: r.y_max.max(p.1),
                },
            })
        })
    }

    /// Returns the smallest rectangle containing both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: a.x_min.min(b.x_min),
            y_min: a.y_min.min(b.y_min),
            x_max: a.x_max.max(b.x_max),
            y_max: a.y_max.max(b.y_max),
        }
    }

    pub fn width(&self) -> Coord {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> Coord {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() as f64 * self.height() as f64
    }

    /// Exact center, possibly in between grid points.
    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) as f64 / 2.0,
            (self.y_min + self.y_max) as f64 / 2.0,
        )
    }

    /// Center snapped to the grid (rounded down).
    pub fn center_point(&self) -> Point {
        Point(
            (self.x_min + self.x_max).div_euclid(2),
            (self.y_min + self.y_max).div_euclid(2),
        )
    }

    /// Corners in counterclockwise order, starting at the bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    pub fn translated(&self, dx: Coord, dy: Coord) -> Rect {
        Rect {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    /// Whether `other` lies within `self`, boundaries included.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && other.x_max <= self.x_max
            && other.y_max <= self.y_max
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        self.x_min <= p.0 && p.0 <= self.x_max && self.y_min <= p.1 && p.1 <= self.y_max
    }

    /// Whether the closed rectangles share at least one point.
    pub fn overlaps_closed(&self, other: &Rect) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }

    /// Whether the interiors of both rectangles overlap.
    pub fn overlaps_open(&self, other: &Rect) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }

    /// Counterclockwise polygon of the rectangle, fails for degenerate rectangles.
    pub fn to_polygon(&self) -> Result<SPolygon> {
        Ok(SPolygon::new(self.corners().to_vec())?)
    }
}
