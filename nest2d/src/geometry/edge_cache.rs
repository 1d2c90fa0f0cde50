use crate::geometry::primitives::{Coord, Point, SPolygon};

/// Arc-length parametrisation of a closed contour.
///
/// A parameter `t` in `[0, 1]` addresses the point at distance `t * circumference` from the first vertex,
/// walking along the contour in its stored orientation. Both `0` and `1` map to the first vertex.
#[derive(Clone, Debug)]
pub struct EdgeCache {
    vertices: Vec<Point>,
    /// Cumulative length of the contour at the end of each edge
    distances: Vec<f64>,
}

impl EdgeCache {
    pub fn new(contour: &SPolygon) -> Self {
        let vertices = contour.vertices.clone();
        let distances = contour
            .edge_iter()
            .scan(0.0, |acc, e| {
                *acc += e.length();
                Some(*acc)
            })
            .collect();
        EdgeCache {
            vertices,
            distances,
        }
    }

    pub fn circumference(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    pub fn corners(&self) -> &[Point] {
        &self.vertices
    }

    /// Exact location of the point at parameter `t`.
    pub fn coords(&self, t: f64) -> (f64, f64) {
        let n = self.vertices.len();
        let t = t.rem_euclid(1.0);
        let circumference = self.circumference();
        if n == 0 || t == 0.0 || circumference == 0.0 {
            return self.vertices.first().map(|&v| v.into()).unwrap_or((0.0, 0.0));
        }
        let d = t * circumference;
        let i = self.distances.partition_point(|&c| c <= d).min(n - 1);
        let start = if i == 0 { 0.0 } else { self.distances[i - 1] };
        let len = self.distances[i] - start;
        let frac = if len > 0.0 { (d - start) / len } else { 0.0 };

        let (x0, y0): (f64, f64) = self.vertices[i].into();
        let (x1, y1): (f64, f64) = self.vertices[(i + 1) % n].into();
        (x0 + frac * (x1 - x0), y0 + frac * (y1 - y0))
    }

    /// Point at parameter `t`, snapped to the nearest grid point.
    pub fn coords_on_grid(&self, t: f64) -> Point {
        let (x, y) = self.coords(t);
        Point(x.round() as Coord, y.round() as Coord)
    }

    /// `n` grid points spread evenly over the contour, the first one being the first vertex.
    pub fn samples(&self, n: usize) -> impl Iterator<Item = Point> + '_ {
        (0..n).map(move |k| self.coords_on_grid(k as f64 / n as f64))
    }
}
