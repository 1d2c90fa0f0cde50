use std::fmt::Display;

use ordered_float::NotNan;

use crate::geometry::primitives::{Coord, Point};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
/// [Proper rigid transformation](https://en.wikipedia.org/wiki/Rigid_transformation),
/// decomposed into a rotation around the origin followed by an integer translation.
///
/// Rotated coordinates are rounded to the nearest grid point. A rotation of zero is exact.
pub struct DTransformation {
    /// The rotation in radians
    pub rotation: NotNan<f64>,
    /// The translation in the x and y-axis
    pub translation: (Coord, Coord),
}

impl DTransformation {
    pub fn new(rotation: NotNan<f64>, translation: (Coord, Coord)) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub const fn empty() -> Self {
        const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
        Self {
            rotation: _0,
            translation: (0, 0),
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.into_inner()
    }

    pub fn translation(&self) -> (Coord, Coord) {
        self.translation
    }

    /// Rotates `p` around the origin, snaps it to the grid and translates it.
    pub fn apply(&self, p: Point) -> Point {
        let Point(x, y) = rotate_point(p, self.rotation());
        Point(x + self.translation.0, y + self.translation.1)
    }

    /// The same transformation followed by an additional translation.
    pub fn translated(&self, dx: Coord, dy: Coord) -> Self {
        Self {
            rotation: self.rotation,
            translation: (self.translation.0 + dx, self.translation.1 + dy),
        }
    }
}

/// Rotates a point around the origin and rounds the result to the grid.
pub fn rotate_point(p: Point, angle: f64) -> Point {
    if angle == 0.0 {
        return p;
    }
    let (sin, cos) = angle.sin_cos();
    let (x, y) = (p.0 as f64, p.1 as f64);
    Point(
        (x * cos - y * sin).round() as Coord,
        (x * sin + y * cos).round() as Coord,
    )
}

impl Default for DTransformation {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for DTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r: {:.3}°, t: ({}, {})",
            self.rotation.to_degrees(),
            self.translation.0,
            self.translation.1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn quarter_turns_are_exact() {
        let r90 = DTransformation::new(NotNan::new(FRAC_PI_2).unwrap(), (0, 0));
        let r180 = DTransformation::new(NotNan::new(PI).unwrap(), (5, -5));
        assert_eq!(r90.apply(Point(10, 3)), Point(-3, 10));
        assert_eq!(r180.apply(Point(10, 3)), Point(-5, -8));
        assert_eq!(DTransformation::empty().apply(Point(7, 9)), Point(7, 9));
    }
}
