use std::cmp::Ordering;

use itertools::Itertools;

use crate::error::GeometryError;
use crate::geometry::primitives::{Point, SPolygon, remove_collinear};

/// Minkowski sum of two convex counterclockwise contours, computed by merging their edge sequences by
/// polar angle. Runs in `O(n + m)` and is exact on the integer grid.
pub fn minkowski_sum_convex(a: &[Point], b: &[Point]) -> Result<Vec<Point>, GeometryError> {
    let a = start_at_bottom(remove_collinear(a));
    let b = start_at_bottom(remove_collinear(b));
    if a.len() < 3 || b.len() < 3 {
        return Err(GeometryError::Degenerate(
            "convex minkowski sum requires two proper polygons".into(),
        ));
    }

    let edges_a = edge_vectors(&a);
    let edges_b = edge_vectors(&b);
    let (n, m) = (edges_a.len(), edges_b.len());

    let mut current = a[0] + b[0];
    let mut sum = Vec::with_capacity(n + m);
    sum.push(current);

    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        let order = match (i < n, j < m) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => polar_cmp(edges_a[i], edges_b[j]),
        };
        match order {
            Ordering::Less => {
                current = current + edges_a[i];
                i += 1;
            }
            Ordering::Greater => {
                current = current + edges_b[j];
                j += 1;
            }
            Ordering::Equal => {
                current = current + edges_a[i] + edges_b[j];
                i += 1;
                j += 1;
            }
        }
        sum.push(current);
    }
    //the walk ends where it started
    debug_assert_eq!(sum.first(), sum.last());
    sum.pop();

    Ok(remove_collinear(&sum))
}

/// Rotates the contour so it starts at its bottom-most (then left-most) vertex.
fn start_at_bottom(mut points: Vec<Point>) -> Vec<Point> {
    if let Some((idx, _)) = points.iter().enumerate().min_by_key(|(_, p)| (p.1, p.0)) {
        points.rotate_left(idx);
    }
    points
}

fn edge_vectors(points: &[Point]) -> Vec<Point> {
    points
        .iter()
        .circular_tuple_windows()
        .map(|(&p, &q)| q - p)
        .collect()
}

/// Orders direction vectors by their angle with the positive x-axis in `[0, 2π)`, exactly.
fn polar_cmp(a: Point, b: Point) -> Ordering {
    let half = |d: Point| -> u8 {
        match d.1 > 0 || (d.1 == 0 && d.0 > 0) {
            true => 0,
            false => 1,
        }
    };
    half(a).cmp(&half(b)).then_with(|| {
        let cross = a.0 as i128 * b.1 as i128 - a.1 as i128 * b.0 as i128;
        0.cmp(&cross)
    })
}

/// No-fit polygon of two convex contours, in the frame of the orbiting contour's reference vertex.
pub fn nfp_convex(stationary: &SPolygon, orbiting: &SPolygon) -> Result<Vec<Point>, GeometryError> {
    let reference = orbiting.reference_vertex();
    let reflected = orbiting.vertices.iter().map(|&p| -p).collect_vec();
    let sum = minkowski_sum_convex(&stationary.vertices, &reflected)?;
    Ok(sum.into_iter().map(|p| p + reference).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_of_squares() {
        let a = vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)];
        let b = vec![Point(0, 0), Point(5, 0), Point(5, 5), Point(0, 5)];
        assert_eq!(
            minkowski_sum_convex(&a, &b).unwrap(),
            vec![Point(0, 0), Point(15, 0), Point(15, 15), Point(0, 15)]
        );
    }

    #[test]
    fn polar_order() {
        assert_eq!(polar_cmp(Point(1, 0), Point(0, 1)), Ordering::Less);
        assert_eq!(polar_cmp(Point(-1, -1), Point(0, 1)), Ordering::Greater);
        assert_eq!(polar_cmp(Point(2, 2), Point(1, 1)), Ordering::Equal);
        assert_eq!(polar_cmp(Point(1, -1), Point(-1, -1)), Ordering::Greater);
    }
}
