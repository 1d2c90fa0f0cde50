use crate::error::GeometryError;
use crate::geometry::primitives::{Point, remove_collinear};

/// Splits a simple counterclockwise contour into convex counterclockwise pieces.
///
/// The contour is triangulated by ear clipping, after which neighbouring pieces are greedily merged
/// as long as the merged piece stays convex (Hertel–Mehlhorn).
pub fn convex_decomposition(contour: &[Point]) -> Result<Vec<Vec<Point>>, GeometryError> {
    let contour = remove_collinear(contour);
    if contour.len() < 3 {
        return Err(GeometryError::TooFewVertices(contour.len()));
    }
    if is_convex_ccw(&contour) {
        return Ok(vec![contour]);
    }

    let mut pieces = triangulate(&contour)?;

    'merging: loop {
        for i in 0..pieces.len() {
            for j in (i + 1)..pieces.len() {
                if let Some(merged) = merge_convex(&pieces[i], &pieces[j]) {
                    pieces[i] = merged;
                    pieces.remove(j);
                    continue 'merging;
                }
            }
        }
        break;
    }
    Ok(pieces)
}

/// Ear clipping triangulation of a simple counterclockwise contour.
pub fn triangulate(contour: &[Point]) -> Result<Vec<Vec<Point>>, GeometryError> {
    let mut remaining = remove_collinear(contour);
    let mut triangles = Vec::with_capacity(remaining.len().saturating_sub(2));
    let max_iterations = 10 * remaining.len() + 10;

    for _ in 0..max_iterations {
        let n = remaining.len();
        if n <= 3 {
            break;
        }
        let ear = (0..n).find_map(|i| {
            let (a, b, c) = (remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]);
            match Point::cross(a, b, c) {
                0 => Some((i, None)),
                cross if cross < 0 => None,
                _ => {
                    let blocked = remaining
                        .iter()
                        .filter(|&&v| v != a && v != b && v != c)
                        .any(|&v| in_closed_triangle(v, a, b, c));
                    (!blocked).then_some((i, Some(vec![a, b, c])))
                }
            }
        });
        match ear {
            Some((i, triangle)) => {
                remaining.remove(i);
                triangles.extend(triangle);
            }
            None => {
                return Err(GeometryError::Degenerate(
                    "contour cannot be triangulated, no ear found".into(),
                ));
            }
        }
    }

    match remaining.len() {
        3 if Point::cross(remaining[0], remaining[1], remaining[2]) > 0 => {
            triangles.push(remaining)
        }
        3 | 0..=2 => {}
        _ => {
            return Err(GeometryError::Degenerate(
                "ear clipping did not converge".into(),
            ));
        }
    }
    Ok(triangles)
}

fn in_closed_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    Point::cross(a, b, p) >= 0 && Point::cross(b, c, p) >= 0 && Point::cross(c, a, p) >= 0
}

pub fn is_convex_ccw(points: &[Point]) -> bool {
    let n = points.len();
    (0..n).all(|i| Point::cross(points[(i + n - 1) % n], points[i], points[(i + 1) % n]) >= 0)
}

/// Merges two convex pieces sharing an edge (`a→b` in `p`, `b→a` in `q`), if the result is convex.
fn merge_convex(p: &[Point], q: &[Point]) -> Option<Vec<Point>> {
    let (n, m) = (p.len(), q.len());
    for i in 0..n {
        let (a, b) = (p[i], p[(i + 1) % n]);
        let Some(j) = (0..m).find(|&j| q[j] == b && q[(j + 1) % m] == a) else {
            continue;
        };
        //walk p from b around to a, then q from after a up to before b
        let mut merged = (0..n).map(|k| p[(i + 1 + k) % n]).collect::<Vec<_>>();
        merged.extend((1..m - 1).map(|k| q[(j + 1 + k) % m]));
        return match is_convex_ccw(&merged) {
            true => Some(remove_collinear(&merged)),
            false => None,
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::SPolygon;

    #[test]
    fn l_shape_decomposes_into_two_pieces() {
        let l = vec![
            Point(0, 0),
            Point(60, 0),
            Point(60, 20),
            Point(20, 20),
            Point(20, 60),
            Point(0, 60),
        ];
        let pieces = convex_decomposition(&l).unwrap();
        assert_eq!(pieces.len(), 2);
        let area: i128 = pieces.iter().map(|p| SPolygon::signed_area2(p)).sum();
        assert_eq!(area, SPolygon::signed_area2(&l));
        assert!(pieces.iter().all(|p| is_convex_ccw(p)));
    }

    #[test]
    fn convex_input_is_returned_as_is() {
        let sq = vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)];
        assert_eq!(convex_decomposition(&sq).unwrap(), vec![sq]);
    }
}
