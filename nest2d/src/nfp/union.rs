use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use itertools::Itertools;
use log::trace;

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Coord, Point, Polygon, Rect, SPolygon, remove_collinear};

/// Union of a set of polygons.
#[derive(Clone, Debug, Default)]
pub struct UnionResult {
    /// Disjoint polygons covering the union, each with its own holes
    pub polygons: Vec<Polygon>,
    /// Vertices that were snapped to the grid from a non-integer crossing.
    /// The true boundary passes within one grid unit of each of them.
    pub inexact: Vec<Point>,
}

type FPoint = (f64, f64);
type NodeKey = (i64, i64);

/// Directed boundary segment of one of the input polygons, the polygon interior lies to its left.
#[derive(Clone, Copy, Debug)]
struct Segment {
    a: Point,
    b: Point,
    owner: usize,
}

/// Computes the union of polygons by tracing the boundary of the covered region.
///
/// Every input edge is split at all crossings with other edges. A piece is kept when it separates the union from
/// its complement: its midpoint is neither inside nor on the boundary of another polygon, except along an edge
/// running in the same direction, in which case only one copy survives. The kept pieces are linked into closed
/// loops, taking the left-most turn at every node. Counterclockwise loops become outer contours, clockwise loops
/// become holes of the smallest outer contour enclosing them.
pub fn union(polygons: &[Polygon]) -> UnionResult {
    let segments = polygons
        .iter()
        .enumerate()
        .flat_map(|(owner, poly)| poly.edge_iter().map(move |e| Segment { a: e.start, b: e.end, owner }))
        .collect_vec();
    if segments.is_empty() {
        return UnionResult::default();
    }

    let extent = polygons
        .iter()
        .flat_map(|p| p.outer.vertices.iter())
        .map(|v| v.0.abs().max(v.1.abs()))
        .max()
        .unwrap_or(1);
    let tol = 1e-9 * (extent as f64).max(1.0);

    let pieces = split_segments(&segments);
    let bboxes = polygons.iter().map(|p| p.bbox()).collect_vec();

    let mut seen = HashSet::new();
    let boundary = pieces
        .into_iter()
        .filter(|&(p, q, owner)| separates(p, q, owner, polygons, &bboxes, tol))
        .filter(|&(p, q, _)| seen.insert((node_key(p), node_key(q))))
        .map(|(p, q, _)| (p, q))
        .collect_vec();

    let loops = trace_loops(&boundary)
        .into_iter()
        .flat_map(split_at_repeated_nodes)
        .collect_vec();
    trace!(
        "[NFP] union of {} polygons: {} segments, {} boundary pieces, {} loops",
        polygons.len(),
        segments.len(),
        boundary.len(),
        loops.len()
    );

    let mut inexact = vec![];
    let snapped = loops
        .into_iter()
        .filter_map(|l| {
            let pts = l
                .into_iter()
                .map(|p| {
                    let g = Point(p.0.round() as Coord, p.1.round() as Coord);
                    if (g.0 as f64 - p.0).abs() > 1e-6 || (g.1 as f64 - p.1).abs() > 1e-6 {
                        inexact.push(g);
                    }
                    g
                })
                .collect_vec();
            let pts = remove_collinear(&pts);
            (pts.len() >= 3 && SPolygon::signed_area2(&pts) != 0).then_some(pts)
        })
        .collect_vec();

    let (outers, holes): (Vec<_>, Vec<_>) = snapped
        .into_iter()
        .partition(|l| SPolygon::signed_area2(l) > 0);

    let mut result = outers
        .into_iter()
        .filter_map(|o| SPolygon::new(o).ok())
        .map(Polygon::from)
        .collect_vec();

    for hole in holes {
        let Ok(hole) = SPolygon::new_hole(hole) else {
            continue;
        };
        //a point just to the right of the first edge of the (clockwise) hole lies inside the hole region
        let (a, b): (FPoint, FPoint) = (hole.vertex(0).into(), hole.vertex(1).into());
        let len = (b.0 - a.0).hypot(b.1 - a.1);
        let probe = (
            (a.0 + b.0) / 2.0 + (b.1 - a.1) / len * 1e-3,
            (a.1 + b.1) / 2.0 - (b.0 - a.0) / len * 1e-3,
        );
        let enclosing = result
            .iter()
            .enumerate()
            .filter(|(_, o)| f_position(&o.outer.vertices, probe, 0.0) == FPosition::Interior)
            .min_by(|(_, a), (_, b)| a.outer.area.total_cmp(&b.outer.area))
            .map(|(i, _)| i);
        match enclosing {
            Some(i) => result[i].holes.push(hole),
            None => trace!("[NFP] dropping hole without enclosing contour"),
        }
    }

    UnionResult {
        polygons: result,
        inexact,
    }
}

/// Splits every segment at its crossings with, and at endpoints lying on, other segments.
fn split_segments(segments: &[Segment]) -> Vec<(FPoint, FPoint, usize)> {
    let mut splits: Vec<Vec<(f64, FPoint)>> = segments
        .iter()
        .map(|s| vec![(0.0, s.a.into()), (1.0, s.b.into())])
        .collect();

    let order = (0..segments.len())
        .sorted_by_key(|&i| segments[i].a.0.min(segments[i].b.0))
        .collect_vec();

    for (oi, &i) in order.iter().enumerate() {
        let s = segments[i];
        let x_max = s.a.0.max(s.b.0);
        for &j in &order[oi + 1..] {
            let o = segments[j];
            if o.a.0.min(o.b.0) > x_max {
                break;
            }
            if s.a.1.min(s.b.1) > o.a.1.max(o.b.1) || o.a.1.min(o.b.1) > s.a.1.max(s.b.1) {
                continue;
            }

            let r = s.b - s.a;
            let d = o.b - o.a;
            let qp = o.a - s.a;
            let den = r.0 as i128 * d.1 as i128 - r.1 as i128 * d.0 as i128;
            if den != 0 {
                let t_num = qp.0 as i128 * d.1 as i128 - qp.1 as i128 * d.0 as i128;
                let u_num = qp.0 as i128 * r.1 as i128 - qp.1 as i128 * r.0 as i128;
                let strictly_within = |num: i128| match den > 0 {
                    true => 0 < num && num < den,
                    false => den < num && num < 0,
                };
                if strictly_within(t_num) && strictly_within(u_num) {
                    let t = t_num as f64 / den as f64;
                    let u = u_num as f64 / den as f64;
                    let p = (s.a.0 as f64 + t * r.0 as f64, s.a.1 as f64 + t * r.1 as f64);
                    splits[i].push((t, p));
                    splits[j].push((u, p));
                }
            }

            for (target, host, p) in [(i, s, o.a), (i, s, o.b), (j, o, s.a), (j, o, s.b)] {
                if let Some(t) = param_strictly_on(host, p) {
                    splits[target].push((t, p.into()));
                }
            }
        }
    }

    segments
        .iter()
        .zip(splits)
        .flat_map(|(s, mut sp)| {
            sp.sort_by(|x, y| x.0.total_cmp(&y.0));
            sp.into_iter()
                .tuple_windows()
                .filter(|(x, y)| node_key(x.1) != node_key(y.1))
                .map(|(x, y)| (x.1, y.1, s.owner))
                .collect_vec()
        })
        .collect()
}

/// Parameter of `p` along `host` if it lies on the segment, excluding the endpoints.
fn param_strictly_on(host: Segment, p: Point) -> Option<f64> {
    if p == host.a || p == host.b || Point::cross(host.a, host.b, p) != 0 {
        return None;
    }
    let d = host.b - host.a;
    let dot = Point::dot(host.a, host.b, p);
    let sq_len = d.0 as i128 * d.0 as i128 + d.1 as i128 * d.1 as i128;
    (0 < dot && dot < sq_len).then(|| dot as f64 / sq_len as f64)
}

/// Whether the piece `p→q` of polygon `owner` lies on the boundary of the union.
fn separates(
    p: FPoint,
    q: FPoint,
    owner: usize,
    polygons: &[Polygon],
    bboxes: &[Rect],
    tol: f64,
) -> bool {
    let m = ((p.0 + q.0) / 2.0, (p.1 + q.1) / 2.0);
    let dir = (q.0 - p.0, q.1 - p.1);
    for (j, poly) in polygons.iter().enumerate() {
        let bb = bboxes[j];
        if j == owner
            || m.0 < bb.x_min as f64 - tol
            || m.0 > bb.x_max as f64 + tol
            || m.1 < bb.y_min as f64 - tol
            || m.1 > bb.y_max as f64 + tol
        {
            continue;
        }
        match f_position_polygon(poly, m, tol) {
            (FPosition::Interior, _) => return false,
            (FPosition::Boundary, Some((ea, eb))) => {
                let e = (eb.0 - ea.0, eb.1 - ea.1);
                let cross = dir.0 * e.1 - dir.1 * e.0;
                let scale = dir.0.hypot(dir.1) * e.0.hypot(e.1);
                if cross.abs() > 1e-9 * scale {
                    //crossing at the midpoint cannot happen after splitting, treat as exterior
                    continue;
                }
                let same_direction = dir.0 * e.0 + dir.1 * e.1 > 0.0;
                //opposite edges: both sides are covered. same direction: keep the copy of the lowest owner
                if !same_direction || j < owner {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FPosition {
    Interior,
    Boundary,
    Exterior,
}

/// Floating point point-in-contour test with a tolerance band around the boundary.
/// Also returns the edge the point lies on, if any.
fn f_position_with_edge(
    contour: &[Point],
    p: FPoint,
    tol: f64,
) -> (FPosition, Option<(FPoint, FPoint)>) {
    let mut inside = false;
    for (a, b) in contour.iter().circular_tuple_windows() {
        let (a, b): (FPoint, FPoint) = ((*a).into(), (*b).into());
        if sq_distance_to_segment(p, a, b) <= tol * tol {
            return (FPosition::Boundary, Some((a, b)));
        }
        if (a.1 > p.1) != (b.1 > p.1) {
            let x_int = a.0 + (p.1 - a.1) * (b.0 - a.0) / (b.1 - a.1);
            if p.0 < x_int {
                inside = !inside;
            }
        }
    }
    match inside {
        true => (FPosition::Interior, None),
        false => (FPosition::Exterior, None),
    }
}

fn f_position(contour: &[Point], p: FPoint, tol: f64) -> FPosition {
    f_position_with_edge(contour, p, tol).0
}

fn f_position_polygon(
    poly: &Polygon,
    p: FPoint,
    tol: f64,
) -> (FPosition, Option<(FPoint, FPoint)>) {
    match f_position_with_edge(&poly.outer.vertices, p, tol) {
        (FPosition::Interior, _) => {
            for hole in &poly.holes {
                match f_position_with_edge(&hole.vertices, p, tol) {
                    (FPosition::Interior, _) => return (FPosition::Exterior, None),
                    boundary @ (FPosition::Boundary, _) => return boundary,
                    _ => {}
                }
            }
            (FPosition::Interior, None)
        }
        other => other,
    }
}

fn sq_distance_to_segment(p: FPoint, a: FPoint, b: FPoint) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let sq_len = dx * dx + dy * dy;
    let t = match sq_len > 0.0 {
        true => (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / sq_len).clamp(0.0, 1.0),
        false => 0.0,
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    (p.0 - cx).powi(2) + (p.1 - cy).powi(2)
}

fn node_key(p: FPoint) -> NodeKey {
    ((p.0 * 1024.0).round() as i64, (p.1 * 1024.0).round() as i64)
}

/// Links directed boundary pieces into closed loops.
///
/// Works through an explicit list of unused pieces. At a node with several outgoing pieces,
/// the one making the sharpest left turn is followed, which keeps regions touching in a single point apart.
fn trace_loops(pieces: &[(FPoint, FPoint)]) -> Vec<Vec<FPoint>> {
    let mut outgoing: HashMap<NodeKey, Vec<usize>> = HashMap::new();
    for (idx, (p, _)) in pieces.iter().enumerate() {
        outgoing.entry(node_key(*p)).or_default().push(idx);
    }

    let mut used = vec![false; pieces.len()];
    let mut loops = vec![];

    for start in 0..pieces.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let start_key = node_key(pieces[start].0);
        let mut current = start;
        let mut chain = vec![pieces[start].0];
        let mut closed = false;

        for _ in 0..=pieces.len() {
            let (p, q) = pieces[current];
            if node_key(q) == start_key {
                closed = true;
                break;
            }
            chain.push(q);

            let back = (p.1 - q.1).atan2(p.0 - q.0);
            let next = outgoing
                .get(&node_key(q))
                .into_iter()
                .flatten()
                .copied()
                .filter(|&c| !used[c])
                .map(|c| {
                    let (c0, c1) = pieces[c];
                    let angle = (c1.1 - c0.1).atan2(c1.0 - c0.0);
                    let mut clockwise = (back - angle).rem_euclid(TAU);
                    if clockwise <= 1e-12 {
                        clockwise = TAU;
                    }
                    (c, clockwise)
                })
                .min_by(|a, b| a.1.total_cmp(&b.1));

            match next {
                Some((c, _)) => {
                    used[c] = true;
                    current = c;
                }
                None => break,
            }
        }

        match closed {
            true => loops.push(chain),
            false => trace!("[NFP] discarding open chain of {} pieces", chain.len()),
        }
    }
    loops
}

/// Splits a loop visiting the same node more than once into simple loops.
fn split_at_repeated_nodes(l: Vec<FPoint>) -> Vec<Vec<FPoint>> {
    let mut result = vec![];
    let mut stack: Vec<FPoint> = vec![];
    let mut position: HashMap<NodeKey, usize> = HashMap::new();

    for p in l {
        let key = node_key(p);
        match position.get(&key).copied() {
            Some(i) => {
                let sub = stack.split_off(i + 1);
                let mut sub_loop = vec![stack[i]];
                for x in sub {
                    position.remove(&node_key(x));
                    sub_loop.push(x);
                }
                result.push(sub_loop);
            }
            None => {
                position.insert(key, stack.len());
                stack.push(p);
            }
        }
    }
    result.push(stack);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: Coord, y: Coord, size: Coord) -> Polygon {
        Polygon::from(
            SPolygon::new(vec![
                Point(x, y),
                Point(x + size, y),
                Point(x + size, y + size),
                Point(x, y + size),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn overlapping_squares_merge() {
        let res = union(&[square(0, 0, 10), square(5, 5, 10)]);
        assert_eq!(res.polygons.len(), 1);
        assert_eq!(res.polygons[0].area(), 175.0);
        assert!(res.inexact.is_empty());
    }

    #[test]
    fn corner_touching_squares_stay_apart() {
        let res = union(&[square(0, 0, 10), square(10, 10, 10)]);
        assert_eq!(res.polygons.len(), 2);
        assert!(res.polygons.iter().all(|p| p.area() == 100.0));
    }

    #[test]
    fn ring_of_squares_encloses_a_hole() {
        let res = union(&[
            Polygon::from(SPolygon::new(vec![Point(0, 0), Point(30, 0), Point(30, 10), Point(0, 10)]).unwrap()),
            Polygon::from(SPolygon::new(vec![Point(20, 0), Point(30, 0), Point(30, 30), Point(20, 30)]).unwrap()),
            Polygon::from(SPolygon::new(vec![Point(0, 20), Point(30, 20), Point(30, 30), Point(0, 30)]).unwrap()),
            Polygon::from(SPolygon::new(vec![Point(0, 0), Point(10, 0), Point(10, 30), Point(0, 30)]).unwrap()),
        ]);
        assert_eq!(res.polygons.len(), 1);
        assert_eq!(res.polygons[0].holes.len(), 1);
        assert_eq!(res.polygons[0].area(), 800.0);
    }
}
