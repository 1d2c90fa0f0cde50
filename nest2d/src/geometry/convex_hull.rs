use crate::geometry::primitives::Point;

/// Andrew's monotone chain. Returns the hull counterclockwise, starting at the lowest-left point, collinear points removed.
pub fn convex_hull_from_points(mut points: Vec<Point>) -> Vec<Point> {
    points.sort();
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let mut lower = points.iter().fold(vec![], |chain, p| extend_chain(chain, *p));
    let mut upper = points.iter().rev().fold(vec![], |chain, p| extend_chain(chain, *p));

    //both chains end where the other one starts
    lower.pop();
    upper.pop();
    lower.append(&mut upper);
    lower
}

fn extend_chain(mut chain: Vec<Point>, next: Point) -> Vec<Point> {
    while let [.., a, b] = chain.as_slice() {
        if Point::cross(*a, *b, next) > 0 {
            break;
        }
        chain.pop();
    }
    chain.push(next);
    chain
}
