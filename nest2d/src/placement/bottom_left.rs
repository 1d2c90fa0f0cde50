use itertools::Itertools;
use log::{debug, trace, warn};
use ordered_float::NotNan;

use crate::entities::{Bin, Item, PItemKey, Pile, PileSnapshot, PlacedItem};
use crate::error::NestError;
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Coord, Edge, Point, Polygon, Rect, SPolygon};
use crate::placement::{PlacementConfig, Placer, unplaceable, would_fit};

/// Maximum number of down/left slides per item and rotation
const MAX_SLIDES: usize = 10_000;

/// Drops items in from the top-right corner of the bin and slides them down and to the left
/// until they get stuck against the bin or the placed items.
///
/// Out of all rotations, the one ending up lowest (then left-most) is kept.
/// The pile is not aligned when it is finalized.
pub struct BottomLeftPlacer {
    pile: Pile,
    config: PlacementConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Left,
    Down,
}

impl Direction {
    /// Distance between the shape and the wall of the bin it is moving towards
    fn wall_distance(&self, bbox: &Rect, bin: &Rect) -> Coord {
        match self {
            Direction::Left => bbox.x_min - bin.x_min,
            Direction::Down => bbox.y_min - bin.y_min,
        }
    }

    fn profile(&self, contour: &[Point], bin: &Rect) -> Vec<Point> {
        match self {
            Direction::Left => left_poly(contour, bin),
            Direction::Down => down_poly(contour, bin),
        }
    }

    fn distance(&self, p: &Point, edge: &Edge) -> Option<Coord> {
        match self {
            Direction::Left => p.horizontal_distance(edge),
            Direction::Down => p.vertical_distance(edge),
        }
    }

    fn shift(&self, shape: &Polygon, d: Coord) -> Polygon {
        match self {
            Direction::Left => shape.translated(-d, 0),
            Direction::Down => shape.translated(0, -d),
        }
    }
}

/// Builds the region swept by a contour when it is moved towards a wall of the bin: the part of the bin
/// between the wall and the side of the contour that faces it.
///
/// `start` and `end` index the extreme vertices of the contour along the wall, `start_wall` and `end_wall`
/// are their projections on it. The facing side is the counterclockwise chain from `start` to `end`.
fn profile(contour: &[Point], start: usize, end: usize, start_wall: Point, end_wall: Point) -> Vec<Point> {
    let n = contour.len();
    let chain = (1..n)
        .map(|k| (start + k) % n)
        .take_while(|&i| i != end)
        .map(|i| contour[i])
        .collect_vec();

    let mut poly = [contour[start], start_wall, end_wall, contour[end]]
        .into_iter()
        .chain(chain.into_iter().rev())
        .dedup()
        .collect_vec();
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    poly
}

/// Region between the left wall of the bin and the left side of a counterclockwise contour.
pub fn left_poly(contour: &[Point], bin: &Rect) -> Vec<Point> {
    let top = contour
        .iter()
        .position_max_by_key(|p| (p.1, -p.0))
        .unwrap_or(0);
    let bottom = contour
        .iter()
        .position_min_by_key(|p| (p.1, p.0))
        .unwrap_or(0);
    profile(
        contour,
        top,
        bottom,
        Point(bin.x_min, contour[top].1),
        Point(bin.x_min, contour[bottom].1),
    )
}

/// Region between the bottom wall of the bin and the lower side of a counterclockwise contour.
pub fn down_poly(contour: &[Point], bin: &Rect) -> Vec<Point> {
    let left = contour
        .iter()
        .position_min_by_key(|p| (p.0, p.1))
        .unwrap_or(0);
    let right = contour
        .iter()
        .position_max_by_key(|p| (p.0, -p.1))
        .unwrap_or(0);
    profile(
        contour,
        left,
        right,
        Point(contour[left].0, bin.y_min),
        Point(contour[right].0, bin.y_min),
    )
}

/// How far `shape` can slide to the left before it hits the bin or one of the `placed` items.
pub fn available_space_left(shape: &Polygon, bin: &Rect, placed: &[&PlacedItem]) -> Coord {
    available_space(shape, bin, placed, Direction::Left)
}

/// How far `shape` can slide down before it hits the bin or one of the `placed` items.
pub fn available_space_down(shape: &Polygon, bin: &Rect, placed: &[&PlacedItem]) -> Coord {
    available_space(shape, bin, placed, Direction::Down)
}

fn available_space(shape: &Polygon, bin: &Rect, placed: &[&PlacedItem], dir: Direction) -> Coord {
    let wall = dir.wall_distance(&shape.bbox(), bin);
    if wall <= 0 {
        return 0;
    }

    let obstacles = match SPolygon::new(dir.profile(&shape.outer.vertices, bin)) {
        Ok(sweep) => {
            let sweep = Polygon::from(sweep);
            placed
                .iter()
                .copied()
                .filter(|pi| sweep.intersects(&pi.shape) || sweep.touches(&pi.shape))
                .collect_vec()
        }
        Err(_) => vec![],
    };

    //distances at which a vertex of one shape reaches an edge of the other
    let mut candidates = vec![wall];
    for pi in &obstacles {
        for v in shape.vertex_iter() {
            candidates.extend(
                pi.shape
                    .edge_iter()
                    .filter_map(|e| dir.distance(&v, &e))
                    .filter(|&d| (0..=wall).contains(&d)),
            );
        }
        for v in pi.shape.vertex_iter() {
            candidates.extend(
                shape
                    .edge_iter()
                    .filter_map(|e| dir.distance(&v, &e))
                    .map(|d| -d)
                    .filter(|&d| (0..=wall).contains(&d)),
            );
        }
    }
    candidates.sort();
    candidates.dedup();

    for c in candidates {
        if c >= wall {
            return wall;
        }
        //moving one unit past the contact distance must collide, otherwise the shape is not blocked at `c`
        if collides_with_any(&dir.shift(shape, c + 1), &obstacles) {
            //contacts off the grid can be rounded past the obstacle, the exact contact then lies in (c - 1, c)
            return match c > 0 && collides_with_any(&dir.shift(shape, c), &obstacles) {
                true => c - 1,
                false => c,
            };
        }
    }
    wall
}

fn collides_with_any(shape: &Polygon, placed: &[&PlacedItem]) -> bool {
    let bbox = shape.bbox();
    placed
        .iter()
        .any(|pi| pi.bbox.overlaps_open(&bbox) && pi.shape.intersects(shape))
}

impl BottomLeftPlacer {
    /// Drops `shape` at the top-right of the bin and slides it into place.
    /// Returns the translation, or `None` if it collides at the drop position.
    fn slide(&self, shape: &Polygon) -> Option<(Coord, Coord)> {
        let bin = self.pile.rect;
        let placed = self.pile.placed_items.values().collect_vec();
        let bbox = shape.bbox();
        let (mut tx, mut ty) = (bin.x_max - bbox.x_max, bin.y_max - bbox.y_max);
        let mut current = shape.translated(tx, ty);
        if collides_with_any(&current, &placed) {
            return None;
        }

        for i in 0..MAX_SLIDES {
            let down = available_space_down(&current, &bin, &placed);
            if down > 0 {
                ty -= down;
                current = current.translated(0, -down);
            }
            let left = available_space_left(&current, &bin, &placed);
            if left > 0 {
                tx -= left;
                current = current.translated(-left, 0);
            }
            if down == 0 && left == 0 {
                trace!("[BL] item settled after {} slides", i);
                break;
            }
        }

        (!collides_with_any(&current, &placed)).then_some((tx, ty))
    }
}

impl Placer for BottomLeftPlacer {
    fn new(bin: &Bin, config: &PlacementConfig) -> Self {
        BottomLeftPlacer {
            pile: Pile::new(bin),
            config: config.clone(),
        }
    }

    fn pile(&self) -> &Pile {
        &self.pile
    }

    fn pack(&mut self, item: &Item) -> Result<PItemKey, NestError> {
        let rotations = self.config.rotations_for(item);
        let mut best: Option<(Rect, DTransformation, Polygon)> = None;
        let mut geometry_failures = vec![];

        for &rotation in rotations {
            let rotation = NotNan::new(rotation)
                .map_err(|_| NestError::Configuration("rotation is NaN".into()))?;
            let shape = match item.shape_cd_at(rotation.into_inner()) {
                Ok(shape) => shape,
                Err(e) => {
                    warn!("[BL] item {} skips rotation {:.3}: {e}", item.id, rotation.into_inner());
                    geometry_failures.push(e);
                    continue;
                }
            };
            if !would_fit(&shape.bbox(), &self.pile.rect) {
                continue;
            }
            let Some((tx, ty)) = self.slide(&shape) else {
                continue;
            };
            let placed = shape.translated(tx, ty);
            let bbox = placed.bbox();
            let improves = match &best {
                None => true,
                Some((b, _, _)) => (bbox.y_min, bbox.x_min) < (b.y_min, b.x_min),
            };
            if improves {
                best = Some((bbox, DTransformation::new(rotation, (tx, ty)), placed));
            }
        }

        match best {
            Some((_, d_transf, shape)) => {
                let key = self.pile.place(PlacedItem::from_shape(item, d_transf, shape));
                debug!(
                    "[BL] placed item {} at [{}] ({} items in pile)",
                    item.id,
                    d_transf,
                    self.pile.len()
                );
                Ok(key)
            }
            None => Err(unplaceable(
                item.id,
                rotations.len(),
                geometry_failures,
                "item gets stuck at the drop position in every rotation",
            )),
        }
    }

    fn save(&self) -> PileSnapshot {
        self.pile.save()
    }

    fn restore(&mut self, snapshot: &PileSnapshot) {
        self.pile.restore(snapshot)
    }

    fn finalize(mut self) -> Pile {
        self.pile.close();
        self.pile
    }
}
