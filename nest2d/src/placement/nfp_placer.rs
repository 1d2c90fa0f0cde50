use std::cmp::Ordering;
use std::sync::Arc;

use itertools::Itertools;
use log::{debug, warn};
use ordered_float::NotNan;
use rayon::prelude::*;

use crate::entities::{Bin, Item, PItemKey, Pile, PileSnapshot, PlacedItem};
use crate::error::{GeometryError, NestError};
use crate::geometry::DTransformation;
use crate::geometry::edge_cache::EdgeCache;
use crate::geometry::geo_enums::GeoPosition;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Coord, Point, Polygon, Rect};
use crate::nfp::{NfpCache, NfpKey, UnionResult, ifp_rect, union};
use crate::placement::{CandidatePile, ObjectFunction, PlacementConfig, Placer, unplaceable};

/// Places items at the best scoring position on the boundary of the no-fit polygons of the placed items.
///
/// For every rotation, the no-fit polygons of the item around all placed items are merged. Positions on the
/// merged boundary, and where it meets the inner-fit rectangle of the bin, are scored with the objective
/// function. The best candidate that passes an exact overlap check is kept. Ties are broken by the lowest,
/// then left-most reference point.
pub struct NfpPlacer {
    pile: Pile,
    config: PlacementConfig,
    objective: Arc<dyn ObjectFunction>,
    nfp_cache: NfpCache,
    norm: f64,
}

/// A scored position of the reference vertex
#[derive(Clone, Copy, Debug)]
struct Candidate {
    score: f64,
    point: Point,
}

impl Candidate {
    fn compare(&self, other: &Self) -> Ordering {
        let by_score = match float_cmp::approx_eq!(f64, self.score, other.score, epsilon = 1e-9, ulps = 4) {
            true => Ordering::Equal,
            false => self.score.total_cmp(&other.score),
        };
        by_score
            .then(self.point.1.cmp(&other.point.1))
            .then(self.point.0.cmp(&other.point.0))
    }
}

impl NfpPlacer {
    /// Evaluates all candidate positions for `item` in `shape` (its collision shape, rotated) and returns them
    /// sorted from best to worst.
    fn candidates(
        &mut self,
        item: &Item,
        rotation: NotNan<f64>,
        shape: &Polygon,
        ifp: &Rect,
    ) -> Result<Vec<Candidate>, GeometryError> {
        let reference = shape.reference_vertex();
        let bbox = shape.bbox();
        let pile_bbox = self.pile.items_bbox();
        let area_used = self.pile.placed_area();

        let nfps = self.nfps(item, rotation, shape)?;
        let merged = union(&nfps.polygons);

        let mut points = vec![];
        let n_samples = ((self.config.accuracy * 32.0).round() as usize).max(1);
        for contour in merged.polygons.iter().flat_map(|p| p.contours()) {
            points.extend(contour.vertices.iter().copied());
            points.extend(EdgeCache::new(contour).samples(n_samples));
            for e in contour.edge_iter() {
                border_crossings(e.start, e.end, ifp, &mut points);
            }
        }
        for p in nfps.inexact.iter().chain(merged.inexact.iter()) {
            for (dx, dy) in (-1..=1).cartesian_product(-1..=1) {
                points.push(p.translated(dx, dy));
            }
        }
        points.extend(ifp.corners());
        points.sort();
        points.dedup();

        let mut candidates = points
            .into_iter()
            .filter(|p| ifp.contains_point(p))
            .filter(|p| {
                merged
                    .polygons
                    .iter()
                    .all(|poly| poly.position_of(p) != GeoPosition::Interior)
            })
            .map(|p| {
                let (dx, dy) = (p.0 - reference.0, p.1 - reference.1);
                let candidate = CandidatePile {
                    bin: self.pile.rect,
                    pile: &self.pile,
                    pile_bbox,
                    item_bbox: bbox.translated(dx, dy),
                    reference: p,
                    item_area: item.area,
                    area_used,
                    norm: self.norm,
                    penalty: self.config.penalty,
                };
                Candidate {
                    score: self.objective.score(&candidate),
                    point: p,
                }
            })
            .collect_vec();
        candidates.sort_by(Candidate::compare);
        Ok(candidates)
    }

    /// No-fit polygons of `shape` around every placed item, in the frame of the bin.
    fn nfps(
        &mut self,
        item: &Item,
        rotation: NotNan<f64>,
        shape: &Polygon,
    ) -> Result<UnionResult, GeometryError> {
        let requests = self
            .pile
            .items()
            .map(|(_, pi)| {
                let key = NfpKey {
                    stationary_id: pi.item_id,
                    stationary_rotation: pi.d_transf.rotation,
                    orbiting_id: item.id,
                    orbiting_rotation: rotation,
                };
                (key, pi)
            })
            .collect_vec();

        let missing = requests
            .iter()
            .filter(|(key, _)| !self.nfp_cache.contains(key))
            .unique_by(|(key, _)| *key)
            .map(|(key, pi)| {
                let (tx, ty) = pi.d_transf.translation();
                (*key, pi.shape.translated(-tx, -ty))
            })
            .collect_vec();

        let cache = &self.nfp_cache;
        let computed = match self.config.parallel {
            true => missing
                .par_iter()
                .map(|(key, stationary)| cache.compute(stationary, shape).map(|nfp| (*key, nfp)))
                .collect::<Result<Vec<_>, GeometryError>>()?,
            false => missing
                .iter()
                .map(|(key, stationary)| cache.compute(stationary, shape).map(|nfp| (*key, nfp)))
                .collect::<Result<Vec<_>, GeometryError>>()?,
        };
        for (key, nfp) in computed {
            self.nfp_cache.insert(key, nfp);
        }

        let mut all = UnionResult::default();
        for (key, pi) in requests {
            let (tx, ty) = pi.d_transf.translation();
            if let Some(nfp) = self.nfp_cache.translated(&key, tx, ty) {
                all.polygons.extend(nfp.polygons);
                all.inexact.extend(nfp.inexact);
            }
        }
        Ok(all)
    }

    fn collides(&self, shape: &Polygon) -> bool {
        let bbox = shape.bbox();
        self.pile
            .placed_items
            .values()
            .any(|pi| pi.bbox.overlaps_open(&bbox) && pi.shape.intersects(shape))
    }
}

impl Placer for NfpPlacer {
    fn new(bin: &Bin, config: &PlacementConfig) -> Self {
        NfpPlacer {
            pile: Pile::new(bin),
            config: config.clone(),
            objective: config.objective.build(),
            nfp_cache: NfpCache::new(config.nfp_level),
            norm: bin.area().sqrt(),
        }
    }

    fn pile(&self) -> &Pile {
        &self.pile
    }

    fn pack(&mut self, item: &Item) -> Result<PItemKey, NestError> {
        let rotations = self.config.rotations_for(item).to_vec();
        let mut best: Option<(Candidate, DTransformation, Polygon)> = None;
        let mut geometry_failures = vec![];

        for &rotation in rotations.iter() {
            let rotation = NotNan::new(rotation)
                .map_err(|_| NestError::Configuration("rotation is NaN".into()))?;
            let shape = match item.shape_cd_at(rotation.into_inner()) {
                Ok(shape) => shape,
                Err(e) => {
                    warn!("[NFP] item {} skips rotation {:.3}: {e}", item.id, rotation.into_inner());
                    geometry_failures.push(e);
                    continue;
                }
            };
            let reference = shape.reference_vertex();
            let Some(ifp) = ifp_rect(&self.pile.rect, &shape.bbox(), reference) else {
                continue;
            };

            let candidates = match self.pile.is_empty() {
                true => {
                    let start = self
                        .config
                        .starting_point
                        .point_in(&ifp)
                        .unwrap_or(Point(ifp.x_min, ifp.y_min));
                    vec![Candidate {
                        score: 0.0,
                        point: start,
                    }]
                }
                false => match self.candidates(item, rotation, &shape, &ifp) {
                    Ok(candidates) => candidates,
                    Err(e) => {
                        warn!(
                            "[NFP] no-fit polygons of item {} in rotation {:.3} failed: {e}",
                            item.id,
                            rotation.into_inner()
                        );
                        geometry_failures.push(e);
                        continue;
                    }
                },
            };

            //the first candidate that survives the exact check is the best one for this rotation
            let feasible = candidates.into_iter().find_map(|c| {
                let (dx, dy) = (c.point.0 - reference.0, c.point.1 - reference.1);
                let moved = shape.translated(dx, dy);
                (!self.collides(&moved)).then(|| (c, DTransformation::new(rotation, (dx, dy)), moved))
            });

            if let Some(found) = feasible {
                let improves = match &best {
                    None => true,
                    Some((b, _, _)) => found.0.compare(b) == Ordering::Less,
                };
                if improves {
                    best = Some(found);
                }
            }
        }

        match best {
            Some((c, d_transf, shape)) => {
                let key = self.pile.place(PlacedItem::from_shape(item, d_transf, shape));
                debug!(
                    "[NFP] placed item {} at [{}] with score {:.4} ({} items in pile)",
                    item.id,
                    d_transf,
                    c.score,
                    self.pile.len()
                );
                Ok(key)
            }
            None => Err(unplaceable(item.id, rotations.len(), geometry_failures, "no feasible position in any rotation")),
        }
    }

    fn save(&self) -> PileSnapshot {
        self.pile.save()
    }

    fn restore(&mut self, snapshot: &PileSnapshot) {
        self.pile.restore(snapshot)
    }

    fn finalize(mut self) -> Pile {
        if let Some(bbox) = self.pile.items_bbox() {
            let (dx, dy) = self.config.alignment.translation(&bbox, &self.pile.rect);
            self.pile.translate_items(dx, dy);
        }
        self.pile.close();
        self.pile
    }

    fn set_objective(&mut self, objective: Arc<dyn ObjectFunction>) {
        self.objective = objective;
    }
}

/// Grid points next to where the segment `a→b` crosses the lines bounding `ifp`.
fn border_crossings(a: Point, b: Point, ifp: &Rect, out: &mut Vec<Point>) {
    for x in [ifp.x_min, ifp.x_max] {
        if a.0 != b.0 && a.0.min(b.0) <= x && x <= a.0.max(b.0) {
            let y = a.1 as f64 + (x - a.0) as f64 * (b.1 - a.1) as f64 / (b.0 - a.0) as f64;
            out.push(Point(x, y.floor() as Coord));
            out.push(Point(x, y.ceil() as Coord));
        }
    }
    for y in [ifp.y_min, ifp.y_max] {
        if a.1 != b.1 && a.1.min(b.1) <= y && y <= a.1.max(b.1) {
            let x = a.0 as f64 + (y - a.1) as f64 * (b.0 - a.0) as f64 / (b.1 - a.1) as f64;
            out.push(Point(x.floor() as Coord, y));
            out.push(Point(x.ceil() as Coord, y));
        }
    }
}
