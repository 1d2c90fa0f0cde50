use std::collections::HashMap;
use std::sync::Arc;

use ordered_float::NotNan;

use crate::error::GeometryError;
use crate::geometry::primitives::{Coord, Polygon};
use crate::nfp::{NfpLevel, UnionResult, no_fit_polygon};

/// Identifies the no-fit polygon of an orbiting item around a stationary item, both in a given rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NfpKey {
    pub stationary_id: usize,
    pub stationary_rotation: NotNan<f64>,
    pub orbiting_id: usize,
    pub orbiting_rotation: NotNan<f64>,
}

/// Memoizes no-fit polygons in the local frame of the stationary item.
/// A lookup translates the stored result to where the stationary item was placed.
#[derive(Debug, Default)]
pub struct NfpCache {
    level: NfpLevel,
    entries: HashMap<NfpKey, Arc<UnionResult>>,
}

impl NfpCache {
    pub fn new(level: NfpLevel) -> Self {
        Self {
            level,
            entries: HashMap::new(),
        }
    }

    pub fn contains(&self, key: &NfpKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Computes the no-fit polygon of two shapes in their local frame without storing it.
    pub fn compute(&self, stationary: &Polygon, orbiting: &Polygon) -> Result<UnionResult, GeometryError> {
        no_fit_polygon(stationary, orbiting, self.level)
    }

    pub fn insert(&mut self, key: NfpKey, nfp: UnionResult) {
        self.entries.insert(key, Arc::new(nfp));
    }

    /// Returns the cached no-fit polygon, computing and storing it if absent.
    pub fn get_or_compute(
        &mut self,
        key: NfpKey,
        stationary: &Polygon,
        orbiting: &Polygon,
    ) -> Result<Arc<UnionResult>, GeometryError> {
        if let Some(nfp) = self.entries.get(&key) {
            return Ok(nfp.clone());
        }
        let nfp = Arc::new(self.compute(stationary, orbiting)?);
        self.entries.insert(key, nfp.clone());
        Ok(nfp)
    }

    /// Cached no-fit polygon translated by `(dx, dy)`.
    pub fn translated(&self, key: &NfpKey, dx: Coord, dy: Coord) -> Option<UnionResult> {
        self.entries.get(key).map(|nfp| UnionResult {
            polygons: nfp.polygons.iter().map(|p| p.translated(dx, dy)).collect(),
            inexact: nfp.inexact.iter().map(|p| p.translated(dx, dy)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;
    use crate::geometry::primitives::{Point, Rect, SPolygon};

    #[test]
    fn lookups_are_translated() {
        let square = Polygon::from(
            SPolygon::new(vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)]).unwrap(),
        );
        let key = NfpKey {
            stationary_id: 0,
            stationary_rotation: NotNan::new(0.0).unwrap(),
            orbiting_id: 0,
            orbiting_rotation: NotNan::new(0.0).unwrap(),
        };
        let mut cache = NfpCache::new(NfpLevel::Full);
        cache.get_or_compute(key, &square, &square).unwrap();
        assert_eq!(cache.len(), 1);

        let moved = cache.translated(&key, 100, 50).unwrap();
        assert_eq!(moved.polygons[0].bbox(), Rect::try_new(90, 40, 110, 60).unwrap());
    }
}
