use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;

use crate::entities::{Bin, Instance, Item};
use crate::geometry::primitives::{Coord, Point, Polygon, Rect};
use crate::io::ext_repr::{ExtBin, ExtInstance, ExtItem, ExtSPolygon, ExtShape};

/// Converts external representations of items and bins into internal ones.
///
/// External coordinates are multiplied by `scale` and rounded to the integer grid.
/// A minimum distance between items is not part of the import, it is enforced by the
/// [`Arranger`](crate::arranger::Arranger) through [`ArrangerConfig`](crate::arranger::ArrangerConfig).
#[derive(Clone, Debug, Copy)]
pub struct Importer {
    pub scale: f64,
}

impl Importer {
    pub fn new(scale: f64) -> Importer {
        Importer { scale }
    }

    pub fn import_instance(&self, ext_instance: &ExtInstance) -> Result<Instance> {
        ensure!(
            self.scale.is_finite() && self.scale > 0.0,
            "invalid scale: {}",
            self.scale
        );

        let items = ext_instance
            .items
            .iter()
            .sorted_by_key(|ext_item| ext_item.id)
            .enumerate()
            .map(|(idx, ext_item)| {
                ensure!(
                    ext_item.id as usize == idx,
                    "item ids must run from 0 to n-1, expected {idx}, found {}",
                    ext_item.id
                );
                let item = self
                    .import_item(ext_item)
                    .with_context(|| format!("failed to import item {}", ext_item.id))?;
                Ok((item, ext_item.demand as usize))
            })
            .collect::<Result<Vec<_>>>()?;

        let bins = ext_instance
            .bins
            .iter()
            .sorted_by_key(|ext_bin| ext_bin.id)
            .enumerate()
            .map(|(idx, ext_bin)| {
                ensure!(
                    ext_bin.id as usize == idx,
                    "bin ids must run from 0 to n-1, expected {idx}, found {}",
                    ext_bin.id
                );
                self.import_bin(ext_bin)
                    .with_context(|| format!("failed to import bin {}", ext_bin.id))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Instance::new(items, bins))
    }

    pub fn import_item(&self, ext_item: &ExtItem) -> Result<Item> {
        let shape = match &ext_item.shape {
            ExtShape::Rectangle {
                x_min,
                y_min,
                width,
                height,
            } => {
                let rect = Rect::try_new(
                    self.scaled(*x_min)?,
                    self.scaled(*y_min)?,
                    self.scaled(x_min + width)?,
                    self.scaled(y_min + height)?,
                )?;
                Polygon::from(rect.to_polygon()?)
            }
            ExtShape::SimplePolygon(esp) => Polygon::from_contours(self.import_contour(esp)?, vec![])?,
            ExtShape::Polygon(ep) => {
                let holes = ep
                    .holes
                    .iter()
                    .map(|h| self.import_contour(h))
                    .collect::<Result<Vec<_>>>()?;
                Polygon::from_contours(self.import_contour(&ep.outer)?, holes)?
            }
        };

        let allowed_rotations = match ext_item.allowed_orientations.as_ref() {
            Some(a_o) => {
                ensure!(!a_o.is_empty(), "empty set of allowed orientations");
                if let Some(angle) = a_o.iter().find(|a| !a.is_finite()) {
                    bail!("non-finite orientation: {angle}");
                }
                Some(a_o.iter().map(|angle| angle.to_radians()).collect_vec())
            }
            None => None,
        };

        Ok(Item::new(ext_item.id as usize, shape, allowed_rotations))
    }

    pub fn import_bin(&self, ext_bin: &ExtBin) -> Result<Bin> {
        let rect = Rect::try_new(0, 0, self.scaled(ext_bin.width)?, self.scaled(ext_bin.height)?)?;
        Ok(Bin::new(
            ext_bin.id as usize,
            rect,
            ext_bin.stock.map(|s| s as usize),
        ))
    }

    fn import_contour(&self, esp: &ExtSPolygon) -> Result<Vec<Point>> {
        esp.0
            .iter()
            .map(|&(x, y)| Ok(Point(self.scaled(x)?, self.scaled(y)?)))
            .collect()
    }

    fn scaled(&self, v: f64) -> Result<Coord> {
        let s = (v * self.scale).round();
        ensure!(
            s.is_finite() && s.abs() < (1i64 << 52) as f64,
            "coordinate out of range: {v}"
        );
        Ok(s as Coord)
    }
}
