use std::time::Instant;

use itertools::Itertools;

use crate::entities::{ArrangeResult, Instance, Pile};
use crate::geometry::DTransformation;
use crate::io::ext_repr::{ExtPile, ExtPlacedItem, ExtSolution, ExtTransformation, ExtUnplacedItem};

/// Converts internal representations of an arrangement back into the units of the instance.
#[derive(Clone, Debug, Copy)]
pub struct Exporter {
    pub scale: f64,
}

impl Exporter {
    pub fn new(scale: f64) -> Self {
        Exporter { scale }
    }

    pub fn export_solution(&self, instance: &Instance, result: &ArrangeResult, epoch: Instant) -> ExtSolution {
        let piles = result.piles.iter().map(|p| self.export_pile(p)).collect_vec();

        let used_area: f64 = result.piles.iter().map(|p| p.rect.area()).sum();
        let placed_area: f64 = result.piles.iter().map(|p| p.placed_area()).sum();
        let density = match used_area > 0.0 {
            true => placed_area / used_area,
            false => 0.0,
        };

        let unplaced = result
            .unplaced
            .iter()
            .map(|u| ExtUnplacedItem {
                item_id: u.item_id as u64,
                reason: u.error.to_string(),
            })
            .collect_vec();

        debug_assert_eq!(
            result.n_placed() + unplaced.len(),
            instance.total_item_qty(),
            "every item copy is either placed or reported unplaced"
        );

        ExtSolution {
            piles,
            unplaced,
            density,
            run_time_sec: epoch.elapsed().as_secs(),
        }
    }

    pub fn export_pile(&self, pile: &Pile) -> ExtPile {
        ExtPile {
            bin_id: pile.bin_id as u64,
            density: pile.density(),
            items: pile
                .items()
                .map(|(_, pi)| ExtPlacedItem {
                    item_id: pi.item_id as u64,
                    transformation: self.export_transformation(&pi.d_transf),
                })
                .collect(),
        }
    }

    pub fn export_transformation(&self, dt: &DTransformation) -> ExtTransformation {
        let (tx, ty) = dt.translation();
        ExtTransformation {
            rotation: dt.rotation().to_degrees(),
            translation: (tx as f64 / self.scale, ty as f64 / self.scale),
        }
    }
}

/// Exports a result in the units of the instance, see [`Exporter`].
pub fn export(instance: &Instance, result: &ArrangeResult, scale: f64, epoch: Instant) -> ExtSolution {
    Exporter::new(scale).export_solution(instance, result, epoch)
}
