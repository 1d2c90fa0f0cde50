use itertools::Itertools;
use log::error;

use crate::entities::{Instance, Pile};
//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

pub fn instance_item_ids_correct(instance: &Instance) -> bool {
    instance
        .items
        .iter()
        .enumerate()
        .all(|(i, (item, _qty))| item.id == i)
}

/// All placed items lie within the bin and no two of them overlap.
pub fn pile_is_valid(pile: &Pile) -> bool {
    for (_, pi) in pile.items() {
        if !pile.rect.contains_rect(&pi.bbox) {
            error!(
                "item {} with bbox {:?} exceeds the bin {:?}",
                pi.item_id, pi.bbox, pile.rect
            );
            return false;
        }
    }
    pile.items().tuple_combinations().all(|((_, a), (_, b))| {
        let overlap = a.bbox.overlaps_open(&b.bbox) && a.shape.intersects(&b.shape);
        if overlap {
            error!(
                "items {} ({}) and {} ({}) overlap",
                a.item_id, a.d_transf, b.item_id, b.d_transf
            );
        }
        !overlap
    })
}
