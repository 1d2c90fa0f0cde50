use itertools::Itertools;

use crate::entities::{Bin, Item};
use crate::util::assertions;

/// The items to arrange, each with a demand, and the bins to arrange them in.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Items with their demand, the id of each item equals its index
    pub items: Vec<(Item, usize)>,
    /// Bins, consumed in this order
    pub bins: Vec<Bin>,
}

impl Instance {
    pub fn new(items: Vec<(Item, usize)>, bins: Vec<Bin>) -> Self {
        let instance = Instance { items, bins };
        assert!(
            assertions::instance_item_ids_correct(&instance),
            "item ids must match their index"
        );
        instance
    }

    pub fn item(&self, id: usize) -> &Item {
        &self.items[id].0
    }

    pub fn bin(&self, id: usize) -> &Bin {
        &self.bins[id]
    }

    pub fn total_item_qty(&self) -> usize {
        self.items.iter().map(|(_, qty)| *qty).sum()
    }

    /// Every copy of every item, in input order.
    pub fn item_copies(&self) -> Vec<usize> {
        self.items
            .iter()
            .flat_map(|(item, qty)| std::iter::repeat_n(item.id, *qty))
            .collect_vec()
    }

    pub fn item_area(&self) -> f64 {
        self.items
            .iter()
            .map(|(item, qty)| item.area * *qty as f64)
            .sum()
    }
}
