use crate::entities::Pile;
use crate::error::NestError;

/// An item copy that could not be placed, together with the reason.
#[derive(Clone, Debug)]
pub struct UnplacedItem {
    pub item_id: usize,
    pub error: NestError,
}

/// Outcome of an arrangement: the filled piles in the order the bins were opened and all items that were not placed.
#[derive(Clone, Debug, Default)]
pub struct ArrangeResult {
    pub piles: Vec<Pile>,
    pub unplaced: Vec<UnplacedItem>,
    /// Whether the arrangement was cancelled before all items were processed
    pub cancelled: bool,
}

impl ArrangeResult {
    pub fn n_placed(&self) -> usize {
        self.piles.iter().map(|p| p.len()).sum()
    }

    /// Density of the pile at index `pile`
    pub fn density(&self, pile: usize) -> f64 {
        self.piles[pile].density()
    }

    /// Number of copies placed of every item id, indexed by item id
    pub fn placed_qty(&self, n_items: usize) -> Vec<usize> {
        let mut qty = vec![0; n_items];
        for pi in self.piles.iter().flat_map(|p| p.placed_items.values()) {
            qty[pi.item_id] += 1;
        }
        qty
    }
}
