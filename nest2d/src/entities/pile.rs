use slotmap::SlotMap;

use crate::entities::{Bin, Item, PItemKey, PlacedItem};
use crate::error::GeometryError;
use crate::geometry::DTransformation;
use crate::geometry::primitives::Rect;
use crate::util::assertions;

/// Lifecycle of a [`Pile`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PileState {
    Empty,
    PartiallyFilled,
    /// No more items will be added
    Closed,
}

/// The items committed to one bin.
/// Items can be added until the pile is closed. Snapshots can be taken and restored to undo tentative placements.
#[derive(Clone, Debug)]
pub struct Pile {
    pub bin_id: usize,
    pub rect: Rect,
    /// All the items placed in this pile, indexed by a unique key
    pub placed_items: SlotMap<PItemKey, PlacedItem>,
    /// Insertion order of the keys
    order: Vec<PItemKey>,
    state: PileState,
}

impl Pile {
    pub fn new(bin: &Bin) -> Self {
        Pile {
            bin_id: bin.id,
            rect: bin.rect,
            placed_items: SlotMap::with_key(),
            order: vec![],
            state: PileState::Empty,
        }
    }

    pub fn state(&self) -> PileState {
        self.state
    }

    pub fn place(&mut self, pi: PlacedItem) -> PItemKey {
        assert_ne!(self.state, PileState::Closed, "cannot place items in a closed pile");
        let key = self.placed_items.insert(pi);
        self.order.push(key);
        self.state = PileState::PartiallyFilled;

        debug_assert!(assertions::pile_is_valid(self));
        key
    }

    /// Convenience wrapper around [`PlacedItem::new`] without any feasibility check.
    pub fn place_item(
        &mut self,
        item: &Item,
        d_transf: DTransformation,
    ) -> Result<PItemKey, GeometryError> {
        Ok(self.place(PlacedItem::new(item, d_transf)?))
    }

    pub fn close(&mut self) {
        self.state = PileState::Closed;
    }

    pub fn is_empty(&self) -> bool {
        self.placed_items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.placed_items.len()
    }

    /// Placed items in the order they were placed
    pub fn items(&self) -> impl Iterator<Item = (PItemKey, &PlacedItem)> + Clone {
        self.order.iter().map(|&k| (k, &self.placed_items[k]))
    }

    /// Bounding box of all placed items, `None` if the pile is empty
    pub fn items_bbox(&self) -> Option<Rect> {
        self.placed_items
            .values()
            .map(|pi| pi.bbox)
            .reduce(Rect::bounding_rect)
    }

    /// Sum of the (original) areas of the placed items
    pub fn placed_area(&self) -> f64 {
        self.placed_items.values().map(|pi| pi.area).sum()
    }

    /// Ratio of the area of the placed items to the area of the bin
    pub fn density(&self) -> f64 {
        self.placed_area() / self.rect.area()
    }

    /// Moves all placed items by `(dx, dy)`.
    pub fn translate_items(&mut self, dx: i64, dy: i64) {
        for pi in self.placed_items.values_mut() {
            *pi = pi.translated(dx, dy);
        }
        debug_assert!(assertions::pile_is_valid(self));
    }

    /// Saves the current state of the pile to be potentially restored to later.
    pub fn save(&self) -> PileSnapshot {
        PileSnapshot {
            bin_id: self.bin_id,
            placed_items: self.placed_items.clone(),
            order: self.order.clone(),
            state: self.state,
        }
    }

    /// Restores the pile to a previous state using a snapshot.
    pub fn restore(&mut self, snapshot: &PileSnapshot) {
        assert_eq!(self.bin_id, snapshot.bin_id);
        self.placed_items = snapshot.placed_items.clone();
        self.order = snapshot.order.clone();
        self.state = snapshot.state;
    }
}

/// Immutable representation of a [`Pile`] at a certain point in time.
#[derive(Clone, Debug)]
pub struct PileSnapshot {
    pub bin_id: usize,
    pub placed_items: SlotMap<PItemKey, PlacedItem>,
    order: Vec<PItemKey>,
    state: PileState,
}

impl PileSnapshot {
    pub fn len(&self) -> usize {
        self.placed_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed_items.is_empty()
    }
}
