mod arrange_result;
mod bin;
mod instance;
mod item;
mod pile;
mod placed_item;

#[doc(inline)]
pub use arrange_result::{ArrangeResult, UnplacedItem};
#[doc(inline)]
pub use bin::Bin;
#[doc(inline)]
pub use instance::Instance;
#[doc(inline)]
pub use item::Item;
#[doc(inline)]
pub use pile::{Pile, PileSnapshot, PileState};
#[doc(inline)]
pub use placed_item::{PItemKey, PlacedItem};
