use crate::geometry::primitives::Rect;

/// Rectangular bin in which items can be placed
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    pub id: usize,
    pub rect: Rect,
    /// Number of copies of this bin available, `None` for an unlimited supply
    pub stock: Option<usize>,
}

impl Bin {
    pub fn new(id: usize, rect: Rect, stock: Option<usize>) -> Self {
        Bin { id, rect, stock }
    }

    pub fn area(&self) -> f64 {
        self.rect.area()
    }
}
