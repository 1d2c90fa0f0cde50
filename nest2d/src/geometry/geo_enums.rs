/// Position of a point relative to a closed region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeoPosition {
    Exterior,
    Boundary,
    Interior,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Possible relations between two geometric entities A and B.
/// A is `GeoRelation` to B
pub enum GeoRelation {
    /// The interiors overlap and neither A ⊆ B nor B ⊆ A
    Intersecting,
    /// A ⊆ B
    Enclosed,
    /// B ⊆ A
    Surrounding,
    /// Only the boundaries meet
    Touching,
    /// A ∩ B = ∅
    Disjoint,
}
