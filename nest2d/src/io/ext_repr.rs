use serde::{Deserialize, Serialize};

/// External representation of a nesting problem
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    /// Set of items to be placed
    pub items: Vec<ExtItem>,
    /// Set of bins, opened in the given order
    pub bins: Vec<ExtBin>,
}

/// External representation of an [`Item`](crate::entities::Item)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtItem {
    /// Unique identifier of the item, ids must run from 0 to n-1
    pub id: u64,
    /// Number of copies that need to be placed
    pub demand: u64,
    /// List of allowed orientations angles (in degrees).
    /// If none, the rotations of the placement configuration apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_orientations: Option<Vec<f64>>,
    /// Shape of the item
    pub shape: ExtShape,
}

/// External representation of a [`Bin`](crate::entities::Bin)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtBin {
    pub id: u64,
    pub width: f64,
    pub height: f64,
    /// Number of copies available, unlimited if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
}

/// Different ways to represent a shape
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ExtShape {
    /// Axis-aligned rectangle. With its left bottom corner at (x_min, y_min), a width and height
    Rectangle {
        x_min: f64,
        y_min: f64,
        width: f64,
        height: f64,
    },
    /// Polygon with a single outer boundary
    SimplePolygon(ExtSPolygon),
    /// Polygon with a single outer boundary and a set of holes
    Polygon(ExtPolygon),
}

/// A polygon with a single outer boundary and no holes.
/// The orientation of the points is free, it is normalized on import.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSPolygon(pub Vec<(f64, f64)>);

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPolygon {
    /// The outer boundary of the polygon
    pub outer: ExtSPolygon,
    /// A list of holes in the polygon
    #[serde(default)]
    pub holes: Vec<ExtSPolygon>,
}

/// External representation of an [`ArrangeResult`](crate::entities::ArrangeResult)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    /// Filled piles, in the order the bins were opened
    pub piles: Vec<ExtPile>,
    /// Item copies which could not be placed
    pub unplaced: Vec<ExtUnplacedItem>,
    /// Total item area divided by the total area of the used bins
    pub density: f64,
    /// Seconds since the start of the run at which the solution was exported
    pub run_time_sec: u64,
}

/// External representation of a [`Pile`](crate::entities::Pile)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPile {
    /// The id of the bin type the pile uses
    pub bin_id: u64,
    pub density: f64,
    pub items: Vec<ExtPlacedItem>,
}

/// Represents an item placed in a pile
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedItem {
    /// The id of the item in the instance
    pub item_id: u64,
    /// The transformation applied to the item's original shape, in the units of the instance
    pub transformation: ExtTransformation,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtUnplacedItem {
    pub item_id: u64,
    pub reason: String,
}

/// Proper rigid transformation in the units of the instance.
/// First rotate around the origin, then translate.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ExtTransformation {
    /// The rotation angle in degrees
    pub rotation: f64,
    /// The translation vector (x, y)
    pub translation: (f64, f64),
}
