//! No-fit-polygon based nesting of irregular 2D parts into rectangular bins.
//!
//! The crate is layered leaves first: [`geometry`] holds the integer geometry kernel,
//! [`nfp`] builds no-fit polygons on top of it, [`placement`] positions single items inside a pile,
//! [`selection`] decides which items are fed to a placer and [`arranger`] ties everything together
//! over multiple bins.

/// Geometric primitives and the exact predicates between them
pub mod geometry;

/// No-fit polygon generation (convex and general), inner-fit rectangles and polygon union
pub mod nfp;

/// Entities to model the nesting problem: items, bins, piles and results
pub mod entities;

/// Placement strategies positioning one item at a time inside a single pile
pub mod placement;

/// Selection heuristics deciding the order in which items are offered to a placer
pub mod selection;

/// Multi-bin orchestration
pub mod arranger;

/// Splitting of triangle meshes into connected components
pub mod mesh_split;

/// Importing and exporting instances and solutions
pub mod io;

/// Error taxonomy of the engine
pub mod error;

/// Helper functions which do not belong to any specific module
pub mod util;
