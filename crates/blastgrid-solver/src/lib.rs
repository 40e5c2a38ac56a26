//! Placement search for Blastgrid boards.
//!
//! The solver answers one question in several shapes: can this block go
//! anywhere on this board? It is used to guarantee that a freshly spawned
//! tray contains at least one playable block, and to detect game over.
//!
//! Every function here is read-only. The search is a brute-force scan of
//! every origin for every shape; boards are small and the scan stops at the
//! first success, so no pruning beyond bounding the origin range is done.
//!
//! # Examples
//!
//! ```
//! use blastgrid_core::{Grid, ShapeCatalog, ShapeId};
//! use blastgrid_solver::{all_valid_shape_indices, any_placeable};
//!
//! // Only the single cell in the bottom-right corner is free.
//! let grid: Grid = "
//!     000
//!     000
//!     00.
//! "
//! .parse()?;
//! let catalog = ShapeCatalog::standard();
//!
//! assert_eq!(all_valid_shape_indices(&grid, &catalog), vec![ShapeId::new(0)]);
//! assert!(!any_placeable(&grid, [&catalog[ShapeId::new(1)]]));
//! # Ok::<(), blastgrid_core::GridParseError>(())
//! ```

pub use self::solvability::{
    all_valid_shape_indices, any_placeable, can_place_shape_at, valid_origins,
};

mod solvability;
