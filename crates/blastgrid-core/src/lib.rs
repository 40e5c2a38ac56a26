//! Core data structures for block-placement puzzles.
//!
//! This crate provides the board model shared by the solver, the spawn
//! generator, and game management components.
//!
//! # Overview
//!
//! 1. **Geometry** - Where things are
//!    - [`coordinate`]: Signed `(x, y)` board coordinates
//!    - [`shape`]: Normalized polyomino shapes and the [`ShapeCatalog`]
//!    - [`geometry`]: Mapping between cells and world positions for presenters
//!
//! 2. **Board state** - What is on the board
//!    - [`content_tag`]: Cosmetic cell tags and the [`Palette`] naming them
//!    - [`grid`]: The occupancy matrix ([`Grid`]) with placement and clearing
//!    - [`line_clear`]: Full row/column detection ([`compute_full_lines`])
//!
//! 3. **Persistence**
//!    - [`persist`]: The serializable [`PersistedBoard`] snapshot
//!
//! # Examples
//!
//! ```
//! use blastgrid_core::{ContentTag, Coordinate, Grid, ShapeCatalog, ShapeId, compute_full_lines};
//!
//! let mut grid = Grid::new(8, 8);
//! let catalog = ShapeCatalog::standard();
//! let bar = &catalog[ShapeId::new(3)]; // 4-in-a-row
//!
//! let left: Vec<_> = bar.cells_at(Coordinate::new(0, 0)).unwrap().collect();
//! grid.place(&left, ContentTag::new(0));
//!
//! let right: Vec<_> = bar.cells_at(Coordinate::new(4, 0)).unwrap().collect();
//! assert!(grid.can_place(&right));
//!
//! // The second bar completes row 0.
//! let will_clear = compute_full_lines(&grid, &right);
//! assert_eq!(will_clear.rows(), &[0]);
//! assert_eq!(will_clear.len(), 8);
//! ```

pub mod content_tag;
pub mod coordinate;
pub mod geometry;
pub mod grid;
pub mod line_clear;
pub mod persist;
pub mod shape;

// Re-export commonly used types
pub use self::{
    content_tag::{ContentTag, Palette, PaletteError},
    coordinate::Coordinate,
    geometry::{BoardGeometry, WorldPoint},
    grid::{Grid, GridParseError, RestoreSummary},
    line_clear::{WillClearSet, compute_full_lines},
    persist::{PersistedBoard, PersistedCell},
    shape::{Shape, ShapeCatalog, ShapeError, ShapeId},
};
