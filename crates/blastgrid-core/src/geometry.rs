//! Cell/world coordinate mapping for presenters.
//!
//! The engine never needs world positions; this exists so that a drag layer
//! can turn the world positions of a dragged block's cells into the board
//! coordinates it hands to the engine.

use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// A position in presenter (world) space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position, growing upwards.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Placement of a board in world space.
///
/// The board is centered on `center`; each cell is `cell_size` wide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    width: u16,
    height: u16,
    cell_size: f32,
    origin: WorldPoint,
}

impl BoardGeometry {
    /// Creates the geometry of a `width` x `height` board.
    #[must_use]
    pub fn new(width: u16, height: u16, cell_size: f32, center: WorldPoint) -> Self {
        let origin = WorldPoint::new(
            center.x - f32::from(width) * cell_size / 2.0,
            center.y - f32::from(height) * cell_size / 2.0,
        );
        Self {
            width,
            height,
            cell_size,
            origin,
        }
    }

    /// Size of one cell in world units.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of the bottom-left corner of the board.
    #[must_use]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Center of a cell in world space.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn cell_to_world(&self, c: Coordinate) -> WorldPoint {
        let half = self.cell_size / 2.0;
        WorldPoint::new(
            self.origin.x + c.x as f32 * self.cell_size + half,
            self.origin.y + c.y as f32 * self.cell_size + half,
        )
    }

    /// Cell containing a world position.
    ///
    /// The result may be outside the board; check it with
    /// [`Grid::is_inside`](crate::Grid::is_inside).
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn world_to_cell(&self, p: WorldPoint) -> Coordinate {
        let x = ((p.x - self.origin.x) / self.cell_size).floor();
        let y = ((p.y - self.origin.y) / self.cell_size).floor();
        Coordinate::new(x as i32, y as i32)
    }

    /// Board dimensions this geometry was built for.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}
