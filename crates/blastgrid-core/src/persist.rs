//! Serializable board snapshot.
//!
//! The JSON form is `{ "placedCells": [{ "x": 0, "y": 0, "tagId": "red" }] }`.
//! Use [`Grid::snapshot`](crate::Grid::snapshot) and
//! [`Grid::restore`](crate::Grid::restore) to convert.

use serde::{Deserialize, Serialize};

/// One occupied cell in a [`PersistedBoard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCell {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
    /// Palette id of the cell's tag.
    pub tag_id: String,
}

/// Every occupied cell of a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBoard {
    /// Occupied cells, in no particular order.
    #[serde(default)]
    pub placed_cells: Vec<PersistedCell>,
}

impl PersistedBoard {
    /// Returns `true` if no cell is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed_cells.is_empty()
    }
}
