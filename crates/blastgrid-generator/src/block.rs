use blastgrid_core::{ContentTag, Shape, ShapeCatalog, ShapeId};
use serde::{Deserialize, Serialize};

/// Identifier of a spawned block, unique within one game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("block#{_0}")]
pub struct BlockId(u64);

impl BlockId {
    /// Creates an id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A block offered to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Unique id within the game.
    pub id: BlockId,
    /// Shape in the game's catalog.
    pub shape: ShapeId,
    /// Cosmetic tag written into the board when placed.
    pub tag: ContentTag,
}

/// The blocks currently offered, in slot order.
///
/// Taking a block keeps the remaining blocks in slot order; the tray is
/// refilled only when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tray {
    blocks: Vec<Block>,
}

impl Tray {
    /// Creates an empty tray.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if every block has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the block with the given id.
    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Removes and returns the block with the given id.
    pub fn take(&mut self, id: BlockId) -> Option<Block> {
        let index = self.blocks.iter().position(|block| block.id == id)?;
        Some(self.blocks.remove(index))
    }

    /// Discards every block and stores `blocks` instead.
    pub fn replace(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
    }

    /// Discards every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Returns the blocks in slot order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the shapes of the blocks, resolving them in `catalog`.
    ///
    /// Blocks whose shape is not in `catalog` are skipped.
    pub fn shapes<'a>(&'a self, catalog: &'a ShapeCatalog) -> impl Iterator<Item = &'a Shape> + 'a {
        self.blocks.iter().filter_map(|block| catalog.get(block.shape))
    }
}

impl<'a> IntoIterator for &'a Tray {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
