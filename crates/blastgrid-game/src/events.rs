use blastgrid_core::Coordinate;
use blastgrid_generator::Block;

/// A notification for the presentation layer.
///
/// Events are queued in the order the game produced them and handed out by
/// [`Game::drain_events`](crate::Game::drain_events).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// A block was committed to the board.
    BlockPlaced {
        /// The placed block, no longer in the tray.
        block: Block,
        /// Board cells it now occupies.
        cells: Vec<Coordinate>,
    },
    /// The score or high score changed.
    ScoreChanged {
        /// New score.
        score: u64,
        /// New high score.
        high_score: u64,
    },
    /// Full lines were removed from the board.
    LinesCleared {
        /// Cells that were emptied.
        cells: Vec<Coordinate>,
        /// Number of rows plus columns cleared.
        count: usize,
    },
    /// The tray was filled with new blocks.
    TrayRefilled {
        /// The new tray contents.
        blocks: Vec<Block>,
    },
    /// No block in the tray fits the board.
    GameOver,
    /// Cells were removed to continue a lost game.
    Revived {
        /// Number of cells removed.
        cleared: usize,
    },
}
