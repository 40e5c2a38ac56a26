use blastgrid_generator::BlockId;

use crate::ConfigError;

/// Errors returned by [`Game`](crate::Game) operations.
///
/// These report requests that can never succeed in the current state. A drop
/// onto occupied or off-board cells is not an error; it is reported as
/// [`DropOutcome::Rejected`](crate::DropOutcome::Rejected).
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The configuration is invalid.
    #[display("invalid configuration: {_0}")]
    #[from]
    Config(ConfigError),
    /// The block is not in the tray.
    #[display("{id} is not in the tray")]
    UnknownBlock {
        /// The requested block.
        id: BlockId,
    },
    /// The cells are not a translated copy of the block's shape.
    #[display("cells do not match the shape of {id}")]
    ShapeMismatch {
        /// The requested block.
        id: BlockId,
    },
    /// The game is over; start a new game or revive.
    #[display("the game is over")]
    GameOver,
    /// Revive was requested without a granted reward.
    #[display("revive requires a granted reward")]
    RewardNotGranted,
    /// Revive was requested while the game is still running.
    #[display("revive is only possible after game over")]
    NotGameOver,
}
