//! Block spawning for Blastgrid.
//!
//! This crate decides which blocks the player is offered. A [`SpawnPolicy`]
//! refills the [`Tray`] with new [`Block`]s, using the solver to make sure at
//! least one of them fits the current board whenever that is possible.
//!
//! All randomness flows from an injected generator. Games seeded with the
//! same [`SpawnSeed`] and played the same way spawn the same blocks, which
//! makes games replayable and tests deterministic.
//!
//! # Examples
//!
//! ```
//! use blastgrid_core::{Grid, Palette, ShapeCatalog};
//! use blastgrid_generator::{SpawnPolicy, SpawnSeed, Tray};
//!
//! let seed: SpawnSeed = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
//!     .parse()?;
//! let mut policy = SpawnPolicy::with_seed(ShapeCatalog::standard(), Palette::default(), 3, seed);
//!
//! let mut tray = Tray::new();
//! tray.replace(policy.refill(&Grid::new(8, 8)).blocks);
//! assert_eq!(tray.len(), 3);
//! # Ok::<(), blastgrid_generator::SeedParseError>(())
//! ```

pub use self::{
    block::{Block, BlockId, Tray},
    seed::{SeedParseError, SpawnSeed},
    spawn::{SpawnOutcome, SpawnPolicy},
};

mod block;
mod seed;
mod spawn;
