//! Game session management for Blastgrid.
//!
//! This crate ties the board, the spawner and the scoring rules into a
//! playable session. [`Game`] validates and commits drops, defers line
//! clears with an explicit [`Scheduler`], keeps score with a
//! [`ScoreEngine`], saves its state through a [`KeyValueStore`] and reports
//! what happened as [`GameEvent`]s.
//!
//! There are no global singletons and no real-time waits: a host owns the
//! `Game`, feeds it drag input and elapsed time, and drains its events.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use blastgrid_core::{Coordinate, Shape, ShapeCatalog};
//! use blastgrid_game::{Game, GameConfig, GameEvent, MemoryStore};
//! use blastgrid_generator::SpawnSeed;
//!
//! // Every block is a horizontal four-cell bar.
//! let bar = Shape::new((0..4).map(|x| Coordinate::new(x, 0)));
//! let catalog = ShapeCatalog::new(vec![bar])?;
//! let seed = SpawnSeed::from_phrase("row clear");
//! let mut game = Game::with_catalog(GameConfig::default(), catalog, seed, MemoryStore::new())?;
//!
//! let ids: Vec<_> = game.tray().blocks().iter().map(|block| block.id).collect();
//! game.drop_block_at(ids[0], Coordinate::new(0, 0))?;
//! game.drop_block_at(ids[1], Coordinate::new(4, 0))?;
//! game.tick(Duration::from_millis(150));
//!
//! assert_eq!(game.grid().occupied_count(), 0);
//! assert_eq!(game.score(), 8 + 8);
//! assert!(
//!     game.drain_events()
//!         .iter()
//!         .any(|event| matches!(event, GameEvent::LinesCleared { count: 1, .. }))
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    config::{ConfigError, GameConfig, ReviveConfig, RevivePolicy},
    error::GameError,
    events::GameEvent,
    game::{DragPreview, DropOutcome, Game},
    scheduler::Scheduler,
    score::{ComboState, ScoreConfig, ScoreEngine},
    store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError},
};

mod config;
mod error;
mod events;
mod game;
mod scheduler;
mod score;
pub mod store;
