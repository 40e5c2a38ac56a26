//! Command-line autoplayer for Blastgrid.
//!
//! The `blastgrid` binary plays seeded games with a simple move-picking
//! [`Strategy`] and prints the results. The pieces it is built from are
//! exposed here so they can be tested and reused.

use std::{fs, io, path::Path};

use blastgrid_game::{ConfigError, GameConfig};

pub use self::autoplay::{Move, PlayLimits, PlayReport, Strategy, choose_move, play};

mod autoplay;

/// Errors from [`load_config`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadConfigError {
    /// The file cannot be read.
    #[display("cannot read config file: {_0}")]
    #[from]
    Io(io::Error),
    /// The file is not a valid configuration.
    #[display("invalid config file: {_0}")]
    #[from]
    Json(serde_json::Error),
    /// The configuration describes an unplayable game.
    #[display("{_0}")]
    #[from]
    Invalid(ConfigError),
}

/// Reads a [`GameConfig`] from a JSON file.
///
/// Missing fields take their default values.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// configuration fails [`GameConfig::validate`].
pub fn load_config(path: &Path) -> Result<GameConfig, LoadConfigError> {
    let text = fs::read_to_string(path)?;
    let config: GameConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}
