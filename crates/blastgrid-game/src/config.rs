use std::time::Duration;

use blastgrid_core::Palette;
use serde::{Deserialize, Serialize};

use crate::ScoreConfig;

/// Tunable parameters of a game.
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes:
///
/// ```
/// use std::time::Duration;
///
/// use blastgrid_game::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "width": 10, "settle_delay": 0 }"#)?;
/// assert_eq!((config.width, config.height), (10, 8));
/// assert_eq!(config.settle_delay, Duration::ZERO);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
    /// Time between a placement and the clearing of the lines it completes.
    #[serde(with = "millis")]
    pub settle_delay: Duration,
    /// Blocks per tray refill.
    pub tray_size: usize,
    /// Scoring constants.
    pub score: ScoreConfig,
    /// Revive behavior.
    pub revive: ReviveConfig,
    /// Cosmetic tags blocks are drawn with.
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            settle_delay: Duration::from_millis(150),
            tray_size: 3,
            score: ScoreConfig::default(),
            revive: ReviveConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Checks that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.tray_size == 0 {
            return Err(ConfigError::EmptyTray);
        }
        let fraction = self.revive.fraction;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ConfigError::InvalidReviveFraction { fraction });
        }
        Ok(())
    }
}

/// Which occupied cells a revive removes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevivePolicy {
    /// Uniformly random occupied cells.
    #[default]
    RandomCells,
    /// Occupied cells with the largest `y` first.
    TopRows,
    /// Occupied cells with the smallest `y` first.
    BottomRows,
}

/// Revive parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviveConfig {
    /// Share of occupied cells to remove, in `0.0..=1.0`.
    pub fraction: f64,
    /// How the removed cells are chosen.
    pub policy: RevivePolicy,
}

impl Default for ReviveConfig {
    fn default() -> Self {
        Self {
            fraction: 0.5,
            policy: RevivePolicy::RandomCells,
        }
    }
}

/// Errors returned by [`GameConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The board has no cells.
    #[display("board must not be empty (got {width}x{height})")]
    EmptyBoard {
        /// Configured width.
        width: u16,
        /// Configured height.
        height: u16,
    },
    /// The tray holds no blocks.
    #[display("tray size must be at least 1")]
    EmptyTray,
    /// The revive fraction is outside `0.0..=1.0`.
    #[display("revive fraction must be between 0 and 1, got {fraction}")]
    InvalidReviveFraction {
        /// Configured fraction.
        fraction: f64,
    },
}

/// `Duration` as a whole number of milliseconds, saturating at `u64::MAX`.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer, Serialize as _, Serializer};

    pub(super) fn serialize<S: Serializer>(delay: &Duration, s: S) -> Result<S::Ok, S::Error> {
        u64::try_from(delay.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(s)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
