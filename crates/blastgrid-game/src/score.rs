use serde::{Deserialize, Serialize};

/// Scoring constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Base points per cleared line, before the combo multiplier.
    pub points_per_line: u32,
    /// Placements without a clear tolerated before the combo resets.
    pub max_loses_allowed: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            points_per_line: 8,
            max_loses_allowed: 3,
        }
    }
}

/// The combo multiplier and its decay counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboState {
    multiplier: u32,
    consecutive_non_clears: u32,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            multiplier: 1,
            consecutive_non_clears: 0,
        }
    }
}

impl ComboState {
    /// Multiplier applied to the next clear. Always at least 1.
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Settles in a row that cleared nothing.
    #[must_use]
    pub fn consecutive_non_clears(&self) -> u32 {
        self.consecutive_non_clears
    }
}

/// Score, high score and combo.
///
/// Every placement scores one point per cell. Every settle then reports the
/// number of lines it cleared: a clear scores
/// `points_per_line * lines * multiplier` and raises the multiplier by one; a
/// settle without clears counts as a loss, and once more than
/// `max_loses_allowed` losses happen in a row the multiplier drops back to 1.
///
/// # Examples
///
/// ```
/// use blastgrid_game::{ScoreConfig, ScoreEngine};
///
/// let mut engine = ScoreEngine::new(ScoreConfig::default());
/// engine.on_placement(4);
/// assert_eq!(engine.on_clear(1), 8);
/// assert_eq!(engine.on_clear(2), 32); // 8 * 2 lines * x2
/// assert_eq!(engine.score(), 4 + 8 + 32);
/// assert_eq!(engine.combo().multiplier(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEngine {
    config: ScoreConfig,
    score: u64,
    high_score: u64,
    combo: ComboState,
}

impl ScoreEngine {
    /// Creates an engine with zero score and high score.
    #[must_use]
    pub fn new(config: ScoreConfig) -> Self {
        Self {
            config,
            score: 0,
            high_score: 0,
            combo: ComboState::default(),
        }
    }

    /// Scoring constants in use.
    #[must_use]
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Best score seen, including restored ones.
    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Current combo state.
    #[must_use]
    pub fn combo(&self) -> ComboState {
        self.combo
    }

    /// Raises the high score to at least `high_score`.
    pub fn restore_high_score(&mut self, high_score: u64) {
        self.high_score = self.high_score.max(high_score);
    }

    /// Awards one point per placed cell and returns the points gained.
    pub fn on_placement(&mut self, cell_count: usize) -> u64 {
        let points = u64::try_from(cell_count).unwrap_or(u64::MAX);
        self.add(points);
        points
    }

    /// Applies the result of a settle and returns the points gained.
    pub fn on_clear(&mut self, lines: usize) -> u64 {
        if lines == 0 {
            self.combo.consecutive_non_clears += 1;
            if self.combo.consecutive_non_clears > self.config.max_loses_allowed {
                log::debug!("combo lost at x{}", self.combo.multiplier);
                self.combo = ComboState::default();
            }
            return 0;
        }

        let points = u64::from(self.config.points_per_line)
            .saturating_mul(u64::try_from(lines).unwrap_or(u64::MAX))
            .saturating_mul(u64::from(self.combo.multiplier));
        self.add(points);
        self.combo.multiplier = self.combo.multiplier.saturating_add(1);
        self.combo.consecutive_non_clears = 0;
        points
    }

    /// Clears score and combo. The high score is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.combo = ComboState::default();
    }

    fn add(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
        self.high_score = self.high_score.max(self.score);
    }
}
