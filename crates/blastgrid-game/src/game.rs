use std::{cmp::Reverse, mem, time::Duration};

use blastgrid_core::{
    BoardGeometry, Coordinate, Grid, PersistedBoard, Shape, ShapeCatalog, WillClearSet,
    WorldPoint, compute_full_lines,
};
use blastgrid_generator::{Block, BlockId, SpawnPolicy, SpawnSeed, Tray};
use blastgrid_solver::any_placeable;
use rand::seq::SliceRandom as _;

use crate::{
    ComboState, GameConfig, GameError, GameEvent, KeyValueStore, MemoryStore, RevivePolicy,
    Scheduler, ScoreEngine,
    store::{BOARD_KEY, HIGH_SCORE_KEY},
};

/// What a drop at the current drag position would do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragPreview {
    /// The block fits at the position.
    pub placeable: bool,
    /// Lines the drop would complete. Empty if not placeable.
    pub will_clear: WillClearSet,
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The cells are off the board or occupied. The block stays in the tray.
    Rejected,
    /// The block was committed; its lines clear after the settle delay.
    Placed {
        /// Board cells the block now occupies.
        cells: Vec<Coordinate>,
        /// Lines that will be cleared when the placement settles.
        will_clear: WillClearSet,
    },
}

/// Lines to clear once a placement settles.
#[derive(Debug, Clone)]
struct SettleTask {
    will_clear: WillClearSet,
}

/// A Blastgrid game session.
///
/// `Game` owns the board, the tray, the score and the pending settles, and
/// is the only thing that mutates them. A presenter drives it with
/// [`Game::preview`] while dragging, [`Game::drop_block`] on release and
/// [`Game::tick`] every frame, and reacts to the [`GameEvent`]s it drains.
///
/// A drop is committed immediately: the block is written to the board,
/// removed from the tray and scored. Clearing the lines it completes is
/// deferred by [`GameConfig::settle_delay`] so the presenter can animate
/// them. Until then the cells stay occupied and reject other drops.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use blastgrid_game::{Game, GameConfig, MemoryStore};
/// use blastgrid_generator::SpawnSeed;
/// use blastgrid_solver::valid_origins;
///
/// let seed = SpawnSeed::from_phrase("docs");
/// let mut game = Game::new(GameConfig::default(), seed, MemoryStore::new())?;
///
/// let block = game.tray().blocks()[0];
/// let shape = &game.catalog()[block.shape];
/// let origin = valid_origins(game.grid(), shape).next().unwrap();
/// let cell_count = shape.len() as u64;
///
/// let outcome = game.drop_block_at(block.id, origin)?;
/// assert!(outcome.is_placed());
/// assert!(game.has_pending_settle());
///
/// game.tick(Duration::from_millis(150));
/// assert!(!game.has_pending_settle());
/// assert_eq!(game.score(), cell_count);
/// # Ok::<(), blastgrid_game::GameError>(())
/// ```
#[derive(Debug)]
pub struct Game<S = MemoryStore> {
    config: GameConfig,
    seed: SpawnSeed,
    grid: Grid,
    tray: Tray,
    spawner: SpawnPolicy,
    score: ScoreEngine,
    scheduler: Scheduler<SettleTask>,
    events: Vec<GameEvent>,
    game_over: bool,
    store: S,
}

impl<S> Game<S>
where
    S: KeyValueStore,
{
    /// Starts a session with the standard shape catalog.
    ///
    /// The board and high score saved in `store` are restored before the
    /// first tray is spawned. If no block of that tray fits the restored
    /// board, the session starts in the game-over state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if `config` is invalid.
    pub fn new(config: GameConfig, seed: SpawnSeed, store: S) -> Result<Self, GameError> {
        Self::with_catalog(config, ShapeCatalog::standard(), seed, store)
    }

    /// Starts a session drawing blocks from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if `config` is invalid.
    pub fn with_catalog(
        config: GameConfig,
        catalog: ShapeCatalog,
        seed: SpawnSeed,
        store: S,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height);
        let board = load_board(&store);
        if !board.is_empty() {
            let summary = grid.restore(&board, &config.palette);
            log::info!(
                "restored {} cells ({} skipped)",
                summary.restored,
                summary.skipped
            );
        }

        let mut score = ScoreEngine::new(config.score);
        score.restore_high_score(load_high_score(&store));

        let spawner =
            SpawnPolicy::with_seed(catalog, config.palette.clone(), config.tray_size, seed);
        let mut game = Self {
            config,
            seed,
            grid,
            tray: Tray::new(),
            spawner,
            score,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            game_over: false,
            store,
        };
        game.refill_tray();
        game.check_game_over();
        Ok(game)
    }

    /// Configuration of this session.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed the session's blocks are drawn from.
    #[must_use]
    pub fn seed(&self) -> SpawnSeed {
        self.seed
    }

    /// Shapes blocks are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &ShapeCatalog {
        self.spawner.catalog()
    }

    /// The board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Blocks waiting to be placed.
    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score.score()
    }

    /// Best score, including the one restored from the store.
    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.score.high_score()
    }

    /// Current combo.
    #[must_use]
    pub fn combo(&self) -> ComboState {
        self.score.combo()
    }

    /// Returns `true` once no block in the tray fits the board.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns `true` while a placement waits for its lines to clear.
    #[must_use]
    pub fn has_pending_settle(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// The store the session saves to.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ends the session and returns its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Takes every event produced since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Board cells `block` would cover with its origin at `origin`.
    ///
    /// Returns `Ok(None)` if some cell would lie beyond the `i32` range.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownBlock`] if the block is not in the tray.
    pub fn cells_at(
        &self,
        block: BlockId,
        origin: Coordinate,
    ) -> Result<Option<Vec<Coordinate>>, GameError> {
        let block = self.block(block)?;
        Ok(self
            .shape_of(block)
            .cells_at(origin)
            .map(Iterator::collect))
    }

    /// Evaluates dropping `block` onto `cells` without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] after game over,
    /// [`GameError::UnknownBlock`] if the block is not in the tray, and
    /// [`GameError::ShapeMismatch`] if `cells` are not the block's shape.
    pub fn preview(&self, block: BlockId, cells: &[Coordinate]) -> Result<DragPreview, GameError> {
        self.ensure_running()?;
        let block = self.block(block)?;
        self.origin_of(block, cells)?;
        if !self.grid.can_place(cells) {
            return Ok(DragPreview::default());
        }
        Ok(DragPreview {
            placeable: true,
            will_clear: compute_full_lines(&self.grid, cells),
        })
    }

    /// Like [`Game::preview`], taking the world positions of the dragged
    /// block's cells.
    ///
    /// Points that fall off the board give a non-placeable preview.
    ///
    /// # Errors
    ///
    /// Same as [`Game::preview`].
    pub fn preview_world(
        &self,
        block: BlockId,
        geometry: &BoardGeometry,
        points: &[WorldPoint],
    ) -> Result<DragPreview, GameError> {
        let cells: Vec<Coordinate> = points.iter().map(|&p| geometry.world_to_cell(p)).collect();
        if !cells.iter().all(|&c| self.grid.is_inside(c)) {
            self.ensure_running()?;
            self.block(block)?;
            return Ok(DragPreview::default());
        }
        self.preview(block, &cells)
    }

    /// Drops `block` onto `cells`.
    ///
    /// On success the block is placed and scored, and the lines it completes
    /// are scheduled to clear after the settle delay.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] after game over,
    /// [`GameError::UnknownBlock`] if the block is not in the tray, and
    /// [`GameError::ShapeMismatch`] if `cells` are not the block's shape.
    pub fn drop_block(
        &mut self,
        block: BlockId,
        cells: &[Coordinate],
    ) -> Result<DropOutcome, GameError> {
        self.ensure_running()?;
        let block = *self.block(block)?;
        let origin = self.origin_of(&block, cells)?;
        Ok(self.commit(block, origin))
    }

    /// Drops `block` with its origin at `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] after game over and
    /// [`GameError::UnknownBlock`] if the block is not in the tray.
    pub fn drop_block_at(
        &mut self,
        block: BlockId,
        origin: Coordinate,
    ) -> Result<DropOutcome, GameError> {
        self.ensure_running()?;
        let block = *self.block(block)?;
        Ok(self.commit(block, origin))
    }

    /// Advances time by `dt` and settles every placement that became due.
    pub fn tick(&mut self, dt: Duration) {
        let due = self.scheduler.advance(dt);
        if due.is_empty() {
            return;
        }
        for task in &due {
            self.settle(&task.will_clear);
        }
        // Refill against the board with every due line cleared.
        if self.tray.is_empty() {
            self.refill_tray();
        }
        self.persist();
        // Lines of other pending placements are still on the board.
        if self.scheduler.is_empty() {
            self.check_game_over();
        }
    }

    /// Abandons the session and starts over on an empty board.
    ///
    /// Pending settles are cancelled. The high score is kept.
    pub fn new_game(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        log::info!("new game (final score {}, {cancelled} settles cancelled)", self.score());

        self.grid.clear_all();
        self.score.reset();
        self.game_over = false;
        self.push_score_changed();
        self.tray.clear();
        self.refill_tray();
        self.persist();
        self.check_game_over();
    }

    /// Continues a lost game by removing part of the board.
    ///
    /// Removes [`ReviveConfig::fraction`](crate::ReviveConfig::fraction) of
    /// the occupied cells, chosen by the configured [`RevivePolicy`], and
    /// replaces the tray with a fresh one. Returns the number of cells
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RewardNotGranted`] if `reward_granted` is
    /// `false`, and [`GameError::NotGameOver`] if the game is still running.
    pub fn revive(&mut self, reward_granted: bool) -> Result<usize, GameError> {
        if !reward_granted {
            return Err(GameError::RewardNotGranted);
        }
        if !self.game_over {
            return Err(GameError::NotGameOver);
        }

        let cells = self.revive_cells();
        self.grid.clear(&cells);
        self.game_over = false;
        log::info!("revived by clearing {} cells", cells.len());
        self.events.push(GameEvent::Revived {
            cleared: cells.len(),
        });

        self.tray.clear();
        self.refill_tray();
        self.persist();
        self.check_game_over();
        Ok(cells.len())
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn block(&self, id: BlockId) -> Result<&Block, GameError> {
        self.tray.get(id).ok_or(GameError::UnknownBlock { id })
    }

    fn shape_of(&self, block: &Block) -> &Shape {
        &self.spawner.catalog()[block.shape]
    }

    fn origin_of(&self, block: &Block, cells: &[Coordinate]) -> Result<Coordinate, GameError> {
        self.shape_of(block)
            .origin_of(cells)
            .ok_or(GameError::ShapeMismatch { id: block.id })
    }

    fn commit(&mut self, block: Block, origin: Coordinate) -> DropOutcome {
        let Some(cells) = self.shape_of(&block).cells_at(origin) else {
            log::debug!("rejected {} at {origin}: beyond the coordinate range", block.id);
            return DropOutcome::Rejected;
        };
        let cells: Vec<Coordinate> = cells.collect();
        if !self.grid.can_place(&cells) {
            log::debug!("rejected {} at {origin}", block.id);
            return DropOutcome::Rejected;
        }

        // Computed before the commit so preview and result agree.
        let will_clear = compute_full_lines(&self.grid, &cells);
        self.grid.place(&cells, block.tag);
        self.tray.take(block.id);
        self.score.on_placement(cells.len());
        log::debug!(
            "placed {} at {origin}, {} lines pending",
            block.id,
            will_clear.line_count()
        );
        self.events.push(GameEvent::BlockPlaced {
            block,
            cells: cells.clone(),
        });
        self.push_score_changed();

        self.scheduler.schedule(
            self.config.settle_delay,
            SettleTask {
                will_clear: will_clear.clone(),
            },
        );
        if self.config.settle_delay.is_zero() {
            self.tick(Duration::ZERO);
        }
        DropOutcome::Placed { cells, will_clear }
    }

    fn settle(&mut self, will_clear: &WillClearSet) {
        let cleared = will_clear.still_full_in(&self.grid);
        self.grid.clear(cleared.cells());
        let points = self.score.on_clear(cleared.line_count());
        if !cleared.is_empty() {
            log::debug!(
                "cleared {} lines ({} cells) for {points} points",
                cleared.line_count(),
                cleared.len()
            );
            self.events.push(GameEvent::LinesCleared {
                cells: cleared.cells().iter().copied().collect(),
                count: cleared.line_count(),
            });
        }
        if points > 0 {
            self.push_score_changed();
        }
    }

    fn refill_tray(&mut self) {
        let outcome = self.spawner.refill(&self.grid);
        self.tray.replace(outcome.blocks.clone());
        self.events.push(GameEvent::TrayRefilled {
            blocks: outcome.blocks,
        });
    }

    fn check_game_over(&mut self) {
        if self.game_over {
            return;
        }
        let playable = any_placeable(&self.grid, self.tray.shapes(self.spawner.catalog()));
        if !playable {
            self.game_over = true;
            log::info!(
                "game over with score {} (high score {})",
                self.score(),
                self.high_score()
            );
            self.events.push(GameEvent::GameOver);
        }
    }

    fn push_score_changed(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            score: self.score.score(),
            high_score: self.score.high_score(),
        });
    }

    fn revive_cells(&mut self) -> Vec<Coordinate> {
        let mut occupied: Vec<Coordinate> = self.grid.occupied_cells().map(|(c, _)| c).collect();
        let count = revive_count(occupied.len(), self.config.revive.fraction);
        match self.config.revive.policy {
            RevivePolicy::RandomCells => occupied.shuffle(self.spawner.rng_mut()),
            RevivePolicy::TopRows => occupied.sort_by_key(|c| (Reverse(c.y), c.x)),
            RevivePolicy::BottomRows => occupied.sort_by_key(|c| (c.y, c.x)),
        }
        occupied.truncate(count);
        occupied
    }

    fn persist(&mut self) {
        let board = self.grid.snapshot(&self.config.palette);
        match serde_json::to_string(&board) {
            Ok(json) => self.store.set(BOARD_KEY, json),
            Err(e) => log::warn!("failed to serialize the board: {e}"),
        }
        self.store.set(HIGH_SCORE_KEY, self.score.high_score().to_string());
        if let Err(e) = self.store.flush() {
            log::warn!("failed to save the game: {e}");
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn revive_count(occupied: usize, fraction: f64) -> usize {
    let count = (occupied as f64 * fraction).ceil() as usize;
    count.min(occupied)
}

fn load_board(store: &impl KeyValueStore) -> PersistedBoard {
    let Some(json) = store.get(BOARD_KEY) else {
        return PersistedBoard::default();
    };
    serde_json::from_str(&json).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable saved board: {e}");
        PersistedBoard::default()
    })
}

fn load_high_score(store: &impl KeyValueStore) -> u64 {
    let Some(text) = store.get(HIGH_SCORE_KEY) else {
        return 0;
    };
    text.trim().parse().unwrap_or_else(|e| {
        log::warn!("ignoring unreadable high score {text:?}: {e}");
        0
    })
}
