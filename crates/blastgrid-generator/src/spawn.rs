use blastgrid_core::{ContentTag, Grid, Palette, ShapeCatalog, ShapeId};
use blastgrid_solver::all_valid_shape_indices;
use rand::{Rng, seq::IndexedRandom as _};
use rand_pcg::Pcg64;

use crate::{Block, BlockId, SpawnSeed};

/// Result of one [`SpawnPolicy::refill`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnOutcome {
    /// The new blocks, in slot order.
    pub blocks: Vec<Block>,
    /// `true` if no catalog shape fit the board, so the first slot was
    /// drawn from the whole catalog and the tray may be unplayable.
    pub fallback: bool,
}

/// Chooses the shapes and tags of new blocks.
///
/// The first slot of every refill is drawn uniformly from the shapes that
/// currently fit somewhere on the board, which keeps a fresh tray playable
/// whenever any shape can be played at all. The remaining slots and every
/// tag are drawn uniformly from the whole catalog and palette.
///
/// # Examples
///
/// ```
/// use blastgrid_core::{Grid, Palette, ShapeCatalog};
/// use blastgrid_generator::{SpawnPolicy, SpawnSeed};
///
/// let seed = SpawnSeed::from_phrase("example");
/// let mut policy = SpawnPolicy::with_seed(ShapeCatalog::standard(), Palette::default(), 3, seed);
///
/// let outcome = policy.refill(&Grid::new(8, 8));
/// assert_eq!(outcome.blocks.len(), 3);
/// assert!(!outcome.fallback);
/// ```
#[derive(Debug, Clone)]
pub struct SpawnPolicy<R = Pcg64> {
    catalog: ShapeCatalog,
    palette: Palette,
    tray_size: usize,
    next_id: u64,
    rng: R,
}

impl SpawnPolicy<Pcg64> {
    /// Creates a policy driven by the generator of `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `tray_size` is zero.
    #[must_use]
    pub fn with_seed(
        catalog: ShapeCatalog,
        palette: Palette,
        tray_size: usize,
        seed: SpawnSeed,
    ) -> Self {
        Self::new(catalog, palette, tray_size, seed.rng())
    }
}

impl<R> SpawnPolicy<R>
where
    R: Rng,
{
    /// Creates a policy drawing from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `tray_size` is zero.
    #[must_use]
    pub fn new(catalog: ShapeCatalog, palette: Palette, tray_size: usize, rng: R) -> Self {
        assert!(tray_size > 0, "tray must hold at least one block");
        Self {
            catalog,
            palette,
            tray_size,
            next_id: 0,
            rng,
        }
    }

    /// The shapes blocks are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    /// The tags blocks are drawn from.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Number of blocks per refill.
    #[must_use]
    pub fn tray_size(&self) -> usize {
        self.tray_size
    }

    /// The generator shared by every random choice of the game.
    ///
    /// Drawing from it changes the blocks later refills produce.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Draws a full tray for `grid`.
    pub fn refill(&mut self, grid: &Grid) -> SpawnOutcome {
        let all: Vec<ShapeId> = self.catalog.ids().collect();
        let valid = all_valid_shape_indices(grid, &self.catalog);
        let fallback = valid.is_empty();
        if fallback {
            log::warn!("no shape fits the board; drawing the first block from the whole catalog");
        }
        let first_pool = if fallback { all.clone() } else { valid };
        let tags: Vec<ContentTag> = self.palette.tags().collect();

        let blocks: Vec<Block> = (0..self.tray_size)
            .map(|slot| {
                let pool = if slot == 0 { &first_pool } else { &all };
                // Catalogs and palettes are never empty.
                let shape = pool.choose(&mut self.rng).copied().unwrap_or(ShapeId::new(0));
                let tag = tags.choose(&mut self.rng).copied().unwrap_or_default();
                let id = BlockId::new(self.next_id);
                self.next_id += 1;
                Block { id, shape, tag }
            })
            .collect();

        log::debug!(
            "spawned {:?}",
            blocks.iter().map(|b| b.shape.index()).collect::<Vec<_>>()
        );
        SpawnOutcome { blocks, fallback }
    }
}
