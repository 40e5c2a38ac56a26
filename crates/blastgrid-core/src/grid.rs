//! The board occupancy model.
//!
//! [`Grid`] is the single source of truth for which cells are occupied. It
//! exposes bounds and emptiness queries, placement, clearing, and conversion
//! to and from the [`PersistedBoard`] snapshot.
//!
//! # Text form
//!
//! Grids implement [`FromStr`] and [`Display`](fmt::Display) using one line per
//! row, starting with row `y = 0`:
//!
//! - `.` is an empty cell
//! - `#` is an occupied cell with tag `0`
//! - `0`-`9` is an occupied cell with that tag index
//!
//! ```
//! use blastgrid_core::{Coordinate, Grid};
//!
//! let grid: Grid = "
//!     00..
//!     .3..
//! "
//! .parse()?;
//! assert_eq!((grid.width(), grid.height()), (4, 2));
//! assert!(!grid.is_empty(Coordinate::new(1, 0)));
//! assert!(grid.is_empty(Coordinate::new(0, 1)));
//! assert_eq!(grid.to_string(), "00..\n.3..\n");
//! # Ok::<(), blastgrid_core::GridParseError>(())
//! ```

use std::{fmt, str::FromStr};

use crate::{ContentTag, Coordinate, Palette, PersistedBoard, PersistedCell};

/// Result of [`Grid::restore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Cells written to the grid.
    pub restored: usize,
    /// Cells skipped because they were out of bounds, duplicated, or had an
    /// unknown tag id.
    pub skipped: usize,
}

/// The width x height occupancy matrix.
///
/// # Examples
///
/// ```
/// use blastgrid_core::{ContentTag, Coordinate, Grid};
///
/// let mut grid = Grid::new(8, 8);
/// let cells = [Coordinate::new(0, 0), Coordinate::new(1, 0)];
///
/// assert!(grid.can_place(&cells));
/// grid.place(&cells, ContentTag::new(2));
/// assert!(!grid.can_place(&cells));
/// assert_eq!(grid.tag(Coordinate::new(1, 0)), Some(ContentTag::new(2)));
///
/// grid.clear(&cells);
/// assert_eq!(grid.occupied_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Column-major: index `x * height + y`.
    cells: Vec<Option<ContentTag>>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "grid must not be empty");
        Self {
            width,
            height,
            cells: vec![None; usize::from(width) * usize::from(height)],
        }
    }

    /// Number of columns.
    #[must_use]
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Position of `c` in the column-major cell vector.
    #[inline]
    pub(crate) fn index(&self, c: Coordinate) -> Option<usize> {
        let x = u16::try_from(c.x).ok().filter(|&x| x < self.width)?;
        let y = u16::try_from(c.y).ok().filter(|&y| y < self.height)?;
        Some(usize::from(x) * usize::from(self.height) + usize::from(y))
    }

    /// Returns `true` iff `0 <= x < width` and `0 <= y < height`.
    #[must_use]
    #[inline]
    pub fn is_inside(&self, c: Coordinate) -> bool {
        self.index(c).is_some()
    }

    /// Returns `true` iff the cell is inside the board and unoccupied.
    #[must_use]
    #[inline]
    pub fn is_empty(&self, c: Coordinate) -> bool {
        self.index(c).is_some_and(|i| self.cells[i].is_none())
    }

    /// Returns the tag of an occupied cell.
    #[must_use]
    #[inline]
    pub fn tag(&self, c: Coordinate) -> Option<ContentTag> {
        self.index(c).and_then(|i| self.cells[i])
    }

    /// Returns `true` iff every cell is inside the board and empty.
    ///
    /// An empty slice is vacuously placeable.
    #[must_use]
    pub fn can_place(&self, cells: &[Coordinate]) -> bool {
        cells.iter().all(|&c| self.is_empty(c))
    }

    /// Writes `tag` into every cell.
    ///
    /// The caller must have checked [`Grid::can_place`]; placement is not
    /// re-validated as a recoverable condition.
    ///
    /// # Panics
    ///
    /// Panics if a cell is outside the board or already occupied. Either
    /// means two placements raced for the same cells or the caller skipped
    /// validation.
    pub fn place(&mut self, cells: &[Coordinate], tag: ContentTag) {
        for &c in cells {
            let Some(i) = self.index(c) else {
                panic!("cannot place at {c}: outside the {}x{} board", self.width, self.height);
            };
            assert!(self.cells[i].is_none(), "cannot place at {c}: cell is occupied");
            self.cells[i] = Some(tag);
        }
    }

    /// Empties every given cell. Cells that are empty or outside the board
    /// are ignored.
    pub fn clear<'a, I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        for &c in cells {
            if let Some(i) = self.index(c) {
                self.cells[i] = None;
            }
        }
    }

    /// Empties the whole board.
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// Returns every occupied cell with its tag, column by column.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Coordinate, ContentTag)> + '_ {
        self.all_coordinates()
            .zip(&self.cells)
            .filter_map(|(c, tag)| tag.map(|tag| (c, tag)))
    }

    /// Returns every coordinate on the board, column by column.
    pub fn all_coordinates(&self) -> impl Iterator<Item = Coordinate> + use<> {
        let width = i32::from(self.width);
        let height = i32::from(self.height);
        (0..width).flat_map(move |x| (0..height).map(move |y| Coordinate::new(x, y)))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Returns `true` if every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Serializes the occupied cells.
    ///
    /// Tags missing from `palette` cannot be named and are left out.
    #[must_use]
    pub fn snapshot(&self, palette: &Palette) -> PersistedBoard {
        let placed_cells = self
            .occupied_cells()
            .filter_map(|(c, tag)| {
                let Some(id) = palette.id_of(tag) else {
                    log::warn!("{tag} at {c} is not in the palette; leaving it out of the snapshot");
                    return None;
                };
                Some(PersistedCell {
                    x: c.x,
                    y: c.y,
                    tag_id: id.to_owned(),
                })
            })
            .collect();
        PersistedBoard { placed_cells }
    }

    /// Replaces the occupancy with the contents of `board`.
    ///
    /// Cells with an unknown tag id, out-of-bounds coordinates, or a
    /// coordinate already restored are skipped so that a partially corrupt
    /// snapshot still yields a playable board.
    pub fn restore(&mut self, board: &PersistedBoard, palette: &Palette) -> RestoreSummary {
        self.clear_all();
        let mut summary = RestoreSummary::default();
        for cell in &board.placed_cells {
            let c = Coordinate::new(cell.x, cell.y);
            let Some(tag) = palette.tag_for_id(&cell.tag_id) else {
                log::warn!("skipping persisted cell {c}: unknown tag id {:?}", cell.tag_id);
                summary.skipped += 1;
                continue;
            };
            let Some(i) = self.index(c) else {
                log::warn!("skipping persisted cell {c}: outside the board");
                summary.skipped += 1;
                continue;
            };
            if self.cells[i].is_some() {
                log::warn!("skipping persisted cell {c}: duplicated");
                summary.skipped += 1;
                continue;
            }
            self.cells[i] = Some(tag);
            summary.restored += 1;
        }
        summary
    }
}

/// Errors returned when parsing a [`Grid`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    /// The text has no rows.
    #[display("grid text has no rows")]
    Empty,
    /// A row has a different length than the first row.
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Row index (`y`).
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// The grid does not fit in `u16` dimensions.
    #[display("grid is too large")]
    TooLarge,
    /// An unrecognized cell character.
    #[display("invalid cell character {ch:?}")]
    InvalidChar {
        /// The offending character.
        ch: char,
    },
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().ok_or(GridParseError::Empty)?.chars().count();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        let w = u16::try_from(width).map_err(|_| GridParseError::TooLarge)?;
        let h = u16::try_from(rows.len()).map_err(|_| GridParseError::TooLarge)?;
        let mut grid = Grid::new(w, h);
        for (y, line) in (0..).zip(&rows) {
            for (x, ch) in (0..).zip(line.chars()) {
                let tag = match ch {
                    '.' => continue,
                    '#' => ContentTag::new(0),
                    _ => match ch.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        Some(index) => ContentTag::new(index),
                        None => return Err(GridParseError::InvalidChar { ch }),
                    },
                };
                grid.place(&[Coordinate::new(x, y)], tag);
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..i32::from(self.height) {
            for x in 0..i32::from(self.width) {
                let ch = match self.tag(Coordinate::new(x, y)) {
                    None => '.',
                    Some(tag) if tag.index() < 10 => char::from(b'0' + tag.index()),
                    Some(_) => '#',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_is_inside_bounds() {
        let grid = Grid::new(8, 6);
        assert!(grid.is_inside(c(0, 0)));
        assert!(grid.is_inside(c(7, 5)));
        assert!(!grid.is_inside(c(8, 0)));
        assert!(!grid.is_inside(c(0, 6)));
        assert!(!grid.is_inside(c(-1, 3)));
        assert!(!grid.is_inside(c(3, -1)));
        assert!(!grid.is_empty(c(-1, 0)));
    }

    #[test]
    fn test_can_place_empty_input_is_vacuous() {
        let grid: Grid = "##\n##".parse().unwrap();
        assert!(grid.is_full());
        assert!(grid.can_place(&[]));
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds_and_occupied() {
        let grid: Grid = "
            #...
            ....
        "
        .parse()
        .unwrap();
        assert!(grid.can_place(&[c(1, 0), c(1, 1)]));
        assert!(!grid.can_place(&[c(0, 0), c(1, 0)]));
        assert!(!grid.can_place(&[c(3, 1), c(4, 1)]));
    }

    #[test]
    #[should_panic(expected = "cell is occupied")]
    fn test_place_into_occupied_cell_panics() {
        let mut grid = Grid::new(4, 4);
        grid.place(&[c(1, 1)], ContentTag::new(0));
        grid.place(&[c(1, 1)], ContentTag::new(1));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_place_outside_panics() {
        let mut grid = Grid::new(4, 4);
        grid.place(&[c(4, 0)], ContentTag::new(0));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut grid = Grid::new(4, 4);
        grid.place(&[c(0, 0), c(1, 0)], ContentTag::new(3));
        grid.clear(&[c(0, 0), c(2, 2), c(9, 9)]);
        grid.clear(&[c(0, 0)]);
        assert_eq!(
            grid.occupied_cells().collect::<Vec<_>>(),
            vec![(c(1, 0), ContentTag::new(3))]
        );
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let palette = Palette::default();
        let grid: Grid = "
            01..
            ..62
        "
        .parse()
        .unwrap();
        let snapshot = grid.snapshot(&palette);
        assert_eq!(snapshot.placed_cells.len(), 4);

        let mut restored = Grid::new(4, 2);
        restored.place(&[c(3, 0)], ContentTag::new(5));
        let summary = restored.restore(&snapshot, &palette);
        assert_eq!(summary, RestoreSummary { restored: 4, skipped: 0 });
        assert_eq!(restored, grid);
    }

    #[test]
    fn test_restore_skips_bad_cells() {
        let palette = Palette::default();
        let board = PersistedBoard {
            placed_cells: vec![
                PersistedCell { x: 0, y: 0, tag_id: "red".into() },
                PersistedCell { x: 1, y: 0, tag_id: "mauve".into() },
                PersistedCell { x: 8, y: 0, tag_id: "red".into() },
                PersistedCell { x: 0, y: 0, tag_id: "blue".into() },
                PersistedCell { x: 2, y: 3, tag_id: "blue".into() },
            ],
        };
        let mut grid = Grid::new(8, 8);
        let summary = grid.restore(&board, &palette);
        assert_eq!(summary, RestoreSummary { restored: 2, skipped: 3 });
        assert_eq!(grid.tag(c(0, 0)), palette.tag_for_id("red"));
        assert_eq!(grid.tag(c(2, 3)), palette.tag_for_id("blue"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(GridParseError::Empty));
        assert_eq!(
            "..\n...".parse::<Grid>(),
            Err(GridParseError::RaggedRow { row: 1, expected: 2, found: 3 })
        );
        assert_eq!(
            ".x".parse::<Grid>(),
            Err(GridParseError::InvalidChar { ch: 'x' })
        );
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1u16..=10, 1u16..=10)
            .prop_flat_map(|(w, h)| {
                let n = usize::from(w) * usize::from(h);
                (Just(w), Just(h), prop::collection::vec(any::<bool>(), n))
            })
            .prop_map(|(w, h, occupied)| {
                let mut grid = Grid::new(w, h);
                let cells: Vec<_> = grid
                    .all_coordinates()
                    .zip(occupied)
                    .filter_map(|(c, o)| o.then_some(c))
                    .collect();
                grid.place(&cells, ContentTag::new(1));
                grid
            })
    }

    /// A grid and a subset of its empty cells.
    fn arb_grid_with_empty_cells() -> impl Strategy<Value = (Grid, Vec<Coordinate>)> {
        arb_grid().prop_flat_map(|grid| {
            let empty: Vec<_> = grid.all_coordinates().filter(|&c| grid.is_empty(c)).collect();
            let len = empty.len();
            (Just(grid), prop::sample::subsequence(empty, 0..=len))
        })
    }

    proptest! {
        #[test]
        fn prop_can_place_iff_all_inside_and_empty(
            grid in arb_grid(),
            cells in prop::collection::vec((-2i32..12, -2i32..12), 1..8),
        ) {
            let cells: Vec<_> = cells.into_iter().map(Coordinate::from).collect();
            let expected = cells.iter().all(|&c| {
                (0..i32::from(grid.width())).contains(&c.x)
                    && (0..i32::from(grid.height())).contains(&c.y)
                    && grid.tag(c).is_none()
            });
            prop_assert_eq!(grid.can_place(&cells), expected);
        }

        #[test]
        fn prop_place_then_clear_restores_grid((grid, cells) in arb_grid_with_empty_cells()) {
            prop_assert!(grid.can_place(&cells));
            let mut placed = grid.clone();
            placed.place(&cells, ContentTag::new(4));
            prop_assert_eq!(placed.occupied_count(), grid.occupied_count() + cells.len());
            placed.clear(&cells);
            prop_assert_eq!(placed, grid);
        }
    }
}
