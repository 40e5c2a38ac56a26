//! Full row and column detection.
//!
//! [`compute_full_lines`] evaluates a placement and the clear it causes
//! together: the cells about to be placed are treated as already present, so
//! the drag preview and the committed result always agree.

use std::collections::BTreeSet;

use crate::{Coordinate, Grid};

/// Cells that belong to a full row or a full column.
///
/// A cell at the intersection of a full row and a full column is included
/// once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WillClearSet {
    rows: Vec<i32>,
    columns: Vec<i32>,
    cells: BTreeSet<Coordinate>,
}

impl WillClearSet {
    /// Indices (`y`) of full rows, ascending.
    #[must_use]
    pub fn rows(&self) -> &[i32] {
        &self.rows
    }

    /// Indices (`x`) of full columns, ascending.
    #[must_use]
    pub fn columns(&self) -> &[i32] {
        &self.columns
    }

    /// Number of full lines (rows plus columns).
    ///
    /// This drives scoring; it is not the number of cells.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    /// The distinct cells to clear.
    #[must_use]
    pub fn cells(&self) -> &BTreeSet<Coordinate> {
        &self.cells
    }

    /// Number of distinct cells to clear.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no line is full.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `c` will be cleared.
    #[must_use]
    pub fn contains(&self, c: Coordinate) -> bool {
        self.cells.contains(&c)
    }

    /// Keeps only the lines that are still fully occupied in `grid`.
    ///
    /// A set computed before a placement may be applied after other clears
    /// have already emptied some of its lines; those lines are dropped so
    /// they are neither cleared nor scored twice.
    #[must_use]
    pub fn still_full_in(&self, grid: &Grid) -> WillClearSet {
        let width = i32::from(grid.width());
        let height = i32::from(grid.height());
        let occupied = |c: Coordinate| grid.tag(c).is_some();

        let rows: Vec<i32> = self
            .rows
            .iter()
            .copied()
            .filter(|&y| (0..width).all(|x| occupied(Coordinate::new(x, y))))
            .collect();
        let columns: Vec<i32> = self
            .columns
            .iter()
            .copied()
            .filter(|&x| (0..height).all(|y| occupied(Coordinate::new(x, y))))
            .collect();
        Self::from_lines(rows, columns, width, height)
    }

    fn from_lines(rows: Vec<i32>, columns: Vec<i32>, width: i32, height: i32) -> Self {
        let mut cells = BTreeSet::new();
        for &y in &rows {
            cells.extend((0..width).map(|x| Coordinate::new(x, y)));
        }
        for &x in &columns {
            cells.extend((0..height).map(|y| Coordinate::new(x, y)));
        }
        Self {
            rows,
            columns,
            cells,
        }
    }
}

/// Computes the cells of every row and column that would be full once
/// `hypothetical` cells are occupied.
///
/// Hypothetical cells outside the board are ignored. The grid is not
/// modified.
///
/// # Examples
///
/// ```
/// use blastgrid_core::{Coordinate, Grid, compute_full_lines};
///
/// let grid = Grid::new(8, 8);
/// let row: Vec<_> = (0..8).map(|x| Coordinate::new(x, 2)).collect();
/// let column: Vec<_> = (0..8).map(|y| Coordinate::new(5, y)).collect();
///
/// let both: Vec<_> = row.iter().chain(&column).copied().collect();
/// let will_clear = compute_full_lines(&grid, &both);
/// assert_eq!(will_clear.line_count(), 2);
/// assert_eq!(will_clear.len(), 15); // (5, 2) counted once
/// ```
#[must_use]
pub fn compute_full_lines(grid: &Grid, hypothetical: &[Coordinate]) -> WillClearSet {
    let width = i32::from(grid.width());
    let height = i32::from(grid.height());

    let mut filled: Vec<bool> = grid.all_coordinates().map(|c| !grid.is_empty(c)).collect();
    for &c in hypothetical {
        if let Some(i) = grid.index(c) {
            filled[i] = true;
        }
    }
    let is_filled = |x: i32, y: i32| grid.index(Coordinate::new(x, y)).is_some_and(|i| filled[i]);

    let rows: Vec<i32> = (0..height)
        .filter(|&y| (0..width).all(|x| is_filled(x, y)))
        .collect();
    let columns: Vec<i32> = (0..width)
        .filter(|&x| (0..height).all(|y| is_filled(x, y)))
        .collect();

    WillClearSet::from_lines(rows, columns, width, height)
}
