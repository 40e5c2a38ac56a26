use blastgrid_core::{Coordinate, Grid, Shape, ShapeCatalog, ShapeId};

/// Returns `true` if `shape` fits with its origin at `origin`.
///
/// Every translated cell must be inside the board and empty.
#[must_use]
#[inline]
pub fn can_place_shape_at(grid: &Grid, shape: &Shape, origin: Coordinate) -> bool {
    shape
        .cells_at(origin)
        .is_some_and(|mut cells| cells.all(|c| grid.is_empty(c)))
}

/// Returns every origin at which `shape` can be placed, row by row.
///
/// Origins that would push the shape's bounding box off the board are never
/// tried.
pub fn valid_origins<'a>(
    grid: &'a Grid,
    shape: &'a Shape,
) -> impl Iterator<Item = Coordinate> + 'a {
    let max_x = i32::from(grid.width()) - shape.width();
    let max_y = i32::from(grid.height()) - shape.height();
    (0..=max_y)
        .flat_map(move |y| (0..=max_x).map(move |x| Coordinate::new(x, y)))
        .filter(move |&origin| can_place_shape_at(grid, shape, origin))
}

/// Returns `true` if at least one of `shapes` fits somewhere on the board.
///
/// Stops at the first legal placement. An empty `shapes` is never
/// placeable.
///
/// # Examples
///
/// ```
/// use blastgrid_core::{Grid, ShapeCatalog, ShapeId};
/// use blastgrid_solver::any_placeable;
///
/// let catalog = ShapeCatalog::standard();
/// let bar = &catalog[ShapeId::new(3)];
///
/// let grid: Grid = "
///     ...0
///     00.0
/// "
/// .parse()?;
/// assert!(!any_placeable(&grid, [bar]));
/// assert!(any_placeable(&grid, [bar, &catalog[ShapeId::new(0)]]));
/// # Ok::<(), blastgrid_core::GridParseError>(())
/// ```
pub fn any_placeable<'a, I>(grid: &Grid, shapes: I) -> bool
where
    I: IntoIterator<Item = &'a Shape>,
{
    shapes
        .into_iter()
        .any(|shape| valid_origins(grid, shape).next().is_some())
}

/// Returns the ids of every catalog shape that fits somewhere on the board,
/// in catalog order.
#[must_use]
pub fn all_valid_shape_indices(grid: &Grid, catalog: &ShapeCatalog) -> Vec<ShapeId> {
    catalog
        .iter()
        .filter(|(_, shape)| valid_origins(grid, shape).next().is_some())
        .map(|(id, _)| id)
        .collect()
}
