//! Polyomino shapes and the shape catalog.
//!
//! A [`Shape`] is an ordered list of cell offsets normalized so that its
//! smallest `x` and smallest `y` are both `0`. Blocks refer to shapes through
//! a [`ShapeId`] into a [`ShapeCatalog`].

use std::ops::Index;

use serde::{Deserialize, Serialize};
use tinyvec::TinyVec;

use crate::Coordinate;

/// Errors returned when constructing shapes or catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    /// A shape must contain at least one cell.
    #[display("shape has no cells")]
    EmptyShape,
    /// The same offset appeared twice.
    #[display("shape contains duplicate cell {cell}")]
    DuplicateCell {
        /// The repeated (normalized) offset.
        cell: Coordinate,
    },
    /// The offsets span more than `i32` coordinates can hold.
    #[display("shape offsets are too far apart")]
    TooLarge,
    /// A catalog must contain at least one shape.
    #[display("shape catalog is empty")]
    EmptyCatalog,
}

/// An immutable polyomino.
///
/// # Examples
///
/// ```
/// use blastgrid_core::{Coordinate, Shape};
///
/// // Offsets are normalized to start at (0, 0).
/// let shape = Shape::new([Coordinate::new(3, 5), Coordinate::new(4, 5)]);
/// assert_eq!(shape.cells(), &[Coordinate::new(0, 0), Coordinate::new(1, 0)]);
/// assert_eq!((shape.width(), shape.height()), (2, 1));
///
/// let placed: Vec<_> = shape.cells_at(Coordinate::new(6, 2)).unwrap().collect();
/// assert_eq!(placed, vec![Coordinate::new(6, 2), Coordinate::new(7, 2)]);
///
/// // The far edge would not be representable.
/// assert!(shape.cells_at(Coordinate::new(i32::MAX, 0)).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: TinyVec<[Coordinate; 8]>,
    width: i32,
    height: i32,
}

impl Shape {
    /// Creates a shape from cell offsets, normalizing them.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty or contains duplicates. Use [`Shape::try_new`]
    /// for offsets that are not known to be valid.
    #[must_use]
    pub fn new<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        match Self::try_new(cells) {
            Ok(shape) => shape,
            Err(e) => panic!("invalid shape: {e}"),
        }
    }

    /// Creates a shape from cell offsets, normalizing them.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::EmptyShape`] if `cells` is empty,
    /// [`ShapeError::DuplicateCell`] if an offset is repeated, and
    /// [`ShapeError::TooLarge`] if the offsets span more than `i32` can hold.
    pub fn try_new<I>(cells: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let raw: TinyVec<[Coordinate; 8]> = cells.into_iter().collect();
        let min_x = raw.iter().map(|c| c.x).min().ok_or(ShapeError::EmptyShape)?;
        let min_y = raw.iter().map(|c| c.y).min().ok_or(ShapeError::EmptyShape)?;
        let base = Coordinate::new(min_x, min_y);

        let mut normalized: TinyVec<[Coordinate; 8]> = TinyVec::new();
        for c in raw {
            let cell = c.checked_sub(base).ok_or(ShapeError::TooLarge)?;
            if normalized.contains(&cell) {
                return Err(ShapeError::DuplicateCell { cell });
            }
            normalized.push(cell);
        }

        let span = |max: Option<i32>| max.unwrap_or(0).checked_add(1).ok_or(ShapeError::TooLarge);
        let width = span(normalized.iter().map(|c| c.x).max())?;
        let height = span(normalized.iter().map(|c| c.y).max())?;
        Ok(Self {
            cells: normalized,
            width,
            height,
        })
    }

    /// Returns the normalized offsets in their original order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// Returns the number of cells.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; shapes have at least one cell.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width of the bounding box.
    #[must_use]
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the bounding box.
    #[must_use]
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the board cells covered when the shape's `(0, 0)` sits at `origin`.
    ///
    /// Returns `None` if some covered cell lies beyond the `i32` range.
    #[must_use]
    pub fn cells_at(
        &self,
        origin: Coordinate,
    ) -> Option<impl ExactSizeIterator<Item = Coordinate> + '_> {
        // Offsets lie inside the bounding box, so the far corner bounds them all.
        origin.checked_add(Coordinate::new(self.width - 1, self.height - 1))?;
        Some(self.cells.iter().map(move |&offset| origin + offset))
    }

    /// Recognizes `cells` as a translated copy of this shape.
    ///
    /// Returns the origin the shape was translated to, or `None` if `cells`
    /// are not exactly this shape (in any order). Cells spread further apart
    /// than `i32` can express never match.
    ///
    /// # Examples
    ///
    /// ```
    /// use blastgrid_core::{Coordinate, Shape};
    ///
    /// let domino = Shape::new([Coordinate::new(0, 0), Coordinate::new(0, 1)]);
    /// let cells = [Coordinate::new(5, 3), Coordinate::new(5, 2)];
    /// assert_eq!(domino.origin_of(&cells), Some(Coordinate::new(5, 2)));
    /// assert_eq!(domino.origin_of(&cells[..1]), None);
    /// ```
    #[must_use]
    pub fn origin_of(&self, cells: &[Coordinate]) -> Option<Coordinate> {
        if cells.len() != self.cells.len() {
            return None;
        }
        let origin = Coordinate::new(
            cells.iter().map(|c| c.x).min()?,
            cells.iter().map(|c| c.y).min()?,
        );

        let mut translated = cells
            .iter()
            .map(|&c| c.checked_sub(origin))
            .collect::<Option<Vec<_>>>()?;
        translated.sort_unstable();
        let mut own = self.cells.to_vec();
        own.sort_unstable();
        (translated == own).then_some(origin)
    }
}

/// Index of a shape inside a [`ShapeCatalog`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("shape#{_0}")]
pub struct ShapeId(usize);

impl ShapeId {
    /// Creates an id from a catalog index.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the catalog index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The fixed list of shapes blocks are drawn from.
///
/// # Examples
///
/// ```
/// use blastgrid_core::{ShapeCatalog, ShapeId};
///
/// let catalog = ShapeCatalog::standard();
/// assert_eq!(catalog.len(), 6);
/// assert_eq!(catalog[ShapeId::new(0)].len(), 1); // single cell
/// assert_eq!(catalog[ShapeId::new(5)].len(), 6); // 3x2 block
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShapeCatalog {
    /// Offsets of the standard catalog, easiest first.
    const STANDARD: [&'static [(i32, i32)]; 6] = [
        // single cell
        &[(0, 0)],
        // 2x2 square
        &[(0, 0), (1, 0), (0, 1), (1, 1)],
        // L
        &[(0, 0), (0, 1), (0, 2), (1, 0)],
        // 4-in-a-row
        &[(0, 0), (1, 0), (2, 0), (3, 0)],
        // S/Z
        &[(0, 0), (1, 0), (1, 1), (2, 1)],
        // 3x2 block
        &[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)],
    ];

    /// Creates a catalog from a list of shapes.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::EmptyCatalog`] if `shapes` is empty.
    pub fn new(shapes: Vec<Shape>) -> Result<Self, ShapeError> {
        if shapes.is_empty() {
            return Err(ShapeError::EmptyCatalog);
        }
        Ok(Self { shapes })
    }

    /// Returns the six-shape catalog used by the game.
    #[must_use]
    pub fn standard() -> Self {
        let shapes = Self::STANDARD
            .iter()
            .map(|offsets| Shape::new(offsets.iter().copied().map(Coordinate::from)))
            .collect();
        Self { shapes }
    }

    /// Returns the shape with the given id, if it exists.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.index())
    }

    /// Returns the number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Always `false` for catalogs built through the public constructors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Returns every id in catalog order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = ShapeId> + use<> {
        (0..self.shapes.len()).map(ShapeId::new)
    }

    /// Returns `(id, shape)` pairs in catalog order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ShapeId, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| (ShapeId::new(i), shape))
    }
}

impl Index<ShapeId> for ShapeCatalog {
    type Output = Shape;

    fn index(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_offsets() {
        let shape = Shape::new([
            Coordinate::new(-2, 4),
            Coordinate::new(-1, 4),
            Coordinate::new(-1, 5),
        ]);
        assert_eq!(
            shape.cells(),
            &[
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1),
            ]
        );
        assert_eq!(shape.width(), 2);
        assert_eq!(shape.height(), 2);
    }

    #[test]
    fn test_try_new_rejects_invalid_offsets() {
        assert_eq!(
            Shape::try_new(Vec::<Coordinate>::new()),
            Err(ShapeError::EmptyShape)
        );
        assert_eq!(
            Shape::try_new([Coordinate::new(1, 1), Coordinate::new(1, 1)]),
            Err(ShapeError::DuplicateCell {
                cell: Coordinate::ORIGIN
            })
        );
    }

    #[test]
    fn test_standard_catalog_shapes() {
        let catalog = ShapeCatalog::standard();
        let sizes: Vec<_> = catalog.iter().map(|(_, s)| s.len()).collect();
        assert_eq!(sizes, vec![1, 4, 4, 4, 4, 6]);

        let bar = &catalog[ShapeId::new(3)];
        assert_eq!((bar.width(), bar.height()), (4, 1));
        let block = &catalog[ShapeId::new(5)];
        assert_eq!((block.width(), block.height()), (3, 2));
    }

    #[test]
    fn test_origin_of_ignores_order_but_not_shape() {
        let catalog = ShapeCatalog::standard();
        let l = &catalog[ShapeId::new(2)];

        let mut cells: Vec<_> = l.cells_at(Coordinate::new(3, 1)).unwrap().collect();
        cells.reverse();
        assert_eq!(l.origin_of(&cells), Some(Coordinate::new(3, 1)));

        // Mirrored L is a different shape.
        let mirrored = [
            Coordinate::new(1, 0),
            Coordinate::new(1, 1),
            Coordinate::new(1, 2),
            Coordinate::new(0, 0),
        ];
        assert_eq!(l.origin_of(&mirrored), None);

        // Repeated cells never match.
        let repeated = [Coordinate::ORIGIN; 4];
        assert_eq!(l.origin_of(&repeated), None);
    }

    #[test]
    fn test_cells_at_near_coordinate_limits() {
        let bar = Shape::new((0..4).map(|x| Coordinate::new(x, 0)));
        let last: Vec<_> = bar.cells_at(Coordinate::new(i32::MAX - 3, 0)).unwrap().collect();
        assert_eq!(last.last(), Some(&Coordinate::new(i32::MAX, 0)));
        assert!(bar.cells_at(Coordinate::new(i32::MAX - 2, 0)).is_none());
        assert!(bar.cells_at(Coordinate::new(0, i32::MAX)).is_some());
        assert_eq!(bar.cells_at(Coordinate::new(i32::MIN, i32::MIN)).unwrap().len(), 4);
    }

    #[test]
    fn test_origin_of_far_apart_cells() {
        let domino = Shape::new([Coordinate::ORIGIN, Coordinate::new(1, 0)]);
        let cells = [Coordinate::new(i32::MIN, 0), Coordinate::new(i32::MAX, 0)];
        assert_eq!(domino.origin_of(&cells), None);
        assert_eq!(Shape::try_new(cells), Err(ShapeError::TooLarge));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert_eq!(ShapeCatalog::new(vec![]), Err(ShapeError::EmptyCatalog));
        let catalog = ShapeCatalog::new(vec![Shape::new([Coordinate::ORIGIN])]).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec![ShapeId::new(0)]);
    }
}
