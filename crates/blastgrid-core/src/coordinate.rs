//! Board coordinates.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
///
/// Coordinates are 0-based with `x` growing to the right and `y` growing
/// upwards. They are signed so that candidate cells hanging off the board
/// (for example while a block is dragged past the edge) can be represented
/// and rejected by bounds checks instead of wrapping.
///
/// # Examples
///
/// ```
/// use blastgrid_core::Coordinate;
///
/// let origin = Coordinate::new(2, 3);
/// let offset = Coordinate::new(1, 0);
/// assert_eq!(origin + offset, Coordinate::new(3, 3));
/// assert_eq!((origin + offset) - origin, offset);
/// ```
#[derive(
    Debug,
    Default,
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
#[display("({x}, {y})")]
pub struct Coordinate {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Coordinate {
    /// The `(0, 0)` coordinate.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a coordinate.
    #[must_use]
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Adds `rhs` componentwise, returning `None` on overflow.
    #[must_use]
    #[inline]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match (self.x.checked_add(rhs.x), self.y.checked_add(rhs.y)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }

    /// Subtracts `rhs` componentwise, returning `None` on overflow.
    #[must_use]
    #[inline]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match (self.x.checked_sub(rhs.x), self.y.checked_sub(rhs.y)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }
}

impl Add for Coordinate {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
