//! Integer board coordinates

use core::fmt;
use core::ops::{Add, AddAssign, Sub};

/// A cell position (or offset) on a board.
///
/// `x` is the column, `y` is the row. Rows grow downwards, so `(0, 0)` is the
/// top-left cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Coord {
    /// The origin `(0, 0)`
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a coordinate from a column and a row
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a coordinate from `(row, column)` indices
    #[inline]
    pub const fn from_row_col(row: usize, col: usize) -> Self {
        Self {
            x: col as i32,
            y: row as i32,
        }
    }

    /// Row index, if non-negative
    #[inline]
    pub fn row(&self) -> Option<usize> {
        usize::try_from(self.y).ok()
    }

    /// Column index, if non-negative
    #[inline]
    pub fn col(&self) -> Option<usize> {
        usize::try_from(self.x).ok()
    }

    /// Component-wise addition, `None` if either axis overflows
    #[inline]
    pub fn checked_add(self, rhs: Coord) -> Option<Coord> {
        Some(Coord::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: Coord) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_translation() {
        let anchor = Coord::new(2, 3);
        assert_eq!(anchor + Coord::new(1, 1), Coord::new(3, 4));
        assert_eq!(Coord::new(3, 4) - anchor, Coord::new(1, 1));
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Coord::new(1, 2).checked_add(Coord::new(3, 4)), Some(Coord::new(4, 6)));
        assert_eq!(Coord::new(i32::MAX, 0).checked_add(Coord::new(1, 0)), None);
        assert_eq!(Coord::new(0, i32::MIN).checked_add(Coord::new(0, -1)), None);
    }

    #[test]
    fn test_row_col() {
        let c = Coord::from_row_col(4, 7);
        assert_eq!(c, Coord::new(7, 4));
        assert_eq!(c.row(), Some(4));
        assert_eq!(c.col(), Some(7));
        assert_eq!(Coord::new(-1, 0).col(), None);
    }
}
