//! Grid coordinates: [`Coord`].

use std::fmt;
use std::ops::{Add, Sub};

/// A cell coordinate on a square board. Rows grow downwards, columns grow
/// to the right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in search order: up, down, left, right.
    ///
    /// The order decides which of several equal-cost relaxations wins, so it
    /// must not change.
    #[inline]
    pub const fn neighbors_4(self) -> [Coord; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// Number of orthogonal steps between `self` and `other`.
    #[inline]
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_up_down_left_right() {
        let c = Coord::new(3, 5);
        assert_eq!(
            c.neighbors_4(),
            [
                Coord::new(2, 5),
                Coord::new(4, 5),
                Coord::new(3, 4),
                Coord::new(3, 6),
            ]
        );
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 2), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 0)]);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Coord::new(0, 0).manhattan(Coord::new(4, 4)), 8);
        assert_eq!(Coord::new(2, 1).manhattan(Coord::new(2, 1)), 0);
        assert_eq!(Coord::new(-1, 3).manhattan(Coord::new(1, 0)), 5);
    }

    #[test]
    fn arithmetic() {
        let a = Coord::new(2, 3);
        let b = Coord::new(1, 1);
        assert_eq!(a + b, Coord::new(3, 4));
        assert_eq!(a - b, Coord::new(1, 2));
        assert_eq!(a.to_string(), "(2, 3)");
    }
}
