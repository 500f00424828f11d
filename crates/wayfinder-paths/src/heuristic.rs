use wayfinder_core::{Board, Coord};

/// Estimate of the remaining cost between two cells, in steps.
///
/// Implementations must be symmetric, zero exactly when `from == to`, and
/// never overestimate the number of orthogonal steps between the cells.
pub trait Heuristic {
    fn estimate(&self, from: Coord, to: Coord) -> f64;
}

impl<F: Fn(Coord, Coord) -> f64> Heuristic for F {
    #[inline]
    fn estimate(&self, from: Coord, to: Coord) -> f64 {
        self(from, to)
    }
}

/// The built-in heuristics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Metric {
    /// Straight-line distance between the cells' pixel-space origins for a
    /// board drawn with `cell_width`-pixel cells, divided by the cell width
    /// so it is measured in steps. The scale cancels out: the value equals
    /// the straight-line distance between the cells' row/col indices.
    Euclidean { cell_width: f64 },
    /// Orthogonal step count; exact on an open board.
    Manhattan,
}

impl Metric {
    /// Euclidean metric for `cell_width`-pixel cells. Non-positive or
    /// non-finite widths fall back to 1.
    pub fn euclidean(cell_width: f64) -> Self {
        let cell_width = if cell_width.is_finite() && cell_width > 0.0 {
            cell_width
        } else {
            1.0
        };
        Self::Euclidean { cell_width }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Self::euclidean(1.0)
    }
}

impl Heuristic for Metric {
    fn estimate(&self, from: Coord, to: Coord) -> f64 {
        match *self {
            Self::Euclidean { cell_width } => {
                let (x1, y1) = Board::pixel_origin(from, cell_width);
                let (x2, y2) = Board::pixel_origin(to, cell_width);
                (x1 - x2).hypot(y1 - y2) / cell_width
            }
            Self::Manhattan => from.manhattan(to) as f64,
        }
    }
}
