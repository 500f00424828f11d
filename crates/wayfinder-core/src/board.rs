//! The [`Board`] type: the N×N grid model that the search runs on.
//!
//! A board owns one [`CellState`] per cell, stored row-major in a flat
//! vector. It keeps track of its Start and End cells so that at most one of
//! each exists at any time.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::geom::Coord;

// ---------------------------------------------------------------------------
// CellState
// ---------------------------------------------------------------------------

/// Logical state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    /// Excluded from the traversable graph.
    Obstacle,
    Start,
    End,
    /// Discovered by the search but not yet expanded.
    Frontier,
    /// Expanded by the search.
    Visited,
    /// Part of the reconstructed path.
    Path,
}

impl CellState {
    /// Whether this state is one the search paints (Frontier, Visited, Path).
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Frontier | Self::Visited | Self::Path)
    }

    /// Whether this state is one of the two unique endpoint markers.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Obstacle => "obstacle",
            Self::Start => "start",
            Self::End => "end",
            Self::Frontier => "frontier",
            Self::Visited => "visited",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// BoardError
// ---------------------------------------------------------------------------

/// A rejected board edit. The board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),
    #[error("cannot place an obstacle on the {state} cell at {at}")]
    Protected { at: Coord, state: CellState },
    #[error("the board already has a {state} cell at {existing}")]
    DuplicateMarker { state: CellState, existing: Coord },
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A square grid of [`CellState`]s with a fixed side length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<CellState>,
    size: i32,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Board {
    /// Create a `size`×`size` board with every cell Empty. Negative sizes
    /// give an empty board.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            cells: vec![CellState::Empty; (size as usize) * (size as usize)],
            size,
            start: None,
            end: None,
        }
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells (N²).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies in `[0, N)` on both axes.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.col >= 0 && c.row < self.size && c.col < self.size
    }

    /// Flat row-major index of `c`, or `None` when out of range.
    #[inline]
    pub fn idx(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.size as usize + c.col as usize)
    }

    /// Inverse of [`idx`](Board::idx).
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord {
        let n = self.size.max(1) as usize;
        Coord::new((idx / n) as i32, (idx % n) as i32)
    }

    /// State of the cell at `c`, or `None` when out of range.
    #[inline]
    pub fn state(&self, c: Coord) -> Option<CellState> {
        self.idx(c).map(|i| self.cells[i])
    }

    /// The Start cell, if one is marked.
    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    /// The End cell, if one is marked.
    #[inline]
    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// Append the traversable neighbours of `c` to `buf`, in the fixed order
    /// up, down, left, right. Out-of-range and Obstacle cells are skipped.
    /// The caller clears `buf` before calling.
    pub fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        for n in c.neighbors_4() {
            match self.state(n) {
                Some(CellState::Obstacle) | None => {}
                Some(_) => buf.push(n),
            }
        }
    }

    /// Overwrite the state of the cell at `c`.
    ///
    /// Rejected without mutation when `c` is out of range, when an Obstacle
    /// would cover the Start or End cell, or when a second Start or End would
    /// be created. Overwriting the Start (End) cell with anything else
    /// unmarks it.
    pub fn set_state(&mut self, c: Coord, state: CellState) -> Result<(), BoardError> {
        let i = self.idx(c).ok_or(BoardError::OutOfBounds(c))?;
        let current = self.cells[i];

        if state == CellState::Obstacle && current.is_endpoint() {
            return Err(BoardError::Protected { at: c, state: current });
        }
        let existing = match state {
            CellState::Start => self.start,
            CellState::End => self.end,
            _ => None,
        };
        if let Some(existing) = existing.filter(|&e| e != c) {
            return Err(BoardError::DuplicateMarker { state, existing });
        }

        match current {
            CellState::Start => self.start = None,
            CellState::End => self.end = None,
            _ => {}
        }
        match state {
            CellState::Start => self.start = Some(c),
            CellState::End => self.end = Some(c),
            _ => {}
        }
        self.cells[i] = state;
        Ok(())
    }

    /// Turn every Frontier, Visited and Path cell back into Empty. Obstacles
    /// and the Start/End markers are kept.
    pub fn reset_search_states(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_search_mark() {
                *cell = CellState::Empty;
            }
        }
    }

    /// Make every cell Empty and drop both markers.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
        self.start = None;
        self.end = None;
    }

    /// Count the cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Top-left corner of `c` in pixel space, for a board drawn with square
    /// cells `cell_width` pixels wide.
    #[inline]
    pub fn pixel_origin(c: Coord, cell_width: f64) -> (f64, f64) {
        (c.row as f64 * cell_width, c.col as f64 * cell_width)
    }

    /// Turn a random share of the Empty cells into obstacles.
    ///
    /// Each Empty cell becomes an Obstacle with probability `density`
    /// (clamped to `[0, 1]`; NaN places nothing). The same `seed` always
    /// produces the same layout on the same board. Returns the number of
    /// obstacles placed.
    pub fn scatter_obstacles(&mut self, density: f64, seed: u64) -> usize {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut placed = 0;
        for cell in self.cells.iter_mut() {
            if *cell == CellState::Empty && rng.random_bool(density) {
                *cell = CellState::Obstacle;
                placed += 1;
            }
        }
        placed
    }

    /// Row-major iterator over `(Coord, CellState)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &state)| (self.coord(i), state))
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell whose state changed between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub coord: Coord,
    pub state: CellState,
}

/// The set of cells a front-end has to repaint.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
}

/// Compute the cells of `curr` that differ from `prev`.
///
/// When the two boards have different sizes every cell of `curr` is
/// returned.
pub fn compute_frame(prev: &Board, curr: &Board) -> Frame {
    let full = prev.size() != curr.size();
    let cells = curr
        .iter()
        .filter(|&(c, state)| full || prev.state(c) != Some(state))
        .map(|(coord, state)| FrameCell { coord, state })
        .collect();
    Frame { cells }
}
