use thiserror::Error;
use wayfinder_core::{BoardError, CellState, Coord};

/// Why a search call failed.
///
/// Every variant except [`BrokenPredecessorChain`](SearchError::BrokenPredecessorChain)
/// is raised before the board is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("start and end are the same cell {0}")]
    SameEndpoints(Coord),
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),
    #[error("{at} is not the board's {expected} cell")]
    MarkerMismatch { at: Coord, expected: CellState },
    /// The predecessor walk from the End cell looped or dead-ended. This is a
    /// logic bug, not a recoverable condition.
    #[error("predecessor chain from {end} broke after {steps} steps")]
    BrokenPredecessorChain { end: Coord, steps: usize },
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl SearchError {
    /// Whether this error signals an internal invariant violation rather
    /// than a rejected call.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::BrokenPredecessorChain { .. } | Self::Board(_))
    }
}
