use wayfinder_core::{Board, CellState, Coord};

use crate::astar::paint;
use crate::error::SearchError;

// ---------------------------------------------------------------------------
// Predecessors
// ---------------------------------------------------------------------------

/// Back-links from each cell to the cell it was reached from, indexed by
/// flat board index. A link is a plain index, never an owning reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Predecessors {
    links: Vec<Option<usize>>,
}

impl Predecessors {
    /// An empty map for a board with `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            links: vec![None; len],
        }
    }

    /// Record that `cell` was reached from `from`. Out-of-range coordinates
    /// are ignored.
    pub fn link(&mut self, board: &Board, cell: Coord, from: Coord) {
        if let (Some(i), Some(p)) = (board.idx(cell), board.idx(from)) {
            self.set_idx(i, Some(p));
        }
    }

    /// The cell `cell` was reached from, if any.
    pub fn get(&self, board: &Board, cell: Coord) -> Option<Coord> {
        let i = board.idx(cell)?;
        self.get_idx(i).map(|p| board.coord(p))
    }

    #[inline]
    pub(crate) fn set_idx(&mut self, idx: usize, from: Option<usize>) {
        if let Some(slot) = self.links.get_mut(idx) {
            *slot = from;
        }
    }

    #[inline]
    pub(crate) fn get_idx(&self, idx: usize) -> Option<usize> {
        self.links.get(idx).copied().flatten()
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A reconstructed shortest path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    start: Coord,
    trail: Vec<Coord>,
}

impl Path {
    /// Cells from the End back to the first step; the Start is not included.
    #[inline]
    pub fn trail(&self) -> &[Coord] {
        &self.trail
    }

    /// Number of edges walked.
    #[inline]
    pub fn len(&self) -> usize {
        self.trail.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.trail.first().copied().unwrap_or(self.start)
    }

    /// Every cell in walking order, Start and End included.
    pub fn waypoints(&self) -> Vec<Coord> {
        std::iter::once(self.start)
            .chain(self.trail.iter().rev().copied())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// reconstruct
// ---------------------------------------------------------------------------

/// Walk `preds` back from `end` until the link into `start`, painting each
/// intermediate cell Path. `on_step` is called once per cell of the trail,
/// first for `end` (which keeps its End marker) and then after each cell is
/// painted, so it runs `path.len()` times.
///
/// The walk is capped at the board's cell count; a longer walk, or a cell
/// other than `start` without a predecessor, yields
/// [`SearchError::BrokenPredecessorChain`].
pub fn reconstruct<F: FnMut(&Board)>(
    board: &mut Board,
    preds: &Predecessors,
    start: Coord,
    end: Coord,
    mut on_step: F,
) -> Result<Path, SearchError> {
    let start_idx = board.idx(start).ok_or(SearchError::OutOfBounds(start))?;
    let mut ci = board.idx(end).ok_or(SearchError::OutOfBounds(end))?;
    let cap = board.len();
    let mut trail = vec![end];
    on_step(board);

    loop {
        let Some(pi) = preds.get_idx(ci) else {
            if ci == start_idx {
                break;
            }
            log::error!("cell {} has no predecessor", board.coord(ci));
            return Err(SearchError::BrokenPredecessorChain {
                end,
                steps: trail.len(),
            });
        };
        if pi == start_idx {
            break;
        }
        if trail.len() >= cap {
            log::error!("predecessor walk from {end} exceeded {cap} cells");
            return Err(SearchError::BrokenPredecessorChain {
                end,
                steps: trail.len(),
            });
        }
        let p = board.coord(pi);
        paint(board, p, CellState::Path)?;
        on_step(board);
        trail.push(p);
        ci = pi;
    }

    Ok(Path { start, trail })
}
