use std::collections::BinaryHeap;

use crate::reconstruct::Predecessors;

/// Sentinel cost for cells the search has not reached.
pub(crate) const UNREACHED: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// Open-set entry
// ---------------------------------------------------------------------------

/// Entry in the open set, ordered by `(f, seq)` so that equal `f` values pop
/// in insertion order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) f: f64,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest (f, seq) first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Bookkeeping for a single search call, indexed by flat board index.
/// Created fresh per call and dropped when the call returns.
pub(crate) struct SearchState {
    g: Vec<u32>,
    f: Vec<f64>,
    pending: Vec<bool>,
    open: BinaryHeap<OpenEntry>,
    next_seq: u64,
    pub(crate) preds: Predecessors,
}

impl SearchState {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            g: vec![UNREACHED; len],
            f: vec![f64::INFINITY; len],
            pending: vec![false; len],
            open: BinaryHeap::new(),
            next_seq: 0,
            preds: Predecessors::new(len),
        }
    }

    #[inline]
    pub(crate) fn g(&self, idx: usize) -> u32 {
        self.g[idx]
    }

    #[inline]
    pub(crate) fn is_pending(&self, idx: usize) -> bool {
        self.pending[idx]
    }

    /// Record a cheaper route to `idx` through `parent`.
    pub(crate) fn relax(&mut self, idx: usize, parent: Option<usize>, g: u32, f: f64) {
        self.g[idx] = g;
        self.f[idx] = f;
        self.preds.set_idx(idx, parent);
    }

    /// Queue `idx` with its current `f` and the next sequence number.
    pub(crate) fn push(&mut self, idx: usize) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.open.push(OpenEntry {
            f: self.f[idx],
            seq,
            idx,
        });
        self.pending[idx] = true;
    }

    /// Remove the pending cell with the smallest `(f, seq)`.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        let entry = self.open.pop()?;
        self.pending[entry.idx] = false;
        Some(entry.idx)
    }
}
