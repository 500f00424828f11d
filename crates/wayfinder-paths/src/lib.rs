//! A* search for the wayfinder grid pathfinder.
//!
//! [`astar`] runs one best-first search over a [`Board`](wayfinder_core::Board),
//! painting cells Frontier and Visited as it goes and calling a step hook
//! after every expansion so a front-end can animate the run. On success
//! [`reconstruct`] walks the predecessor links back from the End cell and
//! paints the path.
//!
//! | Piece | Role |
//! |---|---|
//! | [`Heuristic`] / [`Metric`] | remaining-cost estimate used to order the open set |
//! | [`astar`] | the search loop, returning an [`Outcome`] |
//! | [`Predecessors`] / [`reconstruct`] | back-links recorded by the search and the walk over them |
//! | [`SearchError`] | rejected calls and broken invariants |

mod astar;
mod error;
mod heuristic;
mod reconstruct;
mod state;

pub use astar::{Outcome, astar};
pub use error::SearchError;
pub use heuristic::{Heuristic, Metric};
pub use reconstruct::{Path, Predecessors, reconstruct};
