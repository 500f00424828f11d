use wayfinder_core::{Board, CellState, Context, Coord};

use crate::error::SearchError;
use crate::heuristic::Heuristic;
use crate::reconstruct::{Path, reconstruct};
use crate::state::SearchState;

/// How a search run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The End cell was reached; the path has been painted on the board.
    PathFound(Path),
    /// The open set ran dry. Every cell reachable from the Start is Visited.
    NoPathExists,
    /// The context was cancelled between two expansions.
    Cancelled,
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PathFound(path) => Some(path),
            _ => None,
        }
    }
}

/// Counters logged at the end of a run.
#[derive(Clone, Copy, Debug, Default)]
struct SearchStats {
    expanded: usize,
    discovered: usize,
}

/// Find a least-step path from `start` to `end` with A*.
///
/// `start` and `end` must be the board's Start and End cells. The board is
/// painted as the search runs: newly queued cells become Frontier and
/// expanded cells become Visited, except the Start and End cells, which keep
/// their markers. `on_step` is called once after every expansion and once
/// per painted path cell; it only observes the board.
///
/// `ctx` is checked before every expansion; once cancelled the search stops
/// with [`Outcome::Cancelled`] and leaves its marks in place.
///
/// Invalid endpoints are rejected before anything is painted.
pub fn astar<H, F>(
    board: &mut Board,
    start: Coord,
    end: Coord,
    heuristic: &H,
    ctx: &Context,
    mut on_step: F,
) -> Result<Outcome, SearchError>
where
    H: Heuristic + ?Sized,
    F: FnMut(&Board),
{
    let (start_idx, end_idx) = validate(board, start, end)?;
    log::info!("searching {start} -> {end} on a {0}x{0} board", board.size());

    let mut state = SearchState::new(board.len());
    state.relax(start_idx, None, 0, heuristic.estimate(start, end));
    state.push(start_idx);

    let mut stats = SearchStats {
        discovered: 1,
        ..SearchStats::default()
    };
    let mut nbuf: Vec<Coord> = Vec::with_capacity(4);

    let outcome = loop {
        if ctx.is_done() {
            break Outcome::Cancelled;
        }
        let Some(ci) = state.pop() else {
            break Outcome::NoPathExists;
        };
        stats.expanded += 1;

        if ci == end_idx {
            let path = reconstruct(board, &state.preds, start, end, &mut on_step)?;
            break Outcome::PathFound(path);
        }

        let current = board.coord(ci);
        let tentative_g = state.g(ci) + 1;

        nbuf.clear();
        board.neighbors(current, &mut nbuf);
        for &adj in nbuf.iter() {
            let Some(ai) = board.idx(adj) else {
                continue;
            };
            // Ties do not relax: the first route found at a given cost wins.
            if tentative_g >= state.g(ai) {
                continue;
            }
            let f = tentative_g as f64 + heuristic.estimate(adj, end);
            state.relax(ai, Some(ci), tentative_g, f);
            if !state.is_pending(ai) {
                state.push(ai);
                stats.discovered += 1;
                paint(board, adj, CellState::Frontier)?;
            }
        }

        on_step(board);

        if ci != start_idx {
            paint(board, current, CellState::Visited)?;
        }
    };

    match &outcome {
        Outcome::PathFound(path) => log::info!("path found: {} steps", path.len()),
        Outcome::NoPathExists => log::info!("no path from {start} to {end}"),
        Outcome::Cancelled => log::info!("search cancelled"),
    }
    log::debug!(
        "expanded {} cells, discovered {}",
        stats.expanded,
        stats.discovered
    );
    Ok(outcome)
}

fn validate(board: &Board, start: Coord, end: Coord) -> Result<(usize, usize), SearchError> {
    if start == end {
        return Err(SearchError::SameEndpoints(start));
    }
    let start_idx = board.idx(start).ok_or(SearchError::OutOfBounds(start))?;
    let end_idx = board.idx(end).ok_or(SearchError::OutOfBounds(end))?;
    if board.start() != Some(start) {
        return Err(SearchError::MarkerMismatch {
            at: start,
            expected: CellState::Start,
        });
    }
    if board.end() != Some(end) {
        return Err(SearchError::MarkerMismatch {
            at: end,
            expected: CellState::End,
        });
    }
    Ok((start_idx, end_idx))
}

/// Set a display state, leaving the Start and End markers alone.
pub(crate) fn paint(board: &mut Board, c: Coord, state: CellState) -> Result<(), SearchError> {
    if board.state(c).is_some_and(CellState::is_endpoint) {
        return Ok(());
    }
    board.set_state(c, state)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{Heuristic, Metric};
    use proptest::prelude::*;

    fn board_with_endpoints(size: i32, start: Coord, end: Coord) -> Board {
        let mut b = Board::new(size);
        b.set_state(start, CellState::Start).unwrap();
        b.set_state(end, CellState::End).unwrap();
        b
    }

    fn run(board: &mut Board, start: Coord, end: Coord) -> Outcome {
        astar(
            board,
            start,
            end,
            &Metric::euclidean(20.0),
            &Context::new(),
            |_| {},
        )
        .unwrap()
    }

    #[test]
    fn open_grid_path_is_manhattan() {
        let start = Coord::new(0, 0);
        let end = Coord::new(4, 4);
        let mut b = board_with_endpoints(5, start, end);
        let outcome = run(&mut b, start, end);
        let path = outcome.path().expect("open grid must have a path");
        assert_eq!(path.len(), 8);
        assert_eq!(path.waypoints().first(), Some(&start));
        assert_eq!(path.waypoints().last(), Some(&end));
        assert_eq!(b.count(CellState::Path), 7);
        assert_eq!(b.state(start), Some(CellState::Start));
        assert_eq!(b.state(end), Some(CellState::End));
    }

    #[test]
    fn open_grid_expands_in_order_of_estimate() {
        let start = Coord::new(0, 0);
        let end = Coord::new(4, 4);
        let metric = Metric::euclidean(20.0);
        let mut b = board_with_endpoints(5, start, end);

        // A cell turns Visited right after the hook of the step that
        // expanded it, so the next hook reveals the expansion order.
        let mut expanded: Vec<Coord> = Vec::new();
        astar(&mut b, start, end, &metric, &Context::new(), |board| {
            for (c, state) in board.iter() {
                if state == CellState::Visited && !expanded.contains(&c) {
                    expanded.push(c);
                }
            }
        })
        .unwrap();

        let at = |row, col| Coord::new(row, col);
        assert_eq!(
            expanded,
            vec![
                at(1, 0), at(0, 1),
                at(1, 1), at(2, 0), at(0, 2),
                at(2, 1), at(1, 2), at(2, 2),
                at(3, 0), at(0, 3), at(3, 1), at(1, 3),
                at(3, 2), at(2, 3), at(3, 3),
                at(4, 0), at(0, 4), at(4, 1), at(1, 4),
                at(4, 2), at(2, 4), at(4, 3), at(3, 4),
            ]
        );

        // On an open board g is the distance from the Start, so the order
        // never goes back to a smaller f = g + h.
        let f = |c: Coord| start.manhattan(c) as f64 + metric.estimate(c, end);
        for pair in expanded.windows(2) {
            assert!(f(pair[0]) <= f(pair[1]), "{} before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn path_is_a_chain_of_orthogonal_steps() {
        let start = Coord::new(0, 0);
        let end = Coord::new(4, 4);
        let mut b = board_with_endpoints(5, start, end);
        let outcome = run(&mut b, start, end);
        let waypoints = outcome.path().unwrap().waypoints();
        for pair in waypoints.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn tie_break_follows_neighbor_and_insertion_order() {
        let start = Coord::new(0, 0);
        let end = Coord::new(2, 2);
        let mut b = board_with_endpoints(3, start, end);
        let mut steps = 0;
        // Every cell on a shortest route has the same f under Manhattan, so
        // the order is decided by neighbour order and insertion sequence.
        let outcome = astar(
            &mut b,
            start,
            end,
            &Metric::Manhattan,
            &Context::new(),
            |_| steps += 1,
        )
        .unwrap();

        assert_eq!(
            outcome.path().unwrap().waypoints(),
            vec![
                start,
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(2, 1),
                end,
            ]
        );
        // Eight expansions before the End is popped, then one call per
        // trail cell: the End and three path cells.
        assert_eq!(steps, 12);
        assert_eq!(b.count(CellState::Path), 3);
        assert_eq!(b.count(CellState::Visited), 4);
        assert_eq!(b.count(CellState::Frontier), 0);
    }

    #[test]
    fn repeated_runs_after_reset_are_identical() {
        let start = Coord::new(0, 0);
        let end = Coord::new(2, 2);
        let mut b = board_with_endpoints(3, start, end);
        let outcome = run(&mut b, start, end);
        let painted = b.clone();
        for _ in 0..3 {
            b.reset_search_states();
            assert_eq!(run(&mut b, start, end), outcome);
            assert_eq!(b, painted);
        }
    }

    #[test]
    fn adjacent_endpoints() {
        let start = Coord::new(2, 2);
        let end = Coord::new(2, 3);
        let mut b = board_with_endpoints(5, start, end);
        let mut steps = 0;
        let outcome = astar(
            &mut b,
            start,
            end,
            &Metric::euclidean(20.0),
            &Context::new(),
            |_| steps += 1,
        )
        .unwrap();
        assert_eq!(outcome.path().unwrap().trail(), &[end]);
        // One expansion of the Start, one notification for the End.
        assert_eq!(steps, 2);
    }

    #[test]
    fn wall_forces_detour_through_gap() {
        let start = Coord::new(0, 0);
        let end = Coord::new(0, 4);
        let mut b = board_with_endpoints(5, start, end);
        for row in 0..4 {
            b.set_state(Coord::new(row, 2), CellState::Obstacle).unwrap();
        }
        let outcome = run(&mut b, start, end);
        let path = outcome.path().unwrap();
        assert_eq!(path.len(), 12);
        assert!(path.trail().contains(&Coord::new(4, 2)));
        assert_eq!(b.state(Coord::new(4, 2)), Some(CellState::Path));
    }

    #[test]
    fn enclosed_start_has_no_path() {
        let start = Coord::new(2, 2);
        let end = Coord::new(0, 0);
        let mut b = board_with_endpoints(5, start, end);
        for c in start.neighbors_4() {
            b.set_state(c, CellState::Obstacle).unwrap();
        }
        let mut steps = 0;
        let outcome = astar(
            &mut b,
            start,
            end,
            &Metric::Manhattan,
            &Context::new(),
            |_| steps += 1,
        )
        .unwrap();
        assert_eq!(outcome, Outcome::NoPathExists);
        assert_eq!(steps, 1);
        assert_eq!(b.count(CellState::Visited), 0);
        assert_eq!(b.count(CellState::Frontier), 0);
        assert_eq!(b.state(start), Some(CellState::Start));
    }

    #[test]
    fn failed_search_visits_only_reachable_cells() {
        let start = Coord::new(0, 0);
        let end = Coord::new(3, 3);
        let mut b = board_with_endpoints(4, start, end);
        for c in [Coord::new(1, 0), Coord::new(1, 1), Coord::new(0, 2)] {
            b.set_state(c, CellState::Obstacle).unwrap();
        }
        assert_eq!(run(&mut b, start, end), Outcome::NoPathExists);
        assert_eq!(b.state(Coord::new(0, 1)), Some(CellState::Visited));
        assert_eq!(b.count(CellState::Visited), 1);
        assert_eq!(b.count(CellState::Frontier), 0);
        assert_eq!(b.count(CellState::Empty), 16 - 3 - 2 - 1);
    }

    #[test]
    fn invalid_calls_leave_board_untouched() {
        let start = Coord::new(0, 0);
        let end = Coord::new(2, 2);
        let b = board_with_endpoints(3, start, end);
        let ctx = Context::new();
        let h = Metric::Manhattan;

        let mut same = b.clone();
        assert_eq!(
            astar(&mut same, start, start, &h, &ctx, |_| {}),
            Err(SearchError::SameEndpoints(start))
        );
        assert_eq!(same, b);

        let mut out = b.clone();
        assert_eq!(
            astar(&mut out, start, Coord::new(3, 0), &h, &ctx, |_| {}),
            Err(SearchError::OutOfBounds(Coord::new(3, 0)))
        );
        assert_eq!(out, b);

        let mut wrong = b.clone();
        assert_eq!(
            astar(&mut wrong, Coord::new(1, 1), end, &h, &ctx, |_| {}),
            Err(SearchError::MarkerMismatch {
                at: Coord::new(1, 1),
                expected: CellState::Start,
            })
        );
        assert_eq!(wrong, b);

        let mut no_end = Board::new(3);
        no_end.set_state(start, CellState::Start).unwrap();
        assert!(matches!(
            astar(&mut no_end, start, end, &h, &ctx, |_| {}),
            Err(SearchError::MarkerMismatch {
                expected: CellState::End,
                ..
            })
        ));
    }

    #[test]
    fn cancelled_before_start_does_nothing() {
        let start = Coord::new(0, 0);
        let end = Coord::new(4, 4);
        let mut b = board_with_endpoints(5, start, end);
        let before = b.clone();
        let ctx = Context::new();
        ctx.cancel();
        let outcome = astar(&mut b, start, end, &Metric::Manhattan, &ctx, |_| {}).unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(b, before);
    }

    #[test]
    fn cancel_from_step_hook_stops_after_that_step() {
        let start = Coord::new(2, 2);
        let end = Coord::new(4, 4);
        let mut b = board_with_endpoints(5, start, end);
        let ctx = Context::new();
        let hook_ctx = ctx.clone();
        let mut steps = 0;
        let outcome = astar(&mut b, start, end, &Metric::Manhattan, &ctx, |_| {
            steps += 1;
            hook_ctx.cancel();
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(steps, 1);
        assert_eq!(b.count(CellState::Frontier), 4);
        assert_eq!(b.count(CellState::Visited), 0);
    }

    #[test]
    fn step_hook_sees_progress() {
        let start = Coord::new(0, 0);
        let end = Coord::new(0, 3);
        let mut b = board_with_endpoints(4, start, end);
        let mut frontier_sizes = Vec::new();
        run_with_hook(&mut b, start, end, |board| {
            frontier_sizes.push(board.count(CellState::Frontier))
        });
        assert_eq!(frontier_sizes.first(), Some(&2));
    }

    fn run_with_hook<F: FnMut(&Board)>(b: &mut Board, start: Coord, end: Coord, hook: F) {
        astar(b, start, end, &Metric::Manhattan, &Context::new(), hook).unwrap();
    }

    #[test]
    fn zero_heuristic_still_finds_shortest_path() {
        let start = Coord::new(0, 0);
        let end = Coord::new(3, 5);
        let mut b = board_with_endpoints(6, start, end);
        let dijkstra = |_: Coord, _: Coord| 0.0;
        let outcome = astar(&mut b, start, end, &dijkstra, &Context::new(), |_| {}).unwrap();
        assert_eq!(outcome.path().unwrap().len(), 8);
    }

    proptest! {
        #[test]
        fn open_board_paths_have_manhattan_length(
            size in 2i32..12,
            a in (0i32..12, 0i32..12),
            z in (0i32..12, 0i32..12),
            manhattan in any::<bool>(),
        ) {
            let start = Coord::new(a.0 % size, a.1 % size);
            let end = Coord::new(z.0 % size, z.1 % size);
            prop_assume!(start != end);
            let mut b = board_with_endpoints(size, start, end);
            let metric = if manhattan { Metric::Manhattan } else { Metric::euclidean(20.0) };
            let outcome = astar(&mut b, start, end, &metric, &Context::new(), |_| {}).unwrap();
            let path = outcome.path().expect("open board");
            prop_assert_eq!(path.len() as i32, start.manhattan(end));
        }

        #[test]
        fn reset_then_rerun_is_identical(
            seed in any::<u64>(),
            density in 0.0f64..0.45,
        ) {
            let start = Coord::new(0, 0);
            let end = Coord::new(9, 9);
            let mut b = board_with_endpoints(10, start, end);
            b.scatter_obstacles(density, seed);
            let pristine = b.clone();

            let first = run(&mut b, start, end);
            let painted = b.clone();

            b.reset_search_states();
            prop_assert_eq!(&b, &pristine);

            let second = run(&mut b, start, end);
            prop_assert_eq!(first, second);
            prop_assert_eq!(b, painted);
        }
    }
}
