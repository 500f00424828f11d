//! The interactive board editor: the application [`Model`].

use std::thread;
use std::time::Duration;

use wayfinder_core::{
    Board, BoardError, CellState, Context, Coord, Effect, Key, Model, MouseAction, Msg, View,
};
use wayfinder_paths::{Metric, Outcome, astar};

/// Settings the editor is built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    pub size: i32,
    pub metric: Metric,
    /// Pause after every search step.
    pub step_delay: Duration,
    pub obstacle_density: f64,
    /// Seed for the next obstacle scatter.
    pub seed: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            size: 50,
            metric: Metric::default(),
            step_delay: Duration::ZERO,
            obstacle_density: 0.3,
            seed: 42,
        }
    }
}

/// Owns the board and turns input into edits and searches.
///
/// The first left click places the Start, the next one the End, and later
/// ones place obstacles. Right click erases a cell. A search runs to
/// completion inside a single [`Model::update`] call, so no edit can reach
/// the board while it runs.
pub struct Editor {
    board: Board,
    config: EditorConfig,
    last_outcome: Option<Outcome>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            board: Board::new(config.size),
            config,
            last_outcome: None,
        }
    }

    /// How the most recent search ended, if one ran since the last reset.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    fn place(&mut self, cell: Coord) {
        let state = if self.board.start().is_none() && self.board.end() != Some(cell) {
            CellState::Start
        } else if self.board.end().is_none() && self.board.start() != Some(cell) {
            CellState::End
        } else if self.board.start() != Some(cell) && self.board.end() != Some(cell) {
            CellState::Obstacle
        } else {
            return;
        };
        self.apply(cell, state);
    }

    fn erase(&mut self, cell: Coord) {
        self.apply(cell, CellState::Empty);
    }

    fn apply(&mut self, cell: Coord, state: CellState) {
        if let Err(err) = self.board.set_state(cell, state) {
            log_rejected(&err);
        }
    }

    fn reset(&mut self) {
        self.board.reset_search_states();
        self.last_outcome = None;
    }

    fn clear(&mut self) {
        self.board.clear();
        self.last_outcome = None;
        log::info!("board cleared");
    }

    fn scatter(&mut self) {
        self.reset();
        let seed = self.config.seed;
        let placed = self
            .board
            .scatter_obstacles(self.config.obstacle_density, seed);
        self.config.seed = seed.wrapping_add(1);
        log::info!("scattered {placed} obstacles (seed {seed})");
    }

    /// Reset the previous run's marks and search from Start to End,
    /// redrawing `view` after every step.
    fn search(&mut self, view: &mut dyn View) {
        let (Some(start), Some(end)) = (self.board.start(), self.board.end()) else {
            log::debug!("search needs both a start and an end");
            return;
        };
        self.reset();

        let ctx = Context::new();
        let delay = self.config.step_delay;
        let result = astar(
            &mut self.board,
            start,
            end,
            &self.config.metric,
            &ctx,
            |board| {
                if let Err(err) = view.render(board) {
                    log::warn!("redraw during search failed: {err}");
                }
                if view.interrupted() {
                    log::info!("search interrupted");
                    ctx.cancel();
                }
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            },
        );

        match result {
            Ok(outcome) => {
                if let Some(path) = outcome.path() {
                    let (from, to) = (path.start(), path.end());
                    log::debug!("route {from} -> {to}: {:?}", path.waypoints());
                }
                self.last_outcome = Some(outcome);
            }
            Err(err) if err.is_invariant_violation() => log::error!("search failed: {err}"),
            Err(err) => log::warn!("search rejected: {err}"),
        }
    }
}

fn log_rejected(err: &BoardError) {
    log::debug!("edit rejected: {err}");
}

impl Model for Editor {
    fn update(&mut self, msg: Msg, view: &mut dyn View) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Quit => Some(Effect::End),
            Msg::Mouse { action, cell } => {
                match action {
                    MouseAction::Main => self.place(cell),
                    MouseAction::Secondary => self.erase(cell),
                }
                None
            }
            Msg::KeyDown { key } => match key {
                Key::Escape | Key::Char('q') => Some(Effect::End),
                Key::Space | Key::Enter => {
                    self.search(view);
                    None
                }
                Key::Char('r') => {
                    self.reset();
                    None
                }
                Key::Char('c') => {
                    self.clear();
                    None
                }
                Key::Char('g') => {
                    self.scatter();
                    None
                }
                Key::Char(_) => None,
            },
        }
    }

    fn board(&self) -> &Board {
        &self.board
    }
}
