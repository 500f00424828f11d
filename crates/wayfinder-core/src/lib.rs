//! **wayfinder-core**: shared types for the wayfinder grid pathfinder.
//!
//! This crate provides the grid model searched by `wayfinder-paths`
//! ([`Board`], [`CellState`], [`Coord`]), the colours used to present it,
//! input messages, and the small Elm-style application loop that the
//! terminal and window front-ends plug into.

pub mod app;
pub mod board;
pub mod geom;
pub mod messages;
pub mod style;

pub use app::{App, AppRunner, Context, Driver, Effect, EventLoopDriver, Model, View};
pub use board::{Board, BoardError, CellState, Frame, FrameCell, compute_frame};
pub use geom::Coord;
pub use messages::{Key, MouseAction, Msg};
pub use style::{Color, Palette};
