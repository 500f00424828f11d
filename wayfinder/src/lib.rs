//! wayfinder: an interactive A* path finder.
//!
//! The library half of the application crate. It holds the command-line
//! [`Config`], logging setup and the [`Editor`] model shared by the terminal
//! (`wayfinder`) and window (`wayfinder-window`) binaries.

pub mod config;
pub mod editor;

pub use config::{Config, HeuristicKind, LogLevel, init_logging};
pub use editor::{Editor, EditorConfig};
