//! Input events: [`Msg`], [`Key`], [`MouseAction`].
//!
//! Front-ends translate raw terminal or window input into these messages.
//! Mouse positions are already resolved to board coordinates, so the model
//! never deals with pixels or terminal columns.

use crate::geom::Coord;

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// A printable character.
    Char(char),
}

/// A mouse button press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button.
    Main,
    /// Secondary (right) button.
    Secondary,
}

/// An input message delivered to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key },
    /// A mouse button was pressed over a board cell.
    Mouse { action: MouseAction, cell: Coord },
    /// Sent once when the application starts.
    Init,
    /// Request to quit (window closed, terminal hang-up).
    Quit,
}

impl Msg {
    /// Convenience: a `KeyDown` for `key`.
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key }
    }

    /// Convenience: a mouse press on `cell`.
    pub fn click(action: MouseAction, cell: Coord) -> Self {
        Self::Mouse { action, cell }
    }
}
