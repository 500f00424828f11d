//! Colours: [`Color`] and the per-state [`Palette`].

use crate::board::CellState;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB), the pixel format the
/// window front-end writes directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const GRAY: Self = Self::from_rgb(127, 127, 127);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Maps each [`CellState`] to the colour a front-end paints it with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    pub empty: Color,
    pub obstacle: Color,
    pub start: Color,
    pub end: Color,
    pub frontier: Color,
    pub visited: Color,
    pub path: Color,
    pub grid_line: Color,
}

impl Palette {
    /// Colour for `state`.
    #[inline]
    pub const fn color(&self, state: CellState) -> Color {
        match state {
            CellState::Empty => self.empty,
            CellState::Obstacle => self.obstacle,
            CellState::Start => self.start,
            CellState::End => self.end,
            CellState::Frontier => self.frontier,
            CellState::Visited => self.visited,
            CellState::Path => self.path,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            empty: Color::WHITE,
            obstacle: Color::BLACK,
            start: Color::from_rgb(0, 255, 255),
            end: Color::from_rgb(255, 255, 0),
            frontier: Color::from_rgb(0, 255, 0),
            visited: Color::from_rgb(255, 0, 0),
            path: Color::from_rgb(255, 100, 180),
            grid_line: Color::GRAY,
        }
    }
}
