//! CPU pixel renderer: paints board cells into a `u32` buffer.

use wayfinder_core::{Board, Color, Coord, Palette, compute_frame};

/// Holds the board image at its natural size (`size * cell_px` pixels per
/// side). Each cell is a filled square whose top row and left column are
/// drawn in the grid-line colour.
pub(crate) struct BoardRenderer {
    cell_px: usize,
    size: usize,
    palette: Palette,
    pixels: Vec<u32>,
    /// The board as last painted; `None` forces a full repaint.
    shown: Option<Board>,
}

impl BoardRenderer {
    pub fn new(size: i32, cell_px: u32, palette: Palette) -> Self {
        let size = usize::try_from(size).unwrap_or(0);
        let cell_px = (cell_px as usize).max(1);
        let side = size * cell_px;
        Self {
            cell_px,
            size,
            palette,
            pixels: vec![palette.empty.0; side * side],
            shown: None,
        }
    }

    /// Width and height of the board image in pixels.
    #[inline]
    pub fn pixel_side(&self) -> usize {
        self.size * self.cell_px
    }

    /// The cell under the pixel position (`x`, `y`), if any.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<Coord> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let cell = self.cell_px as f64;
        let (row, col) = ((y / cell) as usize, (x / cell) as usize);
        (row < self.size && col < self.size).then(|| Coord::new(row as i32, col as i32))
    }

    /// Repaint the cells of `board` that changed since the last call.
    pub fn paint(&mut self, board: &Board) {
        let frame = match &self.shown {
            Some(prev) => compute_frame(prev, board),
            None => compute_frame(&Board::new(0), board),
        };
        for fc in &frame.cells {
            self.fill_cell(fc.coord, self.palette.color(fc.state));
        }
        match &mut self.shown {
            Some(prev) => prev.clone_from(board),
            None => self.shown = Some(board.clone()),
        }
    }

    fn fill_cell(&mut self, c: Coord, fill: Color) {
        let (Ok(row), Ok(col)) = (usize::try_from(c.row), usize::try_from(c.col)) else {
            return;
        };
        if row >= self.size || col >= self.size {
            return;
        }
        let side = self.pixel_side();
        let (x0, y0) = (col * self.cell_px, row * self.cell_px);
        for dy in 0..self.cell_px {
            let line = (y0 + dy) * side + x0;
            for dx in 0..self.cell_px {
                let color = if dx == 0 || dy == 0 {
                    self.palette.grid_line
                } else {
                    fill
                };
                self.pixels[line + dx] = color.0;
            }
        }
    }

    /// Copy the board image into a `buf_width` x `buf_height` surface
    /// buffer. Surface area outside the board is painted in the empty-cell
    /// colour.
    pub fn blit_to_buffer(&self, buf: &mut [u32], buf_width: usize, buf_height: usize) {
        let side = self.pixel_side();
        let copy_w = side.min(buf_width);
        let copy_h = side.min(buf_height);

        if buf_width > side || buf_height > side {
            buf.fill(self.palette.empty.0);
        }

        for y in 0..copy_h {
            let src_start = y * side;
            let dst_start = y * buf_width;
            let dst_end = dst_start + copy_w;
            if dst_end <= buf.len() {
                buf[dst_start..dst_end]
                    .copy_from_slice(&self.pixels[src_start..src_start + copy_w]);
            }
        }
    }
}
