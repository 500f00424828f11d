//! Crossterm terminal driver for wayfinder.
//!
//! Provides a [`CrosstermDriver`] that implements [`wayfinder_core::Driver`].
//! Every board cell is drawn as two blank terminal columns with the cell's
//! colour as background, which keeps cells roughly square in most fonts.
//! Mouse positions are mapped back to cells with `row = y` and
//! `col = x / 2`.

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use wayfinder_core::{
    Board, Color, Context, Coord, Driver, Key, MouseAction, Msg, Palette, View, compute_frame,
};

/// Terminal columns per board cell.
const CELL_COLUMNS: u16 = 2;

const HELP_LINE: &str =
    "left: start/end/wall  right: erase  space: search  r: reset  c: clear  g: scatter  q: quit";

/// Maps a [`wayfinder_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    CtColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// Maps a crossterm [`KeyCode`] to a wayfinder [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// The board cell under terminal position (`column`, `row`), if any.
fn cell_at(column: u16, row: u16, size: i32) -> Option<Coord> {
    let c = Coord::new(i32::from(row), i32::from(column / CELL_COLUMNS));
    (c.row < size && c.col < size).then_some(c)
}

/// Translates one crossterm event into a message. Key releases, motion
/// without a pressed button and clicks outside the board are dropped.
fn translate(ev: &Event, size: i32) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if *kind == KeyEventKind::Release {
                return None;
            }
            if modifiers.contains(KeyModifiers::CONTROL) && *code == KeyCode::Char('c') {
                return Some(Msg::Quit);
            }
            to_key(*code).map(Msg::key)
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let action = match kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    MouseAction::Main
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                _ => return None,
            };
            cell_at(*column, *row, size).map(|cell| Msg::click(action, cell))
        }
        _ => None,
    }
}

/// Whether `ev` asks to abort a running search.
fn is_interrupt(ev: &Event) -> bool {
    matches!(
        translate(ev, 0),
        Some(Msg::Quit | Msg::KeyDown { key: Key::Escape | Key::Char('q') })
    )
}

/// A terminal back-end for wayfinder using crossterm.
pub struct CrosstermDriver {
    size: i32,
    palette: Palette,
    /// The board as last drawn; `None` forces a full repaint.
    shown: Option<Board>,
    out: Stdout,
}

impl CrosstermDriver {
    /// Create a driver for a `size` x `size` board drawn with `palette`.
    pub fn new(size: i32, palette: Palette) -> Self {
        Self {
            size,
            palette,
            shown: None,
            out: io::stdout(),
        }
    }

    fn draw_help(&mut self) -> io::Result<()> {
        let row = u16::try_from(self.size).unwrap_or(u16::MAX);
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(HELP_LINE)
        )
    }
}

impl View for CrosstermDriver {
    fn render(&mut self, board: &Board) -> Result<(), Box<dyn Error>> {
        let frame = match &self.shown {
            Some(prev) => compute_frame(prev, board),
            None => compute_frame(&Board::new(0), board),
        };
        if frame.cells.is_empty() {
            return Ok(());
        }
        if self.shown.is_none() {
            self.draw_help()?;
        }

        for fc in &frame.cells {
            let x = u16::try_from(fc.coord.col)? * CELL_COLUMNS;
            let y = u16::try_from(fc.coord.row)?;
            let bg = to_ct_color(self.palette.color(fc.state));
            queue!(
                self.out,
                cursor::MoveTo(x, y),
                SetBackgroundColor(bg),
                SetForegroundColor(bg),
                Print("  ")
            )?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;

        match &mut self.shown {
            Some(prev) => prev.clone_from(board),
            None => self.shown = Some(board.clone()),
        }
        Ok(())
    }

    fn interrupted(&mut self) -> bool {
        let mut stop = false;
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    log::warn!("terminal poll failed during search: {err}");
                    break;
                }
            }
            match event::read() {
                Ok(ev) => stop |= is_interrupt(&ev),
                Err(err) => {
                    log::warn!("terminal read failed during search: {err}");
                    break;
                }
            }
        }
        stop
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        let (cols, rows) = terminal::size()?;
        let needed_cols = u16::try_from(self.size)?.saturating_mul(CELL_COLUMNS);
        let needed_rows = u16::try_from(self.size)?.saturating_add(1);
        if cols < needed_cols || rows < needed_rows {
            log::warn!(
                "terminal is {cols}x{rows}, a {0}x{0} board needs {needed_cols}x{needed_rows}",
                self.size
            );
        }

        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        self.shown = None;
        Ok(())
    }

    fn poll_msgs(&mut self, ctx: &Context, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>> {
        if !event::poll(Duration::from_millis(16))? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                // The alternate screen is cleared on resize by most
                // terminals; repaint everything on the next render.
                execute!(self.out, terminal::Clear(ClearType::All))?;
                self.shown = None;
                continue;
            }
            if let Some(msg) = translate(&ev, self.size) {
                tx.send(msg)?;
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
