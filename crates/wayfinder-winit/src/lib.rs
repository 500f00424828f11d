//! Winit window back-end for wayfinder.
//!
//! Draws the board as coloured squares in a native window using:
//! - [`winit`] for window creation and input events
//! - [`softbuffer`] for CPU-based pixel presentation
//!
//! # Usage
//!
//! ```rust,no_run
//! use wayfinder_winit::{WinitConfig, WinitDriver};
//! use wayfinder_core::AppRunner;
//!
//! let driver = WinitDriver::new(WinitConfig::default());
//! // driver.run(AppRunner::new(my_model)).unwrap();
//! ```

mod input;
mod renderer;

use std::error::Error;
use std::num::NonZeroU32;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use wayfinder_core::{
    AppRunner, Board, Coord, EventLoopDriver, Model, MouseAction, Msg, Palette, View,
};

use renderer::BoardRenderer;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the winit driver.
#[derive(Clone, Debug)]
pub struct WinitConfig {
    /// Window title.
    pub title: String,
    /// Cells per side of the board.
    pub board_size: i32,
    /// Side of one cell in physical pixels.
    pub cell_px: u32,
    pub palette: Palette,
}

impl Default for WinitConfig {
    fn default() -> Self {
        Self {
            title: "wayfinder: A* path finding".into(),
            board_size: 50,
            cell_px: 20,
            palette: Palette::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitDriver
// ---------------------------------------------------------------------------

/// Winit-based window driver.
///
/// Implements [`EventLoopDriver`]: it owns the main-thread event loop and
/// feeds an [`AppRunner`]. The window cannot read input while the model is
/// busy, so searches run to completion once started.
pub struct WinitDriver {
    config: WinitConfig,
}

impl WinitDriver {
    pub fn new(config: WinitConfig) -> Self {
        Self { config }
    }
}

impl EventLoopDriver for WinitDriver {
    fn run<M: Model>(self, runner: AppRunner<M>) -> Result<(), Box<dyn Error>> {
        let event_loop = EventLoop::new()?;
        let mut app = WinitApp::new(self.config, runner);
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitState: window, surface and renderer
// ---------------------------------------------------------------------------

struct WinitState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    renderer: BoardRenderer,
}

impl WinitState {
    fn create(event_loop: &ActiveEventLoop, config: &WinitConfig) -> Result<Self, Box<dyn Error>> {
        let renderer = BoardRenderer::new(config.board_size, config.cell_px, config.palette);
        let side = u32::try_from(renderer.pixel_side())?;

        let attrs = Window::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(side, side))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let context = softbuffer::Context::new(window.clone())?;
        let mut surface = softbuffer::Surface::new(&context, window.clone())?;
        let PhysicalSize { width, height } = window.inner_size();
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            surface.resize(w, h)?;
        }

        log::info!("opened a {width}x{height} window");
        Ok(Self {
            window,
            surface,
            renderer,
        })
    }

    /// Copy the renderer's image to the window surface.
    fn present(&mut self) -> Result<(), Box<dyn Error>> {
        let PhysicalSize { width, height } = self.window.inner_size();
        if width == 0 || height == 0 {
            return Ok(());
        }
        let mut buf = self.surface.buffer_mut()?;
        self.renderer
            .blit_to_buffer(&mut buf, width as usize, height as usize);
        buf.present()?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        if let Err(err) = self.surface.resize(w, h) {
            log::warn!("surface resize to {width}x{height} failed: {err}");
        }
    }
}

impl View for WinitState {
    fn render(&mut self, board: &Board) -> Result<(), Box<dyn Error>> {
        self.renderer.paint(board);
        self.present()
    }
}

// ---------------------------------------------------------------------------
// WinitApp: ApplicationHandler
// ---------------------------------------------------------------------------

struct WinitApp<M: Model> {
    config: WinitConfig,
    runner: AppRunner<M>,
    state: Option<WinitState>,
    /// Last cell under the cursor.
    cursor: Option<Coord>,
    /// The button currently held down; dragging with it repeats the action
    /// on every cell entered.
    held: Option<MouseAction>,
    error: Option<Box<dyn Error>>,
}

impl<M: Model> WinitApp<M> {
    fn new(config: WinitConfig, runner: AppRunner<M>) -> Self {
        Self {
            config,
            runner,
            state: None,
            cursor: None,
            held: None,
            error: None,
        }
    }

    /// Hand `msg` to the model and redraw.
    fn dispatch(&mut self, msg: Msg, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        self.runner.handle_msg(msg, &mut *state);
        if self.runner.should_quit() {
            event_loop.exit();
            return;
        }
        if let Err(err) = state.render(self.runner.board()) {
            log::warn!("redraw failed: {err}");
        }
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>, event_loop: &ActiveEventLoop) {
        let cell = self
            .state
            .as_ref()
            .and_then(|s| s.renderer.cell_at(position.x, position.y));
        if cell == self.cursor {
            return;
        }
        self.cursor = cell;
        if let (Some(action), Some(cell)) = (self.held, cell) {
            self.dispatch(Msg::click(action, cell), event_loop);
        }
    }
}

impl<M: Model> ApplicationHandler for WinitApp<M> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let mut state = match WinitState::create(event_loop, &self.config) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("could not open the window: {err}");
                self.error = Some(err);
                event_loop.exit();
                return;
            }
        };

        self.runner.init(&mut state);
        if let Err(err) = state.render(self.runner.board()) {
            log::warn!("initial draw failed: {err}");
        }
        self.state = Some(state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.dispatch(Msg::Quit, event_loop);
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(state) = self.state.as_mut() {
                    state.resize(width, height);
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(state) = self.state.as_mut() {
                    if let Err(err) = state.present() {
                        log::warn!("redraw failed: {err}");
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(msg) = input::translate_key(&event.logical_key, event.state) {
                    self.dispatch(msg, event_loop);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(action) = input::mouse_action(button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => {
                        self.held = Some(action);
                        if let Some(cell) = self.cursor {
                            self.dispatch(Msg::click(action, cell), event_loop);
                        }
                    }
                    ElementState::Released => {
                        if self.held == Some(action) {
                            self.held = None;
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position, event_loop);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }

            _ => {}
        }
    }
}
