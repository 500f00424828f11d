//! The application loop: [`Model`], [`View`], [`Driver`], [`App`].
//!
//! A front-end is either a polling [`Driver`] (the terminal), run by
//! [`App`], or an [`EventLoopDriver`] that owns its own event loop (the
//! window) and feeds an [`AppRunner`].

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::board::Board;
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag, so the side that cancels does not need to own
/// the side that checks.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// View / Model / Driver
// ---------------------------------------------------------------------------

/// Something that can show a board.
pub trait View {
    /// Draw `board`. Called after every handled message and once per search
    /// step while a search animates.
    fn render(&mut self, board: &Board) -> Result<(), Box<dyn Error>>;

    /// Whether the user asked to abort the running operation. Polled between
    /// search steps; front-ends that cannot check input mid-update keep the
    /// default.
    fn interrupted(&mut self) -> bool {
        false
    }
}

/// The application model.
pub trait Model {
    /// Process a message, optionally returning a side-effect. `view` is
    /// available for models that animate long operations.
    fn update(&mut self, msg: Msg, view: &mut dyn View) -> Option<Effect>;

    /// The board to present.
    fn board(&self) -> &Board;
}

/// Polling back-end (e.g. a terminal).
pub trait Driver: View {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Poll for input, sending translated messages through `tx`. Returns
    /// after at most one short poll interval.
    fn poll_msgs(&mut self, ctx: &Context, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>>;

    /// Restore whatever `init` changed.
    fn close(&mut self);
}

/// Back-end that owns the main-thread event loop (e.g. a native window).
pub trait EventLoopDriver {
    fn run<M: Model>(self, runner: AppRunner<M>) -> Result<(), Box<dyn Error>>;
}

// ---------------------------------------------------------------------------
// AppRunner
// ---------------------------------------------------------------------------

/// Drives a [`Model`] one message at a time and remembers whether it asked
/// to stop.
pub struct AppRunner<M: Model> {
    model: M,
    quit: bool,
}

impl<M: Model> AppRunner<M> {
    pub fn new(model: M) -> Self {
        Self { model, quit: false }
    }

    /// Deliver `Msg::Init`.
    pub fn init(&mut self, view: &mut dyn View) {
        self.handle_msg(Msg::Init, view);
    }

    /// Deliver one message. Messages after the model returned
    /// [`Effect::End`] are dropped.
    pub fn handle_msg(&mut self, msg: Msg, view: &mut dyn View) {
        if self.quit {
            return;
        }
        if let Some(Effect::End) = self.model.update(msg, view) {
            log::debug!("model requested shutdown");
            self.quit = true;
        }
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.model.board()
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Runs a [`Model`] against a polling [`Driver`].
pub struct App<M: Model, D: Driver> {
    runner: AppRunner<M>,
    driver: D,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(model: M, driver: D) -> Self {
        Self {
            runner: AppRunner::new(model),
            driver,
        }
    }

    /// Run the poll → update → render loop until the model returns
    /// [`Effect::End`] or the driver fails. The driver is closed on every
    /// exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        loop {
            self.process_pending(&rx)?;
            if self.runner.should_quit() {
                ctx.cancel();
                return Ok(());
            }
            self.driver.poll_msgs(&ctx, &tx)?;
        }
    }

    /// Drain queued messages, then render once if anything was handled.
    fn process_pending(&mut self, rx: &Receiver<Msg>) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;
        while let Ok(msg) = rx.try_recv() {
            self.runner.handle_msg(msg, &mut self.driver);
            if self.runner.should_quit() {
                return Ok(());
            }
            needs_draw = true;
        }
        if needs_draw {
            self.driver.render(self.runner.board())?;
        }
        Ok(())
    }

    pub fn model(&self) -> &M {
        self.runner.model()
    }
}
