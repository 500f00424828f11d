//! Window front-end.

use clap::Parser;
use wayfinder::{Config, Editor, init_logging};
use wayfinder_core::{AppRunner, EventLoopDriver, Palette};
use wayfinder_winit::{WinitConfig, WinitDriver};

/// A short pause per step so the search is visible in the window.
const STEP_DELAY_MS: u64 = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(&config)?;
    log::info!("starting window front-end with a {0}x{0} board", config.size);

    let editor = Editor::new(config.editor(STEP_DELAY_MS));
    let driver = WinitDriver::new(WinitConfig {
        title: "wayfinder: A* path finding".into(),
        board_size: config.size,
        cell_px: config.cell_px,
        palette: Palette::default(),
    });
    driver.run(AppRunner::new(editor))
}
