//! Terminal front-end.

use clap::Parser;
use wayfinder::{Config, Editor, init_logging};
use wayfinder_core::{App, Palette};
use wayfinder_crossterm::CrosstermDriver;

/// Terminal redraws are cheap enough to animate without a pause.
const STEP_DELAY_MS: u64 = 0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(&config)?;
    log::info!("starting terminal front-end with a {0}x{0} board", config.size);

    let editor = Editor::new(config.editor(STEP_DELAY_MS));
    let driver = CrosstermDriver::new(config.size, Palette::default());
    let mut app = App::new(editor, driver);
    let result = app.run();
    if let Err(err) = &result {
        log::error!("terminal front-end stopped: {err}");
    }
    result
}
