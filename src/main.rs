//! Terminal runner (default binary).
//!
//! Reads `BLOCKFALL_*` settings, sets up file logging, takes over the terminal
//! and runs the session until the player quits.

use anyhow::Result;
use tracing::info;

use tui_blockfall::runtime::{self, logging, Config};
use tui_blockfall::screen::TermScreen;

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(&config)?;
    config.log_rejected();
    info!(seed = config.seed, tick_ms = config.tick.as_millis() as u64, "starting");

    let mut screen = TermScreen::new();
    screen.enter(config.mouse)?;

    let result = runtime::run_blocking(&config, &mut screen);

    // Always try to restore terminal state.
    let _ = screen.exit();

    let stats = result?;
    info!(
        events = stats.events,
        games_over = stats.games_over,
        rows_cleared = stats.rows_cleared,
        "exiting"
    );
    Ok(())
}
