//! Async runtime for the game: configuration, logging, event sources and the
//! session loop.
//!
//! ```text
//! ticker ──────┐
//!              ├──> mpsc queue ──> Session ──> GameState ──> Screen
//! input pump ──┘
//! ```
//!
//! Producers never touch the game state. The session applies one event at a
//! time, so no locking is needed around the grid.

pub mod config;
pub mod logging;
pub mod session;
pub mod sources;

pub use tui_blockfall_core as core;
pub use tui_blockfall_input as input;
pub use tui_blockfall_types as types;

pub use config::Config;
pub use session::{Screen, Session, SessionStats};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::input::HostEvent;

/// Run a full session against the real terminal input.
///
/// Builds a tokio runtime, starts the ticker and the input pump, and blocks
/// until the session ends. The caller owns terminal setup and teardown.
pub fn run_blocking<S: Screen>(config: &Config, screen: S) -> Result<SessionStats> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    let result = rt.block_on(run(config, screen));
    rt.shutdown_timeout(sources::INPUT_POLL * 4);
    result
}

async fn run<S: Screen>(config: &Config, screen: S) -> Result<SessionStats> {
    let (tx, rx) = mpsc::channel::<HostEvent>(config.queue_depth.max(1));
    let stop = Arc::new(AtomicBool::new(false));

    let ticker = tokio::spawn(sources::run_ticker(config.tick, tx.clone()));
    let pump = sources::spawn_input_pump(tx, Arc::clone(&stop));

    let mut session = Session::new(config, screen, rx);
    let stats = session.run().await;
    // Release the queue before waiting on the pump.
    drop(session);

    stop.store(true, Ordering::Relaxed);
    ticker.abort();
    pump.await.context("input pump panicked")??;
    stats
}
