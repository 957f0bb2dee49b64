//! File logging setup.
//!
//! The terminal is owned by the renderer, so log output goes to the file named
//! by `BLOCKFALL_LOG_PATH`. Without a path no subscriber is installed and every
//! `tracing` event is a no-op.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::prelude::*;

use crate::config::Config;

/// Install the global subscriber. Returns the log file path if one was opened.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    let Some(path) = config.log_path.clone() else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            config.log_level,
        ))
        .try_init()
        .context("install tracing subscriber")?;

    info!(path = %path.display(), level = %config.log_level, "logging initialized");
    Ok(Some(path))
}
