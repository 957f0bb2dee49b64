//! Runtime configuration from `BLOCKFALL_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{warn, Level};

use crate::types::{TICK_MS, WIPE_ROW_MS};

pub const ENV_TICK_MS: &str = "BLOCKFALL_TICK_MS";
pub const ENV_WIPE_ROW_MS: &str = "BLOCKFALL_WIPE_ROW_MS";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_MOUSE: &str = "BLOCKFALL_MOUSE";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_LOG_LEVEL: &str = "BLOCKFALL_LOG_LEVEL";
pub const ENV_QUEUE_DEPTH: &str = "BLOCKFALL_QUEUE_DEPTH";

pub const DEFAULT_QUEUE_DEPTH: usize = 64;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Gravity interval
    pub tick: Duration,
    /// Pause between rows of the game-over wipe
    pub wipe_row: Duration,
    pub seed: u32,
    pub mouse: bool,
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
    /// Capacity of the event channel
    pub queue_depth: usize,
    /// Variables that were set but could not be used, with their raw value
    pub rejected: Vec<(&'static str, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_MS as u64),
            wipe_row: Duration::from_millis(WIPE_ROW_MS as u64),
            seed: 1,
            mouse: true,
            log_path: None,
            log_level: Level::INFO,
            queue_depth: DEFAULT_QUEUE_DEPTH,
            rejected: Vec::new(),
        }
    }
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            seed: time_seed(),
            ..Self::default()
        };
        let mut rejected = Vec::new();

        let read = |key: &'static str| -> Option<String> {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        if let Some(raw) = read(ENV_TICK_MS) {
            match parse_millis(&raw) {
                Some(d) => config.tick = d,
                None => rejected.push((ENV_TICK_MS, raw)),
            }
        }
        if let Some(raw) = read(ENV_WIPE_ROW_MS) {
            match raw.parse::<u64>() {
                Ok(ms) => config.wipe_row = Duration::from_millis(ms),
                Err(_) => rejected.push((ENV_WIPE_ROW_MS, raw)),
            }
        }
        if let Some(raw) = read(ENV_SEED) {
            match raw.parse() {
                Ok(seed) => config.seed = seed,
                Err(_) => rejected.push((ENV_SEED, raw)),
            }
        }
        if let Some(raw) = read(ENV_MOUSE) {
            match parse_flag(&raw) {
                Some(on) => config.mouse = on,
                None => rejected.push((ENV_MOUSE, raw)),
            }
        }
        config.log_path = read(ENV_LOG_PATH).map(PathBuf::from);
        if let Some(raw) = read(ENV_LOG_LEVEL) {
            match raw.parse::<Level>() {
                Ok(level) => config.log_level = level,
                Err(_) => rejected.push((ENV_LOG_LEVEL, raw)),
            }
        }
        if let Some(raw) = read(ENV_QUEUE_DEPTH) {
            match raw.parse::<usize>() {
                Ok(depth) if depth > 0 => config.queue_depth = depth,
                _ => rejected.push((ENV_QUEUE_DEPTH, raw)),
            }
        }

        config.rejected = rejected;
        config
    }

    /// Emit one warning per rejected variable. Call after logging is set up.
    pub fn log_rejected(&self) {
        for (key, raw) in &self.rejected {
            warn!(key = *key, value = raw.as_str(), "ignoring invalid config value");
        }
    }
}

fn parse_millis(raw: &str) -> Option<Duration> {
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn time_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
