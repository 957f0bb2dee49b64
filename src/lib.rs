//! TUI Blockfall (workspace facade crate).
//!
//! Exposes `tui_blockfall::{core,input,runtime,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub mod screen;

pub use tui_blockfall_core as core;
pub use tui_blockfall_input as input;
pub use tui_blockfall_runtime as runtime;
pub use tui_blockfall_term as term;
pub use tui_blockfall_types as types;
