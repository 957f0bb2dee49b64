//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules and the state machine that drives them.
//! It has **zero dependencies** on terminals, timers, or I/O:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every event returns a [`StepOutcome`] describing the transition
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Non-blocking**: Every handler is bounded work on a 25x12 grid
//!
//! # Module Structure
//!
//! - [`geometry`]: Shape table and quarter-turn rotation math
//! - [`grid`]: 25x12 cell store with walls, floor, and line clearing
//! - [`placement`]: Collision testing, commit/erase, and the move protocol
//! - [`game_state`]: Spawn, gravity, player moves, lock, game over, restart
//! - [`rng`]: Seeded uniform shape selection
//! - [`snapshot`]: Playable-area view handed to the renderer
//!
//! # Game Rules
//!
//! - **Uniform Randomizer**: Each spawn picks one of the seven shapes at random
//! - **Simple Rotation**: Quarter turns about the anchor, no wall kicks
//! - **Immediate Lock**: A piece locks on the first gravity tick it cannot descend
//! - **Game Over**: A spawn that collides ends the game; the board is wiped and play restarts
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{GameState, StepOutcome};
//! use tui_blockfall_types::GameEvent;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! assert_eq!(game.handle(GameEvent::SoftDrop), StepOutcome::Moved);
//! game.handle(GameEvent::MoveRight);
//! game.handle(GameEvent::Tick);
//!
//! let snap = game.snapshot();
//! assert!(snap.occupied_count() > 0);
//! ```

pub mod game_state;
pub mod geometry;
pub mod grid;
pub mod placement;
pub mod rng;
pub mod snapshot;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, Phase, StepOutcome};
pub use geometry::{rotate_point, rotation_period, shape_cells, Point};
pub use grid::{ClearedRows, Grid};
pub use placement::{commit, erase, is_legal, place, test_and_maybe_commit, try_move, PieceStatus};
pub use rng::SimpleRng;
pub use snapshot::Snapshot;
