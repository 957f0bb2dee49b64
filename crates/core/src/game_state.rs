//! Game state module - the event-driven state machine
//!
//! This module ties together the grid, placement and the RNG. It resolves each
//! abstract event into a state transition and reports what happened as a
//! [`StepOutcome`]. Nothing here blocks or sleeps: the game-over wipe is exposed
//! one row at a time and paced by the caller.
//!
//! ```text
//! Idle --start--> Falling --tick fails--> (lock, clear, spawn) --> Falling
//!                                                   \--spawn fails--> GameOver
//! GameOver --wipe_step until done--> restart --> Falling
//! ```

use tracing::{debug, info};

use crate::grid::Grid;
use crate::placement::{self, PieceStatus};
use crate::rng::SimpleRng;
use crate::snapshot::Snapshot;
use crate::types::*;

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the first spawn
    Idle,
    /// A piece is active and accepts input and gravity
    Falling,
    /// Spawn collided; the board is being wiped from the bottom up
    GameOver {
        /// Next row to wipe; negative once the sweep is complete
        wipe_row: i8,
    },
}

/// Result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game is not running; the event was dropped
    Ignored,
    /// The piece moved or rotated
    Moved,
    /// The move collided; nothing changed
    Blocked,
    /// Gravity failed: the piece locked, rows were cleared and a new piece spawned
    Locked { rows_cleared: usize },
    /// The next piece could not spawn
    GameOver,
    /// The player asked to leave
    Quit,
}

impl StepOutcome {
    /// Whether the grid may look different after this outcome
    pub fn needs_redraw(self) -> bool {
        matches!(
            self,
            StepOutcome::Moved | StepOutcome::Locked { .. } | StepOutcome::GameOver
        )
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    current: Option<PieceStatus>,
    phase: Phase,
    rng: SimpleRng,
    /// Monotonic game counter (increments on restart).
    episode_id: u32,
}

impl GameState {
    /// Create a new idle game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }

    fn with_rng(rng: SimpleRng) -> Self {
        Self {
            grid: Grid::new(),
            current: None,
            phase: Phase::Idle,
            rng,
            episode_id: 0,
        }
    }

    /// Leave `Idle` by spawning the first piece
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.spawn()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a piece is falling and events are accepted
    pub fn running(&self) -> bool {
        self.phase == Phase::Falling
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn current(&self) -> Option<PieceStatus> {
        self.current
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.fill_from_grid(&self.grid);
        out.phase = self.phase;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a random piece at the spawn anchor
    pub fn spawn(&mut self) -> bool {
        let kind = self.rng.next_shape();
        self.spawn_kind(kind)
    }

    /// Spawn a piece of the given kind at the spawn anchor
    ///
    /// Nothing is erased first: the grid only holds settled blocks here. If the
    /// spawn cells are taken the game is over.
    pub fn spawn_kind(&mut self, kind: ShapeKind) -> bool {
        let status = PieceStatus::spawn(kind);
        if placement::place(&mut self.grid, &status) {
            self.current = Some(status);
            self.phase = Phase::Falling;
            return true;
        }

        info!(episode = self.episode_id, shape = kind.as_str(), "spawn blocked, game over");
        self.current = None;
        self.phase = Phase::GameOver {
            wipe_row: LIMIT_Y - 1,
        };
        false
    }

    /// Resolve one event
    pub fn handle(&mut self, event: GameEvent) -> StepOutcome {
        if event == GameEvent::Quit {
            return StepOutcome::Quit;
        }
        if !self.running() {
            return StepOutcome::Ignored;
        }
        let Some(current) = self.current else {
            return StepOutcome::Ignored;
        };

        match event {
            GameEvent::MoveLeft => self.player_move(current.moved(0, -1)),
            GameEvent::MoveRight => self.player_move(current.moved(0, 1)),
            GameEvent::RotateCw => self.player_move(current.rotated()),
            GameEvent::SoftDrop => self.player_move(current.moved(1, 0)),
            GameEvent::Tick => self.gravity(),
            GameEvent::Quit => StepOutcome::Quit,
        }
    }

    /// Run the move protocol for a candidate of the current piece
    fn try_move(&mut self, candidate: PieceStatus) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        placement::try_move(&mut self.grid, current, candidate)
    }

    fn player_move(&mut self, candidate: PieceStatus) -> StepOutcome {
        if self.try_move(candidate) {
            StepOutcome::Moved
        } else {
            StepOutcome::Blocked
        }
    }

    /// Gravity: descend one row, or lock, clear and respawn
    fn gravity(&mut self) -> StepOutcome {
        let Some(current) = self.current else {
            return StepOutcome::Ignored;
        };
        if self.try_move(current.moved(1, 0)) {
            return StepOutcome::Moved;
        }

        // Locking: the piece's cells are already in the grid.
        self.current = None;
        let cleared = self.grid.clear_full_rows();
        debug!(
            shape = current.kind.as_str(),
            row = current.row,
            col = current.col,
            rows_cleared = cleared.len(),
            "piece locked"
        );

        if self.spawn() {
            StepOutcome::Locked {
                rows_cleared: cleared.len(),
            }
        } else {
            StepOutcome::GameOver
        }
    }

    /// Wipe the next row of the game-over sweep
    ///
    /// Returns true if a row was processed, false once every row from the
    /// bottom playable row up to the top margin has been wiped (or when the
    /// game is not over).
    pub fn wipe_step(&mut self) -> bool {
        let Phase::GameOver { wipe_row } = self.phase else {
            return false;
        };
        if wipe_row < 0 {
            return false;
        }
        self.grid.wipe_row(wipe_row);
        self.phase = Phase::GameOver {
            wipe_row: wipe_row - 1,
        };
        true
    }

    /// Whether the game-over sweep has finished
    pub fn wipe_done(&self) -> bool {
        matches!(self.phase, Phase::GameOver { wipe_row } if wipe_row < 0)
    }

    /// Replace this game with a fresh one and spawn its first piece
    ///
    /// The RNG carries over so the shape sequence keeps going.
    pub fn restart(&mut self) -> bool {
        let rng = self.rng.clone();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::with_rng(rng);
        self.episode_id = next_episode;
        info!(episode = next_episode, "restart");
        self.start()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::is_legal;

    fn falling(kind: ShapeKind) -> GameState {
        let mut state = GameState::new(12345);
        assert!(state.spawn_kind(kind));
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.running());
        assert!(state.current().is_none());
        assert_eq!(state.episode_id(), 0);
        assert_eq!(state.grid().blocks().count(), 0);
    }

    #[test]
    fn test_start_spawns_once() {
        let mut state = GameState::new(12345);
        assert!(state.start());
        assert!(state.running());
        let piece = state.current().unwrap();
        assert_eq!((piece.row, piece.col, piece.rotation), (SPAWN_ROW, SPAWN_COL, 0));
        assert_eq!(state.grid().blocks().count(), 4);

        // Starting again is a no-op.
        assert!(!state.start());
        assert_eq!(state.grid().blocks().count(), 4);
    }

    #[test]
    fn test_events_ignored_while_idle() {
        let mut state = GameState::new(1);
        for event in [
            GameEvent::MoveLeft,
            GameEvent::MoveRight,
            GameEvent::RotateCw,
            GameEvent::SoftDrop,
            GameEvent::Tick,
        ] {
            assert_eq!(state.handle(event), StepOutcome::Ignored);
        }
        assert_eq!(state.handle(GameEvent::Quit), StepOutcome::Quit);
    }

    #[test]
    fn test_player_moves() {
        let mut state = falling(ShapeKind::T);

        assert_eq!(state.handle(GameEvent::MoveLeft), StepOutcome::Moved);
        assert_eq!(state.current().unwrap().col, SPAWN_COL - 1);

        assert_eq!(state.handle(GameEvent::MoveRight), StepOutcome::Moved);
        assert_eq!(state.current().unwrap().col, SPAWN_COL);

        assert_eq!(state.handle(GameEvent::SoftDrop), StepOutcome::Moved);
        assert_eq!(state.current().unwrap().row, SPAWN_ROW + 1);

        assert_eq!(state.handle(GameEvent::RotateCw), StepOutcome::Moved);
        assert_eq!(state.current().unwrap().rotation, 1);

        assert_eq!(state.grid().blocks().count(), 4);
    }

    #[test]
    fn test_move_into_wall_is_blocked() {
        let mut state = falling(ShapeKind::O);
        let mut moved = 0;
        for _ in 0..10 {
            if state.handle(GameEvent::MoveLeft) == StepOutcome::Moved {
                moved += 1;
            }
        }
        // Anchor at column 5, leftmost playable column is 1.
        assert_eq!(moved, 4);
        let before = state.grid().clone();
        assert_eq!(state.handle(GameEvent::MoveLeft), StepOutcome::Blocked);
        assert_eq!(state.grid(), &before);
    }

    #[test]
    fn test_rotation_counter_is_unbounded() {
        let mut state = falling(ShapeKind::O);
        for _ in 0..9 {
            assert_eq!(state.handle(GameEvent::RotateCw), StepOutcome::Moved);
        }
        assert_eq!(state.current().unwrap().rotation, 9);
    }

    #[test]
    fn test_gravity_until_lock() {
        let mut state = falling(ShapeKind::O);
        let mut ticks = 0;
        loop {
            match state.handle(GameEvent::Tick) {
                StepOutcome::Moved => ticks += 1,
                StepOutcome::Locked { rows_cleared } => {
                    assert_eq!(rows_cleared, 0);
                    break;
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        // O spawns with its lower row at 2 and rests with it on row 21.
        assert_eq!(ticks, (LIMIT_Y - 1) - (SPAWN_ROW + 1));
        assert_eq!(state.grid().cell_at(LIMIT_Y - 1, SPAWN_COL), Some(Cell::Block(ShapeKind::O)));
        assert_eq!(state.grid().cell_at(LIMIT_Y, SPAWN_COL), Some(Cell::Wall));
        // Locked O plus the freshly spawned piece.
        assert_eq!(state.grid().blocks().count(), 8);
        assert!(state.running());
    }

    #[test]
    fn test_lock_clears_completed_row() {
        let mut state = GameState::new(3);
        // Bottom row full except column 5.
        for col in MARGIN_X..LIMIT_X {
            if col != SPAWN_COL {
                state.grid_mut().set_cell(LIMIT_Y - 1, col, Cell::Block(ShapeKind::Z));
            }
        }
        assert!(state.spawn_kind(ShapeKind::I));
        assert_eq!(state.handle(GameEvent::RotateCw), StepOutcome::Moved);

        let mut outcome = StepOutcome::Moved;
        while outcome == StepOutcome::Moved {
            outcome = state.handle(GameEvent::Tick);
        }
        assert_eq!(outcome, StepOutcome::Locked { rows_cleared: 1 });

        // The three upper cells of the vertical I slid down by one row.
        for row in (LIMIT_Y - 3)..LIMIT_Y {
            assert_eq!(state.grid().cell_at(row, SPAWN_COL), Some(Cell::Block(ShapeKind::I)));
        }
        assert!(state.grid().is_vacant(LIMIT_Y - 1, SPAWN_COL - 1));
    }

    #[test]
    fn test_second_square_at_spawn_is_game_over() {
        let mut state = falling(ShapeKind::O);
        assert!(!state.spawn_kind(ShapeKind::O));
        assert!(state.game_over());
        assert!(!state.running());
        assert!(state.current().is_none());
        assert_eq!(state.handle(GameEvent::MoveLeft), StepOutcome::Ignored);
    }

    #[test]
    fn test_gravity_reports_game_over() {
        let mut state = GameState::new(5);
        for row in MARGIN_Y..LIMIT_Y {
            for col in MARGIN_X..LIMIT_X {
                if col != 1 {
                    state.grid_mut().set_cell(row, col, Cell::Block(ShapeKind::S));
                }
            }
        }
        // Every shape needs the spawn anchor.
        state
            .grid_mut()
            .set_cell(SPAWN_ROW, SPAWN_COL, Cell::Block(ShapeKind::S));
        // A falling piece in the margin that cannot descend.
        let status = PieceStatus {
            row: 0,
            col: 2,
            kind: ShapeKind::O,
            rotation: 0,
        };
        assert!(is_legal(state.grid(), &status));
        placement::commit(state.grid_mut(), &status);
        state.current = Some(status);
        state.phase = Phase::Falling;

        assert_eq!(state.handle(GameEvent::Tick), StepOutcome::GameOver);
        assert_eq!(
            state.phase(),
            Phase::GameOver {
                wipe_row: LIMIT_Y - 1
            }
        );
    }

    #[test]
    fn test_wipe_sweeps_bottom_up_then_restart() {
        let mut state = falling(ShapeKind::O);
        state.grid_mut().set_cell(LIMIT_Y - 1, 3, Cell::Block(ShapeKind::L));
        assert!(!state.spawn_kind(ShapeKind::O));

        assert!(state.wipe_step());
        assert!(state.grid().is_vacant(LIMIT_Y - 1, 3));
        // The spawn-area square is still there until the sweep reaches it.
        assert_eq!(state.grid().cell_at(SPAWN_ROW, SPAWN_COL), Some(Cell::Block(ShapeKind::O)));

        let mut steps = 1;
        while state.wipe_step() {
            steps += 1;
        }
        assert_eq!(steps, LIMIT_Y as usize);
        assert!(state.wipe_done());
        assert_eq!(state.grid(), &Grid::new());

        assert!(state.restart());
        assert_eq!(state.episode_id(), 1);
        assert!(state.running());
        assert_eq!(state.grid().blocks().count(), 4);
    }

    #[test]
    fn test_wipe_step_outside_game_over() {
        let mut state = falling(ShapeKind::T);
        assert!(!state.wipe_step());
        assert!(!state.wipe_done());
    }

    #[test]
    fn test_outcome_redraw_flags() {
        assert!(StepOutcome::Moved.needs_redraw());
        assert!(StepOutcome::Locked { rows_cleared: 0 }.needs_redraw());
        assert!(StepOutcome::GameOver.needs_redraw());
        assert!(!StepOutcome::Blocked.needs_redraw());
        assert!(!StepOutcome::Ignored.needs_redraw());
        assert!(!StepOutcome::Quit.needs_redraw());
    }
}
