//! Session: the single consumer of the event queue.
//!
//! Every event is applied to the [`GameState`] in arrival order and followed
//! by a redraw when the board may have changed. When a spawn collides the
//! session runs the game-over wipe: one row per `wipe_row` interval, dropping
//! everything but `Quit`, and then restarts with a fresh board.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::core::{GameState, Snapshot, StepOutcome};
use crate::input::HostEvent;
use crate::types::GameEvent;

/// Drawing surface for snapshots
pub trait Screen {
    fn draw(&mut self, snap: &Snapshot) -> Result<()>;

    /// Drop any cached frame so the next draw is complete
    fn invalidate(&mut self) {}
}

impl<S: Screen + ?Sized> Screen for &mut S {
    fn draw(&mut self, snap: &Snapshot) -> Result<()> {
        (**self).draw(snap)
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }
}

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Events applied to the game state
    pub events: u64,
    /// Events discarded during a game-over wipe
    pub dropped: u64,
    pub pieces_locked: u64,
    pub rows_cleared: u64,
    pub games_over: u32,
    pub frames: u64,
}

enum Flow {
    Continue,
    Quit,
}

pub struct Session<S> {
    game: GameState,
    screen: S,
    rx: mpsc::Receiver<HostEvent>,
    wipe_row: Duration,
    snap: Snapshot,
    stats: SessionStats,
}

impl<S: Screen> Session<S> {
    pub fn new(config: &Config, screen: S, rx: mpsc::Receiver<HostEvent>) -> Self {
        Self::with_game(GameState::new(config.seed), config.wipe_row, screen, rx)
    }

    /// Run a prepared game; an idle game is started by [`Session::run`]
    pub fn with_game(
        game: GameState,
        wipe_row: Duration,
        screen: S,
        rx: mpsc::Receiver<HostEvent>,
    ) -> Self {
        Self {
            game,
            screen,
            rx,
            wipe_row,
            snap: Snapshot::default(),
            stats: SessionStats::default(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Consume events until `Quit` or until every sender is gone.
    ///
    /// The queue is closed on return, error or not, so producers blocked on a
    /// full queue are released.
    pub async fn run(&mut self) -> Result<SessionStats> {
        let result = self.consume().await;
        self.rx.close();
        result
    }

    async fn consume(&mut self) -> Result<SessionStats> {
        info!(episode = self.game.episode_id(), "session started");
        self.game.start();
        if self.game.game_over() {
            // Only reachable with a prepared board that blocks the spawn.
            self.redraw()?;
            if let Flow::Quit = self.game_over_sequence().await? {
                return Ok(self.finish());
            }
        }
        self.redraw()?;

        while let Some(ev) = self.rx.recv().await {
            let event = match ev {
                HostEvent::Resize(w, h) => {
                    debug!(width = w, height = h, "resize");
                    self.screen.invalidate();
                    self.redraw()?;
                    continue;
                }
                HostEvent::Game(event) => event,
            };

            self.stats.events += 1;
            let outcome = self.game.handle(event);
            trace!(event = event.as_str(), outcome = ?outcome, "handled");
            match outcome {
                StepOutcome::Quit => break,
                StepOutcome::GameOver => {
                    self.stats.pieces_locked += 1;
                    self.redraw()?;
                    if let Flow::Quit = self.game_over_sequence().await? {
                        break;
                    }
                }
                outcome => {
                    if let StepOutcome::Locked { rows_cleared } = outcome {
                        self.stats.pieces_locked += 1;
                        self.stats.rows_cleared += rows_cleared as u64;
                    }
                    if outcome.needs_redraw() {
                        self.redraw()?;
                    }
                }
            }
        }

        Ok(self.finish())
    }

    /// Wipe the board row by row, then restart
    async fn game_over_sequence(&mut self) -> Result<Flow> {
        self.stats.games_over += 1;
        info!(
            episode = self.game.episode_id(),
            games_over = self.stats.games_over,
            "game over"
        );

        while self.game.wipe_step() {
            self.redraw()?;
            if let Flow::Quit = self.pause_dropping_events().await? {
                return Ok(Flow::Quit);
            }
        }

        if !self.game.restart() {
            warn!(episode = self.game.episode_id(), "restart could not spawn");
        }
        self.redraw()?;
        Ok(Flow::Continue)
    }

    /// Sleep one wipe interval; only `Quit` (or a closed queue) interrupts it
    async fn pause_dropping_events(&mut self) -> Result<Flow> {
        let sleep = time::sleep(self.wipe_row);
        tokio::pin!(sleep);

        loop {
            let next = tokio::select! {
                _ = &mut sleep => None,
                ev = self.rx.recv() => Some(ev),
            };
            match next {
                None => return Ok(Flow::Continue),
                Some(None) | Some(Some(HostEvent::Game(GameEvent::Quit))) => {
                    return Ok(Flow::Quit)
                }
                Some(Some(HostEvent::Resize(..))) => {
                    self.screen.invalidate();
                    self.redraw()?;
                }
                Some(Some(HostEvent::Game(event))) => {
                    debug!(event = event.as_str(), "dropped during wipe");
                    self.stats.dropped += 1;
                }
            }
        }
    }

    fn redraw(&mut self) -> Result<()> {
        self.game.snapshot_into(&mut self.snap);
        self.screen.draw(&self.snap)?;
        self.stats.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> SessionStats {
        info!(
            events = self.stats.events,
            rows_cleared = self.stats.rows_cleared,
            games_over = self.stats.games_over,
            "session finished"
        );
        self.stats
    }
}
