//! Event producers feeding the session queue.
//!
//! Both producers only send; the session is the single consumer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::input::{translate_event, HostEvent};
use crate::types::GameEvent;

/// How long the input pump blocks before re-checking the stop flag
pub const INPUT_POLL: Duration = Duration::from_millis(50);

/// Send a `Tick` every `period`, starting one period from now.
///
/// Returns once the receiving side is gone.
pub async fn run_ticker(period: Duration, tx: mpsc::Sender<HostEvent>) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if tx.send(HostEvent::Game(GameEvent::Tick)).await.is_err() {
            debug!("ticker stopped");
            return;
        }
    }
}

/// Read terminal events on a blocking thread and forward the mapped ones.
///
/// The pump ends when `stop` is set or the receiver is gone. A terminal read
/// failure sends `Quit` so the session winds down, then surfaces as the
/// task's error.
pub fn spawn_input_pump(
    tx: mpsc::Sender<HostEvent>,
    stop: Arc<AtomicBool>,
) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || {
        let result = pump_events(&tx, &stop);
        if let Err(err) = &result {
            error!(error = %err, "input pump failed");
            let _ = tx.blocking_send(HostEvent::Game(GameEvent::Quit));
        }
        result
    })
}

fn pump_events(tx: &mpsc::Sender<HostEvent>, stop: &AtomicBool) -> Result<()> {
    while !stop.load(Ordering::Relaxed) {
        if !event::poll(INPUT_POLL).context("poll terminal events")? {
            continue;
        }
        let ev = event::read().context("read terminal event")?;
        if let Some(host) = translate_event(ev) {
            if tx.blocking_send(host).is_err() {
                break;
            }
        }
    }
    debug!("input pump stopped");
    Ok(())
}
