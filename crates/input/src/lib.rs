//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key, mouse and resize events into [`HostEvent`]s: game events
//! for the state machine, or a resize notice for the renderer.

pub mod map;
pub mod mouse;

pub use tui_blockfall_types as types;

pub use map::{handle_key_event, should_quit};
pub use mouse::{handle_mouse_event, MouseButtons};

use crossterm::event::Event;

use crate::types::GameEvent;

/// Event delivered from the host layer to the session loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Game(GameEvent),
    /// Terminal resized; the next frame must be a full redraw
    Resize(u16, u16),
}

/// Translate one terminal event; `None` for anything without a meaning here
pub fn translate_event(event: Event) -> Option<HostEvent> {
    match event {
        Event::Key(key) => handle_key_event(key).map(HostEvent::Game),
        Event::Mouse(mouse) => handle_mouse_event(mouse).map(HostEvent::Game),
        Event::Resize(w, h) => Some(HostEvent::Resize(w, h)),
        _ => None,
    }
}
