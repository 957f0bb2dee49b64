//! Mouse mapping: left, middle and right click act as move-left, rotate and
//! move-right.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::GameEvent;

/// Bit set of pressed mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtons(u8);

impl MouseButtons {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(0x01);
    pub const MIDDLE: Self = Self(0x02);
    pub const RIGHT: Self = Self(0x04);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Resolve to a game event, left before middle before right
    pub fn to_event(self) -> Option<GameEvent> {
        if self.contains(Self::LEFT) {
            Some(GameEvent::MoveLeft)
        } else if self.contains(Self::MIDDLE) {
            Some(GameEvent::RotateCw)
        } else if self.contains(Self::RIGHT) {
            Some(GameEvent::MoveRight)
        } else {
            None
        }
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Middle => Self::MIDDLE,
            MouseButton::Right => Self::RIGHT,
        }
    }
}

/// Map a terminal mouse event to a game event. Only button presses count.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<GameEvent> {
    match mouse.kind {
        MouseEventKind::Down(button) => MouseButtons::from(button).to_event(),
        _ => None,
    }
}
