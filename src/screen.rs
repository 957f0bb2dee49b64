//! Terminal-backed [`Screen`]: snapshot -> framebuffer -> diffed terminal output.

use anyhow::Result;

use crate::core::Snapshot;
use crate::runtime::Screen;
use crate::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

pub struct TermScreen {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl Default for TermScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TermScreen {
    pub fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
        }
    }

    pub fn enter(&mut self, capture_mouse: bool) -> Result<()> {
        self.renderer.enter(capture_mouse)
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl Screen for TermScreen {
    fn draw(&mut self, snap: &Snapshot) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(snap, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn invalidate(&mut self) {
        self.renderer.invalidate();
    }
}
