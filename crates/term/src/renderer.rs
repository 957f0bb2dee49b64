//! TerminalRenderer: writes frames to a real terminal.
//!
//! A frame is compared row by row with the one before it. Each row that
//! changed is repainted as a single span from its first to its last differing
//! cell; the board is small, so one cursor move per row beats tracking runs.
//! A missing or differently sized previous frame means a full repaint.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor, event, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: Option<FrameBuffer>,
    scratch: Vec<u8>,
    mouse: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
            scratch: Vec::with_capacity(16 * 1024),
            mouse: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor and optional mouse reporting
    pub fn enter(&mut self, capture_mouse: bool) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.scratch.clear();
        queue!(
            self.scratch,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        if capture_mouse {
            queue!(self.scratch, event::EnableMouseCapture)?;
        }
        self.mouse = capture_mouse;
        self.prev = None;
        self.flush().context("initialize terminal")
    }

    /// Undo everything [`TerminalRenderer::enter`] did
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        if std::mem::take(&mut self.mouse) {
            queue!(self.scratch, event::DisableMouseCapture)?;
        }
        queue!(
            self.scratch,
            SetAttribute(Attribute::Reset),
            ResetColor,
            cursor::Show,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen
        )?;
        self.flush().context("restore terminal")?;
        terminal::disable_raw_mode().context("disable raw mode")
    }

    /// Forget the previous frame; the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `fb`, then keep it as the comparison frame.
    ///
    /// The caller gets the previous frame back in `fb` and is expected to
    /// render over it, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        let prev = self
            .prev
            .take()
            .filter(|p| p.width() == fb.width() && p.height() == fb.height());

        match &prev {
            Some(prev) => paint_changes(prev, fb, &mut self.scratch)?,
            None => paint_full(fb, &mut self.scratch)?,
        }
        if !self.scratch.is_empty() {
            self.flush()?;
        }

        let mut kept = prev.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut kept, fb);
        self.prev = Some(kept);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.scratch)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Clear the screen and paint every row of `fb` into `out`.
pub fn paint_full(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        queue!(out, cursor::MoveTo(0, y))?;
        for &cell in fb.row(y) {
            pen.print(out, cell)?;
        }
    }
    pen.finish(out)
}

/// Paint the rows of `next` that differ from `prev`; writes nothing when the
/// frames are equal. Both frames must have the same size.
pub fn paint_changes(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for y in 0..next.height() {
        let Some((first, last)) = dirty_span(prev.row(y), next.row(y)) else {
            continue;
        };
        queue!(out, cursor::MoveTo(first as u16, y))?;
        for &cell in &next.row(y)[first..=last] {
            pen.print(out, cell)?;
        }
    }
    pen.finish(out)
}

/// First and last index where the rows differ
fn dirty_span(old: &[Cell], new: &[Cell]) -> Option<(usize, usize)> {
    let differs = |(a, b): (&Cell, &Cell)| a != b;
    let first = old.iter().zip(new).position(differs)?;
    let last = old.iter().zip(new).rposition(differs)?;
    Some((first, last))
}

/// Tracks the style last sent so that only what changed is emitted
#[derive(Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        let want = cell.style;
        match self.current {
            Some(have) if have == want => {}
            Some(have) if have.bold == want.bold && have.dim == want.dim => {
                if have.fg != want.fg {
                    queue!(out, SetForegroundColor(color(want.fg)))?;
                }
                if have.bg != want.bg {
                    queue!(out, SetBackgroundColor(color(want.bg)))?;
                }
            }
            // Attribute reset also drops colors, so everything is re-sent.
            _ => {
                queue!(out, SetAttribute(Attribute::Reset))?;
                if want.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if want.dim {
                    queue!(out, SetAttribute(Attribute::Dim))?;
                }
                queue!(
                    out,
                    SetForegroundColor(color(want.fg)),
                    SetBackgroundColor(color(want.bg))
                )?;
            }
        }
        self.current = Some(want);
        queue!(out, Print(cell.ch))?;
        Ok(())
    }

    /// Leave the terminal in its default style if anything was painted
    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.current.is_some() {
            queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
