//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Setup switches to raw mode and the alternate screen, and asks for key
//! release reports when the terminal supports them. Each frame only rewrites
//! the runs of cells that changed since the previous one.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Color;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
    release_events: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(64 * 1024),
            release_events: false,
        }
    }

    /// Take over the terminal. Returns whether key releases will be reported.
    pub fn enter(&mut self) -> Result<bool> {
        terminal::enable_raw_mode()?;

        // Terminals that cannot answer the query get the timeout fallback.
        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        if self.release_events {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        Ok(self.release_events)
    }

    /// Hand the terminal back in the state `enter` found it.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if std::mem::take(&mut self.release_events) {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Show `fb`, then hand the previously shown buffer back through `fb`.
    ///
    /// The first frame and any frame after a resize are drawn in full.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut shown = match self.shown.take() {
            Some(prev) if same_size(&prev, fb) => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.buf)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a clear-and-repaint of the whole frame into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        painter.run(fb, 0, y, fb.width())?;
    }
    painter.finish()
}

/// Encode the cells of `next` that differ from `prev` into `out`.
///
/// Frames of different sizes cannot be diffed and are repainted in full.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if !same_size(prev, next) {
        return encode_full_into(next, out);
    }
    let mut painter = Painter::new(out);
    for run in changed_runs(prev, next) {
        painter.run(next, run.x, run.y, run.len)?;
    }
    painter.finish()
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Queues cells, emitting style commands only when the style changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn run(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            self.cell(fb.get(x + dx, y).unwrap_or_default())?;
        }
        Ok(())
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let s = cell.style;
            self.out
                .queue(SetAttribute(Attribute::Reset))?
                .queue(SetForegroundColor(term_color(s.fg)))?
                .queue(SetBackgroundColor(term_color(s.bg)))?;
            if s.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if s.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(s);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Horizontal span of changed cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Maximal runs of differing cells, row by row. Both frames must be the same size.
fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = Run> + 'a {
    (0..next.height()).flat_map(move |y| RowRuns { prev, next, y, x: 0 })
}

struct RowRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    y: u16,
    x: u16,
}

impl RowRuns<'_> {
    fn differs(&self, x: u16) -> bool {
        self.prev.get(x, self.y) != self.next.get(x, self.y)
    }
}

impl Iterator for RowRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let w = self.next.width();
        while self.x < w && !self.differs(self.x) {
            self.x += 1;
        }
        if self.x >= w {
            return None;
        }
        let start = self.x;
        while self.x < w && self.differs(self.x) {
            self.x += 1;
        }
        Some(Run {
            x: start,
            y: self.y,
            len: self.x - start,
        })
    }
}
