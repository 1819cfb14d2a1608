//! TerminalRenderer: flushes a framebuffer to a terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; later frames only emit the changed runs.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Render to any writer (tests capture output in a `Vec<u8>`).
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode plus alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. The renderer
    /// diffs against the previous frame, then swaps buffers so the caller
    /// reuses the old one without cloning. Returns the bytes written.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<usize> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            other => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = other.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(self.buf.len())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf).context("terminal write failed")?;
        self.out.flush().context("terminal flush failed")?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` (no I/O).
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        put_run(fb, 0, y, fb.width(), &mut style, out)?;
    }
    finish(out)
}

/// Encode only the runs that changed between `prev` and `next` (no I/O).
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for_each_changed_run(prev, next, |x, y, len| put_run(next, x, y, len, &mut style, out))?;
    finish(out)
}

/// Move to `(x, y)` and print `len` cells, switching style only when it changes.
fn put_run(
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    current: &mut Option<CellStyle>,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for dx in 0..len {
        let cell = fb.get(x + dx, y).unwrap_or_default();
        if *current != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            *current = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for each horizontal run of cells that differ.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let (w, h) = (next.width(), next.height());
    let differs = |x: u16, y: u16| prev.get(x, y) != next.get(x, y);

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if !differs(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && differs(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
