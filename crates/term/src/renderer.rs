//! TerminalRenderer: presents framebuffers on a real terminal.
//!
//! The renderer remembers what is on screen. Each frame is compared row by row
//! against that copy and only the differing spans are written. With nothing on
//! screen yet, or after a resize, every row is a single span behind a full clear.
//!
//! On terminals that support the keyboard enhancement protocol, `enter` also
//! asks for key release and repeat events.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, queue, terminal};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// A horizontal run of cells to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Collect the spans of `next` that differ from `shown` into `spans`.
///
/// Returns true when the whole frame has to be redrawn.
pub fn collect_spans(shown: Option<&FrameBuffer>, next: &FrameBuffer, spans: &mut Vec<Span>) -> bool {
    spans.clear();
    let width = next.width() as usize;
    if width == 0 {
        return false;
    }

    let shown = shown.filter(|s| s.width() == next.width() && s.height() == next.height());
    let Some(shown) = shown else {
        spans.extend((0..next.height()).map(|y| Span {
            x: 0,
            y,
            len: next.width(),
        }));
        return true;
    };

    let rows = shown
        .cells()
        .chunks_exact(width)
        .zip(next.cells().chunks_exact(width));
    for (y, (old, new)) in rows.enumerate() {
        let mut start: Option<usize> = None;
        for x in 0..=width {
            let differs = x < width && old[x] != new[x];
            match (start, differs) {
                (None, true) => start = Some(x),
                (Some(s), false) => {
                    spans.push(Span {
                        x: s as u16,
                        y: y as u16,
                        len: (x - s) as u16,
                    });
                    start = None;
                }
                _ => {}
            }
        }
    }
    false
}

/// Tracks the terminal's current style so unchanged attributes are not resent.
#[derive(Debug, Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, style: CellStyle) -> io::Result<()> {
        let prev = match self.style {
            Some(prev) if prev == style => return Ok(()),
            prev => prev,
        };

        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if attrs_changed {
            // Resetting attributes also drops colors, so both are resent below.
            queue!(out, SetAttribute(Attribute::Reset))?;
            if style.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            queue!(out, SetForegroundColor(true_color(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            queue!(out, SetBackgroundColor(true_color(style.bg)))?;
        }

        self.style = Some(style);
        Ok(())
    }
}

fn true_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode the changes from `shown` to `next` as terminal commands.
///
/// `spans` is scratch space, reused across frames.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    spans: &mut Vec<Span>,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    if collect_spans(shown, next, spans) {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;
    }
    if spans.is_empty() {
        return Ok(());
    }

    let mut pen = Pen::default();
    for span in spans.iter() {
        queue!(out, cursor::MoveTo(span.x, span.y))?;
        for x in span.x..span.x + span.len {
            let cell: Cell = next.get(x, span.y).unwrap_or_default();
            pen.apply(out, cell.style)?;
            queue!(out, Print(cell.ch))?;
        }
    }
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    Ok(())
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    spans: Vec<Span>,
    buf: Vec<u8>,
    active: bool,
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            spans: Vec::new(),
            buf: Vec::with_capacity(64 * 1024),
            active: false,
            enhanced_keys: false,
        }
    }

    /// Whether [`TerminalRenderer::enter`] has run without a matching exit.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the terminal reports key releases and repeats.
    pub fn has_enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.shown = None;

        self.buf.clear();
        queue!(
            self.buf,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            queue!(
                self.buf,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced_keys = true;
        }
        tracing::debug!(enhanced_keys = self.enhanced_keys, "terminal entered");
        self.write_buf()
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        self.buf.clear();
        if self.enhanced_keys {
            queue!(self.buf, PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        queue!(
            self.buf,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.write_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen so the next frame is a full redraw.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Write the differences between the screen and `fb`, then remember `fb`.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.shown.as_ref(), fb, &mut self.spans, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.write_buf()?;
        }

        match self.shown.as_mut() {
            Some(shown) => shown.copy_from(fb),
            None => self.shown = Some(fb.clone()),
        }
        Ok(())
    }

    fn write_buf(&mut self) -> Result<()> {
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

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}
