//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize) is a full redraw; later frames
//! only repaint the runs of glyphs that changed. Both paths share one encoder
//! that walks a list of [`Run`]s.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

/// A horizontal span of glyphs to repaint, `len` cells starting at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

impl Run {
    fn row(y: u16, width: u16) -> Self {
        Self { x: 0, y, len: width }
    }

    fn span(start: usize, end: usize, y: u16) -> Self {
        Self {
            x: start as u16,
            y,
            len: (end - start) as u16,
        }
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    /// Encoded escape sequences for the frame being drawn.
    buf: Vec<u8>,
    /// Changed runs of the frame being drawn; kept between frames.
    runs: Vec<Run>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            runs: Vec::with_capacity(64),
        }
    }

    /// Raw mode, alternate screen and mouse reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(EnableMouseCapture)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo everything `enter` did, in reverse order.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        queue_reset(&mut self.buf)?;
        self.buf
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(DisableMouseCapture)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// The caller gets the previously drawn frame back in `fb` and can render
    /// the next frame into it without allocating.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if same_size(prev, fb) => {
                encode_diff_into(prev, fb, &mut self.runs, &mut self.buf)?
            }
            _ => encode_full_into(fb, &mut self.buf)?,
        }
        self.flush_buf()?;

        let prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        self.last = Some(std::mem::replace(fb, prev));
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`: clear the screen, then every row.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let rows = (0..fb.height()).map(|y| Run::row(y, fb.width()));
    encode_runs_into(fb, rows, out)
}

/// Encode a diff redraw into `out`.
///
/// `runs` is scratch space; it is cleared and refilled with the changed runs,
/// so passing the same vector every frame avoids reallocating it.
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    runs: &mut Vec<Run>,
    out: &mut Vec<u8>,
) -> Result<()> {
    collect_changed_runs(prev, next, runs);
    encode_runs_into(next, runs.iter().copied(), out)
}

fn encode_runs_into(
    fb: &FrameBuffer,
    runs: impl IntoIterator<Item = Run>,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut current: Option<Style> = None;
    for run in runs {
        let Some(glyphs) = run_glyphs(fb, run) else {
            continue;
        };
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for glyph in glyphs {
            if current != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                current = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }
    queue_reset(out)
}

fn run_glyphs(fb: &FrameBuffer, run: Run) -> Option<&[Glyph]> {
    let start = run.x as usize;
    fb.row(run.y)?.get(start..start + run.len as usize)
}

/// Refill `runs` with the spans of `next` that differ from `prev`.
///
/// Frames of different sizes are compared as entirely changed.
fn collect_changed_runs(prev: &FrameBuffer, next: &FrameBuffer, runs: &mut Vec<Run>) {
    runs.clear();
    if !same_size(prev, next) {
        runs.extend((0..next.height()).map(|y| Run::row(y, next.width())));
        return;
    }

    for y in 0..next.height() {
        let (Some(old), Some(new)) = (prev.row(y), next.row(y)) else {
            continue;
        };
        if old == new {
            continue;
        }

        let mut start = None;
        for (x, (a, b)) in old.iter().zip(new).enumerate() {
            match (a != b, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push(Run::span(s, x, y));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push(Run::span(s, new.len(), y));
        }
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?
        .queue(SetBackgroundColor(rgb_to_color(style.bg)))?
        .queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn queue_reset(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    let Rgb { r, g, b } = rgb;
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs_between(a: &FrameBuffer, b: &FrameBuffer) -> Vec<Run> {
        let mut runs = Vec::new();
        collect_changed_runs(a, b, &mut runs);
        runs
    }

    #[test]
    fn changed_runs_coalesce_adjacent_glyphs() {
        let style = Style::default();
        let a = FrameBuffer::new(5, 2);
        let mut b = FrameBuffer::new(5, 2);

        for x in 1..=3 {
            b.set(x, 0, style.glyph('X'));
        }
        b.set(4, 1, style.glyph('Y'));

        assert_eq!(
            runs_between(&a, &b),
            vec![Run { x: 1, y: 0, len: 3 }, Run { x: 4, y: 1, len: 1 }]
        );
    }

    #[test]
    fn resized_frame_is_all_rows() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        assert_eq!(runs_between(&a, &b), vec![Run::row(0, 4), Run::row(1, 4)]);
    }

    #[test]
    fn scratch_runs_keep_their_allocation() {
        let a = FrameBuffer::new(8, 4);
        let mut b = a.clone();
        b.set(2, 1, Style::default().glyph('#'));

        let mut runs = Vec::with_capacity(16);
        let (ptr, cap) = (runs.as_ptr(), runs.capacity());
        let mut out = Vec::new();
        for _ in 0..10 {
            encode_diff_into(&a, &b, &mut runs, &mut out).unwrap();
            encode_diff_into(&b, &a, &mut runs, &mut out).unwrap();
        }

        assert_eq!(runs, vec![Run { x: 2, y: 1, len: 1 }]);
        assert_eq!(runs.as_ptr(), ptr);
        assert_eq!(runs.capacity(), cap);
    }

    #[test]
    fn identical_frames_encode_no_moves() {
        let a = FrameBuffer::new(3, 3);
        let mut runs = Vec::new();
        let mut diff = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut runs, &mut diff).unwrap();
        assert!(runs.is_empty());

        let mut reset = Vec::new();
        queue_reset(&mut reset).unwrap();
        assert_eq!(diff, reset, "only the reset sequence is written");
    }

    #[test]
    fn full_redraw_moves_to_every_row() {
        let mut fb = FrameBuffer::new(2, 3);
        fb.set(1, 2, Style::default().glyph('Q'));
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        for row in 1..=3 {
            assert!(text.contains(&format!("\x1b[{};1H", row)), "row {}", row);
        }
        assert!(text.contains('Q'));
    }
}
