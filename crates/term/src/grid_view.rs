//! GridView: maps a `GridSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The grid is drawn with its highest row at the top of the screen, so `y = 0`
//! sits on the bottom border.

use crate::core::GridSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::Colour;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Figures shown beside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusView {
    pub min_group_size: usize,
    pub last_cleared: usize,
    pub resets: u32,
}

/// Where the framed grid lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the block grid.
pub struct GridView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GridView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GridView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn layout(&self, snap: &GridSnapshot, viewport: Viewport) -> Layout {
        let frame_w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = snap.height.saturating_mul(self.cell_h).saturating_add(2);
        Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Terminal origin of grid cell (x, y), or None when it lies past `u16` range.
    fn cell_origin(
        &self,
        snap: &GridSnapshot,
        layout: Layout,
        x: u16,
        y: u16,
    ) -> Option<(u16, u16)> {
        let row = snap.height.checked_sub(1)?.checked_sub(y)?;
        let px = x
            .checked_mul(self.cell_w)
            .and_then(|dx| (layout.start_x + 1).checked_add(dx))?;
        let py = row
            .checked_mul(self.cell_h)
            .and_then(|dy| (layout.start_y + 1).checked_add(dy))?;
        Some((px, py))
    }

    /// Map a terminal position back to the grid cell drawn there.
    ///
    /// Returns None for the border, the side panel and anything outside the grid.
    pub fn cell_at(
        &self,
        snap: &GridSnapshot,
        viewport: Viewport,
        col: u16,
        row: u16,
    ) -> Option<(u16, u16)> {
        let layout = self.layout(snap, viewport);
        let inner_x = col.checked_sub(layout.start_x + 1)?;
        let inner_y = row.checked_sub(layout.start_y + 1)?;
        let x = inner_x / self.cell_w;
        let from_top = inner_y / self.cell_h;
        if x >= snap.width || from_top >= snap.height {
            return None;
        }
        Some((x, snap.height - 1 - from_top))
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(
        &self,
        snap: &GridSnapshot,
        cursor: Option<(u16, u16)>,
        status: Option<&StatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let layout = self.layout(snap, viewport);
        let bg = Style::plain(Rgb::new(80, 80, 90), PLAY_BG);
        let border = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w.saturating_sub(2),
            layout.frame_h.saturating_sub(2),
            ' ',
            bg,
        );
        draw_border(fb, layout, border);

        for x in 0..snap.width {
            for y in 0..snap.height {
                // Cells right of or below the viewport are clipped.
                let Some((px, py)) = self
                    .cell_origin(snap, layout, x, y)
                    .filter(|&(px, py)| px < fb.width() && py < fb.height())
                else {
                    continue;
                };
                match snap.colour_at(x, y).and_then(colour_rgb) {
                    Some(fg) => {
                        let style = Style {
                            bold: true,
                            ..Style::plain(fg, PLAY_BG)
                        };
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
                    }
                    None => {
                        let style = Style {
                            dim: true,
                            ..Style::plain(Rgb::new(90, 90, 100), PLAY_BG)
                        };
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, '·', style);
                    }
                }
            }
        }

        if let Some((cx, cy)) = cursor {
            if cx < snap.width && cy < snap.height {
                self.draw_cursor(fb, snap, layout, cx, cy);
            }
        }

        if let Some(status) = status {
            draw_side_panel(fb, status, viewport, layout);
        }

        if snap.occupied() == 0 {
            draw_overlay_text(fb, layout, "CLEARED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GridSnapshot,
        cursor: Option<(u16, u16)>,
        status: Option<&StatusView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, status, viewport, &mut fb);
        fb
    }

    fn draw_cursor(
        &self,
        fb: &mut FrameBuffer,
        snap: &GridSnapshot,
        layout: Layout,
        x: u16,
        y: u16,
    ) {
        let Some((px, py)) = self.cell_origin(snap, layout, x, y) else {
            return;
        };
        let bg = snap.colour_at(x, y).and_then(colour_rgb).unwrap_or(PLAY_BG);
        let style = Style {
            bold: true,
            ..Style::plain(Rgb::new(255, 255, 255), bg)
        };
        if self.cell_w >= 2 {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.fill_rect(px, py, 1, self.cell_h, '[', style);
            fb.fill_rect(px.saturating_add(self.cell_w - 1), py, 1, self.cell_h, ']', style);
        } else {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '◆', style);
        }
    }
}

/// Terminal colour for a block, None for the cleared sentinel.
pub fn colour_rgb(colour: Colour) -> Option<Rgb> {
    match colour {
        Colour::Red => Some(Rgb::new(220, 80, 80)),
        Colour::Green => Some(Rgb::new(100, 220, 120)),
        Colour::Blue => Some(Rgb::new(80, 120, 220)),
        Colour::Yellow => Some(Rgb::new(240, 220, 80)),
        Colour::Orange => Some(Rgb::new(255, 165, 0)),
        Colour::Purple => Some(Rgb::new(150, 90, 210)),
        Colour::Cyan => Some(Rgb::new(80, 220, 220)),
        Colour::Magenta => Some(Rgb::new(220, 90, 200)),
        Colour::Cleared => None,
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: Layout, style: Style) {
    let Layout {
        start_x: x,
        start_y: y,
        frame_w: w,
        frame_h: h,
    } = layout;
    if w < 2 || h < 2 {
        return;
    }

    fb.set(x, y, style.glyph('┌'));
    fb.set(x + w - 1, y, style.glyph('┐'));
    fb.set(x, y + h - 1, style.glyph('└'));
    fb.set(x + w - 1, y + h - 1, style.glyph('┘'));

    for dx in 1..w - 1 {
        fb.set(x + dx, y, style.glyph('─'));
        fb.set(x + dx, y + h - 1, style.glyph('─'));
    }
    for dy in 1..h - 1 {
        fb.set(x, y + dy, style.glyph('│'));
        fb.set(x + w - 1, y + dy, style.glyph('│'));
    }
}

fn draw_side_panel(fb: &mut FrameBuffer, status: &StatusView, viewport: Viewport, layout: Layout) {
    let panel_x = layout
        .start_x
        .saturating_add(layout.frame_w)
        .saturating_add(2);
    if panel_x >= viewport.width || viewport.width - panel_x < 12 {
        return;
    }

    let label = Style {
        bold: true,
        ..Style::default()
    };
    let value = Style::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
    let hint = Style { dim: true, ..value };

    let mut y = layout.start_y;
    for (name, n) in [
        ("MIN GROUP", status.min_group_size),
        ("LAST CLEAR", status.last_cleared),
        ("RESETS", status.resets as usize),
    ] {
        fb.put_str(panel_x, y, name, label);
        fb.put_usize(panel_x, y.saturating_add(1), n, value);
        y = y.saturating_add(3);
    }

    for line in ["arrows move", "space select", "r reset", "q quit"] {
        if y >= viewport.height {
            break;
        }
        fb.put_str(panel_x, y, line, hint);
        y = y.saturating_add(1);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: Layout, text: &str) {
    let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = layout
        .start_x
        .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
    let style = Style {
        bold: true,
        ..Style::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
    };
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(columns: Vec<Vec<Option<Colour>>>) -> GridSnapshot {
        GridSnapshot {
            width: columns.len() as u16,
            height: columns[0].len() as u16,
            columns,
        }
    }

    #[test]
    fn cell_at_inverts_cell_origin() {
        let s = snap(vec![vec![Some(Colour::Red); 3]; 4]);
        let view = GridView::default();
        let vp = Viewport::new(30, 9);
        let layout = view.layout(&s, vp);

        for x in 0..4 {
            for y in 0..3 {
                let (px, py) = view.cell_origin(&s, layout, x, y).unwrap();
                assert_eq!(view.cell_at(&s, vp, px, py), Some((x, y)));
                assert_eq!(view.cell_at(&s, vp, px + 1, py), Some((x, y)));
            }
        }
    }

    #[test]
    fn cell_at_rejects_border() {
        let s = snap(vec![vec![Some(Colour::Red); 2]; 2]);
        let view = GridView::default();
        let vp = Viewport::new(6, 4);
        assert_eq!(view.cell_at(&s, vp, 0, 0), None);
        assert_eq!(view.cell_at(&s, vp, 5, 1), None);
        assert_eq!(view.cell_at(&s, vp, 1, 3), None);
    }

    #[test]
    fn very_wide_grid_is_clipped_to_the_viewport() {
        let s = snap(vec![vec![Some(Colour::Red)]; 40_000]);
        let view = GridView::default();
        let vp = Viewport::new(80, 24);

        let fb = view.render(&s, Some((39_999, 0)), None, vp);

        // Frame is 3 rows tall and centred vertically: top border on row 10.
        assert_eq!(fb.width(), 80);
        assert_eq!(fb.get(0, 10).unwrap().ch, '┌');
        assert_eq!(fb.get(1, 11).unwrap().ch, '█');
        assert_eq!(fb.get(79, 11).unwrap().ch, '█');
        assert_eq!(view.cell_origin(&s, view.layout(&s, vp), 39_999, 0), None);
    }

    #[test]
    fn tall_grid_with_tall_cells_does_not_overflow() {
        let s = snap(vec![vec![Some(Colour::Blue); 30_000]; 2]);
        let view = GridView::new(2, 3);

        let vp = Viewport::new(10, 10);
        let fb = view.render(&s, Some((0, 0)), None, vp);

        // Frame is 6 columns wide, so cells start at x = 3. Only the top rows fit.
        assert_eq!(fb.get(3, 1).unwrap().ch, '█');
        assert_eq!(fb.get(3, 9).unwrap().ch, '█');
        assert_eq!(view.cell_origin(&s, view.layout(&s, vp), 0, 0), None);
    }

    #[test]
    fn cleared_sentinel_has_no_colour() {
        assert_eq!(colour_rgb(Colour::Cleared), None);
        assert!(Colour::PLAYABLE.iter().all(|c| colour_rgb(*c).is_some()));
    }
}
