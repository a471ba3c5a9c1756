//! GameView: maps a [`GameSnapshot`] onto a [`Canvas`].
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{piece_def, GameSnapshot};
use crate::fb::{Canvas, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_COLUMNS, VISIBLE_ROWS};

/// Digits shown for the score.
pub const SCORE_DIGITS: u8 = 7;

const PREVIEW_CELLS: u16 = 4;

const IDLE_LINES: [&str; 2] = ["Press Space to start", "Arrows move blocks"];
const GAME_OVER_LINES: [&str; 2] = ["Game Over!", "Space to restart"];
const HELP_LINES: [&str; 4] = ["←/→  move", "↓    drop", "↑    rotate", "q    quit"];

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

/// Square-wave toggle for blinking overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    period_ms: u64,
}

impl Blink {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
        }
    }

    /// On for the first half of each period.
    pub fn is_on(&self, now_ms: u64) -> bool {
        (now_ms / self.period_ms) % 2 == 0
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new(500)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame landed, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let w = (BOARD_COLUMNS as u16) * self.cell_w + 2;
        let h = (VISIBLE_ROWS as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout { x, y, w, h }
    }

    /// Render into a reusable framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        blink_on: bool,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        self.draw(snap, viewport, blink_on, fb);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport, blink_on: bool) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.draw(snap, viewport, blink_on, &mut fb);
        fb
    }

    /// Draw one full frame onto any canvas.
    pub fn draw<C: Canvas>(&self, snap: &GameSnapshot, viewport: Viewport, blink_on: bool, canvas: &mut C) {
        canvas.clear_screen(CellStyle::default());

        let layout = self.layout(viewport);
        let bg = CellStyle::new(Rgb::new(80, 80, 90), Rgb::new(30, 30, 40));
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        canvas.rectangle(layout.x + 1, layout.y + 1, layout.w - 2, layout.h - 2, ' ', bg);
        canvas.stroke_rect(layout.x, layout.y, layout.w, layout.h, border);

        // The spawn buffer stays hidden; the active piece is already on the board.
        for (y, row) in snap.visible_board().iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let px = layout.x + 1 + (x as u16) * self.cell_w;
                let py = layout.y + 1 + (y as u16) * self.cell_h;
                match PieceKind::from_code(code) {
                    Some(kind) => {
                        canvas.rectangle(px, py, self.cell_w, self.cell_h, '█', piece_style(kind))
                    }
                    None => canvas.rectangle(px, py, self.cell_w, self.cell_h, '·', bg.dim()),
                }
            }
        }

        self.draw_side_panel(canvas, snap, viewport, layout);

        if blink_on {
            if snap.over {
                self.draw_overlay(canvas, layout, &GAME_OVER_LINES);
            } else if snap.idle() {
                self.draw_overlay(canvas, layout, &IDLE_LINES);
            }
        }
    }

    fn draw_side_panel<C: Canvas>(
        &self,
        canvas: &mut C,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = layout.y;
        canvas.text(panel_x, y, "Next Block", label);
        y += 1;
        canvas.stroke_rect(panel_x, y, PREVIEW_CELLS * 2 + 2, PREVIEW_CELLS + 2, value.dim());
        let shape = piece_def(snap.next).spawn_shape();
        for (r, c) in shape.cells() {
            canvas.rectangle(
                panel_x + 1 + (c as u16) * 2,
                y + 1 + r as u16,
                2,
                1,
                '█',
                piece_style(snap.next),
            );
        }
        y += PREVIEW_CELLS + 3;

        canvas.text(panel_x, y, "Level", label);
        canvas.number(panel_x + 7, y, snap.level, 1, value);
        y += 2;

        canvas.text(panel_x, y, "Score", label);
        y += 1;
        canvas.number(panel_x, y, snap.score, SCORE_DIGITS, value);
        y += 2;

        canvas.text(panel_x, y, "Lines", label);
        canvas.number(panel_x + 7, y, snap.lines, 1, value);
        y += 2;

        let help = value.dim();
        for line in HELP_LINES {
            if y >= viewport.height {
                break;
            }
            canvas.text(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay<C: Canvas>(&self, canvas: &mut C, layout: BoardLayout, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = layout.y.saturating_add(layout.h / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = layout.x.saturating_add(layout.w.saturating_sub(text_w) / 2);
            canvas.text(x, mid_y.saturating_add(i as u16), text, style);
        }
    }
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::Square => Rgb::new(240, 220, 80),
        PieceKind::Unit => Rgb::new(80, 220, 220),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, Rgb::new(30, 30, 40)).bold()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SPAWN_BUFFER_ROWS;

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn idle_overlay_blinks() {
        let view = GameView::default();
        let snap = GameSnapshot::default();
        let vp = Viewport::new(60, 24);

        assert!(screen(&view.render(&snap, vp, true)).contains("Press Space to start"));
        assert!(!screen(&view.render(&snap, vp, false)).contains("Press Space to start"));
    }

    #[test]
    fn game_over_overlay() {
        let view = GameView::default();
        let snap = GameSnapshot {
            over: true,
            ..GameSnapshot::default()
        };
        let text = screen(&view.render(&snap, Viewport::new(60, 24), true));
        assert!(text.contains("Game Over!"));
        assert!(!text.contains("Press Space to start"));
    }

    #[test]
    fn running_has_no_overlay() {
        let view = GameView::default();
        let snap = GameSnapshot {
            running: true,
            ..GameSnapshot::default()
        };
        let text = screen(&view.render(&snap, Viewport::new(60, 24), true));
        assert!(!text.contains("Press Space"));
        assert!(!text.contains("Game Over"));
    }

    #[test]
    fn score_is_seven_digits() {
        let view = GameView::default();
        let snap = GameSnapshot {
            running: true,
            score: 1240,
            level: 3,
            ..GameSnapshot::default()
        };
        let text = screen(&view.render(&snap, Viewport::new(60, 24), true));
        assert!(text.contains("0001240"));
        assert!(text.contains("Level  3"));
        assert!(text.contains("Next Block"));
    }

    #[test]
    fn spawn_buffer_rows_are_hidden() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let vp = Viewport::new(60, 24);
        let mut snap = GameSnapshot {
            running: true,
            ..GameSnapshot::default()
        };
        snap.board[0][0] = PieceKind::T.code();
        let fb = view.render(&snap, vp, true);
        let layout = view.layout(vp);
        assert_eq!(fb.get(layout.x + 1, layout.y + 1).map(|c| c.ch), Some('·'));

        snap.board[SPAWN_BUFFER_ROWS as usize][0] = PieceKind::T.code();
        let fb = view.render(&snap, vp, true);
        assert_eq!(fb.get(layout.x + 1, layout.y + 1).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(layout.x + 2, layout.y + 1).map(|c| c.ch), Some('█'));
    }

    #[test]
    fn blink_alternates_by_period() {
        let blink = Blink::new(500);
        assert!(blink.is_on(0));
        assert!(blink.is_on(499));
        assert!(!blink.is_on(500));
        assert!(blink.is_on(1000));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), Viewport::new(5, 3), true);
        assert_eq!(fb.cells().len(), 15);
    }
}
