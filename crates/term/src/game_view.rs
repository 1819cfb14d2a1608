//! GameView: maps an arcade [`Frame`] and [`Status`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::engine::{Frame, Status};
use crate::core::{SnakeSnapshot, TetrisSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

pub const GAME_OVER_TEXT: &str = "Game Over - Press R to Restart";

/// Host keys listed under the status panel.
const HOST_KEYS: [&str; 3] = ["1 Snake   2 Tetris", "0 Close   R Restart", "Q Quit"];

/// Side panel width in columns (including the gap to the board).
const PANEL_W: u16 = 32;

const TEXT: Rgb = Rgb::new(229, 231, 235);
const MUTED: Rgb = Rgb::new(148, 163, 184);
const ERROR: Rgb = Rgb::new(239, 68, 68);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const TETRIS_BG: Rgb = Rgb::new(10, 15, 31);
const SNAKE_BG: Rgb = Rgb::new(12, 21, 43);
const SNAKE_HEAD: Rgb = Rgb::new(96, 165, 250);
const SNAKE_BODY: Rgb = Rgb::new(59, 130, 246);
const FOOD: Rgb = Rgb::new(245, 158, 11);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the play field landed in the framebuffer (border included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// A lightweight terminal renderer for both games.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
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

    /// Field placement for a `cols x rows` grid in `viewport`.
    pub fn field_rect(&self, cols: u16, rows: u16, viewport: Viewport) -> FieldRect {
        let w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let total_w = w.saturating_add(PANEL_W);
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        FieldRect { x, y, w, h }
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes. `None` draws the game selector.
    pub fn render_into(
        &self,
        frame: Option<&Frame>,
        status: &Status,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let Some(frame) = frame else {
            self.draw_selector(fb, status, viewport);
            return;
        };

        let field = match frame {
            Frame::Tetris(snap) => self.draw_tetris(fb, snap, viewport),
            Frame::Snake(snap) => self.draw_snake(fb, snap, viewport),
        };

        self.draw_side_panel(fb, status, viewport, field);

        if frame.game_over() {
            self.draw_game_over(fb, field);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: Option<&Frame>, status: &Status, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, status, viewport, &mut fb);
        fb
    }

    fn draw_tetris(&self, fb: &mut FrameBuffer, snap: &TetrisSnapshot, viewport: Viewport) -> FieldRect {
        let field = self.field_rect(BOARD_WIDTH as u16, BOARD_HEIGHT as u16, viewport);
        self.draw_field(fb, field, TETRIS_BG);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match PieceKind::from_code(code) {
                    Some(kind) => self.fill_cell(fb, field, x, y, '█', block_style(kind, TETRIS_BG)),
                    None => self.fill_cell(
                        fb,
                        field,
                        x,
                        y,
                        '·',
                        CellStyle::new(Rgb::new(40, 48, 70), TETRIS_BG),
                    ),
                }
            }
        }

        if let Some(piece) = &snap.piece {
            let style = block_style(piece.kind, TETRIS_BG).bold();
            for &(x, y) in piece.cells.iter() {
                // Cells above the board are not drawn.
                if x >= 0 && (x as u8) < BOARD_WIDTH && y >= 0 && (y as u8) < BOARD_HEIGHT {
                    self.fill_cell(fb, field, x as u16, y as u16, '█', style);
                }
            }
        }

        field
    }

    fn draw_snake(&self, fb: &mut FrameBuffer, snap: &SnakeSnapshot, viewport: Viewport) -> FieldRect {
        let field = self.field_rect(snap.cols, snap.rows, viewport);
        self.draw_field(fb, field, SNAKE_BG);

        let in_grid = |x: i32, y: i32| x >= 0 && y >= 0 && x < snap.cols as i32 && y < snap.rows as i32;

        if let Some(food) = snap.food.filter(|f| in_grid(f.x, f.y)) {
            let style = CellStyle::new(FOOD, SNAKE_BG);
            self.fill_cell(fb, field, food.x as u16, food.y as u16, '█', style);
        }

        for (i, seg) in snap.segments.iter().enumerate() {
            if !in_grid(seg.x, seg.y) {
                continue;
            }
            let color = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
            let style = CellStyle::new(color, SNAKE_BG);
            self.fill_cell(fb, field, seg.x as u16, seg.y as u16, '█', style);
        }

        field
    }

    fn draw_field(&self, fb: &mut FrameBuffer, field: FieldRect, bg: Rgb) {
        fb.fill_rect(
            field.x + 1,
            field.y + 1,
            field.w.saturating_sub(2),
            field.h.saturating_sub(2),
            ' ',
            CellStyle::new(TEXT, bg),
        );
        self.draw_border(fb, field, CellStyle::new(Rgb::new(200, 200, 200), BLACK));
    }

    fn draw_border(&self, fb: &mut FrameBuffer, field: FieldRect, style: CellStyle) {
        let FieldRect { x, y, w, h } = field;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        field: FieldRect,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = field.x.saturating_add(1).saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = field.y.saturating_add(1).saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, status: &Status, viewport: Viewport, field: FieldRect) {
        let panel_x = field.x.saturating_add(field.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }
        let panel_w = panel_w.min(PANEL_W - 2);

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        let muted = CellStyle::new(MUTED, BLACK);

        let mut y = field.y;
        if let Some(title) = status.title {
            fb.put_str(panel_x, y, &title.to_uppercase(), label);
            y = y.saturating_add(2);
        }

        let counter = |fb: &mut FrameBuffer, y: &mut u16, name: &str, n: Option<u32>| {
            if let Some(n) = n {
                fb.put_str(panel_x, *y, name, label);
                fb.put_u32(panel_x, y.saturating_add(1), n, value);
                *y = y.saturating_add(3);
            }
        };
        counter(fb, &mut y, "SCORE", status.score);
        counter(fb, &mut y, "LINES", status.lines);
        counter(fb, &mut y, "HIGH", status.high_score);

        if let Some(controls) = status.controls {
            fb.put_str(panel_x, y, "CONTROLS", label);
            y = y.saturating_add(1);
            y = put_wrapped(fb, panel_x, y, panel_w, controls, value).saturating_add(1);
        }
        if let Some(tip) = status.tip {
            fb.put_str(panel_x, y, "TIP", label);
            y = y.saturating_add(1);
            y = put_wrapped(fb, panel_x, y, panel_w, tip, value).saturating_add(1);
        }
        if let Some(message) = status.message {
            let style = if status.error {
                CellStyle::new(ERROR, BLACK)
            } else {
                value
            };
            y = put_wrapped(fb, panel_x, y, panel_w, message, style).saturating_add(1);
        }

        for line in HOST_KEYS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, muted);
            y = y.saturating_add(1);
        }
    }

    fn draw_selector(&self, fb: &mut FrameBuffer, status: &Status, viewport: Viewport) {
        let title = "TUI ARCADE";
        let message = status.message.unwrap_or_default();
        let lines = 3 + HOST_KEYS.len() as u16;
        let mut y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(lines) / 2,
            AnchorY::Top => 0,
        };

        put_centered(fb, viewport.width / 2, y, title, CellStyle::default().bold());
        y = y.saturating_add(2);

        let style = if status.error {
            CellStyle::new(ERROR, BLACK)
        } else {
            CellStyle::default()
        };
        put_centered(fb, viewport.width / 2, y, message, style);
        y = y.saturating_add(2);

        for line in HOST_KEYS {
            put_centered(fb, viewport.width / 2, y, line, CellStyle::new(MUTED, BLACK));
            y = y.saturating_add(1);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, field: FieldRect) {
        fb.shade_rect(field.x + 1, field.y + 1, field.w.saturating_sub(2), field.h.saturating_sub(2), 40);
        let mid_y = field.y.saturating_add(field.h / 2);
        let center_x = field.x.saturating_add(field.w / 2);
        let style = CellStyle::new(TEXT, BLACK).bold();
        let inner_w = field.w.saturating_sub(2);
        match GAME_OVER_TEXT.split_once(" - ") {
            Some((head, tail)) if GAME_OVER_TEXT.chars().count() as u16 > inner_w => {
                put_centered(fb, center_x, mid_y, head, style);
                put_centered(fb, center_x, mid_y.saturating_add(1), tail, style);
            }
            _ => put_centered(fb, center_x, mid_y, GAME_OVER_TEXT, style),
        }
    }
}

fn block_style(kind: PieceKind, bg: Rgb) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(6, 182, 212),
        PieceKind::O => Rgb::new(245, 158, 11),
        PieceKind::T => Rgb::new(167, 139, 250),
        PieceKind::S => Rgb::new(34, 197, 94),
        PieceKind::Z => Rgb::new(239, 68, 68),
        PieceKind::J => Rgb::new(96, 165, 250),
        PieceKind::L => Rgb::new(249, 115, 22),
    };
    CellStyle::new(fg, bg)
}

fn put_centered(fb: &mut FrameBuffer, center_x: u16, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    fb.put_str(center_x.saturating_sub(text_w / 2), y, text, style);
}

/// Word-wrap `text` into `width` columns starting at `(x, y)`. Returns the row after the text.
fn put_wrapped(fb: &mut FrameBuffer, x: u16, y: u16, width: u16, text: &str, style: CellStyle) -> u16 {
    let mut row = y;
    let mut col = 0u16;
    for word in text.split_whitespace() {
        let len = word.chars().count() as u16;
        if col > 0 && col + 1 + len > width {
            row = row.saturating_add(1);
            col = 0;
        }
        if col > 0 {
            col += 1;
        }
        fb.put_str(x + col, row, word, style);
        col = col.saturating_add(len);
    }
    if col > 0 {
        row = row.saturating_add(1);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Segment;

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width()).filter_map(|x| fb.get(x, y)).map(|c| c.ch).collect()
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let mut fb = FrameBuffer::new(20, 4);
        let next = put_wrapped(&mut fb, 0, 0, 10, "Arrow keys / WASD. R to restart.", CellStyle::default());
        assert_eq!(next, 4);
        assert_eq!(row_text(&fb, 0).trim_end(), "Arrow keys");
        assert_eq!(row_text(&fb, 1).trim_end(), "/ WASD. R");
        assert_eq!(row_text(&fb, 2).trim_end(), "to");
        assert_eq!(row_text(&fb, 3).trim_end(), "restart.");
    }

    #[test]
    fn field_is_centered_with_panel() {
        let view = GameView::default();
        let field = view.field_rect(10, 20, Viewport::new(80, 24));
        assert_eq!((field.w, field.h), (22, 22));
        assert_eq!(field.x, (80 - 22 - PANEL_W) / 2);
        assert_eq!(field.y, 1);
    }

    #[test]
    fn snake_head_uses_head_color() {
        let view = GameView::default();
        let snap = SnakeSnapshot {
            cols: 4,
            rows: 3,
            segments: vec![Segment::new(2, 1), Segment::new(1, 1)],
            food: Some(Segment::new(0, 0)),
            ..SnakeSnapshot::default()
        };
        let vp = Viewport::new(60, 10);
        let fb = view.render(Some(&Frame::Snake(snap)), &Status::snake(0, 0, false), vp);
        let field = view.field_rect(4, 3, vp);
        let head = fb.get(field.x + 1 + 2 * 2, field.y + 1 + 1).unwrap();
        let body = fb.get(field.x + 1 + 2, field.y + 1 + 1).unwrap();
        let food = fb.get(field.x + 1, field.y + 1).unwrap();
        assert_eq!(head.style.fg, SNAKE_HEAD);
        assert_eq!(body.style.fg, SNAKE_BODY);
        assert_eq!(food.style.fg, FOOD);
    }

    #[test]
    fn game_over_overlay_is_drawn() {
        let view = GameView::default();
        let snap = TetrisSnapshot {
            game_over: true,
            ..TetrisSnapshot::default()
        };
        let vp = Viewport::new(80, 24);
        let fb = view.render(Some(&Frame::Tetris(snap)), &Status::tetris(0, 0, 0, true), vp);
        let field = view.field_rect(10, 20, vp);
        // Too narrow for one line: split in two
        assert!(row_text(&fb, field.y + field.h / 2).contains("Game Over"));
        assert!(row_text(&fb, field.y + field.h / 2 + 1).contains("Press R to Restart"));
    }

    #[test]
    fn wide_field_keeps_overlay_on_one_line() {
        let view = GameView::default();
        let snap = SnakeSnapshot {
            cols: 20,
            rows: 10,
            segments: vec![Segment::new(5, 5), Segment::new(4, 5)],
            game_over: true,
            ..SnakeSnapshot::default()
        };
        let vp = Viewport::new(100, 30);
        let fb = view.render(Some(&Frame::Snake(snap)), &Status::snake(10, 10, true), vp);
        let field = view.field_rect(20, 10, vp);
        assert!(row_text(&fb, field.y + field.h / 2).contains(GAME_OVER_TEXT));
    }

    #[test]
    fn selector_shows_status_message() {
        let view = GameView::default();
        let status = Status::idle("Select a game to start playing.");
        let fb = view.render(None, &status, Viewport::new(60, 12));
        let all: Vec<String> = (0..12).map(|y| row_text(&fb, y)).collect();
        assert!(all.iter().any(|r| r.contains("Select a game to start playing.")));
        assert!(all.iter().any(|r| r.contains("1 Snake")));
    }
}
