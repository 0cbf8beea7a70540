//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is y-up (row 0 at the bottom) while terminal rows grow downward,
//! so every board row is flipped on the way out.

use crate::core::{GameSnapshot, PieceDef};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// A lightweight terminal renderer for the falling-block game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
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

/// Where the board frame landed inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    rows: u8,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (snap.width as u16) * self.cell_w;
        let board_px_h = (snap.height as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
            rows: snap.height,
        };

        let bg = CellStyle::plain(Rgb::new(80, 80, 90), PLAY_BG);
        let border = if snap.flashing() {
            CellStyle {
                bold: true,
                ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
            }
        } else {
            CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG)
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame.x, frame.y, frame.w, frame.h, border);

        // Locked cells.
        for y in 0..snap.height as i8 {
            for x in 0..snap.width as i8 {
                match snap.cell(x, y) {
                    Some(kind) => {
                        let mut fg = piece_rgb(kind);
                        if snap.flashing() {
                            fg = fg.lighten(96);
                        }
                        self.draw_block(fb, frame, x, y, fg);
                    }
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        // Ghost piece, then the active piece over it.
        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost_style = CellStyle {
                dim: true,
                ..CellStyle::plain(Rgb::new(140, 140, 140), PLAY_BG)
            };
            for (x, y) in active.cells_at(ghost_y) {
                if in_board(snap, x, y) {
                    self.fill_cell_rect(fb, frame, x, y, '░', ghost_style);
                }
            }
        }
        if let Some(active) = snap.active {
            let fg = piece_rgb(active.kind);
            for (x, y) in active.cells() {
                if in_board(snap, x, y) {
                    self.draw_block(fb, frame, x, y, fg);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused() {
            self.draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over() {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(90, 90, 100), PLAY_BG)
        };
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, fg: Rgb) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(fg, PLAY_BG)
        };
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    /// Fill board cell (x, y); board row 0 is the bottom terminal row.
    fn fill_cell_rect(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        let screen_row = (frame.rows as u16).saturating_sub(1 + y as u16);
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + screen_row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = CellStyle { dim: true, ..value };

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y.saturating_add(1), snap.drop_interval_ms, value);
        let digits = digit_count(snap.drop_interval_ms);
        fb.put_str(panel_x + digits, y.saturating_add(1), "ms", dim);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "HOLD", label);
        if snap.hold.is_some() && !snap.can_hold {
            fb.put_str(panel_x + 5, y, "(used)", dim);
        }
        y = y.saturating_add(1);
        match snap.hold {
            Some(def) => y = self.draw_preview(fb, panel_x, y, def, viewport),
            None => {
                fb.put_str(panel_x, y, "-", value);
                y = y.saturating_add(1);
            }
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = self.draw_preview(fb, panel_x, y, snap.next, viewport);
        y = y.saturating_add(1);

        if panel_w >= 20 {
            for hint in ["←→ move  ↑ rotate", "↓ soft  space drop", "c hold  p pause", "r reset  q quit"] {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, hint, dim);
                y = y.saturating_add(1);
            }
        }
    }

    /// Draw a small piece preview at (x, y); returns the row below it.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, def: PieceDef, viewport: Viewport) -> u16 {
        let min_x = def.shape.iter().map(|&(mx, _)| mx).min().unwrap_or(0);
        let max_y = def.shape.iter().map(|&(_, my)| my).max().unwrap_or(0);
        let min_y = def.shape.iter().map(|&(_, my)| my).min().unwrap_or(0);
        let style = CellStyle::plain(piece_rgb(def.kind), PANEL_BG);

        for &(mx, my) in def.shape.iter() {
            let px = x + ((mx - min_x) as u16) * 2;
            let py = y + (max_y - my) as u16;
            if py < viewport.height {
                fb.put_str(px, py, "██", style);
            }
        }
        y.saturating_add((max_y - min_y) as u16 + 1)
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn in_board(snap: &GameSnapshot, x: i8, y: i8) -> bool {
    x >= 0 && x < snap.width as i8 && y >= 0 && y < snap.height as i8
}

fn piece_rgb(kind: PieceKind) -> Rgb {
    Rgb::from_hex(kind.color())
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
