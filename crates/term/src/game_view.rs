//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board rows count up from the bottom; the framebuffer counts down from the
//! top. The flip happens here and nowhere else.

use crate::core::{GameSnapshot, TilePos};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{Color, COLUMNS, DEFAULT_TILE_WIDTH, MAX_TILE_WIDTH, ROWS};

const BORDER: CellStyle = CellStyle::new(Color::new(200, 200, 200), Color::new(0, 0, 0));
const LABEL: CellStyle = CellStyle::new(Color::new(220, 220, 220), Color::new(0, 0, 0)).bold();
const VALUE: CellStyle = CellStyle::new(Color::new(200, 200, 200), Color::new(0, 0, 0));
const OVERLAY: CellStyle = CellStyle::new(Color::new(255, 255, 255), Color::new(0, 0, 0)).bold();

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

/// Frame-space placement of the board, computed once per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// HUD line
    hud_y: u16,
    /// Top-left corner of the border
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(DEFAULT_TILE_WIDTH, 1)
    }
}

impl GameView {
    /// Tile sizes are clamped to `1..=MAX_TILE_WIDTH`.
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.clamp(1, MAX_TILE_WIDTH),
            tile_h: tile_h.clamp(1, MAX_TILE_WIDTH),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn tile_w(&self) -> u16 {
        self.tile_w
    }

    /// Columns and rows the HUD plus bordered board need.
    pub fn required_size(&self) -> (u16, u16) {
        let frame_w = (COLUMNS as u16).saturating_mul(self.tile_w).saturating_add(2);
        let frame_h = (ROWS as u16).saturating_mul(self.tile_h).saturating_add(2);
        (frame_w, frame_h.saturating_add(1))
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let (frame_w, total_h) = self.required_size();
        let top = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            hud_y: top,
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: top + 1,
            frame_w,
            frame_h: total_h - 1,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only reallocated
    /// when the terminal grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let layout = self.layout(viewport);

        self.draw_hud(fb, snap, layout);
        self.draw_border(fb, layout);

        for row in 0..ROWS {
            for col in 0..COLUMNS {
                let color = snap.board.cell_at(row, col);
                let pos = TilePos::new(col as i32, row as i32);
                if color.is_empty() {
                    self.draw_tile(fb, layout, pos, ' ', CellStyle::new(color, color));
                } else {
                    self.draw_tile(fb, layout, pos, '█', CellStyle::new(color, Color::EMPTY));
                }
            }
        }

        if !snap.game_over() {
            // Shadow first so the active piece wins where they overlap.
            if let Some(shadow) = snap.shadow {
                let style = CellStyle::new(Color::SHADOW, Color::EMPTY);
                for pos in shadow {
                    self.draw_tile(fb, layout, pos, '█', style);
                }
            }
            if let Some(active) = snap.active {
                let style = CellStyle::new(active.color, Color::EMPTY).bold();
                for pos in active.cells {
                    self.draw_tile(fb, layout, pos, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over() {
            self.draw_overlay_text(fb, layout, 0, "GAME OVER");
            self.draw_overlay_text(fb, layout, 1, "press SPACE");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Framebuffer position of a board tile's top-left character.
    /// `None` for tiles outside the visible board.
    pub fn tile_origin(&self, viewport: Viewport, pos: TilePos) -> Option<(u16, u16)> {
        self.tile_origin_in(self.layout(viewport), pos)
    }

    fn tile_origin_in(&self, layout: Layout, pos: TilePos) -> Option<(u16, u16)> {
        if !pos.in_bounds() {
            return None;
        }
        let flipped = (ROWS - 1) as u16 - pos.row as u16;
        let x = layout.frame_x + 1 + (pos.col as u16).saturating_mul(self.tile_w);
        let y = layout.frame_y + 1 + flipped.saturating_mul(self.tile_h);
        Some((x, y))
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, layout: Layout, pos: TilePos, ch: char, style: CellStyle) {
        if let Some((x, y)) = self.tile_origin_in(layout, pos) {
            fb.fill_rect(x, y, self.tile_w, self.tile_h, ch, style);
        }
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: Layout) {
        let y = layout.hud_y;
        let mut x = fb.put_str(layout.frame_x, y, "Score: ", VALUE);
        x = fb.put_u32(x, y, snap.score, VALUE);
        x = fb.put_str(x, y, " | Level: ", VALUE);
        fb.put_u32(x, y, snap.level, VALUE);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout) {
        let Layout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
            ..
        } = layout;

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.frame_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 6 {
            return;
        }

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "LINES", LABEL);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, VALUE);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HOLD", LABEL);
        y = y.saturating_add(1);
        let style = if snap.hold_locked { VALUE.dim() } else { VALUE };
        let letter = snap.hold.map(|k| k.as_str()).unwrap_or("-");
        let end = fb.put_str(panel_x, y, letter, style);
        if let Some(kind) = snap.hold {
            fb.put_char(end + 1, y, '█', CellStyle::new(kind.color(), Color::new(0, 0, 0)));
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: Layout, line: u16, text: &str) {
        let y = layout.frame_y.saturating_add(layout.frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = layout.frame_x.saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, OVERLAY);
    }
}
