//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). Grid row 0 is the bottom row of the play field,
//! so it is drawn on the last screen row inside the border.

use crate::core::shapes::{canonical, ShapeMatrix};
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, GRID_HEIGHT, GRID_WIDTH, PREVIEW_SIZE};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const BLOCK: char = '█';

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

/// Screen position of the play field frame inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub x: u16,
    pub y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// A lightweight terminal renderer for the board.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
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

    /// Where the play field frame lands in `viewport`.
    pub fn layout(&self, viewport: Viewport) -> FieldLayout {
        let frame_w = (GRID_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (GRID_HEIGHT as u16) * self.cell_h + 2;
        // Leave room for the side panel when centring.
        let total_w = frame_w + 2 + self.panel_width();
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        FieldLayout {
            x,
            y,
            frame_w,
            frame_h,
        }
    }

    /// Screen coordinate of the top-left character of grid cell `(x, y)`.
    pub fn cell_origin(&self, layout: FieldLayout, x: u8, y: u8) -> (u16, u16) {
        let flipped = (GRID_HEIGHT - 1 - y) as u16;
        (
            layout.x + 1 + (x as u16) * self.cell_w,
            layout.y + 1 + flipped * self.cell_h,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::fg(Rgb::new(200, 200, 200));
        draw_border(fb, layout.x, layout.y, layout.frame_w, layout.frame_h, border);

        for (x, y, cell) in snap.grid.iter() {
            let (x, y) = (x as u8, y as u8);
            match cell {
                Some(block) => self.draw_block(fb, layout, x, y, block.color),
                None => self.draw_empty(fb, layout, x, y),
            }
        }

        if let Some(active) = snap.active {
            for (gx, gy) in active.cells() {
                if gx >= 0 && gx < GRID_WIDTH as i8 && gy >= 0 && gy < GRID_HEIGHT as i8 {
                    self.draw_block(fb, layout, gx as u8, gy as u8, active.shape.color());
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            self.draw_game_over(fb, layout, snap.score);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn panel_width(&self) -> u16 {
        (PREVIEW_SIZE as u16) * self.cell_w + 2
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: FieldLayout, x: u8, y: u8, color: ColorId) {
        let style = CellStyle {
            bg: FIELD_BG,
            bold: true,
            ..CellStyle::fg(color.into())
        };
        let (px, py) = self.cell_origin(layout, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, BLOCK, style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: FieldLayout, x: u8, y: u8) {
        let style = CellStyle {
            bg: FIELD_BG,
            dim: true,
            ..CellStyle::fg(Rgb::new(90, 90, 100))
        };
        let (px, py) = self.cell_origin(layout, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, '·', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: FieldLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x.saturating_add(self.panel_width()) > viewport.width {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = layout.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let next = snap.next.map(|shape| (canonical(shape), shape.color()));
        y = self.draw_preview(fb, panel_x, y, next);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "HELPER", label);
        y = y.saturating_add(1);
        let helper = snap.helper.map(|h| (h.matrix, h.shape.color()));
        self.draw_preview(fb, panel_x, y, helper);
    }

    /// Framed 4x4 window; returns the screen row below it.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        piece: Option<(ShapeMatrix, ColorId)>,
    ) -> u16 {
        let inner_w = (PREVIEW_SIZE as u16) * self.cell_w;
        let inner_h = (PREVIEW_SIZE as u16) * self.cell_h;
        draw_border(fb, x, y, inner_w + 2, inner_h + 2, CellStyle::fg(Rgb::new(120, 120, 130)));

        if let Some((matrix, color)) = piece {
            let style = CellStyle {
                bold: true,
                ..CellStyle::fg(color.into())
            };
            for (col, row) in matrix.occupied() {
                let px = x + 1 + (col as u16) * self.cell_w;
                let py = y + 1 + (row as u16) * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, BLOCK, style);
            }
        }
        y.saturating_add(inner_h + 2)
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: FieldLayout, score: u32) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let mid_y = layout.y.saturating_add(layout.frame_h / 2);
        put_centered(fb, layout, mid_y.saturating_sub(1), "GAME OVER", style);

        let digits = digit_count(score);
        let text_w = 6 + digits;
        let x = layout.x + layout.frame_w.saturating_sub(text_w) / 2;
        fb.put_str(x, mid_y + 1, "SCORE ", style);
        fb.put_u32(x + 6, mid_y + 1, score, style);
    }
}

fn put_centered(fb: &mut FrameBuffer, layout: FieldLayout, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = layout.x + layout.frame_w.saturating_sub(text_w) / 2;
    fb.put_str(x, y, text, style);
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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
