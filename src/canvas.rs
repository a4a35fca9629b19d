// Copyright (c) 2026 rezky_nightky

use crate::palette::Rgba;
use crate::surface::{Font, Surface};

/// Virtual pixels covered by one terminal cell.
pub const CELL_W: f32 = 7.0;
pub const CELL_H: f32 = 14.0;

/// Below this squared RGB distance from its paper a glyph is no longer
/// legible and is dropped.
const GHOST_DIST2: i32 = 3 * 24 * 24;

pub fn viewport_px(cols: u16, rows: u16) -> (f32, f32) {
    (cols as f32 * CELL_W, rows as f32 * CELL_H)
}

/// Centre of a terminal cell in virtual pixels.
pub fn cell_center_px(col: u16, row: u16) -> (f32, f32) {
    (
        (col as f32 + 0.5) * CELL_W,
        (row as f32 + 0.5) * CELL_H,
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub glyph: Option<char>,
    pub ink: Rgba,
    pub paper: Rgba,
}

impl Pixel {
    pub const CLEAR: Pixel = Pixel {
        glyph: None,
        ink: Rgba::TRANSPARENT,
        paper: Rgba::TRANSPARENT,
    };
}

/// Character-cell rendering surface. One cell stands for a
/// `CELL_W` x `CELL_H` block of virtual pixels.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: f32,
    height: f32,
    cols: u16,
    rows: u16,
    cells: Vec<Pixel>,
    font: Font,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            font: Font::new("monospace", CELL_H),
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn pixel(&self, col: u16, row: u16) -> Option<&Pixel> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn cell_mut(&mut self, col: i64, row: i64) -> Option<&mut Pixel> {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return None;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(idx)
    }

    /// Cell span whose centres fall inside `[start, start + len)`.
    fn span(start: f32, len: f32, cell: f32, limit: u16) -> std::ops::Range<i64> {
        let lo = ((start / cell) - 0.5).ceil().max(0.0) as i64;
        let hi = (((start + len) / cell) - 0.5).ceil().min(limit as f32) as i64;
        lo..hi.max(lo)
    }
}

impl Surface for Canvas {
    fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.cols = (self.width / CELL_W).floor() as u16;
        self.rows = (self.height / CELL_H).floor() as u16;
        self.cells = vec![Pixel::CLEAR; self.cols as usize * self.rows as usize];
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        for row in Self::span(y, h, CELL_H, self.rows) {
            for col in Self::span(x, w, CELL_W, self.cols) {
                if let Some(p) = self.cell_mut(col, row) {
                    *p = Pixel::CLEAR;
                }
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        for row in Self::span(y, h, CELL_H, self.rows) {
            for col in Self::span(x, w, CELL_W, self.cols) {
                if let Some(p) = self.cell_mut(col, row) {
                    p.paper = color.over(p.paper);
                    if p.glyph.is_some() {
                        p.ink = color.over(p.ink);
                        if p.ink.dist2(p.paper) < GHOST_DIST2 {
                            p.glyph = None;
                            p.ink = Rgba::TRANSPARENT;
                        }
                    }
                }
            }
        }
    }

    fn set_font(&mut self, font: &Font) {
        if self.font != *font {
            self.font = font.clone();
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgba) {
        // The glyph box spans [y - size, y); the cell holding its middle wins.
        let mid = y - self.font.size * 0.5;
        let row = (mid / CELL_H).floor() as i64;
        let col0 = (x / CELL_W).floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            if let Some(p) = self.cell_mut(col0 + i as i64, row) {
                p.glyph = Some(ch);
                p.ink = color.over(p.paper);
            }
        }
    }

    fn fill_arc(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        let glyph = match color.a {
            a if a >= 0.66 => '●',
            a if a >= 0.33 => '•',
            _ => '·',
        };
        let mut paint = |p: &mut Pixel| {
            p.glyph = Some(glyph);
            p.ink = color.over(p.paper);
        };

        let mut hit = false;
        let rows = Self::span(y - radius, radius * 2.0, CELL_H, self.rows);
        let cols = Self::span(x - radius, radius * 2.0, CELL_W, self.cols);
        for row in rows {
            for col in cols.clone() {
                let cx = (col as f32 + 0.5) * CELL_W;
                let cy = (row as f32 + 0.5) * CELL_H;
                if (cx - x).powi(2) + (cy - y).powi(2) <= radius * radius {
                    if let Some(p) = self.cell_mut(col, row) {
                        paint(p);
                        hit = true;
                    }
                }
            }
        }
        if !hit {
            let col = (x / CELL_W).floor() as i64;
            let row = (y / CELL_H).floor() as i64;
            if let Some(p) = self.cell_mut(col, row) {
                paint(p);
            }
        }
    }
}
