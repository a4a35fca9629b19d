// Copyright (c) 2026 rezky_nightky

//! Flattens the canvases and text overlays into one terminal frame.

use crate::canvas::Canvas;
use crate::frame::{Cell, Frame};
use crate::palette::{terminal_color, Rgba};
use crate::runtime::ColorMode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shade {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub bold: bool,
}

impl Shade {
    fn blank(bg: Rgba) -> Self {
        Self {
            ch: ' ',
            fg: bg,
            bg,
            bold: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Composer {
    cols: u16,
    rows: u16,
    shades: Vec<Shade>,
}

impl Composer {
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut c = Self {
            cols: 0,
            rows: 0,
            shades: Vec::new(),
        };
        c.resize(cols, rows);
        c
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.shades = vec![Shade::blank(Rgba::rgb(0, 0, 0)); cols as usize * rows as usize];
    }

    pub fn reset(&mut self, bg: Rgba) {
        self.shades.fill(Shade::blank(bg));
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    #[cfg(test)]
    pub fn shade(&self, col: u16, row: u16) -> Option<&Shade> {
        self.index(col as i32, row as i32)
            .and_then(|i| self.shades.get(i))
    }

    /// Layers a canvas on top: translucent paper tints what is below and a
    /// glyph replaces the character underneath.
    pub fn paint_canvas(&mut self, canvas: &Canvas) {
        let cols = self.cols.min(canvas.cols());
        let rows = self.rows.min(canvas.rows());
        for row in 0..rows {
            for col in 0..cols {
                let (Some(px), Some(i)) = (canvas.pixel(col, row), self.index(col as i32, row as i32))
                else {
                    continue;
                };
                let s = &mut self.shades[i];
                if px.paper.a > 0.0 {
                    s.bg = px.paper.over(s.bg);
                    s.fg = px.paper.over(s.fg);
                }
                if let Some(g) = px.glyph {
                    s.ch = g;
                    s.fg = px.ink.over(s.bg);
                    s.bold = false;
                }
            }
        }
    }

    pub fn put_char(&mut self, col: i32, row: i32, ch: char, fg: Rgba, bold: bool) {
        if let Some(i) = self.index(col, row) {
            let s = &mut self.shades[i];
            s.ch = ch;
            s.fg = fg.over(s.bg);
            s.bold = bold;
        }
    }

    /// Writes text left to right, clipping at the edges.
    pub fn put_str(&mut self, col: i32, row: i32, text: &str, fg: Rgba, bold: bool) {
        for (i, ch) in text.chars().enumerate() {
            self.put_char(col + i as i32, row, ch, fg, bold);
        }
    }

    /// Paints a translucent block over a rectangle, dimming any glyphs in it.
    pub fn tint(&mut self, col: i32, row: i32, w: u16, h: u16, color: Rgba) {
        for r in row..row + h as i32 {
            for c in col..col + w as i32 {
                if let Some(i) = self.index(c, r) {
                    let s = &mut self.shades[i];
                    s.bg = color.over(s.bg);
                    s.fg = color.over(s.fg);
                }
            }
        }
    }

    pub fn hue_rotate(&mut self, degrees: f32) {
        for s in &mut self.shades {
            s.fg = s.fg.hue_rotate(degrees);
            s.bg = s.bg.hue_rotate(degrees);
        }
    }

    pub fn write_to(&self, frame: &mut Frame, mode: ColorMode) {
        let cols = self.cols.min(frame.width);
        let rows = self.rows.min(frame.height);
        for row in 0..rows {
            for col in 0..cols {
                let s = self.shades[row as usize * self.cols as usize + col as usize];
                frame.set(
                    col,
                    row,
                    Cell {
                        ch: s.ch,
                        fg: terminal_color(s.fg, mode),
                        bg: terminal_color(s.bg, mode),
                        bold: s.bold,
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::style::Color;

    use super::*;
    use crate::canvas::viewport_px;
    use crate::palette::{NEON_GREEN, PAGE_BG};
    use crate::surface::{Font, Surface};

    #[test]
    fn canvas_glyph_lands_on_matching_cell() {
        let mut canvas = Canvas::new();
        let (w, h) = viewport_px(6, 3);
        canvas.resize(w, h);
        canvas.set_font(&Font::new("mono", 14.0));
        canvas.fill_text("Z", 14.0, 28.0, NEON_GREEN);

        let mut c = Composer::new(6, 3);
        c.reset(PAGE_BG);
        c.paint_canvas(&canvas);
        let s = c.shade(2, 1).unwrap();
        assert_eq!(s.ch, 'Z');
        assert_eq!(s.fg, NEON_GREEN);
        assert_eq!(c.shade(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn translucent_overlay_glyph_blends_into_background() {
        let mut canvas = Canvas::new();
        let (w, h) = viewport_px(2, 1);
        canvas.resize(w, h);
        canvas.fill_arc(3.5, 7.0, 2.0, Rgba::rgb(200, 200, 200).with_alpha(0.5));

        let mut c = Composer::new(2, 1);
        c.reset(Rgba::rgb(0, 0, 0));
        c.paint_canvas(&canvas);
        let s = c.shade(0, 0).unwrap();
        assert_eq!(s.ch, '•');
        assert_eq!((s.fg.r, s.fg.g, s.fg.b), (100, 100, 100));
        assert_eq!(s.bg, Rgba::rgb(0, 0, 0));
    }

    #[test]
    fn put_str_clips_at_edges() {
        let mut c = Composer::new(4, 1);
        c.reset(PAGE_BG);
        c.put_str(-1, 0, "abcdef", NEON_GREEN, true);
        let row: String = (0..4).map(|x| c.shade(x, 0).unwrap().ch).collect();
        assert_eq!(row, "bcde");
    }

    #[test]
    fn write_to_converts_for_color_mode() {
        let mut c = Composer::new(1, 1);
        c.reset(Rgba::rgb(0, 0, 0));
        c.put_char(0, 0, 'q', Rgba::rgb(0, 255, 0), false);

        let mut f = Frame::new(1, 1);
        c.write_to(&mut f, ColorMode::TrueColor);
        assert_eq!(f.get(0, 0).unwrap().fg, Some(Color::Rgb { r: 0, g: 255, b: 0 }));

        c.write_to(&mut f, ColorMode::Mono);
        assert_eq!(f.get(0, 0).unwrap().fg, None);
        assert_eq!(f.get(0, 0).unwrap().ch, 'q');
    }
}
