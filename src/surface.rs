// Copyright (c) 2026 rezky_nightky

//! The 2D drawing target the animators paint on.
//!
//! Coordinates are virtual pixels. Colours carry their own alpha, which plays
//! the role of a global-alpha compositing setting.

use crate::palette::Rgba;

#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

pub trait Surface {
    /// Resizing discards everything painted so far.
    fn resize(&mut self, width: f32, height: f32);

    fn width(&self) -> f32;

    fn height(&self) -> f32;

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);

    fn set_font(&mut self, font: &Font);

    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgba);

    fn fill_arc(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
}
