// Copyright (c) 2026 rezky_nightky

//! Character-rain field: one falling glyph per column over a fading trail.

use rand::Rng;

use crate::animator::Animator;
use crate::charset::PORTFOLIO_GLYPHS;
use crate::palette::{Rgba, NEON_GREEN};
use crate::surface::{Font, Surface};

#[derive(Clone, Debug)]
pub struct RainConfig {
    /// Glyph cell edge in pixels; sets both column pitch and fall step.
    pub cell_size: f32,
    /// Per-frame chance that a column below the bottom edge restarts.
    pub reset_chance: f64,
    pub fade: Rgba,
    pub ink: Rgba,
    pub font_family: String,
    pub glyphs: Vec<char>,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            cell_size: 14.0,
            reset_chance: 0.025,
            fade: Rgba::new(10, 10, 10, 0.05),
            ink: NEON_GREEN,
            font_family: "JetBrains Mono".to_string(),
            glyphs: PORTFOLIO_GLYPHS.chars().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainColumn {
    pub index: usize,
    pub drop: f32,
}

pub struct RainField<R> {
    config: RainConfig,
    font: Font,
    columns: Vec<RainColumn>,
    width: f32,
    height: f32,
    rng: R,
}

pub fn column_count(width: f32, cell_size: f32) -> usize {
    if cell_size <= 0.0 || width <= 0.0 {
        return 0;
    }
    (width / cell_size).floor() as usize
}

impl<R: Rng> RainField<R> {
    pub fn new(mut config: RainConfig, rng: R) -> Self {
        if config.glyphs.is_empty() {
            config.glyphs = vec!['0', '1'];
        }
        config.reset_chance = config.reset_chance.clamp(0.0, 1.0);
        let font = Font::new(config.font_family.clone(), config.cell_size);
        Self {
            config,
            font,
            columns: Vec::new(),
            width: 0.0,
            height: 0.0,
            rng,
        }
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    /// Throws away every column and seeds fresh ones for the current size.
    fn rebuild(&mut self, surface: &mut dyn Surface, width: f32, height: f32) {
        surface.resize(width, height);
        self.width = surface.width();
        self.height = surface.height();

        let n = column_count(self.width, self.config.cell_size);
        let height = self.height;
        let rng = &mut self.rng;
        self.columns = (0..n)
            .map(|index| RainColumn {
                index,
                drop: rng.random::<f32>() * height,
            })
            .collect();
    }
}

impl<R: Rng> Animator for RainField<R> {
    fn init(&mut self, surface: &mut dyn Surface, width: f32, height: f32) {
        self.rebuild(surface, width, height);
        log::debug!(
            "rain field ready: {} columns over {}x{}",
            self.columns.len(),
            self.width,
            self.height
        );
    }

    fn step(&mut self, surface: &mut dyn Surface) {
        surface.fill_rect(0.0, 0.0, self.width, self.height, self.config.fade);
        surface.set_font(&self.font);

        let cell = self.config.cell_size;
        let mut buf = [0u8; 4];
        for col in &mut self.columns {
            let pick = self.rng.random_range(0..self.config.glyphs.len());
            let glyph = self.config.glyphs[pick].encode_utf8(&mut buf);
            surface.fill_text(glyph, col.index as f32 * cell, col.drop, self.config.ink);

            if col.drop > self.height && self.rng.random_bool(self.config.reset_chance) {
                col.drop = 0.0;
            }
            col.drop += cell;
        }
    }

    fn resize(&mut self, surface: &mut dyn Surface, width: f32, height: f32) {
        self.rebuild(surface, width, height);
        log::debug!("rain field reset to {} columns", self.columns.len());
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::surface::testing::{DrawOp, RecordingSurface};

    fn field(seed: u64, w: f32, h: f32) -> (RainField<StdRng>, RecordingSurface) {
        let mut rain = RainField::new(RainConfig::default(), StdRng::seed_from_u64(seed));
        let mut surface = RecordingSurface::default();
        rain.init(&mut surface, w, h);
        (rain, surface)
    }

    #[test]
    fn init_builds_floor_width_over_cell_columns() {
        let (rain, _) = field(1, 1400.0, 800.0);
        assert_eq!(rain.columns().len(), 100);

        let (rain, _) = field(1, 1413.0, 800.0);
        assert_eq!(rain.columns().len(), 100);
    }

    #[test]
    fn initial_drops_lie_within_surface_height() {
        let (rain, _) = field(7, 700.0, 300.0);
        for (i, c) in rain.columns().iter().enumerate() {
            assert_eq!(c.index, i);
            assert!(c.drop >= 0.0 && c.drop < 300.0, "{}", c.drop);
        }
    }

    #[test]
    fn resize_recomputes_and_reseeds_every_column() {
        let (mut rain, mut surface) = field(3, 1400.0, 800.0);
        for (w, h) in [(280.0, 100.0), (1000.0, 50.0), (13.0, 10.0), (0.0, 0.0)] {
            rain.resize(&mut surface, w, h);
            assert_eq!(rain.columns().len(), (w / 14.0_f32).floor() as usize);
            assert!(rain.columns().iter().all(|c| c.drop >= 0.0 && (h == 0.0 || c.drop < h)));
        }
    }

    #[test]
    fn step_fades_then_draws_one_glyph_per_column() {
        let (mut rain, mut surface) = field(5, 140.0, 70.0);
        surface.take();
        let before: Vec<f32> = rain.columns().iter().map(|c| c.drop).collect();
        rain.step(&mut surface);

        let ops = surface.take();
        assert_eq!(
            ops[0],
            DrawOp::Rect {
                x: 0.0,
                y: 0.0,
                w: 140.0,
                h: 70.0,
                color: Rgba::new(10, 10, 10, 0.05),
            }
        );
        assert!(matches!(&ops[1], DrawOp::Font(f) if f.size == 14.0));

        let texts: Vec<_> = ops[2..]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 10);
        for (i, (text, x, y)) in texts.iter().enumerate() {
            assert_eq!(text.chars().count(), 1);
            assert!(PORTFOLIO_GLYPHS.contains(text.as_str()));
            assert_eq!(*x, i as f32 * 14.0);
            assert_eq!(*y, before[i]);
        }
    }

    #[test]
    fn drops_only_grow_or_restart_below_the_bottom_edge() {
        let (mut rain, mut surface) = field(11, 420.0, 140.0);
        let mut resets = 0;
        for _ in 0..2000 {
            let before: Vec<f32> = rain.columns().iter().map(|c| c.drop).collect();
            rain.step(&mut surface);
            for (b, c) in before.iter().zip(rain.columns()) {
                if c.drop == 14.0 && *b + 14.0 != 14.0 {
                    assert!(*b > 140.0, "reset while in bounds at {}", b);
                    resets += 1;
                } else {
                    assert_eq!(c.drop, *b + 14.0);
                }
            }
            surface.take();
        }
        assert!(resets > 0);
    }

    #[test]
    fn zero_reset_chance_never_restarts() {
        let config = RainConfig {
            reset_chance: 0.0,
            ..RainConfig::default()
        };
        let mut rain = RainField::new(config, StdRng::seed_from_u64(2));
        let mut surface = RecordingSurface::default();
        rain.init(&mut surface, 140.0, 28.0);
        let mut expected: Vec<f32> = rain.columns().iter().map(|c| c.drop).collect();
        for _ in 0..50 {
            rain.step(&mut surface);
            for e in &mut expected {
                *e += 14.0;
            }
        }
        for (e, c) in expected.iter().zip(rain.columns()) {
            assert_eq!(c.drop, *e);
        }
    }

    #[test]
    fn certain_reset_restarts_on_first_frame_past_the_edge() {
        let config = RainConfig {
            reset_chance: 1.0,
            ..RainConfig::default()
        };
        let mut rain = RainField::new(config, StdRng::seed_from_u64(9));
        let mut surface = RecordingSurface::default();
        rain.init(&mut surface, 14.0, 28.0);
        let mut saw_reset = false;
        for _ in 0..10 {
            let before = rain.columns()[0].drop;
            rain.step(&mut surface);
            let after = rain.columns()[0].drop;
            if before > 28.0 {
                assert_eq!(after, 14.0);
                saw_reset = true;
            } else {
                assert_eq!(after, before + 14.0);
            }
        }
        assert!(saw_reset);
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let (mut a, mut sa) = field(42, 280.0, 140.0);
        let (mut b, mut sb) = field(42, 280.0, 140.0);
        for _ in 0..30 {
            a.step(&mut sa);
            b.step(&mut sb);
        }
        assert_eq!(a.columns(), b.columns());
        assert_eq!(sa.ops, sb.ops);
    }
}
