// Copyright (c) 2026 rezky_nightky

//! One-time loading splash shown before the page.

use std::time::{Duration, Instant};

use crate::compose::Composer;
use crate::easing::{ease_in_out, progress};
use crate::palette::{NEON_CYAN, NEON_GREEN, PAGE_BG, TRACK_GREY};

pub const LOAD_TIME: Duration = Duration::from_secs(2);
pub const FADE_TIME: Duration = Duration::from_millis(500);
pub const CAPTION: &str = "Loading portfolio...";
/// Bar width in cells (300 px at 7 px per cell, rounded).
pub const BAR_CELLS: u16 = 43;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoaderPhase {
    Loading { progress: f32 },
    Fading { opacity: f32 },
    Done,
}

#[derive(Clone, Debug)]
pub struct LoadingScreen {
    started: Instant,
}

impl LoadingScreen {
    pub fn new(now: Instant) -> Self {
        Self { started: now }
    }

    pub fn phase(&self, now: Instant) -> LoaderPhase {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < LOAD_TIME {
            return LoaderPhase::Loading {
                progress: ease_in_out(progress(elapsed, LOAD_TIME)),
            };
        }
        let fading = elapsed - LOAD_TIME;
        if fading < FADE_TIME {
            return LoaderPhase::Fading {
                opacity: 1.0 - ease_in_out(progress(fading, FADE_TIME)),
            };
        }
        LoaderPhase::Done
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.phase(now) == LoaderPhase::Done
    }

    /// Covers the whole screen with the splash at the current opacity.
    pub fn draw(&self, c: &mut Composer, now: Instant) {
        let (fill, opacity) = match self.phase(now) {
            LoaderPhase::Loading { progress } => (progress, 1.0),
            LoaderPhase::Fading { opacity } => (1.0, opacity),
            LoaderPhase::Done => return,
        };

        let (cols, rows) = (c.cols(), c.rows());
        c.tint(0, 0, cols, rows, PAGE_BG.with_alpha(opacity));

        let mid = rows as i32 / 2;
        let caption_w = CAPTION.chars().count() as i32;
        c.put_str(
            (cols as i32 - caption_w) / 2,
            mid - 1,
            CAPTION,
            NEON_GREEN.with_alpha(opacity),
            true,
        );

        let bar_w = BAR_CELLS.min(cols.saturating_sub(4));
        let x0 = (cols as i32 - bar_w as i32) / 2;
        let filled = (fill * bar_w as f32).round() as u16;
        for x in 0..bar_w {
            let color = if x < filled {
                NEON_GREEN.lerp(NEON_CYAN, x as f32 / bar_w.max(1) as f32)
            } else {
                TRACK_GREY
            };
            c.put_char(x0 + x as i32, mid + 1, '━', color.with_alpha(opacity), false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_then_fades_then_goes_away() {
        let t0 = Instant::now();
        let l = LoadingScreen::new(t0);
        assert_eq!(l.phase(t0), LoaderPhase::Loading { progress: 0.0 });
        assert_eq!(
            l.phase(t0 + Duration::from_secs(1)),
            LoaderPhase::Loading { progress: 0.5 }
        );
        assert_eq!(
            l.phase(t0 + LOAD_TIME),
            LoaderPhase::Fading { opacity: 1.0 }
        );
        match l.phase(t0 + LOAD_TIME + Duration::from_millis(250)) {
            LoaderPhase::Fading { opacity } => assert!((opacity - 0.5).abs() < 1e-6),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(l.phase(t0 + LOAD_TIME + FADE_TIME), LoaderPhase::Done);
        assert!(l.is_done(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn splash_hides_everything_while_loading() {
        let t0 = Instant::now();
        let l = LoadingScreen::new(t0);
        let mut c = Composer::new(60, 10);
        c.reset(PAGE_BG);
        c.put_str(0, 0, "behind", NEON_GREEN, false);
        l.draw(&mut c, t0 + Duration::from_secs(1));

        let behind = c.shade(0, 0).unwrap();
        assert_eq!(behind.fg, PAGE_BG);
        let caption: String = (0..60).map(|x| c.shade(x, 4).unwrap().ch).collect();
        assert!(caption.contains(CAPTION));
        let bar: String = (0..60).map(|x| c.shade(x, 6).unwrap().ch).collect();
        assert_eq!(bar.matches('━').count(), BAR_CELLS as usize);
    }

    #[test]
    fn nothing_is_drawn_once_done() {
        let t0 = Instant::now();
        let l = LoadingScreen::new(t0);
        let mut c = Composer::new(10, 3);
        c.reset(PAGE_BG);
        l.draw(&mut c, t0 + Duration::from_secs(3));
        assert!((0..10).all(|x| c.shade(x, 1).unwrap().ch == ' '));
    }
}
