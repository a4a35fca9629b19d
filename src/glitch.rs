// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

use rand::Rng;

pub const GLITCH_CHARS: &str = "!<>-_\\/[]{}—=+*^?#________";
pub const GLITCH_CHANCE: f64 = 0.2;
pub const RESTORE_AFTER: Duration = Duration::from_millis(100);

/// Replaces each character with a random glitch character with
/// probability `GLITCH_CHANCE`.
pub fn scramble<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let pool: Vec<char> = GLITCH_CHARS.chars().collect();
    text.chars()
        .map(|c| {
            if rng.random_bool(GLITCH_CHANCE) {
                pool[rng.random_range(0..pool.len())]
            } else {
                c
            }
        })
        .collect()
}

/// A title that scrambles briefly when the pointer enters it.
#[derive(Clone, Debug)]
pub struct GlitchText {
    original: String,
    shown: String,
    restore_at: Option<Instant>,
}

impl GlitchText {
    pub fn new(text: &str) -> Self {
        Self {
            original: text.to_string(),
            shown: text.to_string(),
            restore_at: None,
        }
    }

    /// Re-triggering while glitched scrambles the saved original again, so
    /// the restore always lands on the real text.
    pub fn trigger<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        self.shown = scramble(&self.original, rng);
        self.restore_at = Some(now + RESTORE_AFTER);
    }

    pub fn update(&mut self, now: Instant) {
        if self.restore_at.is_some_and(|t| now >= t) {
            self.shown.clone_from(&self.original);
            self.restore_at = None;
        }
    }

    pub fn text(&self) -> &str {
        &self.shown
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    #[cfg(test)]
    pub fn is_glitched(&self) -> bool {
        self.restore_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn scramble_keeps_length_and_uses_glitch_pool() {
        let mut rng = StdRng::seed_from_u64(5);
        let text = "about_me section title";
        let out = scramble(text, &mut rng);
        assert_eq!(out.chars().count(), text.chars().count());
        for (a, b) in text.chars().zip(out.chars()) {
            assert!(a == b || GLITCH_CHARS.contains(b));
        }
    }

    #[test]
    fn roughly_a_fifth_of_characters_change() {
        let mut rng = StdRng::seed_from_u64(17);
        let text: String = std::iter::repeat('a').take(10_000).collect();
        let changed = scramble(&text, &mut rng)
            .chars()
            .filter(|&c| c != 'a')
            .count();
        assert!((1700..2300).contains(&changed), "{changed}");
    }

    #[test]
    fn restores_after_hundred_ms() {
        let mut rng = StdRng::seed_from_u64(1);
        let t0 = Instant::now();
        let mut title = GlitchText::new("Skills & Expertise");
        title.trigger(t0, &mut rng);
        assert!(title.is_glitched());
        title.update(t0 + Duration::from_millis(99));
        assert!(title.is_glitched());
        title.update(t0 + Duration::from_millis(100));
        assert_eq!(title.text(), "Skills & Expertise");
        assert!(!title.is_glitched());
    }

    #[test]
    fn retrigger_while_glitched_still_restores_original() {
        let mut rng = StdRng::seed_from_u64(2);
        let t0 = Instant::now();
        let mut title = GlitchText::new("Contact");
        title.trigger(t0, &mut rng);
        title.trigger(t0 + Duration::from_millis(50), &mut rng);
        title.update(t0 + Duration::from_millis(120));
        assert!(title.is_glitched());
        title.update(t0 + Duration::from_millis(150));
        assert_eq!(title.text(), "Contact");
    }
}
