// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

use crate::easing::{ease_in_out, progress};

/// Share of a bar that must be on screen before it starts filling.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;
pub const FILL_DURATION: Duration = Duration::from_secs(2);

#[derive(Clone, Debug)]
pub struct SkillBar {
    name: String,
    level: f32,
    started: Option<Instant>,
}

impl SkillBar {
    pub fn new(name: &str, level: f32) -> Self {
        Self {
            name: name.to_string(),
            level: level.clamp(0.0, 1.0),
            started: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Feeds the visible share of the bar. The fill starts on the first
    /// report at or above the threshold and is never restarted.
    pub fn observe(&mut self, visible_fraction: f32, now: Instant) {
        if self.started.is_none() && visible_fraction >= VISIBILITY_THRESHOLD {
            self.started = Some(now);
        }
    }

    #[cfg(test)]
    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Current fill in [0, level].
    pub fn fill(&self, now: Instant) -> f32 {
        match self.started {
            None => 0.0,
            Some(t0) => {
                let t = progress(now.saturating_duration_since(t0), FILL_DURATION);
                ease_in_out(t) * self.level
            }
        }
    }
}

pub fn default_skills() -> Vec<SkillBar> {
    vec![
        SkillBar::new("Python automation", 0.95),
        SkillBar::new("Web scraping", 0.90),
        SkillBar::new("Reverse engineering", 0.70),
        SkillBar::new("Android tooling", 0.75),
        SkillBar::new("Docker & CI", 0.65),
        SkillBar::new("AI integrations", 0.80),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_empty_until_half_visible() {
        let t0 = Instant::now();
        let mut bar = SkillBar::new("Rust", 0.8);
        bar.observe(0.49, t0);
        assert!(!bar.is_started());
        assert_eq!(bar.fill(t0 + Duration::from_secs(5)), 0.0);
        bar.observe(0.5, t0);
        assert!(bar.is_started());
    }

    #[test]
    fn fills_to_level_over_two_seconds() {
        let t0 = Instant::now();
        let mut bar = SkillBar::new("Rust", 0.8);
        bar.observe(1.0, t0);
        assert_eq!(bar.fill(t0), 0.0);
        assert!((bar.fill(t0 + Duration::from_secs(1)) - 0.4).abs() < 1e-6);
        assert_eq!(bar.fill(t0 + FILL_DURATION), 0.8);
    }

    #[test]
    fn scrolling_away_and_back_does_not_restart() {
        let t0 = Instant::now();
        let mut bar = SkillBar::new("Rust", 1.0);
        bar.observe(1.0, t0);
        bar.observe(0.0, t0 + Duration::from_secs(1));
        bar.observe(1.0, t0 + Duration::from_secs(3));
        assert_eq!(bar.fill(t0 + Duration::from_secs(3)), 1.0);
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(SkillBar::new("x", 1.7).level(), 1.0);
    }
}
