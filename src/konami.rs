// Copyright (c) 2026 rezky_nightky

//! Up up down down left right left right B A.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

pub const EFFECT_TIME: Duration = Duration::from_secs(10);
/// One full hue turn per this long while the effect runs.
pub const HUE_PERIOD: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
            _ => Key::Other,
        }
    }
}

pub const SEQUENCE: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
];

#[derive(Clone, Debug, Default)]
pub struct KonamiDetector {
    recent: VecDeque<Key>,
    active_since: Option<Instant>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press. Returns true when it completes the sequence.
    pub fn push(&mut self, key: Key, now: Instant) -> bool {
        self.recent.push_back(key);
        if self.recent.len() > SEQUENCE.len() {
            self.recent.pop_front();
        }
        if !self.recent.iter().eq(SEQUENCE.iter()) {
            return false;
        }
        self.active_since = Some(now);
        log::info!("konami code activated, enjoy the colours");
        true
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.active_since
            .is_some_and(|t| now.saturating_duration_since(t) < EFFECT_TIME)
    }

    /// Hue rotation to apply to the whole frame, if the effect is running.
    pub fn hue_degrees(&self, now: Instant) -> Option<f32> {
        if !self.is_active(now) {
            return None;
        }
        let t = now.saturating_duration_since(self.active_since?);
        let turns = t.as_secs_f32() / HUE_PERIOD.as_secs_f32();
        Some(turns.fract() * 360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(d: &mut KonamiDetector, keys: &[Key], now: Instant) -> bool {
        keys.iter().fold(false, |_, &k| d.push(k, now))
    }

    #[test]
    fn exact_sequence_activates() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        assert!(feed(&mut d, &SEQUENCE, now));
        assert!(d.is_active(now));
        assert_eq!(d.hue_degrees(now), Some(0.0));
    }

    #[test]
    fn noise_before_sequence_is_forgotten() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        feed(&mut d, &[Key::Char('x'), Key::Up, Key::Other], now);
        assert!(feed(&mut d, &SEQUENCE, now));
    }

    #[test]
    fn wrong_order_does_not_activate() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        let mut keys = SEQUENCE;
        keys.swap(8, 9);
        assert!(!feed(&mut d, &keys, now));
        assert!(!d.is_active(now));
    }

    #[test]
    fn effect_expires_after_ten_seconds() {
        let now = Instant::now();
        let mut d = KonamiDetector::new();
        feed(&mut d, &SEQUENCE, now);
        let h = d.hue_degrees(now + Duration::from_millis(500)).unwrap();
        assert!((h - 90.0).abs() < 1e-3);
        assert!(d.is_active(now + Duration::from_millis(9999)));
        assert_eq!(d.hue_degrees(now + EFFECT_TIME), None);
    }

    #[test]
    fn uppercase_letters_count() {
        assert_eq!(Key::from(KeyCode::Char('B')), Key::Char('b'));
        assert_eq!(Key::from(KeyCode::Esc), Key::Other);
    }
}
