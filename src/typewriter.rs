// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

/// Reveals a line of text one character per `speed`. The first character
/// appears as soon as typing starts.
#[derive(Clone, Debug)]
pub struct TypeWriter {
    text: Vec<char>,
    speed: Duration,
    shown: usize,
    started: Option<Instant>,
}

impl TypeWriter {
    pub const DEFAULT_SPEED: Duration = Duration::from_millis(100);

    pub fn new(text: &str, speed: Duration) -> Self {
        Self {
            text: text.chars().collect(),
            speed,
            shown: 0,
            started: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.shown = 0;
        self.started = Some(now);
        self.update(now);
    }

    pub fn update(&mut self, now: Instant) {
        let Some(t0) = self.started else {
            return;
        };
        let elapsed = now.saturating_duration_since(t0);
        let keys = if self.speed.is_zero() {
            self.text.len()
        } else {
            (elapsed.as_nanos() / self.speed.as_nanos()) as usize + 1
        };
        self.shown = keys.min(self.text.len());
    }

    pub fn visible(&self) -> String {
        self.text[..self.shown].iter().collect()
    }

    #[cfg(test)]
    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.started.is_some() && self.shown == self.text.len()
    }
}
