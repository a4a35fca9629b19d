// Copyright (c) 2026 rezky_nightky

use std::time::{Duration, Instant};

/// Fixed-rate frame clock. A frame that runs late re-bases the schedule on
/// the current time instead of queueing catch-up frames.
#[derive(Clone, Debug)]
pub struct FramePacer {
    period: Duration,
    next_frame: Instant,
}

impl FramePacer {
    pub fn new(fps: f64, now: Instant) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        Self {
            period: Duration::from_secs_f64(1.0 / fps),
            next_frame: now,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Time left until the next frame is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }

    pub fn advance(&mut self, now: Instant) {
        self.next_frame += self.period;
        if now > self.next_frame {
            self.next_frame = now;
        }
    }
}
