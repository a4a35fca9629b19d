// Copyright (c) 2026 rezky_nightky

//! Fake shell prompt that types a rotating list of commands.

use std::time::{Duration, Instant};

pub const COMMANDS: [&str; 8] = [
    "git status",
    "python automation.py",
    "frida -U -f com.app --load script.js",
    "curl -X GET api.endpoint.com/data",
    "docker run -it python:alpine",
    "npm run dev",
    "pip install beautifulsoup4",
    "adb devices",
];

pub const CURSOR: char = '█';

const CYCLE: Duration = Duration::from_secs(5);
const KEYSTROKE: Duration = Duration::from_millis(100);
const HOLD: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Typing { since: Instant },
    Holding { until: Instant },
}

#[derive(Clone, Debug)]
pub struct TerminalSimulator {
    commands: Vec<String>,
    index: usize,
    line: String,
    phase: Phase,
    next_cycle: Instant,
}

impl TerminalSimulator {
    pub fn new(now: Instant) -> Self {
        Self::with_commands(COMMANDS.iter().map(|c| c.to_string()).collect(), now)
    }

    pub fn with_commands(commands: Vec<String>, now: Instant) -> Self {
        Self {
            commands,
            index: 0,
            line: CURSOR.to_string(),
            phase: Phase::Idle,
            next_cycle: now + CYCLE,
        }
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn current(&self) -> &str {
        self.commands
            .get(self.index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The interval fires once more after the last key before it stops.
    fn typing_time(&self) -> Duration {
        KEYSTROKE * (self.current().chars().count() as u32 + 1)
    }

    fn advance_index(&mut self) {
        if !self.commands.is_empty() {
            self.index = (self.index + 1) % self.commands.len();
        }
    }

    pub fn update(&mut self, now: Instant) {
        loop {
            let phase_due = match self.phase {
                Phase::Idle => None,
                Phase::Typing { since } => Some(since + self.typing_time()),
                Phase::Holding { until } => Some(until),
            };
            let cycle_due = self.next_cycle;

            match phase_due {
                Some(t) if t <= now && t < cycle_due => self.finish_phase(t),
                _ if cycle_due <= now => {
                    self.begin_cycle(cycle_due);
                    self.next_cycle = cycle_due + CYCLE;
                }
                _ => break,
            }
        }

        if let Phase::Typing { since } = self.phase {
            let keys = now.saturating_duration_since(since).as_nanos() / KEYSTROKE.as_nanos();
            let line: String = self.current().chars().take(keys as usize).collect();
            self.line = line;
        }
    }

    fn finish_phase(&mut self, at: Instant) {
        match self.phase {
            Phase::Typing { .. } => {
                self.line = self.current().to_string();
                self.phase = Phase::Holding { until: at + HOLD };
            }
            Phase::Holding { .. } => {
                self.line = CURSOR.to_string();
                self.advance_index();
                self.phase = Phase::Idle;
            }
            Phase::Idle => {}
        }
    }

    fn begin_cycle(&mut self, at: Instant) {
        // A hold cut short by the next cycle still moves on to the next command.
        if matches!(self.phase, Phase::Holding { .. }) {
            self.advance_index();
        }
        self.line.clear();
        self.phase = Phase::Typing { since: at };
    }
}
