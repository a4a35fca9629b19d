// Copyright (c) 2026 rezky_nightky

//! Pointer-trail particles: short-lived dots that drift and fade out.

use rand::Rng;

use crate::animator::Animator;
use crate::palette::{Rgba, NEON_GREEN};
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct ParticleConfig {
    /// Maximum live population; spawns beyond it are dropped.
    pub cap: usize,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    pub decay_min: f32,
    pub decay_max: f32,
    pub radius: f32,
    pub color: Rgba,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            cap: 50,
            max_speed: 1.0,
            decay_min: 0.01,
            decay_max: 0.03,
            radius: 2.0,
            color: NEON_GREEN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub decay: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, decay: f32) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            life: 1.0,
            decay,
        }
    }

    /// Moves and ages the particle. Returns false once it has died.
    fn advance(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= self.decay;
        self.life > 0.0
    }
}

pub struct ParticleField<R> {
    config: ParticleConfig,
    particles: Vec<Particle>,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(config: ParticleConfig, rng: R) -> Self {
        Self {
            particles: Vec::with_capacity(config.cap),
            config,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.config.cap
    }

    /// Emits one particle at the pointer. Silently ignored at the cap.
    pub fn spawn(&mut self, x: f32, y: f32) -> bool {
        if self.is_full() {
            return false;
        }
        let s = self.config.max_speed;
        let (vx, vy) = if s > 0.0 {
            (self.rng.random_range(-s..s), self.rng.random_range(-s..s))
        } else {
            (0.0, 0.0)
        };
        let decay = if self.config.decay_max > self.config.decay_min {
            self.rng
                .random_range(self.config.decay_min..self.config.decay_max)
        } else {
            self.config.decay_min
        };
        self.particles.push(Particle::new(x, y, vx, vy, decay));
        true
    }

    /// Adds a particle with known motion, subject to the same cap.
    #[cfg(test)]
    pub fn insert(&mut self, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }
        self.particles.push(particle);
        true
    }
}

impl<R: Rng> Animator for ParticleField<R> {
    fn init(&mut self, surface: &mut dyn Surface, width: f32, height: f32) {
        surface.resize(width, height);
        self.particles.clear();
    }

    fn step(&mut self, surface: &mut dyn Surface) {
        let (w, h) = (surface.width(), surface.height());
        surface.clear_rect(0.0, 0.0, w, h);

        let radius = self.config.radius;
        let color = self.config.color;
        self.particles.retain_mut(|p| {
            if !p.advance() {
                return false;
            }
            surface.fill_arc(p.x, p.y, radius, color.with_alpha(p.life));
            true
        });
    }

    fn resize(&mut self, surface: &mut dyn Surface, width: f32, height: f32) {
        // Live particles keep their positions, even off-surface ones.
        surface.resize(width, height);
    }
}
