// Copyright (c) 2026 rezky_nightky

//! Frame-loop lifecycle shared by the rain and particle fields.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::surface::Surface;

/// One per-frame animation: owns its element collection and paints it.
pub trait Animator {
    /// Sizes the surface and builds the initial element collection.
    fn init(&mut self, surface: &mut dyn Surface, width: f32, height: f32);

    /// Advances every element by one frame and draws it.
    fn step(&mut self, surface: &mut dyn Surface);

    fn resize(&mut self, surface: &mut dyn Surface, width: f32, height: f32);
}

/// Cloneable stop flag. Once cancelled it stays cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Pairs an animator with the surface it owns. The host calls `tick` once
/// per frame; nothing reschedules itself.
pub struct FrameLoop<A, S> {
    animator: A,
    surface: S,
    token: CancelToken,
    ticks: u64,
}

impl<A: Animator, S: Surface> FrameLoop<A, S> {
    pub fn start(mut animator: A, mut surface: S, width: f32, height: f32, token: CancelToken) -> Self {
        animator.init(&mut surface, width, height);
        Self {
            animator,
            surface,
            token,
            ticks: 0,
        }
    }

    /// Runs one step unless the loop was stopped. Returns whether it ran.
    pub fn tick(&mut self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.animator.step(&mut self.surface);
        self.ticks += 1;
        true
    }

    /// Runs up to `n` steps and reports how many actually ran.
    #[cfg(test)]
    pub fn run_ticks(&mut self, n: u64) -> u64 {
        let mut ran = 0;
        while ran < n && self.tick() {
            ran += 1;
        }
        ran
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.animator.resize(&mut self.surface, width, height);
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    #[derive(Default)]
    struct Counter {
        inits: u32,
        steps: u32,
        resizes: u32,
    }

    impl Animator for Counter {
        fn init(&mut self, surface: &mut dyn Surface, width: f32, height: f32) {
            surface.resize(width, height);
            self.inits += 1;
        }

        fn step(&mut self, _surface: &mut dyn Surface) {
            self.steps += 1;
        }

        fn resize(&mut self, surface: &mut dyn Surface, width: f32, height: f32) {
            surface.resize(width, height);
            self.resizes += 1;
        }
    }

    #[test]
    fn start_initialises_once_and_sizes_surface() {
        let fl = FrameLoop::start(
            Counter::default(),
            RecordingSurface::default(),
            640.0,
            480.0,
            CancelToken::new(),
        );
        assert_eq!(fl.animator().inits, 1);
        assert_eq!(fl.surface().width, 640.0);
        assert_eq!(fl.ticks(), 0);
    }

    #[test]
    fn run_ticks_is_bounded_and_deterministic() {
        let mut fl = FrameLoop::start(
            Counter::default(),
            RecordingSurface::default(),
            10.0,
            10.0,
            CancelToken::new(),
        );
        assert_eq!(fl.run_ticks(7), 7);
        assert_eq!(fl.animator().steps, 7);
        assert_eq!(fl.ticks(), 7);
    }

    #[test]
    fn stop_prevents_further_steps() {
        let mut fl = FrameLoop::start(
            Counter::default(),
            RecordingSurface::default(),
            10.0,
            10.0,
            CancelToken::new(),
        );
        fl.run_ticks(2);
        fl.stop();
        assert!(!fl.is_running());
        assert!(!fl.tick());
        assert_eq!(fl.run_ticks(5), 0);
        assert_eq!(fl.animator().steps, 2);
    }

    #[test]
    fn shared_token_stops_every_loop() {
        let token = CancelToken::new();
        let mut a = FrameLoop::start(
            Counter::default(),
            RecordingSurface::default(),
            1.0,
            1.0,
            token.clone(),
        );
        let mut b = FrameLoop::start(
            Counter::default(),
            RecordingSurface::default(),
            1.0,
            1.0,
            token.clone(),
        );
        token.cancel();
        assert!(!a.tick());
        assert!(!b.tick());
    }

    #[test]
    fn resize_is_forwarded() {
        let mut fl = FrameLoop::start(
            Counter::default(),
            RecordingSurface::default(),
            1.0,
            1.0,
            CancelToken::new(),
        );
        fl.resize(30.0, 20.0);
        assert_eq!(fl.animator().resizes, 1);
        assert_eq!(fl.surface().height, 20.0);
    }
}
