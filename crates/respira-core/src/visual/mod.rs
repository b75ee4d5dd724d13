//! Visual accompaniment for a session.
//!
//! The controller pushes a phase and a target size into a [`VisualSink`].
//! [`VisualState`] keeps only the latest push and eases its displayed size
//! toward the target once per rendered frame, at whatever rate the renderer
//! calls [`VisualState::frame`].

mod particles;

pub use particles::{Particle, ParticleField};

use crate::breath::{Phase, Rgba, RESTING_SIZE};

pub const DEFAULT_SMOOTHING: f64 = 0.05;

/// Receiver of controller pushes. Never reports back.
pub trait VisualSink {
    fn phase_changed(&mut self, phase: Phase);
    fn target_size_changed(&mut self, size: f64);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl VisualSink for NullSink {
    fn phase_changed(&mut self, _phase: Phase) {}
    fn target_size_changed(&mut self, _size: f64) {}
}

#[derive(Debug, Clone)]
pub struct VisualState {
    phase: Phase,
    target_size: f64,
    current_size: f64,
    smoothing: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }
}

impl VisualState {
    /// `smoothing` outside `(0, 1]` falls back to [`DEFAULT_SMOOTHING`].
    pub fn new(smoothing: f64) -> Self {
        let smoothing = if smoothing > 0.0 && smoothing <= 1.0 {
            smoothing
        } else {
            DEFAULT_SMOOTHING
        };
        Self {
            phase: Phase::Idle,
            target_size: RESTING_SIZE,
            current_size: RESTING_SIZE,
            smoothing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target_size(&self) -> f64 {
        self.target_size
    }

    pub fn current_size(&self) -> f64 {
        self.current_size
    }

    pub fn color(&self) -> Rgba {
        self.phase.color()
    }

    /// Advance one rendered frame and return the eased size.
    pub fn frame(&mut self) -> f64 {
        self.current_size += (self.target_size - self.current_size) * self.smoothing;
        self.current_size
    }
}

impl VisualSink for VisualState {
    fn phase_changed(&mut self, phase: Phase) {
        self.phase = phase;
    }

    fn target_size_changed(&mut self, size: f64) {
        if size.is_finite() {
            self.target_size = size;
        }
    }
}
