//! Haptic feedback contract.
//!
//! Pulses are fire-and-forget: the controller logs a failed pulse and moves on.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Medium,
    Heavy,
}

pub trait Haptics {
    fn pulse(&self, intensity: Intensity) -> Result<()>;
}

/// Drops every pulse. Used when haptics are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHaptics;

impl Haptics for NoopHaptics {
    fn pulse(&self, _intensity: Intensity) -> Result<()> {
        Ok(())
    }
}

/// Keeps every pulse in order. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHaptics {
    pulses: Arc<Mutex<Vec<Intensity>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulses(&self) -> Vec<Intensity> {
        self.pulses.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Return and forget everything recorded so far.
    pub fn take(&self) -> Vec<Intensity> {
        self.pulses
            .lock()
            .map(|mut p| std::mem::take(&mut *p))
            .unwrap_or_default()
    }
}

impl Haptics for RecordingHaptics {
    fn pulse(&self, intensity: Intensity) -> Result<()> {
        if let Ok(mut pulses) = self.pulses.lock() {
            pulses.push(intensity);
        }
        Ok(())
    }
}

impl<H: Haptics + ?Sized> Haptics for Box<H> {
    fn pulse(&self, intensity: Intensity) -> Result<()> {
        (**self).pulse(intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_order_and_take_clears() {
        let haptics = RecordingHaptics::new();
        let shared = haptics.clone();
        haptics.pulse(Intensity::Medium).unwrap();
        haptics.pulse(Intensity::Light).unwrap();
        assert_eq!(shared.take(), vec![Intensity::Medium, Intensity::Light]);
        assert!(haptics.pulses().is_empty());
    }
}
