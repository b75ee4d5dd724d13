//! Terminal stand-in for a haptic motor.

use std::io::Write;

use respira_core::{CoreError, Haptics, Intensity, NoopHaptics};

/// Rings the terminal bell for medium and heavy pulses. Light pulses are
/// too frequent to be worth a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellHaptics;

impl Haptics for BellHaptics {
    fn pulse(&self, intensity: Intensity) -> respira_core::error::Result<()> {
        if intensity == Intensity::Light {
            return Ok(());
        }
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| CoreError::Haptics(e.to_string()))
    }
}

pub fn haptics(enabled: bool) -> Box<dyn Haptics> {
    if enabled {
        Box::new(BellHaptics)
    } else {
        Box::new(NoopHaptics)
    }
}
