use serde::{Deserialize, Serialize};

/// Circle size while idle and at the bottom of an exhale.
pub const RESTING_SIZE: f64 = 100.0;
/// Circle size at the top of an inhale and throughout a hold.
pub const EXPANDED_SIZE: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Inhale,
    Hold,
    Exhale,
}

/// RGBA display color for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Phase {
    /// The phase entered once this one's duration has elapsed.
    ///
    /// `Idle` has no automatic successor.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Idle => None,
            Phase::Inhale => Some(Phase::Hold),
            Phase::Hold => Some(Phase::Exhale),
            Phase::Exhale => Some(Phase::Inhale),
        }
    }

    /// Inhale and Exhale get a light pulse on entry; Hold is silent.
    pub fn pulses_on_entry(self) -> bool {
        matches!(self, Phase::Inhale | Phase::Exhale)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Inhale => "Inhale",
            Phase::Hold => "Hold",
            Phase::Exhale => "Exhale",
        }
    }

    pub fn color(self) -> Rgba {
        match self {
            Phase::Inhale => Rgba { r: 100, g: 200, b: 255, a: 150 },
            Phase::Hold => Rgba { r: 150, g: 100, b: 255, a: 150 },
            Phase::Exhale => Rgba { r: 255, g: 150, b: 100, a: 150 },
            Phase::Idle => Rgba { r: 200, g: 200, b: 200, a: 100 },
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Target circle size for `phase` after `elapsed_secs` of a phase lasting
/// `duration_secs`. Returns `None` for phases that leave the size alone.
pub fn target_size(phase: Phase, elapsed_secs: f64, duration_secs: f64) -> Option<f64> {
    let progress = if duration_secs > 0.0 {
        (elapsed_secs / duration_secs).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let span = EXPANDED_SIZE - RESTING_SIZE;
    match phase {
        Phase::Inhale => Some(RESTING_SIZE + progress * span),
        Phase::Exhale => Some(EXPANDED_SIZE - progress * span),
        Phase::Hold | Phase::Idle => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_order() {
        assert_eq!(Phase::Inhale.next(), Some(Phase::Hold));
        assert_eq!(Phase::Hold.next(), Some(Phase::Exhale));
        assert_eq!(Phase::Exhale.next(), Some(Phase::Inhale));
        assert_eq!(Phase::Idle.next(), None);
    }

    #[test]
    fn inhale_grows_linearly_and_clamps() {
        let sizes: Vec<f64> = (0..=5)
            .map(|s| target_size(Phase::Inhale, s as f64, 4.0).unwrap())
            .collect();
        assert_eq!(sizes, vec![100.0, 150.0, 200.0, 250.0, 300.0, 300.0]);
    }

    #[test]
    fn exhale_shrinks_linearly() {
        assert_eq!(target_size(Phase::Exhale, 0.0, 4.0), Some(300.0));
        assert_eq!(target_size(Phase::Exhale, 2.0, 4.0), Some(200.0));
        assert_eq!(target_size(Phase::Exhale, 9.0, 4.0), Some(100.0));
    }

    #[test]
    fn hold_leaves_size_alone() {
        assert_eq!(target_size(Phase::Hold, 1.0, 4.0), None);
    }

    #[test]
    fn every_phase_has_a_distinct_color() {
        let colors = [Phase::Idle, Phase::Inhale, Phase::Hold, Phase::Exhale].map(Phase::color);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Exhale).unwrap(), "\"exhale\"");
    }
}
