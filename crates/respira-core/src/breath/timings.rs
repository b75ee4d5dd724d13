use serde::{Deserialize, Serialize};

use super::phase::Phase;

/// Seconds used for any phase whose configured value is missing or invalid.
pub const DEFAULT_PHASE_SECS: u32 = 4;

/// Per-phase durations in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    #[serde(default = "default_secs")]
    pub inhale: u32,
    #[serde(default = "default_secs")]
    pub hold: u32,
    #[serde(default = "default_secs")]
    pub exhale: u32,
}

fn default_secs() -> u32 {
    DEFAULT_PHASE_SECS
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            inhale: DEFAULT_PHASE_SECS,
            hold: DEFAULT_PHASE_SECS,
            exhale: DEFAULT_PHASE_SECS,
        }
    }
}

impl Timings {
    /// Build timings, replacing any zero with the default.
    pub fn new(inhale: u32, hold: u32, exhale: u32) -> Self {
        Self {
            inhale: or_default(inhale),
            hold: or_default(hold),
            exhale: or_default(exhale),
        }
    }

    /// Build timings from raw text fields.
    ///
    /// Each field is read like a numeric form input: surrounding whitespace
    /// and anything after the leading digits are ignored (`"6s"` is 6,
    /// `"4.5"` is 4). Empty, non-numeric, negative, zero or overflowing
    /// input falls back to [`DEFAULT_PHASE_SECS`].
    pub fn from_inputs(inhale: &str, hold: &str, exhale: &str) -> Self {
        Self::new(parse_secs(inhale), parse_secs(hold), parse_secs(exhale))
    }

    /// Duration of `phase` in seconds. `Idle` lasts zero.
    pub fn duration_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Idle => 0,
            Phase::Inhale => self.inhale,
            Phase::Hold => self.hold,
            Phase::Exhale => self.exhale,
        }
    }

    /// Length of one full Inhale/Hold/Exhale cycle.
    pub fn cycle_secs(&self) -> u64 {
        self.inhale as u64 + self.hold as u64 + self.exhale as u64
    }
}

fn or_default(secs: u32) -> u32 {
    if secs == 0 {
        DEFAULT_PHASE_SECS
    } else {
        secs
    }
}

fn parse_secs(input: &str) -> u32 {
    let trimmed = input.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: &str = {
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        &unsigned[..end]
    };
    digits.parse::<u32>().map(or_default).unwrap_or(DEFAULT_PHASE_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_four_four_four() {
        assert_eq!(Timings::default(), Timings::new(4, 4, 4));
    }

    #[test]
    fn zero_falls_back_to_default() {
        assert_eq!(Timings::new(0, 7, 0), Timings { inhale: 4, hold: 7, exhale: 4 });
    }

    #[test]
    fn inputs_parse_leading_digits() {
        let t = Timings::from_inputs(" 6 ", "2s", "4.9");
        assert_eq!(t, Timings { inhale: 6, hold: 2, exhale: 4 });
    }

    #[test]
    fn invalid_inputs_fall_back() {
        let t = Timings::from_inputs("", "-3", "abc");
        assert_eq!(t, Timings::default());
        assert_eq!(Timings::from_inputs("99999999999", "0", "+5").inhale, 4);
        assert_eq!(Timings::from_inputs("99999999999", "0", "+5").exhale, 5);
    }

    #[test]
    fn duration_lookup() {
        let t = Timings::new(3, 5, 7);
        assert_eq!(t.duration_secs(Phase::Inhale), 3);
        assert_eq!(t.duration_secs(Phase::Hold), 5);
        assert_eq!(t.duration_secs(Phase::Exhale), 7);
        assert_eq!(t.duration_secs(Phase::Idle), 0);
        assert_eq!(t.cycle_secs(), 15);
    }
}
