use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::breath::{Phase, Timings};
use crate::stats::Statistics;

/// Every state change of the controller produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        timings: Timings,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
        cycle_count: u64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        started_at: DateTime<Utc>,
        cycles: u64,
        minutes: f64,
        statistics: Statistics,
        at: DateTime<Utc>,
    },
    TimingsUpdated {
        timings: Timings,
        at: DateTime<Utc>,
    },
    StatisticsReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        phase: Phase,
        countdown_secs: u32,
        cycle_count: u64,
        target_size: f64,
        timings: Timings,
        statistics: Statistics,
        at: DateTime<Utc>,
    },
}
