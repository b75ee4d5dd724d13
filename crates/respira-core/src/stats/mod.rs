//! Lifetime breathing statistics.
//!
//! The record lives in memory on the controller and is mirrored to a
//! [`BlobStore`] under [`STATS_KEY`] as a single JSON blob.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::BlobStore;

/// Store key holding the serialized [`Statistics`].
pub const STATS_KEY: &str = "respira-stats";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub sessions_completed: u64,
    pub total_cycles: u64,
    pub total_minutes: f64,
}

/// Statistics formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsDisplay {
    pub sessions: String,
    pub cycles: String,
    pub minutes: String,
}

impl Statistics {
    /// Fold one finished session into the totals.
    pub fn record_session(&mut self, cycles: u64, minutes: f64) {
        self.sessions_completed = self.sessions_completed.saturating_add(1);
        self.total_cycles = self.total_cycles.saturating_add(cycles);
        if minutes.is_finite() && minutes > 0.0 {
            self.total_minutes += minutes;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn display(&self) -> StatsDisplay {
        StatsDisplay {
            sessions: self.sessions_completed.to_string(),
            cycles: self.total_cycles.to_string(),
            minutes: format!("{:.1}", self.total_minutes),
        }
    }

    /// Parse a stored blob. Anything unreadable, negative or non-finite
    /// yields `None`.
    pub fn from_blob(blob: &str) -> Option<Self> {
        let stats: Statistics = serde_json::from_str(blob).ok()?;
        if stats.total_minutes.is_finite() && stats.total_minutes >= 0.0 {
            Some(stats)
        } else {
            None
        }
    }

    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load from the store, falling back to zeros when the key is absent,
    /// the blob is malformed, or the store itself fails.
    pub fn load(store: &dyn BlobStore) -> Self {
        match store.get(STATS_KEY) {
            Ok(Some(blob)) => Self::from_blob(&blob).unwrap_or_else(|| {
                tracing::warn!("stored statistics are malformed, starting from zero");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read statistics, starting from zero");
                Self::default()
            }
        }
    }

    /// Write the whole record to the store.
    pub fn save(&self, store: &dyn BlobStore) -> Result<()> {
        store.set(STATS_KEY, &self.to_blob()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn record_session_accumulates() {
        let mut stats = Statistics::default();
        stats.record_session(3, 2.5);
        stats.record_session(1, 0.5);
        assert_eq!(stats.sessions_completed, 2);
        assert_eq!(stats.total_cycles, 4);
        assert!((stats.total_minutes - 3.0).abs() < 1e-9);
    }

    #[test]
    fn display_rounds_minutes_to_one_decimal() {
        let stats = Statistics {
            sessions_completed: 2,
            total_cycles: 11,
            total_minutes: 7.26,
        };
        assert_eq!(
            stats.display(),
            StatsDisplay {
                sessions: "2".into(),
                cycles: "11".into(),
                minutes: "7.3".into(),
            }
        );
    }

    #[test]
    fn blob_uses_camel_case_keys() {
        let stats = Statistics {
            sessions_completed: 1,
            total_cycles: 2,
            total_minutes: 0.5,
        };
        let json: serde_json::Value = serde_json::from_str(&stats.to_blob().unwrap()).unwrap();
        assert_eq!(json["sessionsCompleted"], 1);
        assert_eq!(json["totalCycles"], 2);
        assert_eq!(json["totalMinutes"], 0.5);
    }

    #[test]
    fn malformed_blobs_are_rejected() {
        assert!(Statistics::from_blob("not json").is_none());
        assert!(Statistics::from_blob(r#"{"sessionsCompleted":-1,"totalCycles":0,"totalMinutes":0}"#).is_none());
        assert!(Statistics::from_blob(r#"{"sessionsCompleted":1,"totalCycles":0,"totalMinutes":-2.0}"#).is_none());
        assert!(Statistics::from_blob(r#"{"sessionsCompleted":1}"#).is_none());
    }

    #[test]
    fn load_falls_back_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(Statistics::load(&store), Statistics::default());
        store.set(STATS_KEY, "{broken").unwrap();
        assert_eq!(Statistics::load(&store), Statistics::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let stats = Statistics {
            sessions_completed: 4,
            total_cycles: 19,
            total_minutes: 12.345,
        };
        stats.save(&store).unwrap();
        assert_eq!(Statistics::load(&store), stats);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut stats = Statistics {
            sessions_completed: 9,
            total_cycles: 90,
            total_minutes: 45.0,
        };
        stats.reset();
        assert_eq!(stats, Statistics::default());
    }
}
