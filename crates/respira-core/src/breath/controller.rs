//! Breathing session controller.
//!
//! A wall-clock state machine in the same mould as a poll-driven timer: it
//! owns no thread, and the caller invokes [`BreathController::tick`] at a
//! fixed rate (10 Hz is plenty).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -start-> Inhale -> Hold -> Exhale -> Inhale -> ...
//!   ^                                          |
//!   +------------------- stop -----------------+
//! ```
//!
//! Phase changes happen only inside `tick()`, one per call, once the
//! current phase's configured duration has elapsed. The next phase starts
//! at the time of that tick, so sampling jitter shifts later phases rather
//! than shortening them.

use chrono::{DateTime, Utc};

use super::phase::{target_size, Phase, RESTING_SIZE};
use super::timings::Timings;
use crate::clock::Clock;
use crate::events::Event;
use crate::haptics::{Haptics, Intensity};
use crate::stats::Statistics;
use crate::storage::BlobStore;
use crate::visual::{VisualSink, VisualState};

#[derive(Debug, Clone, Copy)]
struct Session {
    started_at_ms: u64,
    phase: Phase,
    phase_started_at_ms: u64,
    cycle_count: u64,
}

pub struct BreathController<V: VisualSink = VisualState> {
    clock: Box<dyn Clock>,
    store: Box<dyn BlobStore>,
    haptics: Box<dyn Haptics>,
    visual: V,
    timings: Timings,
    stats: Statistics,
    session: Option<Session>,
    target_size: f64,
    countdown_secs: u32,
    has_completed: bool,
}

impl<V: VisualSink> BreathController<V> {
    /// Build an idle controller, loading statistics from `store`.
    pub fn new(
        clock: Box<dyn Clock>,
        store: Box<dyn BlobStore>,
        haptics: Box<dyn Haptics>,
        visual: V,
    ) -> Self {
        let stats = Statistics::load(store.as_ref());
        Self {
            clock,
            store,
            haptics,
            visual,
            timings: Timings::default(),
            stats,
            session: None,
            target_size: RESTING_SIZE,
            countdown_secs: 0,
            has_completed: false,
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = Timings::new(timings.inhale, timings.hold, timings.exhale);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.session.map(|s| s.phase).unwrap_or(Phase::Idle)
    }

    /// Completed cycles in the running session, zero when idle.
    pub fn cycle_count(&self) -> u64 {
        self.session.map(|s| s.cycle_count).unwrap_or(0)
    }

    /// Whole seconds left in the current phase as of the last tick.
    pub fn countdown_secs(&self) -> u32 {
        self.countdown_secs
    }

    /// Last target size pushed to the visual sink.
    pub fn target_size(&self) -> f64 {
        self.target_size
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    /// Text for the phase readout, e.g. `Inhale (3s)`.
    pub fn phase_label(&self) -> String {
        match self.session {
            Some(session) => format!("{} ({}s)", session.phase.label(), self.countdown_secs),
            None if self.has_completed => "Session complete".to_string(),
            None => "Ready".to_string(),
        }
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            running: self.is_running(),
            phase: self.phase(),
            countdown_secs: self.countdown_secs,
            cycle_count: self.cycle_count(),
            target_size: self.target_size,
            timings: self.timings,
            statistics: self.stats,
            at: timestamp(self.clock.now_ms()),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session at Inhale. No-op while one is running.
    pub fn start(&mut self) -> Option<Event> {
        if self.session.is_some() {
            return None;
        }
        let now = self.clock.now_ms();
        self.session = Some(Session {
            started_at_ms: now,
            phase: Phase::Inhale,
            phase_started_at_ms: now,
            cycle_count: 0,
        });
        self.pulse(Intensity::Medium);
        self.enter_phase(Phase::Inhale, now);
        tracing::info!(
            inhale = self.timings.inhale,
            hold = self.timings.hold,
            exhale = self.timings.exhale,
            "breathing session started"
        );
        Some(Event::SessionStarted {
            timings: self.timings,
            at: timestamp(now),
        })
    }

    /// End the session and fold it into the statistics. No-op when idle.
    pub fn stop(&mut self) -> Option<Event> {
        let session = self.session.take()?;
        let now = self.clock.now_ms();
        let minutes = now.saturating_sub(session.started_at_ms) as f64 / 60_000.0;

        self.stats.record_session(session.cycle_count, minutes);
        self.persist();

        self.visual.phase_changed(Phase::Idle);
        self.push_target_size(RESTING_SIZE);
        self.pulse(Intensity::Heavy);
        self.countdown_secs = 0;
        self.has_completed = true;

        tracing::info!(
            cycles = session.cycle_count,
            minutes,
            "breathing session completed"
        );
        Some(Event::SessionCompleted {
            started_at: timestamp(session.started_at_ms),
            cycles: session.cycle_count,
            minutes,
            statistics: self.stats,
            at: timestamp(now),
        })
    }

    /// Call periodically. Returns `Some(Event::PhaseChanged)` on a transition.
    pub fn tick(&mut self) -> Option<Event> {
        let session = self.session?;
        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(session.phase_started_at_ms) as f64 / 1000.0;
        let duration = self.timings.duration_secs(session.phase) as f64;

        if let Some(size) = target_size(session.phase, elapsed, duration) {
            self.push_target_size(size);
        }

        if elapsed < duration {
            self.countdown_secs = (duration - elapsed).ceil() as u32;
            return None;
        }

        let next = session.phase.next()?;
        if session.phase == Phase::Exhale {
            if let Some(s) = self.session.as_mut() {
                s.cycle_count += 1;
            }
        }
        self.enter_phase(next, now);
        if session.phase == Phase::Exhale {
            self.pulse(Intensity::Light);
        }

        let cycle_count = self.cycle_count();
        tracing::debug!(from = %session.phase, to = %next, cycle_count, "phase changed");
        Some(Event::PhaseChanged {
            from: session.phase,
            to: next,
            cycle_count,
            at: timestamp(now),
        })
    }

    /// Replace the phase timings; zeros fall back to the default.
    ///
    /// Ignored while a session is running so the current phase keeps the
    /// duration it started with.
    pub fn update_timings(&mut self, inhale: u32, hold: u32, exhale: u32) -> Option<Event> {
        if self.is_running() {
            tracing::warn!("timings change ignored while a session is running");
            return None;
        }
        self.timings = Timings::new(inhale, hold, exhale);
        Some(Event::TimingsUpdated {
            timings: self.timings,
            at: timestamp(self.clock.now_ms()),
        })
    }

    /// Zero the statistics and persist. Confirmation is the caller's job.
    pub fn reset_statistics(&mut self) -> Option<Event> {
        self.stats.reset();
        self.persist();
        self.pulse(Intensity::Heavy);
        tracing::info!("statistics reset");
        Some(Event::StatisticsReset {
            at: timestamp(self.clock.now_ms()),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_phase(&mut self, phase: Phase, now: u64) {
        if let Some(s) = self.session.as_mut() {
            s.phase = phase;
            s.phase_started_at_ms = now;
        }
        self.countdown_secs = self.timings.duration_secs(phase);
        self.visual.phase_changed(phase);
        if phase.pulses_on_entry() {
            self.pulse(Intensity::Light);
        }
    }

    fn push_target_size(&mut self, size: f64) {
        self.target_size = size;
        self.visual.target_size_changed(size);
    }

    fn pulse(&self, intensity: Intensity) {
        if let Err(e) = self.haptics.pulse(intensity) {
            tracing::debug!(error = %e, ?intensity, "haptic pulse failed");
        }
    }

    fn persist(&self) {
        if let Err(e) = self.stats.save(self.store.as_ref()) {
            tracing::warn!(error = %e, "failed to persist statistics");
        }
    }
}

fn timestamp(ms: u64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms as i64).unwrap_or_default()
}
