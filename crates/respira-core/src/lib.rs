//! # Respira Core Library
//!
//! Core logic for the Respira guided-breathing timer. The `respira` CLI is a
//! thin shell over this crate: it owns a [`BreathController`], ticks it at a
//! fixed rate and renders its [`VisualState`] on a separate frame timer.
//!
//! ## Architecture
//!
//! - **Breath**: wall-clock phase state machine (Idle, Inhale, Hold, Exhale)
//!   that requires the caller to periodically invoke `tick()`
//! - **Stats**: lifetime totals mirrored to a key-value blob store
//! - **Storage**: SQLite store and session history, TOML configuration
//! - **Visual**: smoothed circle size and ambient particles
//! - **Haptics**: fire-and-forget pulse contract
//!
//! ## Key Components
//!
//! - [`BreathController`]: session state machine
//! - [`Database`]: statistics blob and session history persistence
//! - [`Config`]: application configuration management
//! - [`VisualSink`]: receiver of phase and target-size pushes

pub mod breath;
pub mod clock;
pub mod error;
pub mod events;
pub mod haptics;
pub mod stats;
pub mod storage;
pub mod visual;

pub use breath::{BreathController, Phase, Rgba, Timings, EXPANDED_SIZE, RESTING_SIZE};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use haptics::{Haptics, Intensity, NoopHaptics, RecordingHaptics};
pub use stats::{Statistics, StatsDisplay, STATS_KEY};
pub use storage::{BlobStore, Config, Database, MemoryStore, SessionRecord};
pub use visual::{NullSink, ParticleField, VisualSink, VisualState};
