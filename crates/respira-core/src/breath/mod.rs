mod controller;
mod phase;
mod timings;

pub use controller::BreathController;
pub use phase::{target_size, Phase, Rgba, EXPANDED_SIZE, RESTING_SIZE};
pub use timings::{Timings, DEFAULT_PHASE_SECS};
