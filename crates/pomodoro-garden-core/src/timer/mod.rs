mod engine;
mod mode;

pub use engine::{TimerEngine, TimerState};
pub use mode::{format_clock, TimerMode};

/// Default poll interval for drivers of [`TimerEngine::tick`].
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;
