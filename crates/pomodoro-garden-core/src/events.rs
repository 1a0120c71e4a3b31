use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::garden::RewardKind;
use crate::timer::{TimerMode, TimerState};

/// Every timer state change produces an Event.
/// The coordinator forwards them to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time changed during a poll.
    Tick {
        remaining_secs: u64,
        percent_complete: f64,
        at: DateTime<Utc>,
    },
    ModeChanged {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    /// A full countdown reached zero.
    CycleCompleted {
        mode: TimerMode,
        reward: RewardKind,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        mode: TimerMode,
        remaining_secs: u64,
        total_secs: u64,
        percent_complete: f64,
        at: DateTime<Utc>,
    },
}
