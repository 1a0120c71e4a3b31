//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` periodically.
//!
//! Remaining time is always recomputed from an absolute deadline, never by
//! decrementing a counter, so late or skipped polls (a throttled terminal, a
//! suspended laptop) cannot desynchronize it from the wall clock.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle            (pause / reset / set_mode)
//! Idle -> Running -> (expired) Idle  (tick observes the deadline)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start();
//! // Every poll interval:
//! if let Some(Event::CycleCompleted { reward, .. }) = engine.tick() { /* ... */ }
//! ```

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::TimerMode;
use crate::clock::{system_clock, Clock};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Core timer engine.
///
/// Operates on wall-clock deadlines -- no internal thread.
/// The caller is responsible for calling `tick()` periodically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    mode: TimerMode,
    state: TimerState,
    /// Authoritative while idle; last polled value while running.
    /// Kept in milliseconds so a pause never rounds time away.
    remaining_ms: u64,
    /// Epoch milliseconds when the current run began. Only set while running.
    #[serde(default)]
    started_at_ms: Option<u64>,
    /// Epoch milliseconds when the current run reaches zero. Only set while running.
    #[serde(default)]
    deadline_ms: Option<u64>,
    #[serde(skip, default = "system_clock")]
    clock: Arc<dyn Clock>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Create an idle focus timer driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let mode = TimerMode::default();
        Self {
            mode,
            state: TimerState::Idle,
            remaining_ms: mode.duration_ms(),
            started_at_ms: None,
            deadline_ms: None,
            clock,
        }
    }

    /// Swap the clock, e.g. after deserializing a persisted engine.
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Whole seconds left, rounded up so the display only reads zero at expiry.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms.div_ceil(1000)
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn total_secs(&self) -> u64 {
        self.mode.duration_secs()
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Idle at zero: the last countdown ran out and nothing restarted it.
    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Idle && self.remaining_ms == 0
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// 0.0 .. 100.0 progress within the current mode.
    pub fn percent_complete(&self) -> f64 {
        let total = self.mode.duration_ms();
        if total == 0 {
            return 0.0;
        }
        let done = total.saturating_sub(self.remaining_ms) as f64;
        (done / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            mode: self.mode,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            percent_complete: self.percent_complete(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. Starting while already running is a no-op.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        if self.remaining_ms == 0 {
            self.remaining_ms = self.mode.duration_ms();
        }
        self.anchor(self.clock.now_ms());
        self.state = TimerState::Running;
        tracing::debug!(mode = %self.mode, remaining_ms = self.remaining_ms, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            duration_secs: self.mode.duration_secs(),
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Freeze the countdown.
    ///
    /// If the deadline already passed but no poll has observed it yet, the
    /// cycle completes here instead, so a late pause never swallows a reward.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.flush_remaining();
        if self.remaining_ms == 0 {
            return Some(self.complete());
        }
        self.cancel();
        tracing::debug!(mode = %self.mode, remaining_ms = self.remaining_ms, "timer paused");
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Back to the full duration of the current mode, from any state.
    pub fn reset(&mut self) -> Option<Event> {
        self.cancel();
        self.remaining_ms = self.mode.duration_ms();
        Some(Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Switch modes. While running, `confirm` decides; declining changes nothing.
    /// `confirm` is not called when the timer is idle.
    pub fn set_mode<F>(&mut self, mode: TimerMode, confirm: F) -> Option<Event>
    where
        F: FnOnce() -> bool,
    {
        if self.is_running() && !confirm() {
            tracing::debug!(from = %self.mode, to = %mode, "mode change declined");
            return None;
        }
        let from = self.mode;
        self.cancel();
        self.mode = mode;
        self.remaining_ms = mode.duration_ms();
        Some(Event::ModeChanged {
            from,
            to: mode,
            at: Utc::now(),
        })
    }

    /// Like [`set_mode`](Self::set_mode) for an untyped identifier.
    /// Unknown identifiers are logged and ignored.
    pub fn set_mode_by_name<F>(&mut self, name: &str, confirm: F) -> Option<Event>
    where
        F: FnOnce() -> bool,
    {
        match name.parse::<TimerMode>() {
            Ok(mode) => self.set_mode(mode, confirm),
            Err(e) => {
                tracing::error!("{e}");
                None
            }
        }
    }

    /// Call periodically. Returns `Some(Event::CycleCompleted)` exactly once
    /// when the deadline is reached, `Some(Event::Tick)` when the displayed
    /// second changed, `None` otherwise.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        let before = self.remaining_secs();
        self.flush_remaining();
        if self.remaining_ms == 0 {
            return Some(self.complete());
        }
        if self.remaining_secs() == before {
            return None;
        }
        Some(Event::Tick {
            remaining_secs: self.remaining_secs(),
            percent_complete: self.percent_complete(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_remaining(&mut self) {
        match self.deadline_ms {
            Some(deadline) => {
                self.remaining_ms = deadline.saturating_sub(self.clock.now_ms());
            }
            // Running without a deadline only happens with hand-edited
            // persisted state; re-anchor from the frozen value.
            None => self.anchor(self.clock.now_ms()),
        }
    }

    fn anchor(&mut self, now: u64) {
        self.started_at_ms = Some(now);
        self.deadline_ms = Some(now.saturating_add(self.remaining_ms));
    }

    fn cancel(&mut self) {
        self.state = TimerState::Idle;
        self.started_at_ms = None;
        self.deadline_ms = None;
    }

    fn complete(&mut self) -> Event {
        self.cancel();
        self.remaining_ms = 0;
        tracing::info!(mode = %self.mode, reward = %self.mode.reward(), "cycle completed");
        Event::CycleCompleted {
            mode: self.mode,
            reward: self.mode.reward(),
            at: Utc::now(),
        }
    }
}
