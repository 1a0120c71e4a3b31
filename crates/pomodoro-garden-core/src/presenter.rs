//! Capability interfaces the core calls unconditionally.
//!
//! Whatever renders the timer and garden implements [`Presenter`]; sound and
//! OS notifications go through [`Notifier`]. Missing widgets, denied
//! permissions and the like are the implementation's business, not the core's.

use crate::error::NotifyError;
use crate::garden::{GardenSnapshot, RewardKind};
use crate::timer::TimerMode;

pub trait Presenter {
    fn on_tick(&mut self, remaining_secs: u64, percent_complete: f64);

    fn on_mode_changed(&mut self, mode: TimerMode);

    fn on_cycle_completed(&mut self, kind: RewardKind);

    fn on_garden_changed(&mut self, snapshot: &GardenSnapshot);

    /// Yes/no question to the user. Declining is never an error.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Fire-and-forget side effects. Errors are logged by the caller and otherwise
/// ignored.
pub trait Notifier {
    fn play_alarm(&mut self) -> Result<(), NotifyError>;

    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn play_alarm(&mut self) -> Result<(), NotifyError> {
        Ok(())
    }

    fn notify(&mut self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
