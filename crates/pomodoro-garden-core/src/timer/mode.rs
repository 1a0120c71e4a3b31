use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::garden::RewardKind;

/// Timer mode. Each mode has a fixed duration and grants one reward kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Focus,
    Short,
    Long,
}

impl TimerMode {
    /// Full countdown length in seconds.
    pub fn duration_secs(self) -> u64 {
        match self {
            TimerMode::Focus => 25 * 60,
            TimerMode::Short => 5 * 60,
            TimerMode::Long => 15 * 60,
        }
    }

    pub fn duration_ms(self) -> u64 {
        self.duration_secs().saturating_mul(1000)
    }

    /// What a completed cycle in this mode grows in the garden.
    pub fn reward(self) -> RewardKind {
        match self {
            TimerMode::Focus => RewardKind::Tree,
            TimerMode::Short => RewardKind::Flower,
            TimerMode::Long => RewardKind::Butterfly,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::Short => "short",
            TimerMode::Long => "long",
        }
    }

    /// Translation key for the mode selector label.
    pub fn label_key(self) -> &'static str {
        match self {
            TimerMode::Focus => "mode_focus",
            TimerMode::Short => "mode_short",
            TimerMode::Long => "mode_long",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(TimerMode::Focus),
            "short" => Ok(TimerMode::Short),
            "long" => Ok(TimerMode::Long),
            other => Err(ValidationError::UnknownMode(other.to_string())),
        }
    }
}

/// Format seconds as `MM:SS`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_fixed_per_mode() {
        assert_eq!(TimerMode::Focus.duration_secs(), 1500);
        assert_eq!(TimerMode::Short.duration_secs(), 300);
        assert_eq!(TimerMode::Long.duration_secs(), 900);
    }

    #[test]
    fn rewards_follow_mode() {
        assert_eq!(TimerMode::Focus.reward(), RewardKind::Tree);
        assert_eq!(TimerMode::Short.reward(), RewardKind::Flower);
        assert_eq!(TimerMode::Long.reward(), RewardKind::Butterfly);
    }

    #[test]
    fn parse_rejects_unknown_mode() {
        assert_eq!("short".parse::<TimerMode>(), Ok(TimerMode::Short));
        assert_eq!(
            "pomodoro".parse::<TimerMode>(),
            Err(ValidationError::UnknownMode("pomodoro".into()))
        );
    }

    #[test]
    fn format_clock_pads() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
    }
}
