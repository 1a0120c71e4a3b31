//! Terminal adapters for the core presentation and notification traits.

use std::io::{self, BufRead, Write};

use pomodoro_garden_core::error::NotifyError;
use pomodoro_garden_core::{
    format_clock, GardenSnapshot, Locale, Notifier, Presenter, RewardKind, TimerMode, Translator,
};

use crate::render;

const PROGRESS_WIDTH: usize = 20;

pub struct TerminalPresenter {
    pub locale: Locale,
    assume_yes: bool,
    /// Redraw the countdown in place; set only while driving the poll loop.
    live: bool,
}

impl TerminalPresenter {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            locale: Locale::default(),
            assume_yes,
            live: false,
        }
    }

    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }
}

impl Presenter for TerminalPresenter {
    fn on_tick(&mut self, remaining_secs: u64, percent_complete: f64) {
        if !self.live {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = write!(
            stdout,
            "\r{} {} {:>3.0}%",
            format_clock(remaining_secs),
            progress_bar(percent_complete, PROGRESS_WIDTH),
            percent_complete
        );
        let _ = stdout.flush();
    }

    fn on_mode_changed(&mut self, mode: TimerMode) {
        tracing::debug!(mode = %mode, "mode changed");
    }

    fn on_cycle_completed(&mut self, kind: RewardKind) {
        tracing::debug!(kind = %kind, "cycle completed");
        if self.live {
            println!();
        }
    }

    fn on_garden_changed(&mut self, snapshot: &GardenSnapshot) {
        if self.live {
            print!("{}", render::ground(snapshot));
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Could not read confirmation: {e}");
                false
            }
        }
    }
}

/// Bell on stderr plus a one-line notice; there is no desktop notification
/// in a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn play_alarm(&mut self) -> Result<(), NotifyError> {
        let mut stderr = io::stderr().lock();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|e| NotifyError::Alarm(e.to_string()))
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        writeln!(io::stderr(), "{title}: {body}").map_err(|e| NotifyError::Notification(e.to_string()))
    }
}

/// Accepts the affirmative answers of every supported language.
fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí" | "sim"
    )
}

fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Translated label for a mode, for human-readable output.
pub fn mode_label(locale: Locale, mode: TimerMode) -> &'static str {
    locale.translate(mode.label_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_in_every_language() {
        for answer in ["y\n", "YES", " sí ", "sim", "s"] {
            assert!(is_yes(answer), "{answer:?}");
        }
        for answer in ["", "\n", "n", "no", "não"] {
            assert!(!is_yes(answer), "{answer:?}");
        }
    }

    #[test]
    fn progress_bar_has_fixed_width() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(250.0, 4), "████");
    }

    #[test]
    fn assume_yes_skips_the_prompt() {
        let mut presenter = TerminalPresenter::new(true);
        assert!(presenter.confirm("sure?"));
    }

    #[test]
    fn mode_labels_follow_locale() {
        assert_eq!(mode_label(Locale::En, TimerMode::Long), "Long Break");
        assert_eq!(mode_label(Locale::Es, TimerMode::Focus), "Enfoque");
    }
}
