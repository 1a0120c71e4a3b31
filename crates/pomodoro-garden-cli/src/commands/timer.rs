use std::error::Error;
use std::time::Duration;

use clap::Subcommand;
use pomodoro_garden_core::{format_clock, Config, Event, TimerMode, Translator};

use super::{open_session, print_json, save_timer, Session};
use crate::terminal::{mode_label, TerminalPresenter};

/// Shortest sleep between polls in the foreground loop.
const MIN_POLL_INTERVAL_MS: u64 = 10;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Freeze the countdown
    Pause,
    /// Start when idle, pause when running
    Toggle,
    /// Back to the full duration of the current mode
    Reset,
    /// Show the current timer state
    Status {
        /// Print the state snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch between focus, short and long
    Mode {
        mode: TimerMode,
        /// Stop a running countdown without asking
        #[arg(long, short)]
        yes: bool,
    },
    /// Start and drive the countdown in the foreground until it completes
    Run,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let assume_yes = matches!(action, TimerAction::Mode { yes: true, .. });
    let mut presenter = TerminalPresenter::new(assume_yes);
    if matches!(action, TimerAction::Run) {
        presenter = presenter.live();
    }

    let (mut session, caught_up) = open_session(&config, presenter)?;
    if let Some(event) = &caught_up {
        print_json(event)?;
    }

    let event = match action {
        TimerAction::Start => session.start(),
        TimerAction::Pause => session.pause(),
        TimerAction::Toggle => session.toggle(),
        TimerAction::Reset => session.reset(),
        TimerAction::Status { json: true } => Some(session.timer().snapshot()),
        TimerAction::Status { json: false } => {
            print_status(&session);
            None
        }
        TimerAction::Mode { mode, .. } => {
            let event = session.set_mode(mode);
            if event.is_none() {
                eprintln!("mode unchanged");
            }
            event
        }
        TimerAction::Run => drive(&mut session, config.timer.poll_interval_ms)?,
    };

    if let Some(event) = event {
        print_json(&event)?;
    }
    save_timer(&session);
    Ok(())
}

fn print_status(session: &Session) {
    let timer = session.timer();
    let locale = session.preferences().locale;
    println!(
        "{}  {}  {}",
        mode_label(locale, timer.mode()),
        format_clock(timer.remaining_secs()),
        locale.translate(session.status_key())
    );
}

/// Poll in the foreground until the countdown completes or something else
/// stops it. Prints the start event right away and returns the completion
/// event.
fn drive(
    session: &mut Session,
    poll_interval_ms: u64,
) -> Result<Option<Event>, Box<dyn Error>> {
    if let Some(started) = session.start() {
        // End the progress line drawn by the start.
        println!();
        print_json(&started)?;
    }
    // A second process can now see the running state.
    save_timer(session);

    let interval = Duration::from_millis(poll_interval_ms.max(MIN_POLL_INTERVAL_MS));
    while session.timer().is_running() {
        std::thread::sleep(interval);
        if let Some(event @ Event::CycleCompleted { .. }) = session.poll() {
            return Ok(Some(event));
        }
    }
    Ok(None)
}
