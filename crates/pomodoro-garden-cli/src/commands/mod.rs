pub mod config;
pub mod garden;
pub mod prefs;
pub mod timer;

use std::rc::Rc;

use pomodoro_garden_core::error::Result;
use pomodoro_garden_core::storage::{load_json, save_json, TIMER_ENGINE_KEY};
use pomodoro_garden_core::{Config, Database, Event, GardenSession, TimerEngine};
use serde::Serialize;

use crate::terminal::{TerminalNotifier, TerminalPresenter};

pub type Session = GardenSession<Database, TerminalPresenter, TerminalNotifier>;

/// Open the database and restore the timer left by the previous invocation.
///
/// The restored timer is polled once, so a countdown that ran out while no
/// process was watching still grows its reward. That completion, if any, is
/// returned alongside the session.
pub fn open_session(
    config: &Config,
    presenter: TerminalPresenter,
) -> Result<(Session, Option<Event>)> {
    let db = Rc::new(Database::open()?);
    let timer: TimerEngine = load_json(&*db, TIMER_ENGINE_KEY).unwrap_or_default();
    let mut session = GardenSession::with_timer(db, config, timer, presenter, TerminalNotifier);
    let locale = session.preferences().locale;
    session.presenter_mut().locale = locale;

    let caught_up = session.poll().filter(|e| matches!(e, Event::CycleCompleted { .. }));
    Ok((session, caught_up))
}

/// Persist the timer for the next invocation. Best effort.
pub fn save_timer(session: &Session) {
    save_json(session.store(), TIMER_ENGINE_KEY, session.timer());
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
