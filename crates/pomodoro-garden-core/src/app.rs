//! Session coordinator.
//!
//! Owns the timer, the garden and the preferences, and routes every timer
//! event to the presentation layer. A completed cycle becomes a garden reward
//! here; the timer itself knows nothing about the garden.

use std::rc::Rc;

use crate::error::ValidationError;
use crate::events::Event;
use crate::garden::{Garden, GardenLayout, GardenSnapshot, RewardKind};
use crate::i18n::{Locale, Translator};
use crate::preferences::{Preferences, Theme};
use crate::presenter::{Notifier, Presenter};
use crate::storage::{Config, KvStore};
use crate::timer::{TimerEngine, TimerMode};

pub struct GardenSession<S: KvStore, P: Presenter, N: Notifier> {
    store: Rc<S>,
    timer: TimerEngine,
    garden: Garden<Rc<S>>,
    preferences: Preferences,
    presenter: P,
    notifier: N,
    notifications_enabled: bool,
    sound_enabled: bool,
}

impl<S: KvStore, P: Presenter, N: Notifier> GardenSession<S, P, N> {
    /// Load preferences and the garden from `store` and start with an idle
    /// focus timer.
    pub fn new(store: Rc<S>, config: &Config, presenter: P, notifier: N) -> Self {
        Self::with_timer(store, config, TimerEngine::new(), presenter, notifier)
    }

    /// Like [`new`](Self::new) with a caller-provided timer, e.g. one restored
    /// from storage or driven by a manual clock.
    pub fn with_timer(
        store: Rc<S>,
        config: &Config,
        timer: TimerEngine,
        presenter: P,
        notifier: N,
    ) -> Self {
        let preferences = Preferences::load(&*store);
        let garden = Garden::load(Rc::clone(&store), config.garden.layout(), config.garden.seed);
        Self {
            store,
            timer,
            garden,
            preferences,
            presenter,
            notifier,
            notifications_enabled: config.notifications.enabled,
            sound_enabled: config.notifications.sound,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn garden(&self) -> &Garden<Rc<S>> {
        &self.garden
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        self.preferences.locale.translate(key)
    }

    /// Translation key of the status line for the current timer state.
    pub fn status_key(&self) -> &'static str {
        if self.timer.is_running() {
            "status_growing"
        } else if self.timer.remaining_secs() > 0
            && self.timer.remaining_secs() < self.timer.total_secs()
        {
            "status_paused"
        } else {
            "status_ready"
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.timer.start();
        self.dispatch(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.timer.pause();
        self.dispatch(event)
    }

    pub fn toggle(&mut self) -> Option<Event> {
        let event = self.timer.toggle();
        self.dispatch(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.timer.reset();
        self.dispatch(event)
    }

    /// Switch modes, asking the presenter first if the timer is running.
    pub fn set_mode(&mut self, mode: TimerMode) -> Option<Event> {
        let prompt = self.preferences.locale.translate("mode_change_confirm");
        let presenter = &mut self.presenter;
        let event = self.timer.set_mode(mode, || presenter.confirm(prompt));
        self.dispatch(event)
    }

    /// Unknown mode names are logged and ignored.
    pub fn set_mode_by_name(&mut self, name: &str) -> Option<Event> {
        match name.parse::<TimerMode>() {
            Ok(mode) => self.set_mode(mode),
            Err(e) => {
                tracing::error!("{e}");
                None
            }
        }
    }

    /// One periodic re-evaluation of the countdown.
    pub fn poll(&mut self) -> Option<Event> {
        let event = self.timer.tick();
        self.dispatch(event)
    }

    // ── Garden ───────────────────────────────────────────────────────

    pub fn snapshot(&mut self) -> GardenSnapshot {
        self.garden.snapshot()
    }

    /// The viewport changed; re-place and redraw.
    pub fn resize(&mut self, layout: GardenLayout) -> GardenSnapshot {
        let snapshot = self.garden.set_layout(layout);
        self.presenter.on_garden_changed(&snapshot);
        snapshot
    }

    /// Grant a reward directly, outside a timer cycle.
    pub fn add_reward(&mut self, kind: RewardKind) -> GardenSnapshot {
        let snapshot = self.garden.add_reward(kind);
        self.presenter.on_garden_changed(&snapshot);
        snapshot
    }

    pub fn rename_tree(&mut self, id: &str, name: &str) -> Result<GardenSnapshot, ValidationError> {
        self.garden.rename_tree(id, name)?;
        let snapshot = self.garden.snapshot();
        self.presenter.on_garden_changed(&snapshot);
        Ok(snapshot)
    }

    /// Clear the garden after the presenter confirms. Returns whether it did.
    pub fn clear_garden(&mut self) -> bool {
        let prompt = self.preferences.locale.translate("clear_confirm");
        let presenter = &mut self.presenter;
        if !self.garden.clear(|| presenter.confirm(prompt)) {
            return false;
        }
        let snapshot = self.garden.snapshot();
        self.presenter.on_garden_changed(&snapshot);
        true
    }

    // ── Preferences ──────────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: Theme) {
        self.preferences.set_theme(&*self.store, theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.toggle_theme(&*self.store)
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.preferences.set_locale(&*self.store, locale);
    }

    /// Unsupported codes are logged and ignored.
    pub fn set_locale_by_code(&mut self, code: &str) -> bool {
        self.preferences.set_locale_by_code(&*self.store, code)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn dispatch(&mut self, event: Option<Event>) -> Option<Event> {
        let event = event?;
        match &event {
            Event::TimerStarted { .. } | Event::TimerPaused { .. } | Event::TimerReset { .. } => {
                self.presenter
                    .on_tick(self.timer.remaining_secs(), self.timer.percent_complete());
            }
            Event::Tick {
                remaining_secs,
                percent_complete,
                ..
            } => {
                self.presenter.on_tick(*remaining_secs, *percent_complete);
            }
            Event::ModeChanged { to, .. } => {
                self.presenter.on_mode_changed(*to);
                self.presenter
                    .on_tick(self.timer.remaining_secs(), self.timer.percent_complete());
            }
            Event::CycleCompleted { reward, .. } => {
                self.presenter.on_tick(0, 100.0);
                self.complete_cycle(*reward);
            }
            Event::StateSnapshot { .. } => {}
        }
        Some(event)
    }

    fn complete_cycle(&mut self, reward: RewardKind) {
        if self.sound_enabled {
            if let Err(e) = self.notifier.play_alarm() {
                tracing::warn!("{e}");
            }
        }

        let snapshot = self.garden.add_reward(reward);
        self.presenter.on_garden_changed(&snapshot);
        self.presenter.on_cycle_completed(reward);

        if self.notifications_enabled {
            let title = self.preferences.locale.translate("title");
            let body = self.preferences.locale.translate(reward.alert_key());
            if let Err(e) = self.notifier.notify(title, body) {
                tracing::warn!("{e}");
            }
        }
    }
}
