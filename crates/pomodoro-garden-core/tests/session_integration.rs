//! Integration tests for the garden session.
//!
//! These tests drive full timer cycles through the session coordinator and
//! verify what ends up in the store, with both the in-memory store and the
//! SQLite database.

use std::rc::Rc;
use std::sync::Arc;

use pomodoro_garden_core::garden::fruit::PALM_FRUIT;
use pomodoro_garden_core::garden::PALM_GLYPH;
use pomodoro_garden_core::storage::{load_json, save_json, GARDEN_KEY, TIMER_ENGINE_KEY};
use pomodoro_garden_core::{
    Config, Database, Garden, GardenItem, GardenLayout, GardenSession, GardenSnapshot, KvStore,
    ManualClock, MemoryStore, Presenter, RewardKind, SilentNotifier, TimerEngine, TimerMode,
};

const EPOCH_MS: u64 = 1_700_000_000_000;

/// Presenter that answers every confirmation the same way.
struct FixedAnswer(bool);

impl Presenter for FixedAnswer {
    fn on_tick(&mut self, _remaining_secs: u64, _percent_complete: f64) {}
    fn on_mode_changed(&mut self, _mode: TimerMode) {}
    fn on_cycle_completed(&mut self, _kind: RewardKind) {}
    fn on_garden_changed(&mut self, _snapshot: &GardenSnapshot) {}
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

fn seeded_config() -> Config {
    let mut config = Config::default();
    config.garden.seed = Some(7);
    config
}

fn run_cycle<S: KvStore>(
    session: &mut GardenSession<S, FixedAnswer, SilentNotifier>,
    clock: &ManualClock,
    mode: TimerMode,
) {
    session.set_mode(mode);
    session.start();
    clock.advance_secs(mode.duration_secs());
    session.poll();
}

#[test]
fn test_full_day_of_cycles() {
    let clock = ManualClock::new(EPOCH_MS);
    let store = Rc::new(MemoryStore::new());
    let mut session = GardenSession::with_timer(
        Rc::clone(&store),
        &seeded_config(),
        TimerEngine::with_clock(Arc::new(clock.clone())),
        FixedAnswer(true),
        SilentNotifier,
    );

    for _ in 0..4 {
        run_cycle(&mut session, &clock, TimerMode::Focus);
        run_cycle(&mut session, &clock, TimerMode::Short);
    }
    run_cycle(&mut session, &clock, TimerMode::Long);

    let snap = session.snapshot();
    assert_eq!(snap.plant_count, 8);
    assert_eq!(snap.butterfly_count, 1);

    let stored: Vec<GardenItem> = load_json(&*store, GARDEN_KEY).unwrap();
    assert_eq!(stored.len(), 9);
    let trees = stored.iter().filter(|i| i.kind() == RewardKind::Tree).count();
    assert_eq!(trees, 4);
}

#[test]
fn test_pause_and_resume_still_completes() {
    let clock = ManualClock::new(EPOCH_MS);
    let mut session = GardenSession::with_timer(
        Rc::new(MemoryStore::new()),
        &seeded_config(),
        TimerEngine::with_clock(Arc::new(clock.clone())),
        FixedAnswer(false),
        SilentNotifier,
    );

    session.start();
    clock.advance_secs(100);
    session.pause();
    // Time spent paused does not count.
    clock.advance_secs(10_000);
    session.start();
    clock.advance_secs(1_399);
    assert!(session.poll().is_some());
    assert!(session.garden().is_empty());

    clock.advance_secs(1);
    session.poll();
    assert_eq!(session.garden().len(), 1);
}

#[test]
fn test_start_then_pause_within_a_second() {
    let clock = ManualClock::new(EPOCH_MS);
    let mut engine = TimerEngine::with_clock(Arc::new(clock.clone()));
    engine.start();
    clock.advance_ms(400);
    engine.pause();
    assert_eq!(engine.remaining_secs(), 1500);
    assert!(!engine.is_running());
}

#[test]
fn test_garden_survives_database_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garden.db");
    let clock = ManualClock::new(EPOCH_MS);

    let first_snapshot = {
        let db = Rc::new(Database::open_at(&path).unwrap());
        let mut session = GardenSession::with_timer(
            db,
            &seeded_config(),
            TimerEngine::with_clock(Arc::new(clock.clone())),
            FixedAnswer(true),
            SilentNotifier,
        );
        run_cycle(&mut session, &clock, TimerMode::Focus);
        run_cycle(&mut session, &clock, TimerMode::Short);
        run_cycle(&mut session, &clock, TimerMode::Long);
        session.toggle_theme();
        session.snapshot()
    };

    let db = Rc::new(Database::open_at(&path).unwrap());
    let mut session = GardenSession::new(db, &seeded_config(), FixedAnswer(true), SilentNotifier);
    let reopened = session.snapshot();

    let placed = |snap: &GardenSnapshot| {
        snap.ground
            .iter()
            .map(|t| (t.id.clone(), t.glyph.clone(), t.cell))
            .collect::<Vec<_>>()
    };
    assert_eq!(placed(&reopened), placed(&first_snapshot));
    assert_eq!(reopened.sky.len(), 1);
    assert_eq!(reopened.sky[0].id, first_snapshot.sky[0].id);
    assert_eq!(session.preferences().theme.as_str(), "dark");
}

#[test]
fn test_running_timer_survives_restart() {
    let clock = ManualClock::new(EPOCH_MS);
    let store = MemoryStore::new();

    let mut engine = TimerEngine::with_clock(Arc::new(clock.clone()));
    engine.start();
    clock.advance_secs(200);
    engine.tick();
    assert!(save_json(&store, TIMER_ENGINE_KEY, &engine));

    // Process is gone for a while.
    clock.advance_secs(100);

    let mut restored: TimerEngine = load_json(&store, TIMER_ENGINE_KEY).unwrap();
    restored.set_clock(Arc::new(clock.clone()));
    assert!(restored.is_running());
    restored.tick();
    assert_eq!(restored.remaining_secs(), 1200);
}

#[test]
fn test_palm_fruit_is_stable_across_renders() {
    let store = MemoryStore::new();
    let mut garden = Garden::load(&store, GardenLayout::default(), Some(3));
    for _ in 0..30 {
        garden.add_reward(RewardKind::Tree);
    }

    let first = garden.snapshot();
    let palms: Vec<_> = first.ground.iter().filter(|t| t.glyph == PALM_GLYPH).collect();
    assert!(!palms.is_empty(), "30 trees without a single palm");
    for palm in &palms {
        assert!(palm.fruits.iter().all(|f| f.glyph == PALM_FRUIT));
    }
    for tile in first.ground.iter().filter(|t| t.glyph != PALM_GLYPH) {
        assert!(tile.fruits.iter().all(|f| f.glyph != PALM_FRUIT));
        assert!((3..=5).contains(&tile.fruits.len()));
    }

    let second = garden.snapshot();
    assert_eq!(first.ground, second.ground);
}

#[test]
fn test_legacy_palm_fruit_is_repaired() {
    let store = MemoryStore::new();
    store
        .save(
            GARDEN_KEY,
            r#"[
                {"id": "1-a", "glyph": "🌴", "type": "tree", "fruits": ["🍎", "🍋"]},
                {"id": "2-b", "glyph": "🌻", "type": "flower", "cell": {"col": 9, "row": 1}},
                {"id": "3-c", "glyph": "🦋", "type": "butterfly"}
            ]"#,
        )
        .unwrap();

    let mut garden = Garden::load(&store, GardenLayout::default(), Some(1));
    let snap = garden.snapshot();

    let palm = &snap.ground[0];
    assert!(!palm.fruits.is_empty());
    assert!(palm.fruits.iter().all(|f| f.glyph == PALM_FRUIT));
    assert!(snap.ground[1].cell.col <= 4);
    assert_ne!(snap.ground[0].cell, snap.ground[1].cell);
    assert_eq!(snap.sky.len(), 1);

    // The repaired data was written back.
    let stored: Vec<GardenItem> = load_json(&store, GARDEN_KEY).unwrap();
    assert!(stored.iter().all(|i| i.cell().is_some() || i.position().is_some()));
}

#[test]
fn test_clear_declined_keeps_garden() {
    let store = Rc::new(MemoryStore::new());
    let mut session =
        GardenSession::new(Rc::clone(&store), &seeded_config(), FixedAnswer(false), SilentNotifier);
    session.add_reward(RewardKind::Butterfly);
    assert!(!session.clear_garden());
    assert_eq!(session.garden().len(), 1);
}
