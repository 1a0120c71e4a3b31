//! # Pomodoro Garden Core Library
//!
//! This library provides the core logic for Pomodoro Garden, a focus timer that
//! grows a persistent garden: every completed interval adds a tree, a flower
//! or a butterfly. Frontends (the bundled CLI, or any GUI) are thin layers
//! implementing [`Presenter`] over the same core.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A wall-clock-deadline state machine that requires the
//!   caller to periodically invoke `tick()`
//! - **Garden**: Persisted reward items with collision-free placement on a
//!   ground grid and a percentage-based sky plane
//! - **Storage**: Best-effort key-value persistence (SQLite) and TOML-based
//!   configuration
//! - **Session**: Coordinator routing timer events to the garden and the
//!   presentation layer
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Garden`]: Reward placement engine
//! - [`GardenSession`]: Coordinator for frontends
//! - [`Database`]: Key-value persistence
//! - [`Config`]: Application configuration management

pub mod app;
pub mod clock;
pub mod error;
pub mod events;
pub mod garden;
pub mod i18n;
pub mod preferences;
pub mod presenter;
pub mod storage;
pub mod timer;

pub use app::GardenSession;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, NotifyError, StorageError, ValidationError};
pub use events::Event;
pub use garden::{Garden, GardenItem, GardenLayout, GardenSnapshot, GridCell, RewardKind};
pub use i18n::{Locale, Translator};
pub use preferences::{Preferences, Theme};
pub use presenter::{Notifier, Presenter, SilentNotifier};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use timer::{format_clock, TimerEngine, TimerMode, TimerState};
