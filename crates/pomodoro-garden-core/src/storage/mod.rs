mod config;
pub mod database;
pub mod memory;

pub use config::{Config, GardenConfig, NotificationsConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";
pub const GARDEN_KEY: &str = "garden";
pub const TIMER_ENGINE_KEY: &str = "timer_engine";

/// String-keyed store of serialized values.
///
/// Callers treat every operation as best effort; see [`load_json`] and
/// [`save_json`].
pub trait KvStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

impl<T: KvStore + ?Sized> KvStore for Rc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// Read and parse `key`. Missing keys, read failures and malformed JSON all
/// yield `None`; failures are logged.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, "Error loading {key}: {e}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "Discarding malformed {key}: {e}");
            None
        }
    }
}

/// Serialize and write `value`. Returns whether the write went through;
/// failures are logged and never propagated.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, "Error serializing {key}: {e}");
            return false;
        }
    };
    match store.save(key, &raw) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, "Error saving {key}: {e}");
            false
        }
    }
}

/// Returns `~/.config/pomodoro-garden[-dev]/` based on POMODORO_GARDEN_ENV.
///
/// Set POMODORO_GARDEN_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMODORO_GARDEN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomodoro-garden-dev")
    } else {
        base_dir.join("pomodoro-garden")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
