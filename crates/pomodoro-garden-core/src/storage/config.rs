//! TOML-based application configuration.
//!
//! Stores driver preferences:
//! - Timer poll interval
//! - Garden viewport defaults (column count, sky size) and an optional RNG seed
//! - Notification and alarm switches
//!
//! Configuration is stored at `~/.config/pomodoro-garden/config.toml`.
//! Theme and language live in the key-value store instead, see
//! [`Preferences`](crate::Preferences).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::garden::GardenLayout;
use crate::timer::DEFAULT_POLL_INTERVAL_MS;

/// Timer driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Garden viewport defaults used when the renderer reports nothing better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenConfig {
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default = "default_sky_width_px")]
    pub sky_width_px: f64,
    #[serde(default = "default_sky_height_px")]
    pub sky_height_px: f64,
    /// Fixed RNG seed for reproducible layouts.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomodoro-garden/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub garden: GardenConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Values that unset an optional key.
const UNSET_VALUES: &[&str] = &["", "none", "null"];

// Default functions
fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
fn default_columns() -> u32 {
    4
}
fn default_sky_width_px() -> f64 {
    480.0
}
fn default_sky_height_px() -> f64 {
    320.0
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            sky_width_px: default_sky_width_px(),
            sky_height_px: default_sky_height_px(),
            seed: None,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
        }
    }
}

impl GardenConfig {
    pub fn layout(&self) -> GardenLayout {
        GardenLayout::new(self.columns, self.sky_width_px, self.sky_height_px)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// `nullable` marks keys whose default is unset; they accept
    /// [`UNSET_VALUES`] in addition to a typed value.
    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
        nullable: bool,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    _ if nullable && UNSET_VALUES.contains(&value) => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => parse_number(value)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    // Optional numbers (the seed) are unset until given a value.
                    serde_json::Value::Null => parse_number(value)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/pomodoro-garden"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        let defaults = serde_json::to_value(Self::default()).unwrap_or_default();
        let nullable =
            Self::get_json_value_by_path(&defaults, key).is_some_and(serde_json::Value::is_null);
        Self::set_json_value_by_path(&mut json, key, value, nullable)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("{e}; using default configuration");
            Self::default()
        })
    }
}

fn parse_number(value: &str) -> Option<serde_json::Value> {
    if let Ok(n) = value.parse::<u64>() {
        Some(serde_json::Value::Number(n.into()))
    } else {
        value
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.poll_interval_ms, 250);
        assert_eq!(parsed.garden.columns, 4);
        assert!(parsed.garden.seed.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[garden]\ncolumns = 7\n").unwrap();
        assert_eq!(parsed.garden.columns, 7);
        assert_eq!(parsed.garden.sky_width_px, 480.0);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.sound").as_deref(), Some("true"));
        assert_eq!(cfg.get("garden.columns").as_deref(), Some("4"));
        assert!(cfg.get("garden.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("garden.columns", "6").unwrap();
        cfg.set("notifications.enabled", "false").unwrap();
        cfg.set("garden.sky_width_px", "812.5").unwrap();
        assert_eq!(cfg.garden.columns, 6);
        assert!(!cfg.notifications.enabled);
        assert_eq!(cfg.garden.sky_width_px, 812.5);
    }

    #[test]
    fn set_assigns_optional_seed() {
        let mut cfg = Config::default();
        cfg.set("garden.seed", "42").unwrap();
        assert_eq!(cfg.garden.seed, Some(42));
    }

    #[test]
    fn optional_seed_can_be_cleared_again() {
        for unset in ["null", "none", ""] {
            let mut cfg = Config::default();
            cfg.set("garden.seed", unset).unwrap();
            assert!(cfg.garden.seed.is_none());

            cfg.set("garden.seed", "42").unwrap();
            cfg.set("garden.seed", unset).unwrap();
            assert!(cfg.garden.seed.is_none(), "{unset:?} did not clear the seed");
            assert_eq!(cfg.get("garden.seed").as_deref(), Some("null"));
        }
    }

    #[test]
    fn required_keys_cannot_be_unset() {
        let mut cfg = Config::default();
        assert!(cfg.set("garden.columns", "null").is_err());
        assert!(cfg.set("notifications.sound", "none").is_err());
        assert_eq!(cfg.garden.columns, 4);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("garden.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("notifications.enabled", "not_a_bool").is_err());
        assert!(cfg.set("garden.columns", "many").is_err());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.garden.columns, 4);
        assert!(path.exists());
    }

    #[test]
    fn layout_uses_garden_section() {
        let mut cfg = Config::default();
        cfg.garden.columns = 5;
        cfg.garden.sky_width_px = 960.0;
        let layout = cfg.garden.layout();
        assert_eq!(layout.columns, 5);
        assert_eq!(layout.sky_grid().cols, 12);
    }
}
