//! Core error types for pomodoro-garden-core.
//!
//! Nothing in this library is fatal to the process. Storage and notification
//! failures are logged and swallowed by the callers that use these types;
//! rejected input surfaces as [`ValidationError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomodoro-garden-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read or write against the store failed
    #[error("Query failed for key '{key}': {message}")]
    QueryFailed { key: String, message: String },

    /// The store refused the operation (quota, read-only, disabled)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Rejected-input errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Unknown reward type: {0}")]
    UnknownRewardKind(String),

    #[error("Language {0} not supported")]
    UnsupportedLocale(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("No garden item with id {0}")]
    UnknownItem(String),

    /// Only trees carry a name
    #[error("Garden item {0} is not a tree")]
    NotATree(String),
}

/// Side-effect failures (sound, OS notification). Always ignored by the core.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Could not play alarm: {0}")]
    Alarm(String),

    #[error("Could not show notification: {0}")]
    Notification(String),

    #[error("Notifications not permitted")]
    NotPermitted,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                StorageError::Unavailable(err.to_string())
            }
            _ => StorageError::QueryFailed {
                key: String::new(),
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
