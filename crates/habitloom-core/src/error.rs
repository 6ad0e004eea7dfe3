//! Core error types for habitloom-core.
//!
//! The streak, statistics and badge engines are total functions and never
//! fail. Errors only arise at the edges: validating user input, reading and
//! writing the data directory, and loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for store operations.
///
/// Storage and configuration failures have their own types; the store
/// degrades on those instead of failing.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A habit id did not match any stored habit
    #[error("Habit not found: {0}")]
    HabitNotFound(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be resolved or created
    #[error("Data directory unavailable at {path}: {source}")]
    DataDirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a stored document failed
    #[error("Failed to read {key}: {message}")]
    ReadFailed { key: String, message: String },

    /// Writing a stored document failed
    #[error("Failed to write {key}: {message}")]
    WriteFailed { key: String, message: String },

    /// An import document could not be parsed
    #[error("Import document is malformed: {0}")]
    MalformedImport(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit title is empty after trimming
    #[error("Title is required")]
    EmptyTitle,

    /// Custom frequency with no weekdays selected
    #[error("Please select at least one day")]
    NoCustomDays,

    /// Weekday index outside 0..=6
    #[error("Invalid weekday index {0}: expected 0 (Sunday) to 6 (Saturday)")]
    InvalidWeekday(u8),

    /// User name is empty after trimming
    #[error("Name is required")]
    EmptyName,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts_into_core_error() {
        let err: CoreError = ValidationError::EmptyTitle.into();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyTitle)));
        assert_eq!(err.to_string(), "Validation error: Title is required");
    }

    #[test]
    fn test_habit_not_found_names_id() {
        let err = CoreError::HabitNotFound("abc123".into());
        assert_eq!(err.to_string(), "Habit not found: abc123");
    }

    #[test]
    fn test_config_error_message_names_key() {
        let err = ConfigError::UnknownKey("log.colour".into());
        assert_eq!(err.to_string(), "Unknown configuration key: log.colour");
    }
}
