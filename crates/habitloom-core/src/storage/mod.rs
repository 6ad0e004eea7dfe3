//! Local persistence.
//!
//! State is kept as one JSON document per key inside the data directory,
//! mirroring a browser-style key-value store. Reads and writes are
//! best-effort: a failure is logged and the caller carries on with an
//! empty or default value.

mod config;
mod local;
mod transfer;

pub use config::{Config, GeneralConfig, HabitsConfig, LogConfig};
pub use local::{LocalStorage, BADGES_KEY, HABITS_KEY, THEME_KEY, USER_KEY};
pub use transfer::{ExportDocument, ImportSummary};

use std::path::PathBuf;

use crate::error::StorageError;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "HABITLOOM_DATA_DIR";

/// Returns the data directory, creating it if needed.
///
/// Resolution order: `$HABITLOOM_DATA_DIR`, then `~/.config/habitloom-dev/`
/// when `HABITLOOM_ENV=dev`, otherwise `~/.config/habitloom/`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITLOOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitloom-dev")
            } else {
                base_dir.join("habitloom")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDirUnavailable {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
