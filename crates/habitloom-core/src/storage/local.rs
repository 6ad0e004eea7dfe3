//! File-backed key-value store for habits, user, badges and theme.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::data_dir;
use crate::badges::Badge;
use crate::error::StorageError;
use crate::habit::Habit;
use crate::store::{ThemeMode, User};

pub const HABITS_KEY: &str = "habit-tracker-habits";
pub const USER_KEY: &str = "habit-tracker-user";
pub const BADGES_KEY: &str = "habit-tracker-badges";
pub const THEME_KEY: &str = "habit-tracker-theme";

const ALL_KEYS: [&str; 4] = [HABITS_KEY, USER_KEY, BADGES_KEY, THEME_KEY];

/// One JSON document per key, stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Open storage in the default data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Open storage rooted at `dir`. The directory is created on first write.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a document. A missing file is `Ok(None)`.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let content = match std::fs::read_to_string(self.path(key)) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let write_failed = |message: String| StorageError::WriteFailed {
            key: key.to_string(),
            message,
        };
        let content = serde_json::to_string_pretty(value).map_err(|e| write_failed(e.to_string()))?;
        std::fs::create_dir_all(&self.dir).map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(self.path(key), content).map_err(|e| write_failed(e.to_string()))?;
        debug!(key, "saved");
        Ok(())
    }

    /// Read a document, degrading to `None` on any failure.
    fn load_or_warn<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    /// Write a document. Returns whether the write succeeded; failures are logged.
    fn save_or_warn<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.write(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    pub fn load_habits(&self) -> Vec<Habit> {
        self.load_or_warn(HABITS_KEY).unwrap_or_default()
    }

    pub fn save_habits(&self, habits: &[Habit]) -> bool {
        self.save_or_warn(HABITS_KEY, habits)
    }

    pub fn load_user(&self) -> Option<User> {
        self.load_or_warn(USER_KEY)
    }

    pub fn save_user(&self, user: &User) -> bool {
        self.save_or_warn(USER_KEY, user)
    }

    pub fn load_badges(&self) -> Vec<Badge> {
        self.load_or_warn(BADGES_KEY).unwrap_or_default()
    }

    pub fn save_badges(&self, badges: &[Badge]) -> bool {
        self.save_or_warn(BADGES_KEY, badges)
    }

    pub fn load_theme(&self) -> Option<ThemeMode> {
        self.load_or_warn(THEME_KEY)
    }

    pub fn save_theme(&self, theme: ThemeMode) -> bool {
        self.save_or_warn(THEME_KEY, &theme)
    }

    /// Remove every stored key. Missing files are not an error.
    pub fn clear_all(&self) {
        for key in ALL_KEYS {
            match std::fs::remove_file(self.path(key)) {
                Ok(()) => debug!(key, "removed"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(key, "failed to clear: {e}"),
            }
        }
    }
}
