//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default theme for a fresh data directory
//! - Defaults applied when creating habits
//! - Rolling windows reported by `stats`
//! - Log level
//!
//! Configuration is stored at `~/.config/habitloom/config.toml`.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::data_dir;
use crate::error::ConfigError;
use crate::habit::{DEFAULT_CATEGORY, DEFAULT_EMOJI};
use crate::store::ThemeMode;

/// General configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Theme used until the user picks one.
    #[serde(default)]
    pub default_theme: ThemeMode,
    /// List custom weekdays Monday-first in habit listings.
    #[serde(default)]
    pub week_starts_on_monday: bool,
}

/// Defaults for new habits and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitsConfig {
    #[serde(default = "default_emoji")]
    pub default_emoji: String,
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Rolling windows, in days, shown by `stats show`.
    #[serde(default = "default_completion_windows")]
    pub completion_windows: Vec<u32>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitloom/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub habits: HabitsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// Default functions
fn default_emoji() -> String {
    DEFAULT_EMOJI.into()
}
fn default_category() -> String {
    DEFAULT_CATEGORY.into()
}
fn default_completion_windows() -> Vec<u32> {
    vec![7, 30]
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_theme: ThemeMode::System,
            week_starts_on_monday: false,
        }
    }
}

impl Default for HabitsConfig {
    fn default() -> Self {
        Self {
            default_emoji: default_emoji(),
            default_category: default_category(),
            completion_windows: default_completion_windows(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
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

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Array(_) => {
                    // Accept either JSON (`[7, 30]`) or a comma list (`7,30`).
                    match serde_json::from_str::<serde_json::Value>(value) {
                        Ok(parsed @ serde_json::Value::Array(_)) => parsed,
                        _ => value
                            .split(',')
                            .map(|item| item.trim().parse::<u64>().map(serde_json::Value::from))
                            .collect::<Result<Vec<_>, _>>()
                            .map(serde_json::Value::Array)
                            .map_err(|e| invalid(e.to_string()))?,
                    }
                }
                serde_json::Value::Object(_) => {
                    serde_json::from_str::<serde_json::Value>(value)
                        .map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if no file exists.
    ///
    /// Only a missing file is replaced; any other read failure is an error
    /// so an unreadable file is never overwritten.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| load_failed(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Load from disk, returning defaults on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::path()
            .map(|path| Self::load_or_default_from(&path))
            .unwrap_or_else(|e| {
                warn!(error = %e, "using default configuration");
                Self::default()
            })
    }

    /// Load from `path`, returning defaults on error. The file is left as is.
    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
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

    /// Set a config value by key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type (including unknown theme names).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.general.default_theme, ThemeMode::System);
        assert_eq!(cfg.habits.completion_windows, vec![7, 30]);
        assert_eq!(cfg.habits.default_emoji, DEFAULT_EMOJI);
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn test_get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("general.default_theme").as_deref(), Some("system"));
        assert_eq!(cfg.get("general.week_starts_on_monday").as_deref(), Some("false"));
        assert_eq!(cfg.get("habits.completion_windows").as_deref(), Some("[7,30]"));
        assert_eq!(cfg.get("general.nope"), None);
        assert_eq!(cfg.get(""), None);
    }

    #[test]
    fn test_set_typed_values() {
        let mut cfg = Config::default();
        cfg.set("general.default_theme", "dark").unwrap();
        cfg.set("general.week_starts_on_monday", "true").unwrap();
        cfg.set("habits.completion_windows", "7,14,90").unwrap();
        cfg.set("log.level", "debug").unwrap();

        assert_eq!(cfg.general.default_theme, ThemeMode::Dark);
        assert!(cfg.general.week_starts_on_monday);
        assert_eq!(cfg.habits.completion_windows, vec![7, 14, 90]);
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut cfg = Config::default();
        assert!(matches!(cfg.set("general.colour", "red"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            cfg.set("general.week_starts_on_monday", "often"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("general.default_theme", "sepia"),
            Err(ConfigError::InvalidValue { .. })
        ));
        // failed sets leave the config unchanged
        assert_eq!(cfg.general.default_theme, ThemeMode::System);
    }

    #[test]
    fn test_load_writes_defaults_then_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.log.level, "warn");

        let mut cfg = cfg;
        cfg.set("habits.default_category", "Learning").unwrap();
        cfg.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.habits.default_category, "Learning");
    }

    #[test]
    fn test_corrupt_file_degrades_to_defaults_without_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[habits\nbroken").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
        let cfg = Config::load_or_default_from(&path);
        assert_eq!(cfg.habits.default_category, DEFAULT_CATEGORY);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[habits\nbroken");
    }

    #[test]
    fn test_unreadable_file_is_not_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, 0xfe, 0x00]);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[log]\nlevel = \"info\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.habits.completion_windows, vec![7, 30]);
    }
}
