//! Whole-state export and import.
//!
//! An export is a single JSON document `{ habits, user, badges, theme,
//! exportedAt }`. Import accepts the same shape with any subset of keys;
//! each key that is present overwrites its stored document and the rest are
//! left alone. Nothing is written unless the whole document parses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::LocalStorage;
use crate::badges::Badge;
use crate::error::StorageError;
use crate::habit::Habit;
use crate::store::{ThemeMode, User};

/// The export/import document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default)]
    pub habits: Option<Vec<Habit>>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub badges: Option<Vec<Badge>>,
    #[serde(default)]
    pub theme: Option<ThemeMode>,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}

/// Which keys an import wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub habits: bool,
    pub user: bool,
    pub badges: bool,
    pub theme: bool,
}

impl LocalStorage {
    /// Snapshot every stored key into an export document.
    pub fn export_document(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument {
            habits: Some(self.load_habits()),
            user: self.load_user(),
            badges: Some(self.load_badges()),
            theme: self.load_theme(),
            exported_at: Some(now),
        }
    }

    /// Export every stored key as pretty-printed JSON.
    pub fn export_data(&self, now: DateTime<Utc>) -> String {
        match serde_json::to_string_pretty(&self.export_document(now)) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to export data: {e}");
                "{}".to_string()
            }
        }
    }

    /// Import a document, reporting which keys were written.
    ///
    /// # Errors
    /// Returns [`StorageError::MalformedImport`] if the document does not
    /// parse; in that case no key is touched.
    pub fn import_document(&self, json: &str) -> Result<ImportSummary, StorageError> {
        let doc: ExportDocument =
            serde_json::from_str(json).map_err(|e| StorageError::MalformedImport(e.to_string()))?;

        let mut summary = ImportSummary::default();
        if let Some(habits) = &doc.habits {
            summary.habits = self.save_habits(habits);
        }
        if let Some(user) = &doc.user {
            summary.user = self.save_user(user);
        }
        if let Some(badges) = &doc.badges {
            summary.badges = self.save_badges(badges);
        }
        if let Some(theme) = doc.theme {
            summary.theme = self.save_theme(theme);
        }
        info!(?summary, "import finished");
        Ok(summary)
    }

    /// Import a document; `false` means it did not parse and nothing changed.
    pub fn import_data(&self, json: &str) -> bool {
        match self.import_document(json) {
            Ok(_) => true,
            Err(e) => {
                warn!("failed to import data: {e}");
                false
            }
        }
    }
}
