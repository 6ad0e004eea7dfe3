//! Application state and its reducer.
//!
//! All state transitions go through [`reduce`], a pure function from the
//! current [`AppState`] and an [`Action`] to the next state. [`Store`] wraps
//! the state together with [`LocalStorage`]: it applies actions one at a time,
//! persists whatever changed, and re-runs the badge rules after habit changes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::badges::{check_badges, default_badges, newly_unlocked, Badge};
use crate::error::{CoreError, Result, ValidationError};
use crate::habit::{toggle_completion, Habit};
use crate::storage::LocalStorage;

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("'{other}' is not one of light, dark, system"),
            }),
        }
    }
}

/// The person using the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub total_habits: usize,
    #[serde(default)]
    pub total_completions: usize,
}

impl User {
    pub fn new(name: &str, now: DateTime<Utc>) -> std::result::Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            created_at: now,
            total_habits: 0,
            total_completions: 0,
        })
    }
}

/// Everything the tracker knows.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub habits: Vec<Habit>,
    pub user: Option<User>,
    pub badges: Vec<Badge>,
    pub theme: ThemeMode,
    pub is_onboarding: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            habits: Vec::new(),
            user: None,
            badges: default_badges(),
            theme: ThemeMode::System,
            is_onboarding: true,
        }
    }
}

impl AppState {
    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetHabits(Vec<Habit>),
    AddHabit(Habit),
    /// Replace the habit with the same id.
    UpdateHabit(Habit),
    DeleteHabit(String),
    /// Ids in their new display order; `order` becomes `0..n` in that order.
    ReorderHabits(Vec<String>),
    ToggleCompletion { id: String, today: NaiveDate },
    SetUser(User),
    SetBadges(Vec<Badge>),
    SetTheme(ThemeMode),
    CompleteOnboarding(User),
    CheckBadges { now: DateTime<Utc> },
}

impl Action {
    /// Whether this action can change habit data and so warrants a badge check.
    fn touches_habits(&self) -> bool {
        matches!(
            self,
            Action::AddHabit(_) | Action::UpdateHabit(_) | Action::ToggleCompletion { .. }
        )
    }
}

/// Rewrite `order` as a contiguous 0-based sequence following `ids`.
///
/// Habits not named in `ids` keep their current order.
fn reorder(habits: Vec<Habit>, ids: &[String]) -> Vec<Habit> {
    habits
        .into_iter()
        .map(|habit| match ids.iter().position(|id| *id == habit.id) {
            Some(index) => Habit {
                order: index as i32,
                ..habit
            },
            None => habit,
        })
        .collect()
}

/// Pure state transition.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::SetHabits(habits) => AppState { habits, ..state },
        Action::AddHabit(habit) => {
            let mut habits = state.habits;
            habits.push(habit);
            AppState { habits, ..state }
        }
        Action::UpdateHabit(updated) => AppState {
            habits: state
                .habits
                .into_iter()
                .map(|h| if h.id == updated.id { updated.clone() } else { h })
                .collect(),
            ..state
        },
        Action::DeleteHabit(id) => AppState {
            habits: state.habits.into_iter().filter(|h| h.id != id).collect(),
            ..state
        },
        Action::ReorderHabits(ids) => AppState {
            habits: reorder(state.habits, &ids),
            ..state
        },
        Action::ToggleCompletion { id, today } => AppState {
            habits: state
                .habits
                .into_iter()
                .map(|h| if h.id == id { toggle_completion(&h, today) } else { h })
                .collect(),
            ..state
        },
        Action::SetUser(user) => AppState {
            user: Some(user),
            is_onboarding: false,
            ..state
        },
        Action::SetBadges(badges) => AppState { badges, ..state },
        Action::SetTheme(theme) => AppState { theme, ..state },
        Action::CompleteOnboarding(user) => AppState {
            user: Some(user),
            is_onboarding: false,
            ..state
        },
        Action::CheckBadges { now } => {
            let badges = check_badges(&state.habits, &state.badges, now);
            AppState { badges, ..state }
        }
    }
}

/// Application state bound to its persistent storage.
#[derive(Debug)]
pub struct Store {
    state: AppState,
    storage: LocalStorage,
}

impl Store {
    /// Load state from `storage`, refreshing cached streaks as of `today`.
    ///
    /// Missing or unreadable documents fall back to defaults, and an empty
    /// badge list falls back to the locked catalogue. `default_theme`
    /// applies until a theme has been stored.
    pub fn load(storage: LocalStorage, today: NaiveDate, default_theme: ThemeMode) -> Self {
        let mut habits = storage.load_habits();
        for habit in &mut habits {
            habit.refresh(today);
        }
        let user = storage.load_user();
        let badges = match storage.load_badges() {
            badges if badges.is_empty() => default_badges(),
            badges => badges,
        };
        let theme = storage.load_theme().unwrap_or(default_theme);

        let state = AppState {
            is_onboarding: user.is_none(),
            habits,
            user,
            badges,
            theme,
        };
        Self { state, storage }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Apply an action, persist what changed, and return newly unlocked badges.
    ///
    /// Habit additions, edits and toggles are followed by a badge check at
    /// `now`. Persistence is best-effort and never fails the dispatch.
    pub fn dispatch(&mut self, action: Action, now: DateTime<Utc>) -> Vec<Badge> {
        debug!(?action, "dispatch");
        let check = action.touches_habits();
        let before = self.state.clone();

        let mut next = reduce(std::mem::take(&mut self.state), action);
        if check {
            next = reduce(next, Action::CheckBadges { now });
        }
        self.state = next;

        self.persist_changes(&before);
        newly_unlocked(&before.badges, &self.state.badges)
    }

    fn persist_changes(&self, before: &AppState) {
        if self.state.habits != before.habits {
            self.storage.save_habits(&self.state.habits);
        }
        if self.state.user != before.user {
            if let Some(user) = &self.state.user {
                self.storage.save_user(user);
            }
        }
        if self.state.badges != before.badges {
            self.storage.save_badges(&self.state.badges);
        }
        if self.state.theme != before.theme {
            self.storage.save_theme(self.state.theme);
        }
    }

    /// Toggle today's completion for `id`.
    ///
    /// # Errors
    /// Returns [`CoreError::HabitNotFound`] for an unknown id.
    pub fn toggle(&mut self, id: &str, today: NaiveDate, now: DateTime<Utc>) -> Result<Vec<Badge>> {
        self.require(id)?;
        Ok(self.dispatch(
            Action::ToggleCompletion {
                id: id.to_string(),
                today,
            },
            now,
        ))
    }

    /// Delete the habit `id`. Badges already unlocked stay unlocked.
    ///
    /// # Errors
    /// Returns [`CoreError::HabitNotFound`] for an unknown id.
    pub fn delete(&mut self, id: &str, now: DateTime<Utc>) -> Result<Habit> {
        let habit = self.require(id)?.clone();
        self.dispatch(Action::DeleteHabit(id.to_string()), now);
        Ok(habit)
    }

    /// Look up a habit by exact id, or by unique id prefix.
    pub fn find(&self, id: &str) -> Option<&Habit> {
        if let Some(habit) = self.state.habit(id) {
            return Some(habit);
        }
        let mut matches = self.state.habits.iter().filter(|h| h.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(habit), None) if !id.is_empty() => Some(habit),
            _ => None,
        }
    }

    fn require(&self, id: &str) -> Result<&Habit> {
        self.state
            .habit(id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))
    }
}
