//! Habits, their schedules and completion history.
//!
//! A [`Habit`] owns its completion day-keys. The cached `streak` and
//! `last_completed` fields are derived from those day-keys and are only ever
//! written by [`toggle_completion`] or [`Habit::refresh`].

mod streak;
mod toggle;

pub use streak::{best_streak, current_streak};
pub use toggle::{is_completed_on, toggle_completion};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date::{self, weekday_index};
use crate::error::ValidationError;

/// Emoji used when a new habit does not pick one.
pub const DEFAULT_EMOJI: &str = "📝";
/// Category used when a new habit does not pick one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Suggested categories offered when creating a habit.
pub const HABIT_CATEGORIES: [&str; 8] = [
    "Health & Fitness",
    "Learning",
    "Productivity",
    "Relationships",
    "Hobbies",
    "Mindfulness",
    "Finance",
    "Other",
];

/// How often a habit is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    /// Due on the listed weekdays, Sunday when none are listed.
    Weekly,
    /// Due only on the listed weekdays.
    Custom,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Custom => "custom",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "custom" => Ok(Frequency::Custom),
            other => Err(ValidationError::InvalidValue {
                field: "frequency".into(),
                message: format!("'{other}' is not one of daily, weekly, custom"),
            }),
        }
    }
}

/// A recurring habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub emoji: String,
    pub category: String,
    #[serde(default)]
    pub frequency: Frequency,
    /// Weekday indices, 0 = Sunday .. 6 = Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_days: Option<Vec<u8>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Cached current streak.
    #[serde(default)]
    pub streak: u32,
    /// Cached most recent completion.
    #[serde(default, with = "date::opt_day_key", skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<NaiveDate>,
    #[serde(default, with = "date::day_keys")]
    pub completions: Vec<NaiveDate>,
    #[serde(default)]
    pub order: i32,
}

/// Input for creating a habit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDraft {
    pub title: String,
    pub emoji: Option<String>,
    pub category: Option<String>,
    pub frequency: Frequency,
    pub custom_days: Option<Vec<u8>>,
    pub order: i32,
}

impl HabitDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Reject drafts the habit form would refuse.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.frequency, self.custom_days.as_deref())
    }
}

/// Field edits for an existing habit. Completion data is never part of a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub title: Option<String>,
    pub emoji: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<Frequency>,
    pub custom_days: Option<Vec<u8>>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.emoji.is_none()
            && self.category.is_none()
            && self.frequency.is_none()
            && self.custom_days.is_none()
    }
}

fn validate_fields(
    title: &str,
    frequency: Frequency,
    custom_days: Option<&[u8]>,
) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if let Some(&bad) = custom_days.and_then(|days| days.iter().find(|&&d| d > 6)) {
        return Err(ValidationError::InvalidWeekday(bad));
    }
    if frequency == Frequency::Custom && custom_days.map_or(true, |days| days.is_empty()) {
        return Err(ValidationError::NoCustomDays);
    }
    Ok(())
}

fn normalize_days(days: Option<Vec<u8>>) -> Option<Vec<u8>> {
    days.map(|mut d| {
        d.sort_unstable();
        d.dedup();
        d
    })
}

/// Generate a fresh opaque habit id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl Habit {
    /// Create a habit from a validated draft.
    ///
    /// The new habit starts with no completions and a zero streak.
    pub fn from_draft(draft: HabitDraft, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: generate_id(),
            title: draft.title.trim().to_string(),
            emoji: draft
                .emoji
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
            category: draft
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            frequency: draft.frequency,
            custom_days: normalize_days(draft.custom_days),
            created_at: now,
            streak: 0,
            last_completed: None,
            completions: Vec::new(),
            order: draft.order,
        })
    }

    /// Apply field edits, returning the edited habit.
    ///
    /// Completions, streak, last completion and order are left untouched.
    pub fn apply_patch(&self, patch: HabitPatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
        }
        if let Some(emoji) = patch.emoji {
            next.emoji = emoji;
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(frequency) = patch.frequency {
            next.frequency = frequency;
        }
        if patch.custom_days.is_some() {
            next.custom_days = normalize_days(patch.custom_days);
        }
        validate_fields(&next.title, next.frequency, next.custom_days.as_deref())?;
        Ok(next)
    }

    /// Whether this habit's schedule includes the weekday of `day`.
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        let weekday = weekday_index(day);
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => self
                .custom_days
                .as_ref()
                .map_or(weekday == 0, |days| days.contains(&weekday)),
            Frequency::Custom => self
                .custom_days
                .as_ref()
                .is_some_and(|days| days.contains(&weekday)),
        }
    }

    /// Recompute cached fields from the completion history as of `today`.
    ///
    /// Also restores the one-entry-per-day invariant on data that came from
    /// outside (imports, hand-edited files).
    pub fn refresh(&mut self, today: NaiveDate) {
        self.completions.sort_unstable();
        self.completions.dedup();
        self.streak = current_streak(&self.completions, today);
        self.last_completed = self.completions.last().copied();
    }

    /// Human-readable schedule, e.g. `Daily` or `Mon, Wed, Fri`.
    ///
    /// Custom days are listed in week order, with Sunday last when
    /// `monday_first` is set.
    pub fn schedule_label(&self, monday_first: bool) -> String {
        match (self.frequency, &self.custom_days) {
            (Frequency::Daily, _) => "Daily".to_string(),
            (Frequency::Weekly, _) => "Weekly".to_string(),
            (Frequency::Custom, Some(days)) if !days.is_empty() => {
                let mut days = days.clone();
                days.sort_by_key(|&d| date::week_position(d, monday_first));
                days.dedup();
                days.iter()
                    .map(|&d| date::weekday_label(d))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            (Frequency::Custom, _) => "Custom".to_string(),
        }
    }
}

/// Habits due on `today`, stable-sorted by display order.
pub fn due_today(habits: &[Habit], today: NaiveDate) -> Vec<&Habit> {
    let mut due: Vec<&Habit> = habits.iter().filter(|h| h.is_due_on(today)).collect();
    due.sort_by_key(|h| h.order);
    due
}

/// A handful of starter habits for first-run onboarding.
pub fn sample_habits(now: DateTime<Utc>) -> Vec<Habit> {
    let samples = [
        ("Drink 8 glasses of water", "💧", "Health & Fitness"),
        ("Read for 30 minutes", "📚", "Learning"),
        ("Exercise", "💪", "Health & Fitness"),
        ("Meditate", "🧘", "Mindfulness"),
        ("Write in journal", "📝", "Productivity"),
    ];

    samples
        .iter()
        .enumerate()
        .filter_map(|(index, (title, emoji, category))| {
            let draft = HabitDraft {
                title: (*title).to_string(),
                emoji: Some((*emoji).to_string()),
                category: Some((*category).to_string()),
                order: index as i32,
                ..HabitDraft::default()
            };
            Habit::from_draft(draft, now).ok()
        })
        .collect()
}
