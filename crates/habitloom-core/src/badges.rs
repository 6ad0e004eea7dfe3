//! Achievement badges and the rules that unlock them.
//!
//! Badge ids are stable strings (e.g. `"streak-7"`) and are what ties a
//! persisted badge to its rule. Unlocking is one-way: once a badge is
//! unlocked it is never re-evaluated, so its `unlocked_at` is set exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::habit::Habit;

pub const FIRST_HABIT: &str = "first-habit";
pub const STREAK_3: &str = "streak-3";
pub const STREAK_7: &str = "streak-7";
pub const STREAK_30: &str = "streak-30";
pub const HABITS_5: &str = "habits-5";
pub const COMPLETIONS_100: &str = "completions-100";

/// An achievement badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Badge {
    fn locked(id: &str, name: &str, description: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// Unlock condition for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BadgeRule {
    HabitCount(usize),
    MaxStreak(u32),
    TotalCompletions(usize),
}

impl BadgeRule {
    fn for_id(id: &str) -> Option<Self> {
        match id {
            FIRST_HABIT => Some(BadgeRule::HabitCount(1)),
            HABITS_5 => Some(BadgeRule::HabitCount(5)),
            STREAK_3 => Some(BadgeRule::MaxStreak(3)),
            STREAK_7 => Some(BadgeRule::MaxStreak(7)),
            STREAK_30 => Some(BadgeRule::MaxStreak(30)),
            COMPLETIONS_100 => Some(BadgeRule::TotalCompletions(100)),
            _ => None,
        }
    }

    fn holds(&self, totals: &Totals) -> bool {
        match *self {
            BadgeRule::HabitCount(n) => totals.habits >= n,
            BadgeRule::MaxStreak(n) => totals.max_streak >= n,
            BadgeRule::TotalCompletions(n) => totals.completions >= n,
        }
    }
}

/// Aggregates the rules are evaluated against.
struct Totals {
    habits: usize,
    max_streak: u32,
    completions: usize,
}

impl Totals {
    fn of(habits: &[Habit]) -> Self {
        Self {
            habits: habits.len(),
            max_streak: habits.iter().map(|h| h.streak).max().unwrap_or(0),
            completions: habits.iter().map(|h| h.completions.len()).sum(),
        }
    }
}

/// The full badge catalogue, all locked.
pub fn default_badges() -> Vec<Badge> {
    vec![
        Badge::locked(FIRST_HABIT, "Getting Started", "Create your first habit", "🌱"),
        Badge::locked(STREAK_3, "Consistent", "Maintain a 3-day streak", "🔥"),
        Badge::locked(STREAK_7, "Week Warrior", "Maintain a 7-day streak", "⭐"),
        Badge::locked(STREAK_30, "Month Master", "Maintain a 30-day streak", "👑"),
        Badge::locked(HABITS_5, "Multi-tasker", "Create 5 different habits", "🎯"),
        Badge::locked(COMPLETIONS_100, "Century Club", "Complete 100 habits total", "💯"),
    ]
}

/// Evaluate unlock rules and return the updated badge list.
///
/// Locked badges whose rule now holds are unlocked with `unlocked_at = now`.
/// Unlocked badges and badges with unknown ids are returned unchanged.
pub fn check_badges(habits: &[Habit], badges: &[Badge], now: DateTime<Utc>) -> Vec<Badge> {
    let totals = Totals::of(habits);

    badges
        .iter()
        .map(|badge| {
            if badge.unlocked {
                return badge.clone();
            }
            match BadgeRule::for_id(&badge.id) {
                Some(rule) if rule.holds(&totals) => {
                    info!(badge = %badge.id, "badge unlocked");
                    Badge {
                        unlocked: true,
                        unlocked_at: Some(now),
                        ..badge.clone()
                    }
                }
                _ => badge.clone(),
            }
        })
        .collect()
}

/// Badges unlocked in `after` that were not unlocked in `before`, matched by id.
pub fn newly_unlocked(before: &[Badge], after: &[Badge]) -> Vec<Badge> {
    after
        .iter()
        .filter(|badge| badge.unlocked)
        .filter(|badge| {
            !before
                .iter()
                .any(|prev| prev.id == badge.id && prev.unlocked)
        })
        .cloned()
        .collect()
}
