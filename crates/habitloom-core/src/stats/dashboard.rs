//! Dashboard counters across all habits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::percentage;
use crate::habit::{due_today, is_completed_on, Habit};

/// Summary shown above today's habit list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Habits whose schedule includes today
    pub due_today: usize,
    /// Due habits already completed today
    pub completed_today: usize,
    /// Sum of cached streaks across all habits
    pub total_streak: u32,
    /// Completions across all habits
    pub total_completions: usize,
    /// `completed_today / due_today` as a percentage
    pub completion_rate: u32,
}

impl DashboardSummary {
    pub fn compute(habits: &[Habit], today: NaiveDate) -> Self {
        let due = due_today(habits, today);
        let completed = due.iter().filter(|h| is_completed_on(h, today)).count();

        Self {
            due_today: due.len(),
            completed_today: completed,
            total_streak: habits.iter().map(|h| h.streak).sum(),
            total_completions: habits.iter().map(|h| h.completions.len()).sum(),
            completion_rate: percentage(completed, due.len()),
        }
    }
}
