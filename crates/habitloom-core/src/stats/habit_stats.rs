//! Per-habit statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::percentage;
use crate::date::add_days;
use crate::habit::{best_streak, is_completed_on, Habit};

/// Statistics for a single habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
    /// Number of days the habit was ever completed
    pub total_completions: usize,
    /// Cached current streak
    pub current_streak: u32,
    /// Longest run of consecutive days ever
    pub best_streak: u32,
    /// Rolling 7-day completion rate (0-100)
    pub completion_rate_7: u32,
    /// Rolling 30-day completion rate (0-100)
    pub completion_rate_30: u32,
    pub completed_today: bool,
}

/// Completion rate over one rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingRate {
    pub days: u32,
    pub percent: u32,
}

/// Rolling completion rate over the last `days` days, as a percentage.
///
/// Counts completions inside `[today - days, today]` and divides by `days`.
/// The window is inclusive at both ends, so the result is capped at 100.
pub fn completion_rate(habit: &Habit, days: u32, today: NaiveDate) -> u32 {
    if days == 0 {
        return 0;
    }
    let start = add_days(today, -i64::from(days));
    let in_window = habit
        .completions
        .iter()
        .filter(|&&day| day >= start && day <= today)
        .count();

    percentage(in_window, days as usize).min(100)
}

/// Completion rates for each requested window, in the given order.
pub fn rolling_rates(habit: &Habit, windows: &[u32], today: NaiveDate) -> Vec<RollingRate> {
    windows
        .iter()
        .map(|&days| RollingRate {
            days,
            percent: completion_rate(habit, days, today),
        })
        .collect()
}

/// Summarize a habit's history as of `today`.
pub fn habit_stats(habit: &Habit, today: NaiveDate) -> HabitStats {
    HabitStats {
        total_completions: habit.completions.len(),
        current_streak: habit.streak,
        best_streak: best_streak(&habit.completions),
        completion_rate_7: completion_rate(habit, 7, today),
        completion_rate_30: completion_rate(habit, 30, today),
        completed_today: is_completed_on(habit, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{Frequency, HabitDraft};
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn habit_done_on(offsets: impl IntoIterator<Item = i64>) -> Habit {
        let mut habit = Habit::from_draft(HabitDraft::new("Journal"), Utc::now()).unwrap();
        habit.completions = offsets.into_iter().map(|o| add_days(today(), -o)).collect();
        habit.refresh(today());
        habit
    }

    #[test]
    fn test_completion_rate_counts_inside_window() {
        // today, 3 days ago, 7 days ago (edge, inclusive), 8 days ago (outside)
        let habit = habit_done_on([0, 3, 7, 8]);
        assert_eq!(completion_rate(&habit, 7, today()), 43); // 3/7
        assert_eq!(completion_rate(&habit, 30, today()), 13); // 4/30
    }

    #[test]
    fn test_completion_rate_ignores_future_days() {
        let habit = habit_done_on([-1, 0]);
        assert_eq!(completion_rate(&habit, 7, today()), 14);
    }

    #[test]
    fn test_completion_rate_is_capped() {
        let habit = habit_done_on(0..=7);
        assert_eq!(completion_rate(&habit, 7, today()), 100);
    }

    #[test]
    fn test_zero_window() {
        let habit = habit_done_on([0]);
        assert_eq!(completion_rate(&habit, 0, today()), 0);
    }

    #[test]
    fn test_weekly_habit_rated_against_calendar_days() {
        let mut habit = habit_done_on([0, 7, 14, 21, 28]);
        habit.frequency = Frequency::Weekly;
        // every due Sunday done, but only 5 of 30 calendar days
        assert_eq!(completion_rate(&habit, 30, today()), 17);
    }

    #[test]
    fn test_habit_stats_summary() {
        let habit = habit_done_on([1, 2, 3, 10, 11, 12, 13, 14]);
        let stats = habit_stats(&habit, today());

        assert_eq!(stats.total_completions, 8);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.best_streak, 5);
        assert_eq!(stats.completion_rate_7, 43);
        assert_eq!(stats.completion_rate_30, 27);
        assert!(!stats.completed_today);
    }

    #[test]
    fn test_rolling_rates_follow_requested_windows() {
        let habit = habit_done_on([0, 1]);
        let rates = rolling_rates(&habit, &[1, 7], today());
        assert_eq!(
            rates,
            vec![
                RollingRate { days: 1, percent: 100 },
                RollingRate { days: 7, percent: 29 },
            ]
        );
    }
}
