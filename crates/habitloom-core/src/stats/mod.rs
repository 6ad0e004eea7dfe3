//! Statistics module for Habitloom
//!
//! This module derives read-only statistics from habit completion histories:
//! per-habit rolling completion rates and streaks, and the dashboard counters
//! shown for the habits due today.
//!
//! Rates are measured against calendar days, not against the days a habit was
//! scheduled, so weekly and custom habits rate lower than daily ones.

mod dashboard;
mod habit_stats;

pub use dashboard::DashboardSummary;
pub use habit_stats::{completion_rate, habit_stats, rolling_rates, HabitStats, RollingRate};

/// Integer percentage of `part / whole`, rounded to nearest, 0 when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
