//! Marking a habit done (or undone) for a day.

use chrono::NaiveDate;

use super::{current_streak, Habit};

/// Whether the habit has a completion recorded for `day`.
pub fn is_completed_on(habit: &Habit, day: NaiveDate) -> bool {
    habit.completions.contains(&day)
}

/// Flip today's completion and return the updated habit.
///
/// If today is already recorded it is removed; otherwise it is added. The
/// cached streak and last completion are recomputed either way, so toggling
/// twice yields the original completions and streak. The input is not
/// modified and nothing is persisted here.
pub fn toggle_completion(habit: &Habit, today: NaiveDate) -> Habit {
    let mut next = habit.clone();

    if is_completed_on(habit, today) {
        next.completions.retain(|&day| day != today);
        next.last_completed = next.completions.iter().max().copied();
    } else {
        next.completions.push(today);
        next.completions.sort_unstable();
        next.last_completed = Some(today);
    }
    next.streak = current_streak(&next.completions, today);

    next
}
