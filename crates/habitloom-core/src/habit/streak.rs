//! Consecutive-day streak calculation.
//!
//! The current streak is anchored at today or, as a one-day grace period, at
//! yesterday: a habit done yesterday but not yet today still shows its streak
//! until the day is over.

use chrono::NaiveDate;

use crate::date::{add_days, days_between};

/// Length of the run of consecutive days ending today or yesterday.
///
/// Completions may be unsorted and may repeat a day; repeats are counted once.
///
/// Days after `today` are skipped instead of being taken as the most recent
/// completion, so a future-dated entry never resets the run to 0.
pub fn current_streak(completions: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = completions
        .iter()
        .copied()
        .filter(|&day| day <= today)
        .collect();
    if days.is_empty() {
        return 0;
    }
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let yesterday = add_days(today, -1);
    let mut cursor = if days[0] == today {
        yesterday
    } else if days[0] == yesterday {
        add_days(today, -2)
    } else {
        return 0;
    };

    let mut streak = 1;
    for &day in &days[1..] {
        if day != cursor {
            break;
        }
        streak += 1;
        cursor = add_days(cursor, -1);
    }
    streak
}

/// Longest run of consecutive days anywhere in the history.
pub fn best_streak(completions: &[NaiveDate]) -> u32 {
    if completions.is_empty() {
        return 0;
    }
    let mut days = completions.to_vec();
    days.sort_unstable();

    let mut best = 1;
    let mut run = 1;
    for pair in days.windows(2) {
        match days_between(pair[0], pair[1]) {
            0 => {}
            1 => {
                run += 1;
                best = best.max(run);
            }
            _ => run = 1,
        }
    }
    best
}
