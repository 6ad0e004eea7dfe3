//! First-run onboarding.

use chrono::Utc;
use habitloom_core::habit::sample_habits;
use habitloom_core::{Action, User};

use super::{open_store, print_unlocked, CliResult};

pub fn run(name: &str, samples: bool) -> CliResult {
    let mut store = open_store()?;
    let now = Utc::now();

    if let Some(existing) = &store.state().user {
        println!("Already set up for {}.", existing.name);
        return Ok(());
    }

    let user = User::new(name, now)?;
    store.dispatch(Action::CompleteOnboarding(user.clone()), now);
    println!("Welcome, {}!", user.name);

    if samples && store.state().habits.is_empty() {
        let mut unlocked = Vec::new();
        for habit in sample_habits(now) {
            println!("  added {} {}", habit.emoji, habit.title);
            unlocked.extend(store.dispatch(Action::AddHabit(habit), now));
        }
        print_unlocked(&unlocked);
    }
    Ok(())
}
