//! Habit management commands for CLI.

use chrono::Utc;
use clap::builder::PossibleValuesParser;
use clap::Subcommand;
use habitloom_core::habit::{due_today, HABIT_CATEGORIES};
use habitloom_core::{
    date, is_completed_on, Action, Config, Frequency, Habit, HabitDraft, HabitPatch,
};

use super::{open_store, print_unlocked, resolve_id, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit title
        title: String,
        /// Emoji shown next to the title
        #[arg(long)]
        emoji: Option<String>,
        /// Category (e.g. "Health & Fitness")
        #[arg(long, value_parser = PossibleValuesParser::new(HABIT_CATEGORIES))]
        category: Option<String>,
        /// daily, weekly or custom (default: daily)
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
        /// Comma-separated weekdays, 0 = Sunday .. 6 = Saturday
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
    },
    /// List all habits
    List {
        #[arg(long)]
        json: bool,
    },
    /// List habits due today, in display order
    Today {
        #[arg(long)]
        json: bool,
    },
    /// Edit a habit's details
    Edit {
        /// Habit ID (or unique prefix)
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(HABIT_CATEGORIES))]
        category: Option<String>,
        #[arg(long)]
        frequency: Option<Frequency>,
        /// Comma-separated weekdays, 0 = Sunday .. 6 = Saturday
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<u8>>,
    },
    /// Delete a habit
    Delete {
        /// Habit ID (or unique prefix)
        id: String,
    },
    /// Mark a habit done for today, or undo it
    Toggle {
        /// Habit ID (or unique prefix)
        id: String,
    },
    /// Set the display order
    Reorder {
        /// Habit IDs (or unique prefixes) in their new order
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn print_habit_line(habit: &Habit, done: bool, monday_first: bool) {
    let mark = if done { "x" } else { " " };
    println!(
        "[{mark}] {:<8} {} {}  ({}, {}, streak {})",
        habit.id.chars().take(8).collect::<String>(),
        habit.emoji,
        habit.title,
        habit.category,
        habit.schedule_label(monday_first),
        habit.streak,
    );
}

pub fn run(action: HabitAction) -> CliResult {
    let mut store = open_store()?;
    let today = date::today();
    let now = Utc::now();
    let config = Config::load_or_default();
    let monday_first = config.general.week_starts_on_monday;

    match action {
        HabitAction::Add {
            title,
            emoji,
            category,
            frequency,
            days,
        } => {
            let draft = HabitDraft {
                title,
                emoji: emoji.or(Some(config.habits.default_emoji)),
                category: category.or(Some(config.habits.default_category)),
                frequency,
                custom_days: if days.is_empty() { None } else { Some(days) },
                order: store.state().habits.len() as i32,
            };
            let habit = Habit::from_draft(draft, now)?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
            let unlocked = store.dispatch(Action::AddHabit(habit), now);
            print_unlocked(&unlocked);
        }
        HabitAction::List { json } => {
            let mut habits: Vec<&Habit> = store.state().habits.iter().collect();
            habits.sort_by_key(|h| h.order);
            if json {
                println!("{}", serde_json::to_string_pretty(&habits)?);
            } else if habits.is_empty() {
                println!("No habits yet. Add one with `habitloom habit add <title>`.");
            } else {
                for habit in habits {
                    print_habit_line(habit, is_completed_on(habit, today), monday_first);
                }
            }
        }
        HabitAction::Today { json } => {
            let due = due_today(&store.state().habits, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&due)?);
            } else if due.is_empty() {
                println!("Nothing due today.");
            } else {
                for habit in due {
                    print_habit_line(habit, is_completed_on(habit, today), monday_first);
                }
            }
        }
        HabitAction::Edit {
            id,
            title,
            emoji,
            category,
            frequency,
            days,
        } => {
            let id = resolve_id(&store, &id)?;
            let patch = HabitPatch {
                title,
                emoji,
                category,
                frequency,
                custom_days: days,
            };
            if patch.is_empty() {
                return Err("nothing to change".into());
            }
            let habit = store
                .state()
                .habit(&id)
                .ok_or_else(|| format!("Habit not found: {id}"))?
                .apply_patch(patch)?;
            println!("Habit updated:");
            println!("{}", serde_json::to_string_pretty(&habit)?);
            let unlocked = store.dispatch(Action::UpdateHabit(habit), now);
            print_unlocked(&unlocked);
        }
        HabitAction::Delete { id } => {
            let id = resolve_id(&store, &id)?;
            let habit = store.delete(&id, now)?;
            println!("Habit deleted: {} {}", habit.emoji, habit.title);
        }
        HabitAction::Toggle { id } => {
            let id = resolve_id(&store, &id)?;
            let unlocked = store.toggle(&id, today, now)?;
            if let Some(habit) = store.state().habit(&id) {
                let status = if is_completed_on(habit, today) {
                    "done for today"
                } else {
                    "marked not done"
                };
                println!(
                    "{} {} {status} (streak {})",
                    habit.emoji, habit.title, habit.streak
                );
            }
            print_unlocked(&unlocked);
        }
        HabitAction::Reorder { ids } => {
            let ids = ids
                .iter()
                .map(|id| resolve_id(&store, id))
                .collect::<Result<Vec<_>, _>>()?;
            store.dispatch(Action::ReorderHabits(ids), now);
            for habit in due_today(&store.state().habits, today) {
                print_habit_line(habit, is_completed_on(habit, today), monday_first);
            }
        }
    }
    Ok(())
}
