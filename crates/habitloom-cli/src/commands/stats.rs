use clap::Subcommand;
use habitloom_core::{date, habit_stats, stats::rolling_rates, Config, DashboardSummary};
use serde::Serialize;

use super::{open_store, resolve_id, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Stats for one habit
    Show {
        /// Habit ID (or unique prefix)
        id: String,
    },
    /// Today's dashboard summary
    Summary,
}

#[derive(Serialize)]
struct HabitReport<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(flatten)]
    stats: habitloom_core::HabitStats,
    rolling: Vec<habitloom_core::stats::RollingRate>,
}

pub fn run(action: StatsAction) -> CliResult {
    let store = open_store()?;
    let today = date::today();

    match action {
        StatsAction::Show { id } => {
            let id = resolve_id(&store, &id)?;
            let habit = store
                .state()
                .habit(&id)
                .ok_or_else(|| format!("Habit not found: {id}"))?;
            let windows = Config::load_or_default().habits.completion_windows;
            let report = HabitReport {
                id: &habit.id,
                title: &habit.title,
                stats: habit_stats(habit, today),
                rolling: rolling_rates(habit, &windows, today),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Summary => {
            let summary = DashboardSummary::compute(&store.state().habits, today);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
