use chrono::Utc;
use clap::Subcommand;
use habitloom_core::{Action, ThemeMode};

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Show the current theme
    Get,
    /// Set the theme (light, dark or system)
    Set { mode: ThemeMode },
}

pub fn run(action: ThemeAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        ThemeAction::Get => println!("{}", store.state().theme.as_str()),
        ThemeAction::Set { mode } => {
            store.dispatch(Action::SetTheme(mode), Utc::now());
            println!("theme set to {}", mode.as_str());
        }
    }
    Ok(())
}
