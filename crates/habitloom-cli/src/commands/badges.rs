use chrono::Utc;
use clap::Subcommand;
use habitloom_core::Action;

use super::{open_store, print_unlocked, CliResult};

#[derive(Subcommand)]
pub enum BadgesAction {
    /// List all badges
    List {
        #[arg(long)]
        json: bool,
    },
    /// Re-evaluate badge rules now
    Check,
}

pub fn run(action: BadgesAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        BadgesAction::List { json } => {
            let badges = &store.state().badges;
            if json {
                println!("{}", serde_json::to_string_pretty(badges)?);
            } else {
                for badge in badges {
                    match badge.unlocked_at {
                        Some(at) if badge.unlocked => println!(
                            "{} {:<16} unlocked {}",
                            badge.icon,
                            badge.name,
                            at.format("%Y-%m-%d")
                        ),
                        _ if badge.unlocked => {
                            println!("{} {:<16} unlocked", badge.icon, badge.name)
                        }
                        _ => println!("   {:<16} {}", badge.name, badge.description),
                    }
                }
            }
        }
        BadgesAction::Check => {
            let now = Utc::now();
            let unlocked = store.dispatch(Action::CheckBadges { now }, now);
            if unlocked.is_empty() {
                println!("No new badges.");
            }
            print_unlocked(&unlocked);
        }
    }
    Ok(())
}
