//! Export, import and reset of locally stored data.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Export everything as one JSON document
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Import a JSON document; only the keys it contains are replaced
    Import {
        /// Path to the document
        file: PathBuf,
    },
    /// Delete all stored habits, profile, badges and theme
    Clear {
        /// Required to confirm
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CliResult {
    let store = open_store()?;
    let storage = store.storage();

    match action {
        DataAction::Export { output } => {
            let mut document = storage.export_document(Utc::now());
            document.theme.get_or_insert(store.state().theme);
            let json = serde_json::to_string_pretty(&document)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        DataAction::Import { file } => {
            let json = std::fs::read_to_string(&file)?;
            let summary = storage.import_document(&json)?;
            let written: Vec<&str> = [
                ("habits", summary.habits),
                ("user", summary.user),
                ("badges", summary.badges),
                ("theme", summary.theme),
            ]
            .iter()
            .filter(|(_, done)| *done)
            .map(|(key, _)| *key)
            .collect();
            if written.is_empty() {
                println!("nothing imported");
            } else {
                println!("imported: {}", written.join(", "));
            }
        }
        DataAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear data without --yes".into());
            }
            storage.clear_all();
            println!("all data cleared");
        }
    }
    Ok(())
}
