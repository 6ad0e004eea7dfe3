pub mod badges;
pub mod config;
pub mod data;
pub mod habit;
pub mod init;
pub mod stats;
pub mod theme;

use habitloom_core::{date, Badge, Config, LocalStorage, Store};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the store in the default data directory as of today.
///
/// The configured default theme applies until the user picks one.
pub fn open_store() -> Result<Store, Box<dyn std::error::Error>> {
    let storage = LocalStorage::open()?;
    let default_theme = Config::load_or_default().general.default_theme;
    Ok(Store::load(storage, date::today(), default_theme))
}

/// Resolve a full habit id from an exact id or a unique prefix.
pub fn resolve_id(store: &Store, id: &str) -> Result<String, Box<dyn std::error::Error>> {
    store
        .find(id)
        .map(|habit| habit.id.clone())
        .ok_or_else(|| format!("Habit not found: {id}").into())
}

/// Announce badges that were just unlocked.
pub fn print_unlocked(badges: &[Badge]) {
    for badge in badges {
        println!("Badge unlocked: {} {} - {}", badge.icon, badge.name, badge.description);
    }
}
