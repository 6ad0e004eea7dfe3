//! # Habitloom Core Library
//!
//! This library provides the core business logic for the Habitloom habit tracker.
//! It follows the same CLI-first philosophy as the rest of the workspace: every
//! operation is available through the standalone CLI binary, which is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak Engine**: pure functions over sparse completion day-keys that
//!   compute the current streak (with a one-day grace period) and the best streak
//! - **Statistics**: rolling completion rates and dashboard counters
//! - **Badges**: a monotonic rule engine that unlocks achievements
//! - **Store**: an explicit reducer-style state container with sequential dispatch
//! - **Storage**: JSON documents per key plus TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Habit`]: A recurring habit and its completion history
//! - [`toggle_completion`]: The only mutator of a habit's completions
//! - [`check_badges`]: Badge unlock rule engine
//! - [`Store`]: Application state with `dispatch`
//! - [`LocalStorage`]: Key-value persistence with export/import
//! - [`Config`]: Application configuration management

pub mod badges;
pub mod date;
pub mod error;
pub mod habit;
pub mod stats;
pub mod storage;
pub mod store;

pub use badges::{check_badges, default_badges, newly_unlocked, Badge};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use habit::{
    best_streak, current_streak, is_completed_on, toggle_completion, Frequency, Habit,
    HabitDraft, HabitPatch,
};
pub use stats::{completion_rate, habit_stats, DashboardSummary, HabitStats};
pub use storage::{Config, ExportDocument, LocalStorage};
pub use store::{reduce, Action, AppState, Store, ThemeMode, User};
