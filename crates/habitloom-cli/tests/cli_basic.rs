//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

mod common;

use common::{assert_contains, parse_json, run_cli_failure, run_cli_success};
use tempfile::TempDir;

fn habit_ids(dir: &std::path::Path) -> Vec<String> {
    let out = run_cli_success(dir, &["habit", "list", "--json"]);
    let habits: Vec<serde_json::Value> = parse_json(&out);
    habits
        .iter()
        .map(|h| h["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_init_with_samples() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["init", "Robin", "--samples"]);
    assert_contains(&out, "Welcome, Robin!");
    assert_contains(&out, "Getting Started");
    assert_contains(&out, "Multi-tasker");
    assert_eq!(habit_ids(dir.path()).len(), 5);

    let again = run_cli_success(dir.path(), &["init", "Someone Else"]);
    assert_contains(&again, "Already set up for Robin");
}

#[test]
fn test_init_requires_name() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["init", "   "]);
    assert_contains(&stderr, "Name is required");
}

#[test]
fn test_add_and_toggle_habit() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["habit", "add", "Read", "--emoji", "📚"]);
    let id = habit_ids(dir.path()).remove(0);

    let out = run_cli_success(dir.path(), &["habit", "toggle", &id[..6]]);
    assert_contains(&out, "done for today (streak 1)");

    let stats: serde_json::Value =
        parse_json(&run_cli_success(dir.path(), &["stats", "show", &id]));
    assert_eq!(stats["total_completions"], 1);
    assert_eq!(stats["completed_today"], true);
    assert_eq!(stats["rolling"].as_array().unwrap().len(), 2);

    let out = run_cli_success(dir.path(), &["habit", "toggle", &id]);
    assert_contains(&out, "marked not done (streak 0)");
}

#[test]
fn test_custom_habit_requires_days() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) =
        run_cli_failure(dir.path(), &["habit", "add", "Gym", "--frequency", "custom"]);
    assert_contains(&stderr, "Please select at least one day");

    run_cli_success(
        dir.path(),
        &["habit", "add", "Gym", "--frequency", "custom", "--days", "1,3,5"],
    );
    let out = run_cli_success(dir.path(), &["habit", "list"]);
    assert_contains(&out, "Mon, Wed, Fri");
}

#[test]
fn test_reorder_and_delete() {
    let dir = TempDir::new().unwrap();
    for title in ["A", "B", "C"] {
        run_cli_success(dir.path(), &["habit", "add", title]);
    }
    let ids = habit_ids(dir.path());
    run_cli_success(dir.path(), &["habit", "reorder", &ids[2], &ids[0], &ids[1]]);

    let out = run_cli_success(dir.path(), &["habit", "list", "--json"]);
    let habits: Vec<serde_json::Value> = parse_json(&out);
    let titles: Vec<&str> = habits.iter().map(|h| h["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["C", "A", "B"]);

    run_cli_success(dir.path(), &["habit", "delete", &ids[1]]);
    assert_eq!(habit_ids(dir.path()).len(), 2);
    run_cli_failure(dir.path(), &["habit", "delete", &ids[1]]);

    // badges earned earlier survive the delete
    let badges: Vec<serde_json::Value> =
        parse_json(&run_cli_success(dir.path(), &["badges", "list", "--json"]));
    assert!(badges.iter().any(|b| b["id"] == "first-habit" && b["unlocked"] == true));
}

#[test]
fn test_theme_only_import() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["habit", "add", "Walk"]);

    let doc = dir.path().join("theme.json");
    std::fs::write(&doc, r#"{ "theme": "dark" }"#).unwrap();
    let out = run_cli_success(dir.path(), &["data", "import", doc.to_str().unwrap()]);
    assert_contains(&out, "imported: theme");

    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "dark");
    assert_eq!(habit_ids(dir.path()).len(), 1);

    std::fs::write(&doc, "{ broken").unwrap();
    run_cli_failure(dir.path(), &["data", "import", doc.to_str().unwrap()]);
    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "dark");
}

#[test]
fn test_export_and_clear() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["init", "Kai"]);
    run_cli_success(dir.path(), &["theme", "set", "light"]);

    let export: serde_json::Value = parse_json(&run_cli_success(dir.path(), &["data", "export"]));
    assert_eq!(export["theme"], "light");
    assert_eq!(export["user"]["name"], "Kai");
    assert!(export.get("exportedAt").is_some());

    run_cli_failure(dir.path(), &["data", "clear"]);
    run_cli_success(dir.path(), &["data", "clear", "--yes"]);
    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "system");
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["config", "set", "habits.default_category", "Learning"]);
    let out = run_cli_success(dir.path(), &["config", "get", "habits.default_category"]);
    assert_eq!(out.trim(), "Learning");
    run_cli_failure(dir.path(), &["config", "get", "habits.nope"]);

    run_cli_success(dir.path(), &["habit", "add", "Flashcards"]);
    let out = run_cli_success(dir.path(), &["habit", "list", "--json"]);
    let habits: Vec<serde_json::Value> = parse_json(&out);
    assert_eq!(habits[0]["category"], "Learning");
}

#[test]
fn test_corrupt_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "[habits\nbroken").unwrap();

    run_cli_success(dir.path(), &["habit", "add", "Walk"]);
    let out = run_cli_success(dir.path(), &["habit", "list", "--json"]);
    let habits: Vec<serde_json::Value> = parse_json(&out);
    assert_eq!(habits[0]["category"], "Other");

    let id = habit_ids(dir.path()).remove(0);
    run_cli_success(dir.path(), &["stats", "show", &id]);
    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "system");

    // the broken file is reported by `config`, never rewritten behind the user's back
    let (_, stderr, _) = run_cli_failure(dir.path(), &["config", "list"]);
    assert_contains(&stderr, "Failed to load configuration");
    assert_eq!(std::fs::read_to_string(&config_path).unwrap(), "[habits\nbroken");

    run_cli_success(dir.path(), &["config", "reset"]);
    run_cli_success(dir.path(), &["config", "list"]);
}

#[test]
fn test_category_must_be_from_the_list() {
    let dir = TempDir::new().unwrap();
    run_cli_failure(dir.path(), &["habit", "add", "Chess", "--category", "Games"]);
    assert!(habit_ids(dir.path()).is_empty());

    run_cli_success(dir.path(), &["habit", "add", "Chess", "--category", "Hobbies"]);
    let id = habit_ids(dir.path()).remove(0);
    run_cli_failure(dir.path(), &["habit", "edit", &id, "--category", "Games"]);
    run_cli_success(dir.path(), &["habit", "edit", &id, "--category", "Learning"]);

    let out = run_cli_success(dir.path(), &["habit", "list", "--json"]);
    let habits: Vec<serde_json::Value> = parse_json(&out);
    assert_eq!(habits[0]["category"], "Learning");
}

#[test]
fn test_week_start_orders_custom_days() {
    let dir = TempDir::new().unwrap();
    run_cli_success(
        dir.path(),
        &["habit", "add", "Long run", "--frequency", "custom", "--days", "0,6"],
    );
    assert_contains(&run_cli_success(dir.path(), &["habit", "list"]), "Sun, Sat");

    run_cli_success(dir.path(), &["config", "set", "general.week_starts_on_monday", "true"]);
    assert_contains(&run_cli_success(dir.path(), &["habit", "list"]), "Sat, Sun");
}

#[test]
fn test_configured_default_theme_applies_everywhere() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["config", "set", "general.default_theme", "dark"]);

    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "dark");
    let export: serde_json::Value = parse_json(&run_cli_success(dir.path(), &["data", "export"]));
    assert_eq!(export["theme"], "dark");

    run_cli_success(dir.path(), &["theme", "set", "light"]);
    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "light");
}
