//! Integration tests for the fitlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Logging each entry kind from the command line
//! - Validation failures leaving storage untouched
//! - History ordering and limits
//! - The interactive menu driven through stdin

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary pointed at a throwaway config
fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitlog"));
    cmd.env_remove("FITLOG_DATA_DIR")
        .env("XDG_CONFIG_HOME", data_dir.join("config"))
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("fitlog"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal fitness log"));
}

#[test]
fn test_log_workout_writes_one_row_per_set() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["log", "workout", "--exercise", "Squats"])
        .args(["--set", "10x60", "--set", "8x65"])
        .args(["--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved Workouts entry"))
        .stdout(predicate::str::contains("Squats  10x60, 8x65"));

    let csv_content =
        fs::read_to_string(data_dir.join("workouts.csv")).expect("Failed to read workouts");
    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("entry_id,date,exercise,set_number,reps,weight"));
    assert!(lines[1].contains(",2024-03-01,Squats,1,10,60"));
    assert!(lines[2].contains(",2024-03-01,Squats,2,8,65"));
}

#[test]
fn test_workout_without_sets_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["log", "workout", "--exercise", "Squats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sets must contain at least one set"));

    assert!(!data_dir.join("workouts.csv").exists());
}

#[test]
fn test_negative_bodyweight_is_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["log", "bodyweight", "--weight", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bodyweight must be a positive number"));

    assert!(!data_dir.join("bodyweight.csv").exists());
}

#[test]
fn test_rejected_entry_leaves_existing_rows() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["log", "cardio", "--activity", "run", "--duration", "30"])
        .assert()
        .success();

    cli(data_dir)
        .args(["log", "cardio", "--activity", "run", "--duration", "-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duration must be a positive number"));

    let csv_content = fs::read_to_string(data_dir.join("cardio.csv")).unwrap();
    assert_eq!(csv_content.lines().count(), 2);
}

#[test]
fn test_negative_calories_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["log", "nutrition", "--calories", "-100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("calories must be a non-negative integer"));
}

#[test]
fn test_log_nutrition_with_macros() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["log", "nutrition", "--calories", "2400"])
        .args(["--protein", "180", "--carbs", "250", "--fats", "70"])
        .args(["--macro", "fiber=35", "--tracked", "--notes", "on plan"])
        .assert()
        .success();

    let output = cli(data_dir)
        .args(["history", "nutrition", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let entries: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entry = &entries[0];
    assert_eq!(entry["kind"], "nutrition");
    assert_eq!(entry["calories"], 2400);
    assert_eq!(entry["macros"]["protein"], 180.0);
    assert_eq!(entry["macros"]["fiber"], 35.0);
    assert_eq!(entry["tracked"], true);
    assert_eq!(entry["notes"], "on plan");
}

#[test]
fn test_history_newest_first_with_limit() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for (day, weight) in [("01", "80"), ("02", "81"), ("03", "82"), ("04", "83")] {
        cli(data_dir)
            .args(["log", "bodyweight", "--weight", weight])
            .arg("--date")
            .arg(format!("2024-01-{}", day))
            .assert()
            .success();
    }

    let output = cli(data_dir)
        .args(["history", "bodyweight", "--limit", "2", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let entries: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let weights: Vec<f64> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["weight"].as_f64().unwrap())
        .collect();
    assert_eq!(weights, vec![83.0, 82.0]);
}

#[test]
fn test_empty_history() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["history", "cardio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No Cardio entries yet."));
}

#[test]
fn test_unknown_history_kind() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["history", "yoga"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("entry kind must be one of"));
}

#[test]
fn test_config_history_limit() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let config_path = data_dir.join("fitlog.toml");
    fs::write(&config_path, "[history]\nlimit = 1\n").unwrap();

    for activity in ["walk", "run"] {
        cli(data_dir)
            .args(["log", "cardio", "--activity", activity, "--duration", "20"])
            .assert()
            .success();
    }

    cli(data_dir)
        .arg("--config")
        .arg(&config_path)
        .args(["history", "cardio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last 1 Cardio entries:"))
        .stdout(predicate::str::contains("run  20 min"))
        .stdout(predicate::str::contains("walk").not());
}

#[test]
fn test_data_dir_from_env() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("from-env");

    Command::new(assert_cmd::cargo::cargo_bin!("fitlog"))
        .env("FITLOG_DATA_DIR", &data_dir)
        .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .args(["log", "bodyweight", "--weight", "79.5"])
        .assert()
        .success();

    assert!(data_dir.join("bodyweight.csv").exists());
}

#[test]
fn test_interactive_menu_logs_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .write_stdin("1\n2024-03-01\nSquats\n2\n10\n60\n8\n65\n\nn\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fitness Tracker"))
        .stdout(predicate::str::contains("✓ Saved Squats for 2024-03-01"));

    cli(data_dir)
        .args(["history", "workout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-01  Squats  10x60, 8x65"));
}

#[test]
fn test_interactive_menu_reprompts_invalid_reps() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("menu")
        .write_stdin("1\n\nBench\n1\n0\n5\n80\n\nn\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ set 1 reps must be a positive integer"))
        .stdout(predicate::str::contains("✓ Saved Bench"));
}
