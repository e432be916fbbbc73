//! Integration tests for the druggle binary.
//!
//! These tests verify end-to-end behavior including:
//! - Daily puzzle selection from a pinned date
//! - Scripted and interactive play
//! - Progress persistence across runs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Day 0 of the puzzle sequence: the target is Aspirin
const ASPIRIN_DAY: &str = "2025-01-01";

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("druggle"))
}

fn read_progress(data_dir: &std::path::Path) -> serde_json::Value {
    let contents =
        fs::read_to_string(data_dir.join("progress.json")).expect("Failed to read progress");
    serde_json::from_str(&contents).expect("Progress is not JSON")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily drug guessing game"));
}

#[test]
fn test_today_shows_puzzle_number() {
    cli()
        .arg("today")
        .arg("--date")
        .arg("2025-01-04")
        .assert()
        .success()
        .stdout(predicate::str::contains("Druggle #4 (2025-01-04)"));
}

#[test]
fn test_scripted_win_records_progress() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("play")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--date")
        .arg(ASPIRIN_DAY)
        .arg("--guess")
        .arg("aspirin ")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct! The drug was Aspirin."))
        .stdout(predicate::str::contains("🎉 I won Druggle #1!\n🟩🟩🟩🟩🟩"))
        .stdout(predicate::str::contains("Win Without Hints"));

    let progress = read_progress(&data_dir);
    assert_eq!(progress["streak"], "1");
    assert_eq!(progress["achievements"], r#"["first_win","win_without_hints"]"#);
}

#[test]
fn test_scripted_loss_keeps_streak() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let mut cmd = cli();
    cmd.arg("play")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--date")
        .arg(ASPIRIN_DAY);
    for name in ["Insulin", "Losartan", "Insulin", "Losartan", "Insulin", "Losartan"] {
        cmd.arg("--guess").arg(name);
    }
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Game Over! The drug was Aspirin."))
        .stdout(predicate::str::contains("Druggle #1 X/6"));

    // A loss writes nothing
    assert!(!data_dir.join("progress.json").exists());

    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 0"))
        .stdout(predicate::str::contains("None yet"));
}

#[test]
fn test_guesses_after_loss_ignored() {
    let temp_dir = setup_test_dir();

    let mut cmd = cli();
    cmd.arg("play")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(ASPIRIN_DAY);
    for name in [
        "Insulin", "Losartan", "Insulin", "Losartan", "Insulin", "Losartan", "Aspirin",
    ] {
        cmd.arg("--guess").arg(name);
    }
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("The game is over"))
        .stdout(predicate::str::contains("Correct!").not());
}

#[test]
fn test_unknown_drug_reported() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("play")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(ASPIRIN_DAY)
        .arg("--guess")
        .arg("Amox")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown drug 'Amox'"))
        .stderr(predicate::str::contains("Did you mean: Amoxicillin"))
        .stdout(predicate::str::contains("6 attempts remaining"));
}

#[test]
fn test_repeated_guess_suppressed() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("play")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(ASPIRIN_DAY)
        .arg("--guess")
        .arg("Insulin")
        .arg("--guess")
        .arg("insulin")
        .assert()
        .success()
        .stdout(predicate::str::contains("You just guessed that."))
        .stdout(predicate::str::contains("5 attempts remaining"));
}

#[test]
fn test_interactive_play() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg(ASPIRIN_DAY)
        .write_stdin("ibuprofen\naspirin\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ibuprofen (1/6)"))
        .stdout(predicate::str::contains("Correct! The drug was Aspirin."))
        .stdout(predicate::str::contains("🟩⬜🟩🟩⬜\n🟩🟩🟩🟩🟩"));
}

#[test]
fn test_interactive_hints_and_reset() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("play")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--date")
        .arg(ASPIRIN_DAY)
        .arg("--seed")
        .arg("9")
        .write_stdin("?\n?\n?\n?\n?\n?\naspirin\nreset\naspirin\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hint:"))
        .stdout(predicate::str::contains("No hints left."))
        .stdout(predicate::str::contains("New game."))
        .stdout(predicate::str::contains("Win Without Hints"));

    let progress = read_progress(&data_dir);
    assert_eq!(progress["streak"], "2");
}

#[test]
fn test_win_with_hints_unlocks_first_win_only() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("play")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--date")
        .arg(ASPIRIN_DAY)
        .arg("--hints")
        .arg("2")
        .arg("--seed")
        .arg("1")
        .arg("--guess")
        .arg("Aspirin")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hint:"));

    let progress = read_progress(&data_dir);
    assert_eq!(progress["achievements"], r#"["first_win"]"#);
}

#[test]
fn test_streak_accumulates_across_runs() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    for date in ["2025-01-01", "2025-01-02"] {
        let target = if date == "2025-01-01" { "Aspirin" } else { "Ibuprofen" };
        cli()
            .arg("play")
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--date")
            .arg(date)
            .arg("--guess")
            .arg(target)
            .assert()
            .success();
    }

    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 2"))
        .stdout(predicate::str::contains("First Win 🎉, Win Without Hints 🏆"));
}

#[test]
fn test_dry_run_does_not_record() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("play")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--date")
        .arg(ASPIRIN_DAY)
        .arg("--guess")
        .arg("Aspirin")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!data_dir.join("progress.json").exists());
}

#[test]
fn test_suggest_prefix() {
    cli()
        .arg("suggest")
        .arg("am")
        .assert()
        .success()
        .stdout("Amoxicillin\nAmlodipine\n");
}

#[test]
fn test_custom_catalog() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("drugs.json");
    fs::write(
        &catalog_path,
        r#"[
  {"name":"Warfarin","therapeutic_class":"Anticoagulant","molecule_class":"Coumarin",
   "route":"Oral","prescription":"Rx","mechanism":"Vitamin K antagonist",
   "target_system":"Cardiovascular","summary":"Did you know? Warfarin started out as a rat poison."}
]"#,
    )
    .unwrap();

    cli()
        .arg("play")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog_path)
        .arg("--date")
        .arg("2025-03-01")
        .arg("--guess")
        .arg("warfarin")
        .assert()
        .success()
        .stdout(predicate::str::contains("rat poison"));
}

#[test]
fn test_drug_named_like_command_is_guessable() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("drugs.json");
    fs::write(
        &catalog_path,
        r#"[
  {"name":"Reset","therapeutic_class":"Placebo","molecule_class":"Sugar",
   "route":"Oral","prescription":"OTC","mechanism":"None",
   "target_system":"None"}
]"#,
    )
    .unwrap();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog_path)
        .arg("--date")
        .arg("2025-01-01")
        .write_stdin("reset\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct! The drug was Reset."))
        .stdout(predicate::str::contains("New game.").not());
}

#[test]
fn test_before_reference_date_numbers_from_one() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--date")
        .arg("2024-12-28")
        .assert()
        .success()
        .stdout(predicate::str::contains("Druggle #1 (2024-12-28)"));
}

#[test]
fn test_invalid_catalog_fails() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("drugs.json");
    fs::write(&catalog_path, "[]").unwrap();

    cli()
        .arg("today")
        .arg("--catalog")
        .arg(&catalog_path)
        .assert()
        .failure();
}
