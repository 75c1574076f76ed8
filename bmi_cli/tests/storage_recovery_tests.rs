//! Storage recovery tests for the bmi binary.
//!
//! These tests verify the system can handle:
//! - Repeated startup against an existing database
//! - Corrupted database files
//! - Missing data directories

use assert_cmd::Command;
use bmi_core::{MeasurementStore, SqliteStore};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bmi(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bmi"));
    cmd.arg("--data-dir")
        .arg(data_dir)
        .arg("--config")
        .arg(data_dir.join("config.toml"));
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn saved_count(db_path: &Path) -> usize {
    let mut store = SqliteStore::new(db_path);
    store.initialize().unwrap();
    store.list_all().unwrap().len()
}

#[test]
fn test_restart_keeps_existing_records() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    bmi(data_dir)
        .args(["calc", "--weight", "70", "--height", "175", "--save"])
        .assert()
        .success();

    // Every invocation initializes the store again
    for _ in 0..3 {
        bmi(data_dir).arg("history").assert().success();
    }

    assert_eq!(saved_count(&data_dir.join("bmi_records.db")), 1);
}

#[test]
fn test_missing_data_dir_is_created() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("does").join("not").join("exist");

    bmi(&data_dir)
        .args(["calc", "--weight", "70", "--height", "175", "--save"])
        .assert()
        .success();

    assert!(data_dir.join("bmi_records.db").exists());
}

#[test]
fn test_corrupted_database_reports_storage_error() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let db_path = data_dir.join("bmi_records.db");
    fs::write(&db_path, "corrupted bytes ".repeat(256)).expect("Failed to write corrupted db");

    bmi(data_dir)
        .args(["calc", "--weight", "70", "--height", "175", "--save"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Storage Error"));

    bmi(data_dir)
        .arg("history")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Storage Error"));
}

#[test]
fn test_recovers_after_corrupted_database_is_removed() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let db_path = data_dir.join("bmi_records.db");
    fs::write(&db_path, "corrupted bytes ".repeat(256)).unwrap();

    bmi(data_dir)
        .args(["calc", "--weight", "70", "--height", "175", "--save"])
        .assert()
        .failure();

    // The user fixes the file and retries the same command
    fs::remove_file(&db_path).unwrap();

    bmi(data_dir)
        .args(["calc", "--weight", "70", "--height", "175", "--save"])
        .assert()
        .success();

    assert_eq!(saved_count(&db_path), 1);
}

#[test]
fn test_database_path_is_a_directory() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::create_dir_all(data_dir.join("bmi_records.db")).unwrap();

    bmi(data_dir)
        .arg("history")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Storage Error"));
}

#[test]
fn test_calc_without_save_works_with_corrupted_database() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::write(data_dir.join("bmi_records.db"), "corrupted bytes ".repeat(256)).unwrap();

    bmi(data_dir)
        .args(["calc", "--weight", "70", "--height", "175", "--no-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your BMI: 22.86"))
        .stdout(predicate::str::contains("Not saved"));
}

#[test]
fn test_save_with_corrupted_database_still_shows_result() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::write(data_dir.join("bmi_records.db"), "corrupted bytes ".repeat(256)).unwrap();

    bmi(data_dir)
        .args(["calc", "--weight", "70", "--height", "175", "--save"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Your BMI: 22.86"))
        .stdout(predicate::str::contains("saved to history").not())
        .stderr(predicate::str::contains("Storage Error"));
}
