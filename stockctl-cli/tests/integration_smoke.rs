//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn stockctl() -> Command {
    let mut cmd = Command::cargo_bin("stockctl").unwrap();
    // Keep a developer's .env or DB_* from leaking into the runs below
    for var in ["DB_HOST", "DB_PORT", "DB_USER", "DB_PASSWORD", "DB_NAME"] {
        cmd.env_remove(var);
    }
    let scratch = std::env::temp_dir();
    cmd.current_dir(&scratch).env("HOME", &scratch);
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    stockctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list-items"))
        .stdout(predicate::str::contains("export-low-stock"))
        .stdout(predicate::str::contains("complete-duty"));
}

#[test]
fn test_global_db_flags_documented() {
    stockctl()
        .arg("list-items")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--db-host"))
        .stdout(predicate::str::contains("DB_PORT"))
        .stdout(predicate::str::contains("twinliquors"));
}

#[test]
fn test_add_item_help() {
    stockctl()
        .arg("add-item")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("shelf|overstock"))
        .stdout(predicate::str::contains("[default: overstock]"));
}

#[test]
fn test_export_requires_csv_path() {
    stockctl()
        .arg("export-low-stock")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--csv"));
}

#[test]
fn test_bad_location_is_rejected() {
    stockctl()
        .args(["add-item", "--item", "Gin", "--qty", "1", "--loc", "basement"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("basement"));
}

#[test]
fn test_completions_bash() {
    stockctl()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stockctl"));
}

#[test]
fn test_unreachable_database_fails() {
    stockctl()
        .args(["--db-port", "1", "list-items"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list inventory"));
}
