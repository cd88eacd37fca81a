//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including stdin piping, file I/O and error exits.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the restaurant.json fixture.
fn restaurant_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/restaurant.json")
}

/// Helper: read the restaurant.json fixture as a string.
fn restaurant_json() -> String {
    std::fs::read_to_string(restaurant_path()).expect("restaurant.json fixture must exist")
}

fn slots() -> Command {
    Command::cargo_bin("slots").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// available
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn available_text_lists_free_tables() {
    // The Booth is blocked all evening by the 17:30 booking; the Window is free.
    slots()
        .args(["available", "-i", restaurant_path(), "--date", "2026-03-16", "--party", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("17:00  Window (2)"))
        .stdout(predicate::str::contains("18:45  Window (2)"))
        .stdout(predicate::str::contains("Booth").not())
        .stdout(predicate::str::contains("Long table").not());
}

#[test]
fn available_reads_snapshot_from_stdin() {
    slots()
        .args(["available", "--date", "2026-03-16", "--party", "2"])
        .write_stdin(restaurant_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("17:00  Window (2)"));
}

#[test]
fn available_json_output() {
    let output = slots()
        .args([
            "available",
            "-i",
            restaurant_path(),
            "--date",
            "2026-03-16",
            "--party",
            "2",
            "--format",
            "json",
        ])
        .output()
        .expect("available should run");
    assert!(output.status.success());

    let slots: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout must be JSON");
    let slots = slots.as_array().expect("slots must be an array");
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0]["time"], "17:00");
    assert_eq!(slots[7]["time"], "18:45");
    assert_eq!(slots[0]["availableTables"][0]["id"], "t1");
}

#[test]
fn available_fully_booked_party() {
    slots()
        .args(["available", "-i", restaurant_path(), "--date", "2026-03-16", "--party", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No available slots for a party of 4 on 2026-03-16",
        ));
}

#[test]
fn available_on_special_closure_is_empty() {
    slots()
        .args(["available", "-i", restaurant_path(), "--date", "2026-03-23", "--party", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No available slots"));
}

#[test]
fn available_rejects_bad_date() {
    slots()
        .args(["available", "-i", restaurant_path(), "--date", "16/03/2026", "--party", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn invalid_snapshot_fails() {
    slots()
        .args(["available", "--date", "2026-03-16", "--party", "2"])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse snapshot"));
}

// ─────────────────────────────────────────────────────────────────────────────
// hours
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hours_weekly_default() {
    slots()
        .args(["hours", "-i", restaurant_path(), "--date", "2026-03-16"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2026-03-16 monday: open 17:00-19:00 (weekly hours)",
        ));
}

#[test]
fn hours_special_closure_shows_note() {
    slots()
        .args(["hours", "-i", restaurant_path(), "--date", "2026-03-23"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2026-03-23 monday: closed (special hours: Staff training)",
        ));
}

#[test]
fn hours_special_opening() {
    slots()
        .args(["hours", "-i", restaurant_path(), "--date", "2026-03-24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("open 12:00-13:00 (special hours)"));
}

#[test]
fn hours_unconfigured_weekday() {
    slots()
        .args(["hours", "-i", restaurant_path(), "--date", "2026-03-18"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wednesday: closed (no hours configured)"));
}

// ─────────────────────────────────────────────────────────────────────────────
// book
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn book_first_free_table_to_stdout() {
    let output = slots()
        .args([
            "book",
            "-i",
            restaurant_path(),
            "--date",
            "2026-03-16",
            "--time",
            "18:00",
            "--party",
            "2",
            "--guest",
            "Ada Lovelace",
        ])
        .output()
        .expect("book should run");
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Booked res-0001 on table t1 at 2026-03-16 18:00"));

    let snapshot: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout must be a snapshot");
    let reservations = snapshot["reservations"].as_array().unwrap();
    assert_eq!(reservations.len(), 2);
    let booked = reservations
        .iter()
        .find(|r| r["id"] == "res-0001")
        .expect("new reservation must be in snapshot");
    assert_eq!(booked["tableId"], "t1");
    assert_eq!(booked["time"], "18:00");
    assert_eq!(booked["guestName"], "Ada Lovelace");
    assert_eq!(booked["status"], "confirmed");
}

#[test]
fn book_then_slot_disappears() {
    let output_path = std::env::temp_dir().join("slots-test-book-output.json");
    let output_path = output_path.to_str().unwrap().to_string();
    let _ = std::fs::remove_file(&output_path);

    slots()
        .args([
            "book",
            "-i",
            restaurant_path(),
            "-o",
            output_path.as_str(),
            "--date",
            "2026-03-16",
            "--time",
            "17:00",
            "--party",
            "2",
            "--guest",
            "Ada Lovelace",
        ])
        .assert()
        .success();

    // Window is now held 17:00-18:30; the first slot left starts at 18:30.
    let output = slots()
        .args([
            "available",
            "-i",
            output_path.as_str(),
            "--date",
            "2026-03-16",
            "--party",
            "2",
            "--format",
            "json",
        ])
        .output()
        .expect("available should run");
    let slots: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let times: Vec<&str> = slots
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["time"].as_str().unwrap())
        .collect();
    assert_eq!(times, vec!["18:30", "18:45"]);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn book_when_nothing_is_free_fails() {
    slots()
        .args([
            "book",
            "-i",
            restaurant_path(),
            "--date",
            "2026-03-16",
            "--time",
            "18:00",
            "--party",
            "4",
            "--guest",
            "Alan Turing",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No table is free at 18:00"));
}

#[test]
fn book_requested_busy_table_fails() {
    slots()
        .args([
            "book",
            "-i",
            restaurant_path(),
            "--date",
            "2026-03-16",
            "--time",
            "17:00",
            "--party",
            "2",
            "--guest",
            "Alan Turing",
            "--table",
            "t2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table 't2' is not free at 17:00"));
}

#[test]
fn book_rejects_bad_time() {
    slots()
        .args([
            "book",
            "-i",
            restaurant_path(),
            "--date",
            "2026-03-16",
            "--time",
            "7pm",
            "--party",
            "2",
            "--guest",
            "Alan Turing",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected HH:MM"));
}

// ─────────────────────────────────────────────────────────────────────────────
// summary
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn summary_text() {
    slots()
        .args(["summary", "-i", restaurant_path(), "--date", "2026-03-16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reservations:  1"))
        .stdout(predicate::str::contains("Active covers: 3"))
        .stdout(predicate::str::contains("confirmed"));
}

#[test]
fn summary_json() {
    let output = slots()
        .args([
            "summary",
            "-i",
            restaurant_path(),
            "--date",
            "2026-03-16",
            "--format",
            "json",
        ])
        .output()
        .expect("summary should run");
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["reservations"], 1);
    assert_eq!(summary["activeCovers"], 3);
    assert_eq!(summary["byStatus"]["confirmed"], 1);
}
