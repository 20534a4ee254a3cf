//! Integration tests for the `teesheet` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run each subcommand through the
//! actual binary, covering file and stdin input, the sunset table, output
//! files and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn course_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/course.json")
}

fn sunsets_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sunsets.json")
}

fn course_json() -> String {
    std::fs::read_to_string(course_path()).expect("course.json fixture must exist")
}

fn teesheet() -> Command {
    Command::cargo_bin("teesheet").unwrap()
}

/// Run a successful command and parse its stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = teesheet().args(args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// resolve
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_weekday_from_file() {
    let schedule = run_json(&["resolve", "-c", course_path(), "--date", "2026-07-01"]);
    assert_eq!(schedule["day_kind"], "WEEKDAY");
    assert_eq!(schedule["first_tee"], "06:00");
    assert_eq!(schedule["last_tee"], "17:00");
    assert_eq!(schedule["booking_mode"], "EIGHTEEN");
    assert_eq!(schedule["is_closed"], false);
    assert!(schedule["active_season"].is_null());
}

#[test]
fn resolve_reads_course_from_stdin() {
    let output = teesheet()
        .args(["resolve", "--date", "2026-07-04"])
        .write_stdin(course_json())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let schedule: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(schedule["day_kind"], "WEEKEND");
    assert_eq!(schedule["booking_mode"], "CROSS");
}

#[test]
fn resolve_applies_winter_season() {
    let schedule = run_json(&["resolve", "-c", course_path(), "--date", "2026-01-14"]);
    assert_eq!(schedule["active_season"]["name"], "Winter");
    assert_eq!(schedule["last_tee"], "15:00");
    assert_eq!(schedule["twilight"]["time"], "13:30");
    assert_eq!(schedule["twilight"]["source"], "SEASON");
}

#[test]
fn resolve_christmas_is_closed() {
    let schedule = run_json(&["resolve", "-c", course_path(), "--date", "2026-12-25"]);
    assert_eq!(schedule["is_closed"], true);
    assert_eq!(schedule["active_special_day"]["name"], "Christmas");
}

#[test]
fn resolve_uses_sunset_table() {
    let without = run_json(&["resolve", "-c", course_path(), "--date", "2026-07-01"]);
    assert_eq!(without["twilight"]["time"], "15:00");
    assert_eq!(without["twilight"]["is_fallback"], true);

    let with = run_json(&[
        "resolve",
        "-c",
        course_path(),
        "--sunset-table",
        sunsets_path(),
        "--date",
        "2026-07-01",
    ]);
    assert_eq!(with["twilight"]["time"], "18:30");
    assert_eq!(with["twilight"]["source"], "SUNSET");
}

// ─────────────────────────────────────────────────────────────────────────────
// slots / preview
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_lists_tee_times_in_order() {
    let slots = run_json(&["slots", "-c", course_path(), "--date", "2026-07-01"]);
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 72);
    assert_eq!(slots[0]["time"], "06:00");
    assert_eq!(slots[0]["period_name"], "Early");
    assert_eq!(slots[0]["is_prime_time"], true);
    assert_eq!(slots[1]["time"], "06:08");
    assert_eq!(slots[23]["time"], "09:00");
    assert_eq!(slots[23]["period_name"], "Day");
    assert_eq!(slots[71]["time"], "17:00");
}

#[test]
fn preview_reports_statistics() {
    let preview = run_json(&["preview", "-c", course_path(), "--date", "2026-07-01"]);
    assert_eq!(preview["total_slots"], 72);
    assert_eq!(preview["max_players"], 288);
    assert_eq!(preview["prime_time_slots"], 23);
    assert_eq!(preview["prime_time_percentage"], 32);
    assert_eq!(preview["twilight_slots"], 13);
}

#[test]
fn preview_cross_mode_with_custom_player_count() {
    let preview = run_json(&[
        "preview",
        "-c",
        course_path(),
        "--date",
        "2026-07-04",
        "--max-players",
        "3",
        "--sunset-table",
        sunsets_path(),
    ]);
    assert_eq!(preview["total_slots"], 82);
    assert_eq!(preview["max_players"], 82 * 3 * 2);
    assert_eq!(preview["twilight_slots"], 0);
}

#[test]
fn preview_custom_special_day() {
    let preview = run_json(&["preview", "-c", course_path(), "--date", "2026-07-11"]);
    assert_eq!(preview["schedule"]["active_special_day"]["name"], "Club Championship");
    assert_eq!(preview["schedule"]["booking_mode"], "EIGHTEEN");
    assert_eq!(preview["total_slots"], 34);
    assert_eq!(preview["max_players"], 136);
}

#[test]
fn preview_closed_day_is_empty() {
    let preview = run_json(&["preview", "-c", course_path(), "--date", "2026-12-25"]);
    assert_eq!(preview["total_slots"], 0);
    assert_eq!(preview["prime_time_percentage"], 0);
    assert_eq!(preview["slots"].as_array().unwrap().len(), 0);
}

#[test]
fn pretty_output_is_indented() {
    teesheet()
        .args(["preview", "-c", course_path(), "--date", "2026-07-01", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"schedule\": {"));
}

#[test]
fn output_flag_writes_file() {
    let output_path = std::env::temp_dir().join("teesheet-test-preview.json");
    let _ = std::fs::remove_file(&output_path);

    teesheet()
        .args(["preview", "-c", course_path(), "--date", "2026-07-01", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let preview: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(preview["total_slots"], 72);
    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// calendar
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn calendar_one_row_per_day() {
    let rows = run_json(&[
        "calendar",
        "-c",
        course_path(),
        "--from",
        "2026-12-23",
        "--to",
        "2026-12-27",
    ]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["date"], "2026-12-23");
    assert_eq!(rows[0]["season"], "Winter");
    assert_eq!(rows[2]["date"], "2026-12-25");
    assert_eq!(rows[2]["is_closed"], true);
    assert_eq!(rows[2]["total_slots"], 0);
}

#[test]
fn calendar_rejects_inverted_range() {
    teesheet()
        .args([
            "calendar",
            "-c",
            course_path(),
            "--from",
            "2026-07-02",
            "--to",
            "2026-07-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to summarize"));
}

// ─────────────────────────────────────────────────────────────────────────────
// validate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_accepts_fixture() {
    let report = run_json(&["validate", "-c", course_path()]);
    assert_eq!(report["valid"], true);
    assert_eq!(report["issues"].as_array().unwrap().len(), 0);
}

#[test]
fn validate_reports_issues_and_fails() {
    let broken = course_json().replace(r#""weekday_last_tee": "17:00""#, r#""weekday_last_tee": "05:00""#);
    let output = teesheet()
        .arg("validate")
        .write_stdin(broken)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["issues"][0]["entity"], "config");
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_course_json_fails() {
    teesheet()
        .args(["resolve", "--date", "2026-07-01"])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse course JSON"));
}

#[test]
fn invalid_date_argument_fails() {
    teesheet()
        .args(["resolve", "-c", course_path(), "--date", "07/01/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn missing_sunset_table_fails() {
    teesheet()
        .args([
            "resolve",
            "-c",
            course_path(),
            "--date",
            "2026-07-01",
            "--sunset-table",
            "/nonexistent/sunsets.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read sunset table"));
}

#[test]
fn help_lists_subcommands() {
    teesheet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("calendar"))
        .stdout(predicate::str::contains("validate"));
}
