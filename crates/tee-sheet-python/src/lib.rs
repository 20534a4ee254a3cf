//! # tee-sheet-python
//!
//! Python bindings for tee-sheet-engine, built with PyO3.
//!
//! Exposes the following functions to Python as the `tee_sheet` module. Course
//! documents and results are JSON strings; dates are `YYYY-MM-DD` strings.
//!
//! - `resolve_effective_schedule(course_json, date, sunset_table_json=None)`
//! - `generate_slots(schedule_json)`
//! - `assemble_preview(course_json, date, max_players_per_slot=4, sunset_table_json=None)`
//! - `summarize_calendar(course_json, start, end, max_players_per_slot=4, sunset_table_json=None)`
//! - `validate_course(course_json)`

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;
use tee_sheet_engine::model::parse_full_date;
use tee_sheet_engine::twilight::{NoSunsetProvider, SunsetProvider};
use tee_sheet_engine::{CourseSchedule, EffectiveSchedule, SunsetTable};

fn value_error(e: impl ToString) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_course(json: &str) -> PyResult<CourseSchedule> {
    CourseSchedule::from_json(json).map_err(value_error)
}

fn parse_date(s: &str) -> PyResult<NaiveDate> {
    parse_full_date(s).map_err(value_error)
}

fn parse_sunset_table(json: Option<&str>) -> PyResult<Option<SunsetTable>> {
    json.map(|j| serde_json::from_str(j).map_err(value_error))
        .transpose()
}

fn provider(table: Option<&SunsetTable>) -> &dyn SunsetProvider {
    match table {
        Some(table) => table,
        None => &NoSunsetProvider,
    }
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(value_error)
}

/// Resolve the effective schedule for a date.
///
/// Args:
///     course_json: JSON course document with `config`, `seasons` and `special_days`.
///     date: Date to resolve, `YYYY-MM-DD`.
///     sunset_table_json: Optional JSON object mapping `YYYY-MM-DD` to `HH:MM` sunset times.
///
/// Returns:
///     The effective schedule as a JSON string.
///
/// Raises:
///     ValueError: If the inputs are malformed, the resolved hours are
///     invalid, or several seasons tie for the date.
#[pyfunction]
#[pyo3(signature = (course_json, date, sunset_table_json=None))]
fn resolve_effective_schedule(
    course_json: &str,
    date: &str,
    sunset_table_json: Option<&str>,
) -> PyResult<String> {
    let course = parse_course(course_json)?;
    let date = parse_date(date)?;
    let table = parse_sunset_table(sunset_table_json)?;
    let schedule = tee_sheet_engine::resolve_effective_schedule_with(
        &course.config,
        &course.seasons,
        &course.special_days,
        date,
        provider(table.as_ref()),
    )
    .map_err(value_error)?;
    to_json(&schedule)
}

/// Generate the tee sheet for an effective schedule.
///
/// Args:
///     schedule_json: A schedule as returned by `resolve_effective_schedule`.
///
/// Returns:
///     A JSON array of slots with `time`, `period_name`, `interval_minutes`,
///     `is_prime_time` and `is_twilight`.
#[pyfunction]
fn generate_slots(schedule_json: &str) -> PyResult<String> {
    let schedule: EffectiveSchedule = serde_json::from_str(schedule_json).map_err(value_error)?;
    let slots = tee_sheet_engine::generate_slots(&schedule).map_err(value_error)?;
    to_json(&slots)
}

/// Resolve, generate and summarize the tee sheet for a date.
///
/// Returns:
///     A JSON object with `schedule`, `slots`, `total_slots`, `max_players`,
///     `prime_time_slots`, `prime_time_percentage` and `twilight_slots`.
#[pyfunction]
#[pyo3(signature = (course_json, date, max_players_per_slot=4, sunset_table_json=None))]
fn assemble_preview(
    course_json: &str,
    date: &str,
    max_players_per_slot: u32,
    sunset_table_json: Option<&str>,
) -> PyResult<String> {
    let course = parse_course(course_json)?;
    let date = parse_date(date)?;
    let table = parse_sunset_table(sunset_table_json)?;
    let preview = tee_sheet_engine::assemble_preview_with(
        &course.config,
        &course.seasons,
        &course.special_days,
        date,
        max_players_per_slot,
        provider(table.as_ref()),
    )
    .map_err(value_error)?;
    to_json(&preview)
}

/// Summarize every date from `start` to `end` inclusive (at most 366 days).
///
/// Returns:
///     A JSON array with one summary object per date.
#[pyfunction]
#[pyo3(signature = (course_json, start, end, max_players_per_slot=4, sunset_table_json=None))]
fn summarize_calendar(
    course_json: &str,
    start: &str,
    end: &str,
    max_players_per_slot: u32,
    sunset_table_json: Option<&str>,
) -> PyResult<String> {
    let course = parse_course(course_json)?;
    let (start, end) = (parse_date(start)?, parse_date(end)?);
    let table = parse_sunset_table(sunset_table_json)?;
    let rows = tee_sheet_engine::summarize_calendar_with(
        &course.config,
        &course.seasons,
        &course.special_days,
        start,
        end,
        max_players_per_slot,
        provider(table.as_ref()),
    )
    .map_err(value_error)?;
    to_json(&rows)
}

/// Check a course document.
///
/// Returns:
///     A JSON array of `{entity, message}` issues, empty when the course is valid.
#[pyfunction]
fn validate_course(course_json: &str) -> PyResult<String> {
    let course = parse_course(course_json)?;
    let issues =
        tee_sheet_engine::validate_course(&course.config, &course.seasons, &course.special_days);
    to_json(&issues)
}

#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(resolve_effective_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(generate_slots, m)?)?;
    m.add_function(wrap_pyfunction!(assemble_preview, m)?)?;
    m.add_function(wrap_pyfunction!(summarize_calendar, m)?)?;
    m.add_function(wrap_pyfunction!(validate_course, m)?)?;
    Ok(())
}
