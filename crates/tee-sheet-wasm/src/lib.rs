//! WASM bindings for tee-sheet-engine.
//!
//! Exposes schedule resolution, tee-sheet generation, previews, calendar
//! summaries and validation to JavaScript via `wasm-bindgen`. Course
//! documents, sunset tables and results all cross the boundary as JSON
//! strings; dates are `YYYY-MM-DD` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p tee-sheet-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/tee-sheet-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/tee_sheet_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use tee_sheet_engine::model::parse_full_date;
use tee_sheet_engine::twilight::{NoSunsetProvider, SunsetProvider};
use tee_sheet_engine::{CourseSchedule, EffectiveSchedule, SunsetTable};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out
// ---------------------------------------------------------------------------

fn parse_course(json: &str) -> Result<CourseSchedule, String> {
    CourseSchedule::from_json(json).map_err(|e| format!("Invalid course JSON: {}", e))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_full_date(s).map_err(|e| e.to_string())
}

fn parse_sunset_table(json: Option<&str>) -> Result<Option<SunsetTable>, String> {
    json.map(|j| serde_json::from_str(j).map_err(|e| format!("Invalid sunset table JSON: {}", e)))
        .transpose()
}

fn provider(table: Option<&SunsetTable>) -> &dyn SunsetProvider {
    match table {
        Some(table) => table,
        None => &NoSunsetProvider,
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Boundary-free implementations (testable off wasm32)
// ---------------------------------------------------------------------------

fn resolve_impl(course_json: &str, date: &str, sunsets: Option<&str>) -> Result<String, String> {
    let course = parse_course(course_json)?;
    let date = parse_date(date)?;
    let table = parse_sunset_table(sunsets)?;
    let schedule = tee_sheet_engine::resolve_effective_schedule_with(
        &course.config,
        &course.seasons,
        &course.special_days,
        date,
        provider(table.as_ref()),
    )
    .map_err(|e| e.to_string())?;
    to_json(&schedule)
}

fn generate_slots_impl(schedule_json: &str) -> Result<String, String> {
    let schedule: EffectiveSchedule = serde_json::from_str(schedule_json)
        .map_err(|e| format!("Invalid schedule JSON: {}", e))?;
    let slots = tee_sheet_engine::generate_slots(&schedule).map_err(|e| e.to_string())?;
    to_json(&slots)
}

fn preview_impl(
    course_json: &str,
    date: &str,
    max_players_per_slot: u32,
    sunsets: Option<&str>,
) -> Result<String, String> {
    let course = parse_course(course_json)?;
    let date = parse_date(date)?;
    let table = parse_sunset_table(sunsets)?;
    let preview = tee_sheet_engine::assemble_preview_with(
        &course.config,
        &course.seasons,
        &course.special_days,
        date,
        max_players_per_slot,
        provider(table.as_ref()),
    )
    .map_err(|e| e.to_string())?;
    to_json(&preview)
}

fn calendar_impl(
    course_json: &str,
    from: &str,
    to: &str,
    max_players_per_slot: u32,
    sunsets: Option<&str>,
) -> Result<String, String> {
    let course = parse_course(course_json)?;
    let (from, to) = (parse_date(from)?, parse_date(to)?);
    let table = parse_sunset_table(sunsets)?;
    let rows = tee_sheet_engine::summarize_calendar_with(
        &course.config,
        &course.seasons,
        &course.special_days,
        from,
        to,
        max_players_per_slot,
        provider(table.as_ref()),
    )
    .map_err(|e| e.to_string())?;
    to_json(&rows)
}

fn validate_impl(course_json: &str) -> Result<String, String> {
    let course = parse_course(course_json)?;
    let issues =
        tee_sheet_engine::validate_course(&course.config, &course.seasons, &course.special_days);
    to_json(&issues)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Resolve the effective schedule for a date.
///
/// # Arguments
/// - `course_json` -- `{config, seasons, special_days}` course document
/// - `date` -- `YYYY-MM-DD`
/// - `sunset_table_json` -- Optional `{"YYYY-MM-DD": "HH:MM"}` sunset lookup
#[wasm_bindgen(js_name = "resolveEffectiveSchedule")]
pub fn resolve_effective_schedule(
    course_json: &str,
    date: &str,
    sunset_table_json: Option<String>,
) -> Result<String, JsValue> {
    resolve_impl(course_json, date, sunset_table_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Generate the tee sheet from an effective schedule returned by
/// `resolveEffectiveSchedule`.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(schedule_json: &str) -> Result<String, JsValue> {
    generate_slots_impl(schedule_json).map_err(|e| JsValue::from_str(&e))
}

/// Resolve, generate and summarize the tee sheet for a date.
///
/// Returns `{schedule, slots, total_slots, max_players, prime_time_slots,
/// prime_time_percentage, twilight_slots}`.
#[wasm_bindgen(js_name = "assemblePreview")]
pub fn assemble_preview(
    course_json: &str,
    date: &str,
    max_players_per_slot: u32,
    sunset_table_json: Option<String>,
) -> Result<String, JsValue> {
    preview_impl(
        course_json,
        date,
        max_players_per_slot,
        sunset_table_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// One summary row per date in the inclusive range `from..=to` (at most 366 days).
#[wasm_bindgen(js_name = "summarizeCalendar")]
pub fn summarize_calendar(
    course_json: &str,
    from: &str,
    to: &str,
    max_players_per_slot: u32,
    sunset_table_json: Option<String>,
) -> Result<String, JsValue> {
    calendar_impl(
        course_json,
        from,
        to,
        max_players_per_slot,
        sunset_table_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Check a course document. Returns a JSON array of `{entity, message}`
/// issues, empty when the course is valid.
#[wasm_bindgen(js_name = "validateCourse")]
pub fn validate_course(course_json: &str) -> Result<String, JsValue> {
    validate_impl(course_json).map_err(|e| JsValue::from_str(&e))
}
