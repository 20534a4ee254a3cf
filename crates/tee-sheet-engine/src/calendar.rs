//! Per-day summaries over a date range, for month and calendar views.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, TeeSheetError};
use crate::model::{BaseScheduleConfig, BookingMode, Season, SpecialDay};
use crate::preview::assemble_preview_with;
use crate::twilight::{NoSunsetProvider, SunsetProvider};

/// Longest range accepted by [`summarize_calendar`], in days.
pub const MAX_CALENDAR_DAYS: u64 = 366;

/// One row of a calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub is_closed: bool,
    pub is_holiday: bool,
    pub season: Option<String>,
    pub special_day: Option<String>,
    pub first_tee: ClockTime,
    pub last_tee: ClockTime,
    pub booking_mode: BookingMode,
    pub total_slots: u32,
    pub max_players: u64,
}

pub fn summarize_calendar(
    config: &BaseScheduleConfig,
    seasons: &[Season],
    special_days: &[SpecialDay],
    from: NaiveDate,
    to: NaiveDate,
    max_players_per_slot: u32,
) -> Result<Vec<DaySummary>> {
    summarize_calendar_with(
        config,
        seasons,
        special_days,
        from,
        to,
        max_players_per_slot,
        &NoSunsetProvider,
    )
}

/// Summarize every date in `[from, to]`.
///
/// # Errors
///
/// [`TeeSheetError::InvalidDate`] when `from` is after `to` or the range spans
/// more than [`MAX_CALENDAR_DAYS`]. Any error resolving a single day aborts the
/// whole summary.
pub fn summarize_calendar_with(
    config: &BaseScheduleConfig,
    seasons: &[Season],
    special_days: &[SpecialDay],
    from: NaiveDate,
    to: NaiveDate,
    max_players_per_slot: u32,
    sunset: &dyn SunsetProvider,
) -> Result<Vec<DaySummary>> {
    if from > to {
        return Err(TeeSheetError::InvalidDate(format!(
            "calendar range starts {} after it ends {}",
            from, to
        )));
    }
    let span = (to - from).num_days() as u64 + 1;
    if span > MAX_CALENDAR_DAYS {
        return Err(TeeSheetError::InvalidDate(format!(
            "calendar range of {} days exceeds {} days",
            span, MAX_CALENDAR_DAYS
        )));
    }

    let mut rows = Vec::with_capacity(span as usize);
    for offset in 0..span {
        let date = from
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| TeeSheetError::InvalidDate(format!("{} + {} days", from, offset)))?;
        let preview = assemble_preview_with(
            config,
            seasons,
            special_days,
            date,
            max_players_per_slot,
            sunset,
        )?;
        let schedule = preview.schedule;
        rows.push(DaySummary {
            date,
            is_closed: schedule.is_closed,
            is_holiday: schedule.is_holiday,
            season: schedule.active_season.map(|s| s.name),
            special_day: schedule.active_special_day.map(|d| d.name),
            first_tee: schedule.first_tee,
            last_tee: schedule.last_tee,
            booking_mode: schedule.booking_mode,
            total_slots: preview.total_slots,
            max_players: preview.max_players,
        });
    }
    Ok(rows)
}
