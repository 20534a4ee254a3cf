//! Effective-schedule resolution for one calendar date.
//!
//! Layers, from lowest to highest precedence:
//!
//! 1. the course's [`BaseScheduleConfig`], weekday or weekend values,
//! 2. the single highest-priority matching [`Season`],
//! 3. a matching [`SpecialDay`].
//!
//! Special days act by type. `CLOSED` short-circuits to a closed schedule.
//! `WEEKEND` and `HOLIDAY` switch the day to weekend hours and let seasons
//! apply on top. `CUSTOM` replaces hours, mode, twilight and periods with its
//! own values where set and skips seasons entirely.
//!
//! Seasons never merge: the winner's non-null overrides replace base values,
//! and a null override inherits the base value for that field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, TeeSheetError};
use crate::model::{
    BaseScheduleConfig, BookingMode, DayKind, Season, SpecialDay, SpecialDayType, TimePeriod,
};
use crate::twilight::{
    resolve_twilight, NoSunsetProvider, ResolvedTwilight, SunsetProvider, TwilightSettings,
    TwilightSource,
};

/// The operating rules in force on one date. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSchedule {
    pub date: NaiveDate,
    /// Weekend for Saturdays, Sundays and `WEEKEND`/`HOLIDAY` special days.
    pub day_kind: DayKind,
    pub first_tee: ClockTime,
    pub last_tee: ClockTime,
    pub booking_mode: BookingMode,
    pub twilight: ResolvedTwilight,
    pub booking_window_days: u32,
    /// When true, no tee times exist and the remaining fields are informational.
    pub is_closed: bool,
    pub is_holiday: bool,
    pub active_season: Option<Season>,
    pub active_special_day: Option<SpecialDay>,
    /// Sorted by `sort_order`.
    pub time_periods: Vec<TimePeriod>,
}

impl EffectiveSchedule {
    pub fn twilight_time(&self) -> ClockTime {
        self.twilight.time
    }

    /// Whether each tee time starts groups on holes 1 and 10.
    pub fn is_cross(&self) -> bool {
        self.booking_mode == BookingMode::Cross
    }
}

/// Resolve the effective schedule for `date` without a sunset provider.
///
/// Courses in `SUNSET` twilight mode fall back to their fixed default; use
/// [`resolve_effective_schedule_with`] to supply sunset times.
///
/// # Errors
///
/// Returns [`TeeSheetError::ResolutionAmbiguity`] when two matching seasons
/// share the highest priority, and [`TeeSheetError::Configuration`] when the
/// resolved hours or periods are invalid (first tee not before last tee,
/// interval outside 5–20 minutes, an override replacing the periods with an
/// empty list).
pub fn resolve_effective_schedule(
    config: &BaseScheduleConfig,
    seasons: &[Season],
    special_days: &[SpecialDay],
    date: NaiveDate,
) -> Result<EffectiveSchedule> {
    resolve_effective_schedule_with(config, seasons, special_days, date, &NoSunsetProvider)
}

/// Resolve the effective schedule for `date`, looking up sunset through `sunset`.
pub fn resolve_effective_schedule_with(
    config: &BaseScheduleConfig,
    seasons: &[Season],
    special_days: &[SpecialDay],
    date: NaiveDate,
    sunset: &dyn SunsetProvider,
) -> Result<EffectiveSchedule> {
    let mut day_kind = DayKind::of(date);
    let twilight_settings = TwilightSettings::from(config);
    let special_day = select_special_day(special_days, date);

    if let Some(day) = special_day {
        tracing::debug!(%date, special_day = %day.name, day_type = ?day.day_type, "special day matched");
        match day.day_type {
            SpecialDayType::Closed => return Ok(closed_schedule(config, day, date, day_kind)),
            SpecialDayType::Weekend | SpecialDayType::Holiday => day_kind = DayKind::Weekend,
            SpecialDayType::Custom => {
                return custom_schedule(config, day, date, day_kind, &twilight_settings, sunset)
            }
        }
    }

    let season = select_season(seasons, date)?;
    if let Some(season) = season {
        tracing::debug!(%date, season = %season.name, priority = season.priority, "season matched");
    }

    let first_tee = season
        .and_then(|s| s.first_tee)
        .unwrap_or_else(|| config.first_tee(day_kind));
    let last_tee = season
        .and_then(|s| s.last_tee)
        .unwrap_or_else(|| config.last_tee(day_kind));
    let booking_mode = season
        .and_then(|s| s.booking_mode(day_kind))
        .unwrap_or_else(|| config.booking_mode(day_kind));
    let booking_window_days = season
        .and_then(|s| s.booking_window_days)
        .unwrap_or(config.booking_window_days);
    let time_periods = match season {
        Some(s) if s.override_time_periods => {
            non_empty_periods(&s.time_periods, &format!("season '{}'", s.name))?
        }
        _ => config.time_periods.clone(),
    };

    let twilight = resolve_twilight(
        date,
        &twilight_settings,
        season.and_then(|s| s.twilight_time),
        None,
        sunset,
    );

    let schedule = EffectiveSchedule {
        date,
        day_kind,
        first_tee,
        last_tee,
        booking_mode,
        twilight,
        booking_window_days,
        is_closed: false,
        is_holiday: special_day.is_some_and(|d| d.day_type == SpecialDayType::Holiday),
        active_season: season.cloned(),
        active_special_day: special_day.cloned(),
        time_periods: sorted(time_periods),
    };
    check_schedule(&schedule)?;
    Ok(schedule)
}

/// Pick the special day governing `date`.
///
/// A `CLOSED` match always wins. Otherwise the highest `priority` wins, and
/// among equal priorities the first in input order.
pub fn select_special_day(special_days: &[SpecialDay], date: NaiveDate) -> Option<&SpecialDay> {
    let mut best: Option<&SpecialDay> = None;
    for day in special_days.iter().filter(|d| d.matches(date)) {
        if day.day_type == SpecialDayType::Closed {
            return Some(day);
        }
        match best {
            Some(current) if day.priority <= current.priority => {}
            _ => best = Some(day),
        }
    }
    best
}

/// Pick the single highest-priority season matching `date`.
///
/// # Errors
///
/// [`TeeSheetError::ResolutionAmbiguity`] when several matching seasons share
/// the highest priority.
pub fn select_season(seasons: &[Season], date: NaiveDate) -> Result<Option<&Season>> {
    let matching: Vec<&Season> = seasons.iter().filter(|s| s.matches(date)).collect();
    let Some(top) = matching.iter().map(|s| s.priority).max() else {
        return Ok(None);
    };

    let winners: Vec<&Season> = matching.into_iter().filter(|s| s.priority == top).collect();
    if winners.len() > 1 {
        let names: Vec<&str> = winners.iter().map(|s| s.name.as_str()).collect();
        return Err(TeeSheetError::ResolutionAmbiguity(format!(
            "seasons {} all match {} with priority {}",
            names.join(", "),
            date,
            top
        )));
    }
    Ok(winners.into_iter().next())
}

fn closed_schedule(
    config: &BaseScheduleConfig,
    day: &SpecialDay,
    date: NaiveDate,
    day_kind: DayKind,
) -> EffectiveSchedule {
    EffectiveSchedule {
        date,
        day_kind,
        first_tee: config.first_tee(day_kind),
        last_tee: config.last_tee(day_kind),
        booking_mode: config.booking_mode(day_kind),
        twilight: ResolvedTwilight {
            time: config.default_twilight_time,
            source: TwilightSource::Fixed,
            is_fallback: false,
        },
        booking_window_days: config.booking_window_days,
        is_closed: true,
        is_holiday: false,
        active_season: None,
        active_special_day: Some(day.clone()),
        time_periods: Vec::new(),
    }
}

fn custom_schedule(
    config: &BaseScheduleConfig,
    day: &SpecialDay,
    date: NaiveDate,
    day_kind: DayKind,
    twilight_settings: &TwilightSettings,
    sunset: &dyn SunsetProvider,
) -> Result<EffectiveSchedule> {
    let time_periods = match &day.custom_time_periods {
        Some(periods) => non_empty_periods(periods, &format!("special day '{}'", day.name))?,
        None => config.time_periods.clone(),
    };

    let schedule = EffectiveSchedule {
        date,
        day_kind,
        first_tee: day.first_tee.unwrap_or_else(|| config.first_tee(day_kind)),
        last_tee: day.last_tee.unwrap_or_else(|| config.last_tee(day_kind)),
        booking_mode: day
            .booking_mode
            .unwrap_or_else(|| config.booking_mode(day_kind)),
        twilight: resolve_twilight(date, twilight_settings, None, day.twilight_time, sunset),
        booking_window_days: config.booking_window_days,
        is_closed: false,
        is_holiday: false,
        active_season: None,
        active_special_day: Some(day.clone()),
        time_periods: sorted(time_periods),
    };
    check_schedule(&schedule)?;
    Ok(schedule)
}

fn non_empty_periods(periods: &[TimePeriod], owner: &str) -> Result<Vec<TimePeriod>> {
    if periods.is_empty() {
        return Err(TeeSheetError::Configuration(format!(
            "{} replaces the time periods with an empty list",
            owner
        )));
    }
    Ok(periods.to_vec())
}

fn sorted(mut periods: Vec<TimePeriod>) -> Vec<TimePeriod> {
    periods.sort_by_key(|p| p.sort_order);
    periods
}

fn check_schedule(schedule: &EffectiveSchedule) -> Result<()> {
    if schedule.first_tee >= schedule.last_tee {
        return Err(TeeSheetError::Configuration(format!(
            "{}: first tee {} is not before last tee {}",
            schedule.date, schedule.first_tee, schedule.last_tee
        )));
    }
    for period in &schedule.time_periods {
        period.check()?;
    }
    Ok(())
}
