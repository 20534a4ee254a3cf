//! Write-time validation of a course's schedule configuration.
//!
//! [`validate_course`] collects every issue instead of stopping at the first,
//! so a management screen can show them all at once. The resolver repeats the
//! checks that matter for a single date at read time.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::{Result, TeeSheetError};
use crate::model::{
    BaseScheduleConfig, DayKind, Season, SpecialDay, SpecialDayType, TimePeriod,
};
use crate::slots::{ambiguous_pairs, applicable_periods, period_windows};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// One problem found in a course configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// What the issue is about, e.g. `season 'Winter'`.
    pub entity: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entity, self.message)
    }
}

/// Check a whole course configuration and return every issue found.
pub fn validate_course(
    config: &BaseScheduleConfig,
    seasons: &[Season],
    special_days: &[SpecialDay],
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    validate_base(config, &mut issues);
    for season in seasons {
        validate_season(config, season, &mut issues);
    }
    validate_season_priorities(seasons, &mut issues);
    for day in special_days {
        validate_special_day(config, day, &mut issues);
    }
    issues
}

/// Like [`validate_course`], failing with [`TeeSheetError::Validation`] on any issue.
pub fn ensure_valid(
    config: &BaseScheduleConfig,
    seasons: &[Season],
    special_days: &[SpecialDay],
) -> Result<()> {
    let issues = validate_course(config, seasons, special_days);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(TeeSheetError::Validation(issues))
    }
}

fn validate_base(config: &BaseScheduleConfig, issues: &mut Vec<ValidationIssue>) {
    for kind in [DayKind::Weekday, DayKind::Weekend] {
        let (first, last) = (config.first_tee(kind), config.last_tee(kind));
        if first >= last {
            issues.push(ValidationIssue::new(
                "config",
                format!("{} first tee {} is not before last tee {}", kind_label(kind), first, last),
            ));
        }
    }
    if config.minutes_before_sunset >= MINUTES_PER_DAY {
        issues.push(ValidationIssue::new(
            "config",
            format!("{} minutes before sunset exceeds a day", config.minutes_before_sunset),
        ));
    }
    if config.booking_window_days == 0 {
        issues.push(ValidationIssue::new("config", "booking window must be at least 1 day"));
    }
    validate_periods("config", &config.time_periods, issues);
}

fn validate_season(config: &BaseScheduleConfig, season: &Season, issues: &mut Vec<ValidationIssue>) {
    let entity = format!("season '{}'", season.name);

    for kind in [DayKind::Weekday, DayKind::Weekend] {
        let first = season.first_tee.unwrap_or_else(|| config.first_tee(kind));
        let last = season.last_tee.unwrap_or_else(|| config.last_tee(kind));
        if first >= last {
            issues.push(ValidationIssue::new(
                entity.clone(),
                format!("{} first tee {} is not before last tee {}", kind_label(kind), first, last),
            ));
        }
    }
    if let DateRange::SeasonYear { year, .. } = season.date_range() {
        // The wrapping tail lands in the following year.
        let representable = year
            .checked_add(1)
            .and_then(|next| NaiveDate::from_ymd_opt(next, 12, 31))
            .is_some();
        if !representable {
            issues.push(ValidationIssue::new(entity.clone(), format!("year {year} is out of range")));
        }
    }
    if season.booking_window_days == Some(0) {
        issues.push(ValidationIssue::new(entity.clone(), "booking window must be at least 1 day"));
    }
    if season.override_time_periods {
        if season.time_periods.is_empty() {
            issues.push(ValidationIssue::new(
                entity.clone(),
                "overrides time periods but lists none",
            ));
        }
        validate_periods(&entity, &season.time_periods, issues);
    }
}

/// Equal-priority seasons sharing a calendar day have no deterministic winner.
fn validate_season_priorities(seasons: &[Season], issues: &mut Vec<ValidationIssue>) {
    for (i, a) in seasons.iter().enumerate() {
        for b in &seasons[i + 1..] {
            if a.priority == b.priority && a.date_range().overlaps(&b.date_range()) {
                issues.push(ValidationIssue::new(
                    format!("season '{}'", b.name),
                    format!(
                        "overlaps season '{}' with the same priority {}",
                        a.name, a.priority
                    ),
                ));
            }
        }
    }
}

fn validate_special_day(
    config: &BaseScheduleConfig,
    day: &SpecialDay,
    issues: &mut Vec<ValidationIssue>,
) {
    let entity = format!("special day '{}'", day.name);

    if day.day_type != SpecialDayType::Custom {
        let has_overrides = day.first_tee.is_some()
            || day.last_tee.is_some()
            || day.booking_mode.is_some()
            || day.twilight_time.is_some()
            || day.custom_time_periods.is_some();
        if has_overrides {
            issues.push(ValidationIssue::new(
                entity,
                "only CUSTOM special days may override hours, mode, twilight or periods",
            ));
        }
        return;
    }

    for kind in [DayKind::Weekday, DayKind::Weekend] {
        let first = day.first_tee.unwrap_or_else(|| config.first_tee(kind));
        let last = day.last_tee.unwrap_or_else(|| config.last_tee(kind));
        if first >= last {
            issues.push(ValidationIssue::new(
                entity.clone(),
                format!("{} first tee {} is not before last tee {}", kind_label(kind), first, last),
            ));
        }
    }
    if let Some(periods) = &day.custom_time_periods {
        if periods.is_empty() {
            issues.push(ValidationIssue::new(entity.clone(), "custom time period list is empty"));
        }
        validate_periods(&entity, periods, issues);
    }
}

fn validate_periods(owner: &str, periods: &[TimePeriod], issues: &mut Vec<ValidationIssue>) {
    for period in periods {
        if let Err(e) = period.check() {
            issues.push(ValidationIssue::new(owner, e.to_string()));
        }
    }

    // Windows are built exactly as the generator builds them, per day kind.
    // Without a resolved last tee the final open period runs to midnight.
    for kind in [DayKind::Weekday, DayKind::Weekend] {
        let active = applicable_periods(periods, kind);
        for (a, b) in ambiguous_pairs(&period_windows(&active, MINUTES_PER_DAY)) {
            let issue = ValidationIssue::new(
                owner,
                format!(
                    "periods '{}' and '{}' share sort order {} and overlap",
                    a.name, b.name, a.sort_order
                ),
            );
            if !issues.contains(&issue) {
                issues.push(issue);
            }
        }
    }
}

fn kind_label(kind: DayKind) -> &'static str {
    match kind {
        DayKind::Weekday => "weekday",
        DayKind::Weekend => "weekend",
    }
}
