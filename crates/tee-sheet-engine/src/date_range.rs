//! Calendar date-range matching for seasons and special days.
//!
//! Three kinds of range exist:
//!
//! - **Recurring** month/day ranges (`11-01` → `02-28`) match every year and
//!   may wrap across the year boundary.
//! - **Season-year** month/day ranges are a recurring range pinned to one
//!   season year. For a wrapping range the tail (`≤ end`) falls in `year + 1`.
//! - **Fixed** ranges compare full dates, inclusive on both ends. No
//!   wraparound applies.
//!
//! February 29 is matched literally: a single-day `02-29` range never matches
//! in a non-leap year.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TeeSheetError};

/// A month/day pair, serialized as `"MM-DD"`. Ordered by month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Validates against a leap year, so `(2, 29)` is accepted.
    pub fn new(month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(2024, month, day)
            .map(|_| Self { month, day })
            .ok_or_else(|| TeeSheetError::InvalidDate(format!("no such month/day: {month:02}-{day:02}")))
    }

    /// The month/day of a concrete date.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl FromStr for MonthDay {
    type Err = TeeSheetError;

    fn from_str(s: &str) -> Result<Self> {
        let (m, d) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| TeeSheetError::InvalidDate(format!("'{}' is not MM-DD", s)))?;
        let month: u32 = m
            .parse()
            .map_err(|_| TeeSheetError::InvalidDate(format!("'{}' is not MM-DD", s)))?;
        let day: u32 = d
            .parse()
            .map_err(|_| TeeSheetError::InvalidDate(format!("'{}' is not MM-DD", s)))?;
        Self::new(month, day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether `date`'s month/day lies in `[start, end]`, ignoring the year.
///
/// When `start > end` the range wraps the year boundary and matches dates on
/// or after `start` or on or before `end`.
pub fn matches_month_day_range(date: NaiveDate, start: MonthDay, end: MonthDay) -> bool {
    let md = MonthDay::of(date);
    if start <= end {
        start <= md && md <= end
    } else {
        md >= start || md <= end
    }
}

/// Like [`matches_month_day_range`], restricted to the season that begins in `year`.
pub fn matches_season_year(date: NaiveDate, start: MonthDay, end: MonthDay, year: i32) -> bool {
    let md = MonthDay::of(date);
    if start <= end {
        date.year() == year && start <= md && md <= end
    } else {
        (date.year() == year && md >= start)
            || (year.checked_add(1) == Some(date.year()) && md <= end)
    }
}

/// Inclusive full-date comparison.
pub fn matches_fixed_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

/// A typed date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Recurring { start: MonthDay, end: MonthDay },
    SeasonYear { start: MonthDay, end: MonthDay, year: i32 },
    Fixed { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateRange::Recurring { start, end } => matches_month_day_range(date, start, end),
            DateRange::SeasonYear { start, end, year } => matches_season_year(date, start, end, year),
            DateRange::Fixed { start, end } => matches_fixed_range(date, start, end),
        }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, DateRange::Recurring { .. })
    }

    /// Whether the range crosses December 31st.
    pub fn wraps_year(&self) -> bool {
        match *self {
            DateRange::Recurring { start, end } | DateRange::SeasonYear { start, end, .. } => {
                start > end
            }
            DateRange::Fixed { start, end } => start.year() != end.year(),
        }
    }

    /// Whether at least one calendar date lies in both ranges.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        if let (DateRange::Fixed { start: a0, end: a1 }, DateRange::Fixed { start: b0, end: b1 }) =
            (self, other)
        {
            return a0 <= b1 && b0 <= a1;
        }
        // Probe the narrower range's dates against the wider one.
        let (probe, target) = if self.is_recurring() {
            (other, self)
        } else {
            (self, other)
        };
        let (from, to) = probe.probe_window();
        let mut day = from;
        while day <= to {
            if probe.contains(day) && target.contains(day) {
                return true;
            }
            match day.checked_add_days(Days::new(1)) {
                Some(next) => day = next,
                None => break,
            }
        }
        false
    }

    /// A window guaranteed to hold every date this range can match at least once.
    fn probe_window(&self) -> (NaiveDate, NaiveDate) {
        let ymd = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
        match *self {
            // A leap year contains every month/day, and a wrapping range's two
            // halves both fall inside one calendar year.
            DateRange::Recurring { .. } => (ymd(2024, 1, 1), ymd(2024, 12, 31)),
            // Unrepresentable years collapse to a window no date falls in.
            DateRange::SeasonYear { year, .. } => {
                (ymd(year, 1, 1), ymd(year.saturating_add(1), 12, 31))
            }
            DateRange::Fixed { start, end } => {
                // Recurring targets repeat yearly; one leap year plus slack is enough.
                let capped = start.checked_add_days(Days::new(366 * 4)).unwrap_or(end);
                (start, end.min(capped))
            }
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRange::Recurring { start, end } => write!(f, "{start} → {end} (every year)"),
            DateRange::SeasonYear { start, end, year } => write!(f, "{start} → {end} ({year})"),
            DateRange::Fixed { start, end } => write!(f, "{start} → {end}"),
        }
    }
}
