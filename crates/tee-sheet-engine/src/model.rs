//! Course configuration entities: base weekly schedule, time periods, seasons
//! and special days.
//!
//! Every override is an `Option<T>` where `None` means "inherit". Nothing here
//! uses sentinel values.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::date_range::{DateRange, MonthDay};
use crate::error::{Result, TeeSheetError};

/// Shortest allowed gap between consecutive tee times, in minutes.
pub const MIN_INTERVAL_MINUTES: u32 = 5;
/// Longest allowed gap between consecutive tee times, in minutes.
pub const MAX_INTERVAL_MINUTES: u32 = 20;

const DEFAULT_BOOKING_WINDOW_DAYS: u32 = 7;

/// How groups start their round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingMode {
    /// Single start at hole 1.
    #[default]
    Eighteen,
    /// Dual start at holes 1 and 10.
    Cross,
}

impl BookingMode {
    /// Number of simultaneous starting holes per tee time.
    pub fn starting_points(&self) -> u32 {
        match self {
            BookingMode::Eighteen => 1,
            BookingMode::Cross => 2,
        }
    }
}

/// Where the default twilight time comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TwilightMode {
    #[default]
    Fixed,
    /// A fixed number of minutes before the course's sunset.
    Sunset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayKind {
    Weekday,
    Weekend,
}

impl DayKind {
    /// Saturday and Sunday are weekend days.
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayKind::Weekend,
            _ => DayKind::Weekday,
        }
    }
}

/// Which day kinds a time period applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicableDays {
    #[default]
    All,
    Weekday,
    Weekend,
}

impl ApplicableDays {
    pub fn matches(&self, kind: DayKind) -> bool {
        match self {
            ApplicableDays::All => true,
            ApplicableDays::Weekday => kind == DayKind::Weekday,
            ApplicableDays::Weekend => kind == DayKind::Weekend,
        }
    }
}

/// A band of the day sharing one tee-time interval and pricing flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub name: String,
    pub start_time: ClockTime,
    /// `None` extends the period to the next period's start, or to the last
    /// tee for the final period.
    #[serde(default)]
    pub end_time: Option<ClockTime>,
    pub interval_minutes: u32,
    #[serde(default)]
    pub is_prime_time: bool,
    #[serde(default)]
    pub applicable_days: ApplicableDays,
    #[serde(default)]
    pub sort_order: i32,
}

impl TimePeriod {
    /// An open-ended, non-prime period applying to all days.
    pub fn new(name: impl Into<String>, start_time: ClockTime, interval_minutes: u32) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time: None,
            interval_minutes,
            is_prime_time: false,
            applicable_days: ApplicableDays::All,
            sort_order: 0,
        }
    }

    /// Check the interval range and that an explicit end follows the start.
    pub fn check(&self) -> Result<()> {
        if !(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&self.interval_minutes) {
            return Err(TeeSheetError::Configuration(format!(
                "period '{}': interval {} min is outside {}-{} min",
                self.name, self.interval_minutes, MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES
            )));
        }
        if let Some(end) = self.end_time {
            if end <= self.start_time {
                return Err(TeeSheetError::Configuration(format!(
                    "period '{}': end {} is not after start {}",
                    self.name, end, self.start_time
                )));
            }
        }
        Ok(())
    }
}

/// Geographic position of a course, forwarded to the sunset provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// The base weekly operating rules of one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseScheduleConfig {
    pub weekday_first_tee: ClockTime,
    pub weekday_last_tee: ClockTime,
    pub weekend_first_tee: ClockTime,
    pub weekend_last_tee: ClockTime,
    #[serde(default)]
    pub weekday_booking_mode: BookingMode,
    #[serde(default)]
    pub weekend_booking_mode: BookingMode,
    #[serde(default)]
    pub twilight_mode: TwilightMode,
    pub default_twilight_time: ClockTime,
    #[serde(default)]
    pub minutes_before_sunset: u32,
    #[serde(default = "default_booking_window_days")]
    pub booking_window_days: u32,
    #[serde(default)]
    pub time_periods: Vec<TimePeriod>,
    #[serde(default)]
    pub location: Option<GeoLocation>,
}

fn default_booking_window_days() -> u32 {
    DEFAULT_BOOKING_WINDOW_DAYS
}

impl BaseScheduleConfig {
    pub fn first_tee(&self, kind: DayKind) -> ClockTime {
        match kind {
            DayKind::Weekday => self.weekday_first_tee,
            DayKind::Weekend => self.weekend_first_tee,
        }
    }

    pub fn last_tee(&self, kind: DayKind) -> ClockTime {
        match kind {
            DayKind::Weekday => self.weekday_last_tee,
            DayKind::Weekend => self.weekend_last_tee,
        }
    }

    pub fn booking_mode(&self, kind: DayKind) -> BookingMode {
        match kind {
            DayKind::Weekday => self.weekday_booking_mode,
            DayKind::Weekend => self.weekend_booking_mode,
        }
    }
}

/// A date range with its own priority and optional overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    pub start: MonthDay,
    pub end: MonthDay,
    #[serde(default = "default_true")]
    pub is_recurring: bool,
    /// Only consulted when `is_recurring` is false. Without it a season
    /// recurs by month/day regardless of the flag.
    #[serde(default)]
    pub year: Option<i32>,
    /// Higher wins when several seasons match a date.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub first_tee: Option<ClockTime>,
    #[serde(default)]
    pub last_tee: Option<ClockTime>,
    #[serde(default)]
    pub twilight_time: Option<ClockTime>,
    #[serde(default)]
    pub booking_window_days: Option<u32>,
    #[serde(default)]
    pub weekday_booking_mode: Option<BookingMode>,
    #[serde(default)]
    pub weekend_booking_mode: Option<BookingMode>,
    /// When set, `time_periods` replaces the base list entirely.
    #[serde(default)]
    pub override_time_periods: bool,
    #[serde(default)]
    pub time_periods: Vec<TimePeriod>,
}

fn default_true() -> bool {
    true
}

impl Season {
    /// A recurring season with no overrides.
    pub fn new(name: impl Into<String>, start: MonthDay, end: MonthDay, priority: i32) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            is_recurring: true,
            year: None,
            priority,
            first_tee: None,
            last_tee: None,
            twilight_time: None,
            booking_window_days: None,
            weekday_booking_mode: None,
            weekend_booking_mode: None,
            override_time_periods: false,
            time_periods: Vec::new(),
        }
    }

    pub fn date_range(&self) -> DateRange {
        match (self.is_recurring, self.year) {
            (false, Some(year)) => DateRange::SeasonYear {
                start: self.start,
                end: self.end,
                year,
            },
            _ => DateRange::Recurring {
                start: self.start,
                end: self.end,
            },
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.date_range().contains(date)
    }

    pub fn booking_mode(&self, kind: DayKind) -> Option<BookingMode> {
        match kind {
            DayKind::Weekday => self.weekday_booking_mode,
            DayKind::Weekend => self.weekend_booking_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialDayType {
    /// Adopt weekend hours.
    Weekend,
    /// Adopt weekend hours and mark the day for holiday pricing.
    Holiday,
    /// No tee times at all.
    Closed,
    /// Explicit override hours.
    Custom,
}

/// A calendar-specific override outranking seasons and the base schedule.
///
/// Serialized with `start_date`/`end_date` strings, `MM-DD` when
/// `is_recurring` and `YYYY-MM-DD` otherwise. The strings are parsed once on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpecialDayRecord", into = "SpecialDayRecord")]
pub struct SpecialDay {
    pub name: String,
    /// Either [`DateRange::Recurring`] or [`DateRange::Fixed`].
    pub range: DateRange,
    pub day_type: SpecialDayType,
    /// Tie-break between several matching non-closed special days.
    pub priority: i32,
    pub first_tee: Option<ClockTime>,
    pub last_tee: Option<ClockTime>,
    pub booking_mode: Option<BookingMode>,
    pub twilight_time: Option<ClockTime>,
    pub custom_time_periods: Option<Vec<TimePeriod>>,
}

impl SpecialDay {
    fn with_range(name: impl Into<String>, range: DateRange, day_type: SpecialDayType) -> Self {
        Self {
            name: name.into(),
            range,
            day_type,
            priority: 0,
            first_tee: None,
            last_tee: None,
            booking_mode: None,
            twilight_time: None,
            custom_time_periods: None,
        }
    }

    /// A special day on the same month/day range every year.
    pub fn recurring(
        name: impl Into<String>,
        start: MonthDay,
        end: MonthDay,
        day_type: SpecialDayType,
    ) -> Self {
        Self::with_range(name, DateRange::Recurring { start, end }, day_type)
    }

    /// A special day on a fixed, inclusive date range.
    pub fn fixed(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        day_type: SpecialDayType,
    ) -> Result<Self> {
        if end < start {
            return Err(TeeSheetError::InvalidDate(format!(
                "special day '{}': end {} is before start {}",
                name.into(),
                end,
                start
            )));
        }
        Ok(Self::with_range(name, DateRange::Fixed { start, end }, day_type))
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.range.contains(date)
    }

    pub fn is_recurring(&self) -> bool {
        self.range.is_recurring()
    }
}

/// Wire shape of a [`SpecialDay`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpecialDayRecord {
    name: String,
    start_date: String,
    end_date: String,
    #[serde(default)]
    is_recurring: bool,
    #[serde(rename = "type")]
    day_type: SpecialDayType,
    #[serde(default)]
    priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_tee: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_tee: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    booking_mode: Option<BookingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    twilight_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_time_periods: Option<Vec<TimePeriod>>,
}

impl TryFrom<SpecialDayRecord> for SpecialDay {
    type Error = TeeSheetError;

    fn try_from(r: SpecialDayRecord) -> Result<Self> {
        let mut day = if r.is_recurring {
            SpecialDay::recurring(
                r.name,
                r.start_date.parse()?,
                r.end_date.parse()?,
                r.day_type,
            )
        } else {
            SpecialDay::fixed(
                r.name,
                parse_full_date(&r.start_date)?,
                parse_full_date(&r.end_date)?,
                r.day_type,
            )?
        };
        day.priority = r.priority;
        day.first_tee = r.first_tee;
        day.last_tee = r.last_tee;
        day.booking_mode = r.booking_mode;
        day.twilight_time = r.twilight_time;
        day.custom_time_periods = r.custom_time_periods;
        Ok(day)
    }
}

impl From<SpecialDay> for SpecialDayRecord {
    fn from(d: SpecialDay) -> Self {
        let (start_date, end_date, is_recurring) = match d.range {
            DateRange::Fixed { start, end } => (start.to_string(), end.to_string(), false),
            DateRange::Recurring { start, end } | DateRange::SeasonYear { start, end, .. } => {
                (start.to_string(), end.to_string(), true)
            }
        };
        Self {
            name: d.name,
            start_date,
            end_date,
            is_recurring,
            day_type: d.day_type,
            priority: d.priority,
            first_tee: d.first_tee,
            last_tee: d.last_tee,
            booking_mode: d.booking_mode,
            twilight_time: d.twilight_time,
            custom_time_periods: d.custom_time_periods,
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_full_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| TeeSheetError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Everything needed to resolve a course's tee sheet: one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSchedule {
    pub config: BaseScheduleConfig,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub special_days: Vec<SpecialDay>,
}

impl CourseSchedule {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
