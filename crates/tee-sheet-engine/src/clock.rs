//! Wall-clock times of day with minute precision.
//!
//! Tee sheets never span midnight, so [`ClockTime`] arithmetic is checked:
//! adding or subtracting minutes that would leave the `00:00..=23:59` day
//! yields `None` instead of wrapping around.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TeeSheetError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day, serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a clock time from hour and minute. Returns `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Build a clock time from the number of minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes >= MINUTES_PER_DAY {
            return None;
        }
        NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    /// `self + minutes`, or `None` past 23:59.
    pub fn add_minutes(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.minutes_since_midnight().checked_add(minutes)?)
    }

    /// `self - minutes`, or `None` before 00:00.
    pub fn sub_minutes(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.minutes_since_midnight().checked_sub(minutes)?)
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl From<NaiveTime> for ClockTime {
    /// Truncates seconds and sub-second precision.
    fn from(t: NaiveTime) -> Self {
        Self(t.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(t))
    }
}

impl FromStr for ClockTime {
    type Err = TeeSheetError;

    /// Accepts `"HH:MM"` and `"HH:MM:SS"` with zero seconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, "%H:%M") {
            return Ok(Self(t));
        }
        match NaiveTime::parse_from_str(trimmed, "%H:%M:%S") {
            Ok(t) if t.second() == 0 => Ok(Self(t)),
            Ok(_) => Err(TeeSheetError::InvalidTime(format!(
                "'{}' has non-zero seconds; tee times have minute precision",
                s
            ))),
            Err(e) => Err(TeeSheetError::InvalidTime(format!("'{}': {}", s, e))),
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
