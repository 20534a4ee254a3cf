//! Twilight start-time resolution.
//!
//! Twilight is the time after which reduced rates typically apply. The
//! resolved time comes from, in order of precedence:
//!
//! 1. a `CUSTOM` special day's twilight override,
//! 2. the active season's twilight override,
//! 3. the course's [`TwilightMode`]: the fixed default, or sunset minus a
//!    configured number of minutes.
//!
//! Sunset lookup is delegated to a [`SunsetProvider`]. A failing provider is
//! never an error: the resolver falls back to the fixed default and records
//! the fallback in [`ResolvedTwilight::is_fallback`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::ClockTime;
use crate::model::{BaseScheduleConfig, GeoLocation, TwilightMode};

/// Why a sunset lookup produced no time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SunsetError {
    #[error("no sunset data for {0}")]
    Unavailable(NaiveDate),

    #[error("sunset lookup timed out")]
    Timeout,

    #[error("sunset lookup failed: {0}")]
    Provider(String),
}

/// Source of astronomical sunset times.
///
/// Implementations may block; they are expected to enforce their own short
/// timeout and return [`SunsetError::Timeout`] rather than hang.
pub trait SunsetProvider {
    fn sunset(
        &self,
        date: NaiveDate,
        location: Option<&GeoLocation>,
    ) -> Result<ClockTime, SunsetError>;
}

/// A provider with no data. Every `SUNSET` lookup falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSunsetProvider;

impl SunsetProvider for NoSunsetProvider {
    fn sunset(&self, date: NaiveDate, _: Option<&GeoLocation>) -> Result<ClockTime, SunsetError> {
        Err(SunsetError::Unavailable(date))
    }
}

/// Precomputed sunset times keyed by date, e.g. `{"2026-06-21": "21:04"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SunsetTable {
    entries: BTreeMap<NaiveDate, ClockTime>,
}

impl SunsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, sunset: ClockTime) {
        self.entries.insert(date, sunset);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(NaiveDate, ClockTime)> for SunsetTable {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, ClockTime)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl SunsetProvider for SunsetTable {
    fn sunset(&self, date: NaiveDate, _: Option<&GeoLocation>) -> Result<ClockTime, SunsetError> {
        self.entries
            .get(&date)
            .copied()
            .ok_or(SunsetError::Unavailable(date))
    }
}

impl<F> SunsetProvider for F
where
    F: Fn(NaiveDate) -> Option<ClockTime>,
{
    fn sunset(&self, date: NaiveDate, _: Option<&GeoLocation>) -> Result<ClockTime, SunsetError> {
        self(date).ok_or(SunsetError::Unavailable(date))
    }
}

/// The twilight inputs taken from a course's base configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwilightSettings {
    pub mode: TwilightMode,
    pub fixed_default: ClockTime,
    pub minutes_before_sunset: u32,
    pub location: Option<GeoLocation>,
}

impl From<&BaseScheduleConfig> for TwilightSettings {
    fn from(config: &BaseScheduleConfig) -> Self {
        Self {
            mode: config.twilight_mode,
            fixed_default: config.default_twilight_time,
            minutes_before_sunset: config.minutes_before_sunset,
            location: config.location,
        }
    }
}

/// Which rule produced a twilight time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TwilightSource {
    SpecialDay,
    Season,
    Fixed,
    Sunset,
    /// Sunset mode, but the provider had no answer.
    SunsetFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTwilight {
    pub time: ClockTime,
    pub source: TwilightSource,
    pub is_fallback: bool,
}

impl ResolvedTwilight {
    fn from_source(time: ClockTime, source: TwilightSource) -> Self {
        Self {
            time,
            source,
            is_fallback: source == TwilightSource::SunsetFallback,
        }
    }
}

/// Resolve the twilight start time for `date`.
///
/// `special_day_override` must only be passed for `CUSTOM` special days; the
/// schedule resolver enforces this.
pub fn resolve_twilight(
    date: NaiveDate,
    settings: &TwilightSettings,
    season_override: Option<ClockTime>,
    special_day_override: Option<ClockTime>,
    provider: &dyn SunsetProvider,
) -> ResolvedTwilight {
    if let Some(time) = special_day_override {
        return ResolvedTwilight::from_source(time, TwilightSource::SpecialDay);
    }
    if let Some(time) = season_override {
        return ResolvedTwilight::from_source(time, TwilightSource::Season);
    }

    match settings.mode {
        TwilightMode::Fixed => {
            ResolvedTwilight::from_source(settings.fixed_default, TwilightSource::Fixed)
        }
        TwilightMode::Sunset => match provider.sunset(date, settings.location.as_ref()) {
            Ok(sunset) => match sunset.sub_minutes(settings.minutes_before_sunset) {
                Some(time) => ResolvedTwilight::from_source(time, TwilightSource::Sunset),
                None => {
                    tracing::warn!(
                        %date,
                        %sunset,
                        minutes_before_sunset = settings.minutes_before_sunset,
                        "twilight offset crosses midnight, using fixed default"
                    );
                    ResolvedTwilight::from_source(
                        settings.fixed_default,
                        TwilightSource::SunsetFallback,
                    )
                }
            },
            Err(e) => {
                tracing::warn!(%date, error = %e, "sunset lookup failed, using fixed default twilight");
                ResolvedTwilight::from_source(settings.fixed_default, TwilightSource::SunsetFallback)
            }
        },
    }
}
