//! # tee-sheet-engine
//!
//! Deterministic golf tee-time schedule resolution and slot generation.
//!
//! Given a course's base weekly operating rules, any number of seasons and
//! special days, the engine computes the effective rules for a calendar date
//! and materializes the ordered list of bookable tee times with their
//! prime-time and twilight flags. Every function is a pure function of its
//! inputs; the only pluggable dependency is a [`SunsetProvider`] for courses
//! whose twilight follows sunset.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tee_sheet_engine::{assemble_preview, CourseSchedule};
//!
//! let course = CourseSchedule::from_json(r#"{
//!     "config": {
//!         "weekday_first_tee": "06:00", "weekday_last_tee": "17:00",
//!         "weekend_first_tee": "05:30", "weekend_last_tee": "17:30",
//!         "default_twilight_time": "15:00",
//!         "time_periods": [
//!             { "name": "Day", "start_time": "06:00", "interval_minutes": 8 }
//!         ]
//!     }
//! }"#).unwrap();
//!
//! let wednesday = NaiveDate::from_ymd_opt(2026, 3, 18).unwrap();
//! let preview = assemble_preview(&course.config, &course.seasons, &course.special_days, wednesday, 4).unwrap();
//! assert_eq!(preview.slots[0].time.to_string(), "06:00");
//! assert_eq!(preview.slots[1].time.to_string(), "06:08");
//! assert_eq!(preview.prime_time_slots, 0);
//! ```
//!
//! ## Modules
//!
//! - [`clock`] — `ClockTime`, minute-precision time of day
//! - [`date_range`] — recurring, season-year and fixed date-range matching
//! - [`model`] — base config, time periods, seasons, special days
//! - [`twilight`] — twilight resolution and sunset providers
//! - [`resolver`] — base + season + special day → `EffectiveSchedule`
//! - [`slots`] — `EffectiveSchedule` → ordered `TeeTimeSlot`s
//! - [`preview`] — tee sheet plus summary statistics
//! - [`calendar`] — per-day summaries over a date range
//! - [`validation`] — write-time configuration checks
//! - [`error`] — Error types

pub mod calendar;
pub mod clock;
pub mod date_range;
pub mod error;
pub mod model;
pub mod preview;
pub mod resolver;
pub mod slots;
pub mod twilight;
pub mod validation;

pub use calendar::{summarize_calendar, summarize_calendar_with, DaySummary};
pub use clock::ClockTime;
pub use date_range::{matches_month_day_range, DateRange, MonthDay};
pub use error::TeeSheetError;
pub use model::{
    ApplicableDays, BaseScheduleConfig, BookingMode, CourseSchedule, DayKind, GeoLocation, Season,
    SpecialDay, SpecialDayType, TimePeriod, TwilightMode,
};
pub use preview::{assemble_preview, assemble_preview_with, PreviewResult};
pub use resolver::{resolve_effective_schedule, resolve_effective_schedule_with, EffectiveSchedule};
pub use slots::{generate_slots, TeeTimeSlot};
pub use twilight::{
    resolve_twilight, NoSunsetProvider, ResolvedTwilight, SunsetError, SunsetProvider, SunsetTable,
    TwilightSource,
};
pub use validation::{ensure_valid, validate_course, ValidationIssue};
