//! Schedule preview: the resolved schedule, its tee sheet and summary counts.
//!
//! This is the unit consumed by callers such as an admin preview panel or an
//! availability API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{BaseScheduleConfig, Season, SpecialDay};
use crate::resolver::{resolve_effective_schedule_with, EffectiveSchedule};
use crate::slots::{generate_slots, TeeTimeSlot};
use crate::twilight::{NoSunsetProvider, SunsetProvider};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResult {
    pub schedule: EffectiveSchedule,
    pub slots: Vec<TeeTimeSlot>,
    pub total_slots: u32,
    /// `total_slots * max_players_per_slot`, doubled in cross mode. Wide
    /// enough that no per-slot count can overflow it.
    pub max_players: u64,
    pub prime_time_slots: u32,
    /// Rounded to the nearest whole percent; 0 when there are no slots.
    pub prime_time_percentage: u32,
    pub twilight_slots: u32,
}

/// Resolve and generate the tee sheet for `date`, with summary statistics.
///
/// Sunset-mode courses fall back to their fixed twilight default; use
/// [`assemble_preview_with`] to supply sunset times.
pub fn assemble_preview(
    config: &BaseScheduleConfig,
    seasons: &[Season],
    special_days: &[SpecialDay],
    date: NaiveDate,
    max_players_per_slot: u32,
) -> Result<PreviewResult> {
    assemble_preview_with(
        config,
        seasons,
        special_days,
        date,
        max_players_per_slot,
        &NoSunsetProvider,
    )
}

pub fn assemble_preview_with(
    config: &BaseScheduleConfig,
    seasons: &[Season],
    special_days: &[SpecialDay],
    date: NaiveDate,
    max_players_per_slot: u32,
    sunset: &dyn SunsetProvider,
) -> Result<PreviewResult> {
    let schedule = resolve_effective_schedule_with(config, seasons, special_days, date, sunset)?;
    let slots = generate_slots(&schedule)?;
    Ok(summarize(schedule, slots, max_players_per_slot))
}

/// Attach summary counts to an already generated tee sheet.
pub fn summarize(
    schedule: EffectiveSchedule,
    slots: Vec<TeeTimeSlot>,
    max_players_per_slot: u32,
) -> PreviewResult {
    let total_slots = slots.len() as u32;
    let prime_time_slots = slots.iter().filter(|s| s.is_prime_time).count() as u32;
    let twilight_slots = slots.iter().filter(|s| s.is_twilight).count() as u32;
    let max_players = u64::from(total_slots)
        * u64::from(max_players_per_slot)
        * u64::from(schedule.booking_mode.starting_points());

    PreviewResult {
        schedule,
        slots,
        total_slots,
        max_players,
        prime_time_slots,
        prime_time_percentage: rounded_percentage(prime_time_slots, total_slots),
        twilight_slots,
    }
}

/// `round(100 * part / whole)`, half rounding up, 0 for an empty whole.
fn rounded_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((200 * part + whole) / (2 * whole)) as u32
}
