//! Tee-time slot generation from an [`EffectiveSchedule`].
//!
//! Periods applying to the schedule's day kind are walked in `sort_order`.
//! Each period covers `[start, end)` where `end` is, in order:
//!
//! - its own `end_time`,
//! - the next applicable period's `start_time`,
//! - the resolved last tee, which is itself bookable (inclusive).
//!
//! Within its window a period emits one slot every `interval_minutes`,
//! starting at its start time or the first tee, whichever is later, and never
//! past the last tee.
//!
//! Periods are expected to be adjacent. If an explicit `end_time` runs into a
//! later period, the later period (in sort order) owns the overlapping
//! minutes and the earlier period's slots there are dropped. Two periods with
//! the same `sort_order` and overlapping windows have no defined winner and
//! are rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, TeeSheetError};
use crate::model::{DayKind, TimePeriod};
use crate::resolver::EffectiveSchedule;

/// One bookable tee time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeeTimeSlot {
    pub time: ClockTime,
    /// Name of the period that produced this slot.
    pub period_name: String,
    pub interval_minutes: u32,
    pub is_prime_time: bool,
    /// `time` is at or after the resolved twilight time.
    pub is_twilight: bool,
}

/// The minutes a period owns, as `[start, end)` in minutes since midnight.
#[derive(Debug)]
pub(crate) struct PeriodWindow<'a> {
    period: &'a TimePeriod,
    start: u32,
    end: u32,
}

impl PeriodWindow<'_> {
    fn covers(&self, time: ClockTime) -> bool {
        let m = time.minutes_since_midnight();
        self.start <= m && m < self.end
    }

    fn overlaps(&self, other: &PeriodWindow<'_>) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Generate the ordered tee sheet for a resolved schedule.
///
/// Returns an empty list for closed days. Slots are strictly increasing in
/// time and all lie within `[first_tee, last_tee]`.
///
/// # Errors
///
/// Returns [`TeeSheetError::Configuration`] for a period with an interval
/// outside 5–20 minutes or an end not after its start, and for two
/// applicable periods sharing a `sort_order` whose windows overlap.
pub fn generate_slots(schedule: &EffectiveSchedule) -> Result<Vec<TeeTimeSlot>> {
    if schedule.is_closed {
        return Ok(Vec::new());
    }

    let active = applicable_periods(&schedule.time_periods, schedule.day_kind);
    for period in &active {
        period.check()?;
    }

    // The final open-ended period runs through the last tee.
    let windows = period_windows(&active, schedule.last_tee.minutes_since_midnight() + 1);
    if let Some((a, b)) = ambiguous_pairs(&windows).first() {
        return Err(TeeSheetError::Configuration(format!(
            "periods '{}' and '{}' share sort order {} and overlap",
            a.name, b.name, a.sort_order
        )));
    }

    let twilight = schedule.twilight_time();
    let mut sheet: BTreeMap<ClockTime, TeeTimeSlot> = BTreeMap::new();

    for window in &windows {
        sheet.retain(|time, _| !window.covers(*time));

        let mut cursor = Some(window.period.start_time.max(schedule.first_tee));
        while let Some(time) = cursor {
            if !window.covers(time) || time > schedule.last_tee {
                break;
            }
            sheet.insert(
                time,
                TeeTimeSlot {
                    time,
                    period_name: window.period.name.clone(),
                    interval_minutes: window.period.interval_minutes,
                    is_prime_time: window.period.is_prime_time,
                    is_twilight: time >= twilight,
                },
            );
            cursor = time.add_minutes(window.period.interval_minutes);
        }
    }

    Ok(sheet.into_values().collect())
}

/// Periods applying to `kind`, stably sorted by `sort_order`.
pub(crate) fn applicable_periods(periods: &[TimePeriod], kind: DayKind) -> Vec<&TimePeriod> {
    let mut active: Vec<&TimePeriod> = periods
        .iter()
        .filter(|p| p.applicable_days.matches(kind))
        .collect();
    active.sort_by_key(|p| p.sort_order);
    active
}

/// An open-ended period ends at the next period's start, or at `day_end`
/// (exclusive) when it is the last one.
pub(crate) fn period_windows<'a>(active: &[&'a TimePeriod], day_end: u32) -> Vec<PeriodWindow<'a>> {
    active
        .iter()
        .enumerate()
        .map(|(i, period)| {
            let end = match (period.end_time, active.get(i + 1)) {
                (Some(end), _) => end.minutes_since_midnight(),
                (None, Some(next)) => next.start_time.minutes_since_midnight(),
                (None, None) => day_end,
            };
            PeriodWindow {
                period,
                start: period.start_time.minutes_since_midnight(),
                end,
            }
        })
        .collect()
}

/// Pairs sharing a `sort_order` whose windows overlap, in window order.
pub(crate) fn ambiguous_pairs<'a>(
    windows: &[PeriodWindow<'a>],
) -> Vec<(&'a TimePeriod, &'a TimePeriod)> {
    let mut pairs = Vec::new();
    for (i, a) in windows.iter().enumerate() {
        for b in &windows[i + 1..] {
            if a.period.sort_order == b.period.sort_order && a.overlaps(b) {
                pairs.push((a.period, b.period));
            }
        }
    }
    pairs
}
