//! Daily restart schedule arithmetic
//!
//! The schedule is a fixed list of times of day in one configured timezone.
//! [`next_trigger`] is a pure function over a supplied "now" so it can be
//! tested against literal timestamps; nothing in here reads the wall clock.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One daily restart time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub hour: u8,
    pub minute: u8,
}

/// Reject malformed schedules before the orchestrator loop starts. Out-of-range
/// fields, duplicate entries and an empty list are all configuration errors.
pub fn validate_entries(entries: &[ScheduleEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(anyhow!("At least one restart time must be configured"));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if entry.hour > 23 {
            return Err(anyhow!(
                "Restart hour {} is outside valid range 0-23",
                entry.hour
            ));
        }
        if entry.minute > 59 {
            return Err(anyhow!(
                "Restart minute {} is outside valid range 0-59",
                entry.minute
            ));
        }
        if !seen.insert((entry.hour, entry.minute)) {
            return Err(anyhow!(
                "Duplicate restart time {:02}:{:02}",
                entry.hour,
                entry.minute
            ));
        }
    }

    Ok(())
}

/// Earliest upcoming trigger instant across all entries.
///
/// Each entry yields a candidate on `now`'s calendar day (seconds zeroed); a
/// candidate already in the past moves to the same time tomorrow. An exact
/// match with `now` counts as the next trigger. Entries must have passed
/// [`validate_entries`]; an empty list falls back to `now`.
pub fn next_trigger(now: DateTime<Tz>, entries: &[ScheduleEntry]) -> DateTime<Tz> {
    let tz = now.timezone();

    entries
        .iter()
        .map(|entry| {
            let time = NaiveTime::from_hms_opt(
                u32::from(entry.hour.min(23)),
                u32::from(entry.minute.min(59)),
                0,
            )
            .unwrap_or(NaiveTime::MIN);
            let naive = now.date_naive().and_time(time);

            let candidate = resolve_local(tz, naive);
            if candidate < now {
                resolve_local(tz, naive + Duration::days(1))
            } else {
                candidate
            }
        })
        .min()
        .unwrap_or(now)
}

/// Map a local wall-clock time onto an instant in `tz`. An ambiguous time
/// (clocks rolled back) resolves to the earlier instant; a time skipped by a
/// forward transition falls forward minute by minute to the next valid one.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut naive = naive;
    loop {
        if let Some(instant) = tz.from_local_datetime(&naive).earliest() {
            return instant;
        }
        naive += Duration::minutes(1);
    }
}
