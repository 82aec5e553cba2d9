use chrono::{NaiveDateTime, Timelike};

use super::hourly::HourRecord;

pub const HOURS_TO_DISPLAY: usize = 8;

/// Up to `count` records starting at the first one whose hour of day is at
/// or after `now`'s. Falls back to the start of the slice when no record
/// qualifies. Records with unreadable timestamps never qualify as a start.
#[must_use]
pub fn next_hours(records: &[HourRecord], now: NaiveDateTime, count: usize) -> &[HourRecord] {
    let current_hour = now.hour();
    let start = records
        .iter()
        .position(|record| record.hour().is_some_and(|hour| hour >= current_hour))
        .unwrap_or(0);
    let end = start.saturating_add(count).min(records.len());
    &records[start..end]
}
