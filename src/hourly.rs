//! Hourly normalizer: derives the 24-slot "today" view from the sparse
//! 3-hour forecast list.
//!
//! The provider returns one entry every three hours across several days. The
//! trip planner wants one slot per hour of the current day, so slots without
//! a covering entry are emitted as placeholders rather than dropped.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

use crate::models::ForecastEntry;

/// Description shown for hours no forecast entry covers
pub const NO_DATA: &str = "No data available";

/// One hour-indexed bucket (0-23) of today's forecast
#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot {
    /// Hour of day, 0-23
    pub hour: u8,
    /// 12-hour clock label, e.g. "12 AM", "3 PM"
    pub label: String,
    /// Forecast entry covering this hour, if any
    pub entry: Option<ForecastEntry>,
}

impl HourSlot {
    /// Whether this slot carries real data (placeholders do not)
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.entry.is_some()
    }

    /// Description for display; placeholders report [`NO_DATA`]
    #[must_use]
    pub fn description(&self) -> &str {
        self.entry.as_ref().map_or(NO_DATA, |e| e.description.as_str())
    }

    /// Temperature for display, if the slot has data
    #[must_use]
    pub fn temperature(&self) -> Option<f32> {
        self.entry.as_ref().map(|e| e.temperature)
    }
}

/// Format an hour of day as a 12-hour clock label
#[must_use]
pub fn hour_label(hour: u8) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{hour} AM"),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

/// Build exactly 24 hour slots for `today` from an unordered entry list.
///
/// Entries are filtered to [today 00:00, tomorrow 00:00) in city-local time
/// (`utc_offset`), then bucketed by hour of day. If two entries land in the
/// same hour the later one in iteration order wins; with the provider's
/// 3-hour granularity that does not happen in practice. An empty input is
/// not an error and yields 24 placeholders.
#[must_use]
pub fn build_day_slots(
    entries: &[ForecastEntry],
    today: NaiveDate,
    utc_offset: FixedOffset,
) -> Vec<HourSlot> {
    let mut by_hour: [Option<&ForecastEntry>; 24] = [None; 24];

    for entry in entries {
        let local = entry.timestamp.with_timezone(&utc_offset);
        if local.date_naive() != today {
            continue;
        }
        by_hour[local.hour() as usize] = Some(entry);
    }

    (0u8..24)
        .map(|hour| HourSlot {
            hour,
            label: hour_label(hour),
            entry: by_hour[hour as usize].cloned(),
        })
        .collect()
}

/// Build today's slots using the clock at the moment of invocation.
///
/// "Today" is the current calendar date in the city's timezone, so a user
/// looking at a remote city sees that city's day, not their own.
#[must_use]
pub fn today_slots(entries: &[ForecastEntry], utc_offset: FixedOffset) -> Vec<HourSlot> {
    let today = now_utc().with_timezone(&utc_offset).date_naive();
    build_day_slots(entries, today, utc_offset)
}

fn now_utc() -> DateTime<Utc> {
    Utc::now()
}
