//! Daily and weekly reset schedule.
//!
//! The daily reset happens at 17:00 UTC. The weekly reset is the daily reset
//! on Tuesday. "This month" is four weekly resets back rather than a
//! calendar month.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::Serialize;

use crate::models::TimeRange;

/// Hour of the daily reset, in UTC.
pub const DAILY_RESET_HOUR: i64 = 17;

/// Weekly resets that make up the "month" window.
pub const MONTH_RESET_CYCLES: i64 = 4;

/// Most recent daily reset at or before `at`.
pub fn daily_reset(at: DateTime<Utc>) -> DateTime<Utc> {
    let midnight = at.date_naive().and_time(NaiveTime::default()).and_utc();
    let reset = midnight + Duration::hours(DAILY_RESET_HOUR);

    if at < reset {
        reset - Duration::days(1)
    } else {
        reset
    }
}

/// Most recent Tuesday daily reset at or before `daily_reset(at)`.
pub fn weekly_reset(at: DateTime<Utc>) -> DateTime<Utc> {
    let daily = daily_reset(at);
    let days_since_tuesday = (daily.weekday().num_days_from_sunday() + 5) % 7;
    daily - Duration::days(i64::from(days_since_tuesday))
}

/// Start of the "month" window: the weekly reset four cycles back.
pub fn month_cutoff(at: DateTime<Utc>) -> DateTime<Utc> {
    weekly_reset(at) - Duration::days(7 * MONTH_RESET_CYCLES)
}

/// Earliest `period` kept by a time range, or `None` for no cutoff.
pub fn time_range_cutoff(range: TimeRange, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match range {
        TimeRange::All => None,
        TimeRange::Today => Some(daily_reset(now)),
        TimeRange::Week => Some(weekly_reset(now)),
        TimeRange::Month => Some(month_cutoff(now)),
    }
}

/// All reset instants relative to one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetTimes {
    pub daily: DateTime<Utc>,
    pub weekly: DateTime<Utc>,
    pub month: DateTime<Utc>,
}

impl ResetTimes {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            daily: daily_reset(now),
            weekly: weekly_reset(now),
            month: month_cutoff(now),
        }
    }
}
