//! Statistics over activity history.
//!
//! Computes derived counts from a history list:
//! - Daily clears since the most recent daily reset
//! - Clears within any reset-based time range

use chrono::{DateTime, Utc};

use crate::models::{CompletedActivity, TimeRange};
use crate::reset::{daily_reset, time_range_cutoff};

/// Count completed activities at or after `cutoff`.
pub fn count_clears_since<'a, I>(activities: I, cutoff: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a CompletedActivity>,
{
    activities
        .into_iter()
        .filter(|activity| activity.completed && activity.period >= cutoff)
        .count()
}

/// Count completed activities since the most recent daily reset.
///
/// Activity type is ignored, so records that no filter can classify still
/// count.
pub fn count_daily_clears<'a, I>(activities: I, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a CompletedActivity>,
{
    count_clears_since(activities, daily_reset(now))
}

/// Count completed activities within a reset-based time range.
pub fn count_clears_in_range<'a, I>(activities: I, range: TimeRange, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a CompletedActivity>,
{
    match time_range_cutoff(range, now) {
        Some(cutoff) => count_clears_since(activities, cutoff),
        None => activities
            .into_iter()
            .filter(|activity| activity.completed)
            .count(),
    }
}
