//! Activity history maintenance.
//!
//! Deduplicates and merges history lists pulled from several characters and
//! pages, and prunes records that no view will ever show.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::catalog::ActivityCatalog;
use crate::models::{
    CompletedActivity, DUNGEON_ACTIVITY_MODE, LOSTSECTOR_ACTIVITY_MODE, RAID_ACTIVITY_MODE,
    STRIKE_ACTIVITY_MODE,
};
use crate::reset::weekly_reset;

/// Records are the same play-through when both instance id and period match.
fn identity(activity: &CompletedActivity) -> (&str, DateTime<Utc>) {
    (activity.instance_id.as_str(), activity.period)
}

/// Remove repeated play-throughs, keeping the first occurrence.
pub fn dedup(activities: Vec<CompletedActivity>) -> Vec<CompletedActivity> {
    let before = activities.len();
    let mut seen = HashSet::new();

    let unique: Vec<_> = activities
        .into_iter()
        .filter(|activity| seen.insert((activity.instance_id.clone(), activity.period)))
        .collect();

    if unique.len() != before {
        debug!("Dropped {} duplicate activities", before - unique.len());
    }
    unique
}

/// Add incoming records that are not already present, newest first.
pub fn merge(
    existing: Vec<CompletedActivity>,
    incoming: Vec<CompletedActivity>,
) -> Vec<CompletedActivity> {
    let known: HashSet<_> = existing
        .iter()
        .map(|activity| (activity.instance_id.clone(), activity.period))
        .collect();

    let mut merged = existing;
    let mut added = 0;
    for activity in dedup(incoming) {
        if !known.contains(&(activity.instance_id.clone(), activity.period)) {
            merged.push(activity);
            added += 1;
        }
    }

    sort_newest_first(&mut merged);
    debug!("Merged {} new activities ({} total)", added, merged.len());
    merged
}

/// Order by `period`, newest first. Equal periods keep their order.
pub fn sort_newest_first(activities: &mut [CompletedActivity]) {
    activities.sort_by(|a, b| b.period.cmp(&a.period));
}

/// Whether `recent` holds anything the newest-first `existing` list lacks.
pub fn has_new_activities(existing: &[CompletedActivity], recent: &[CompletedActivity]) -> bool {
    let Some(newest) = existing.first() else {
        return !recent.is_empty();
    };

    recent.iter().any(|activity| {
        activity.period > newest.period
            || (activity.period == newest.period && identity(activity) != identity(newest))
    })
}

/// Whether a record is worth keeping in history.
///
/// Raids and dungeons are kept forever. Strikes and lost sectors are only
/// kept for the current week.
pub fn should_keep(
    activity: &CompletedActivity,
    catalog: &ActivityCatalog,
    weekly_reset: DateTime<Utc>,
) -> bool {
    let is_raid_or_dungeon = activity.has_mode(RAID_ACTIVITY_MODE)
        || activity.has_mode(DUNGEON_ACTIVITY_MODE)
        || catalog.is_raid(activity.activity_hash)
        || catalog.is_dungeon(activity.activity_hash);

    if is_raid_or_dungeon {
        return true;
    }

    let is_strike_or_lost_sector =
        activity.has_mode(STRIKE_ACTIVITY_MODE) || activity.has_mode(LOSTSECTOR_ACTIVITY_MODE);

    is_strike_or_lost_sector && activity.period >= weekly_reset
}

/// Drop records that [`should_keep`] rejects, relative to `now`.
pub fn retain_relevant(
    activities: &mut Vec<CompletedActivity>,
    catalog: &ActivityCatalog,
    now: DateTime<Utc>,
) {
    let cutoff = weekly_reset(now);
    let before = activities.len();

    activities.retain(|activity| should_keep(activity, catalog, cutoff));

    debug!(
        "Retained {} of {} activities (weekly reset {})",
        activities.len(),
        before,
        cutoff
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap()
    }

    fn record(id: &str, hours_ago: i64, hash: u32, modes: Vec<u32>) -> CompletedActivity {
        CompletedActivity::new(id, now() - Duration::hours(hours_ago), hash, modes, true, 600)
    }

    fn ids(activities: &[CompletedActivity]) -> Vec<&str> {
        activities.iter().map(|a| a.instance_id.as_str()).collect()
    }

    #[test]
    fn test_dedup_keeps_first() {
        let mut duplicate = record("1", 1, 10, vec![4]);
        duplicate.completed = false;

        let unique = dedup(vec![
            record("1", 1, 10, vec![4]),
            record("2", 2, 10, vec![4]),
            duplicate,
        ]);

        assert_eq!(ids(&unique), vec!["1", "2"]);
        assert!(unique[0].completed);
    }

    #[test]
    fn test_dedup_same_instance_different_period() {
        let unique = dedup(vec![record("1", 1, 10, vec![4]), record("1", 2, 10, vec![4])]);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_merge_newest_first() {
        let existing = vec![record("2", 2, 10, vec![4]), record("4", 4, 10, vec![4])];
        let incoming = vec![
            record("1", 1, 10, vec![4]),
            record("2", 2, 10, vec![4]),
            record("3", 3, 10, vec![4]),
            record("1", 1, 10, vec![4]),
        ];

        let merged = merge(existing, incoming);
        assert_eq!(ids(&merged), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_has_new_activities() {
        let existing = vec![record("2", 2, 10, vec![4]), record("3", 3, 10, vec![4])];

        assert!(!has_new_activities(&existing, &[]));
        assert!(!has_new_activities(&existing, &[record("3", 3, 10, vec![4])]));
        assert!(!has_new_activities(&existing, &[record("2", 2, 10, vec![4])]));
        assert!(has_new_activities(&existing, &[record("1", 1, 10, vec![4])]));

        // Same period as the newest record but a different play-through
        assert!(has_new_activities(&existing, &[record("9", 2, 10, vec![4])]));
    }

    #[test]
    fn test_has_new_activities_empty_existing() {
        assert!(!has_new_activities(&[], &[]));
        assert!(has_new_activities(&[], &[record("1", 1, 10, vec![4])]));
    }

    #[test]
    fn test_should_keep() {
        let weekly = weekly_reset(now());
        let catalog = catalog();

        // Old raids and dungeons are kept, by mode or by known hash
        assert!(should_keep(&record("1", 2000, 10, vec![4]), catalog, weekly));
        assert!(should_keep(&record("2", 2000, 10, vec![82]), catalog, weekly));
        assert!(should_keep(&record("3", 2000, 1441982566, vec![]), catalog, weekly));
        assert!(should_keep(&record("4", 2000, 2823159265, vec![]), catalog, weekly));

        // Strikes and lost sectors only this week
        assert!(should_keep(&record("5", 1, 10, vec![18]), catalog, weekly));
        assert!(should_keep(&record("6", 1, 10, vec![87]), catalog, weekly));
        assert!(!should_keep(&record("7", 200, 10, vec![18]), catalog, weekly));

        // Everything else goes
        assert!(!should_keep(&record("8", 1, 10, vec![5]), catalog, weekly));
    }

    #[test]
    fn test_retain_relevant() {
        let mut history = vec![
            record("1", 1, 10, vec![18]),
            record("2", 200, 10, vec![87]),
            record("3", 200, 10, vec![4]),
            record("4", 1, 10, vec![]),
        ];

        retain_relevant(&mut history, catalog(), now());
        assert_eq!(ids(&history), vec!["1", "3"]);
    }
}
