//! Time-range restriction and ordering of activity lists.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::ActivityNames;
use crate::models::{CompletedActivity, SortConfiguration, SortKey, SortOrder};
use crate::reset::time_range_cutoff;

/// Restrict `activities` to the configured time range and order them.
///
/// The input is left untouched. Ties keep their input order in both
/// directions.
pub fn sort_activities<'a, I, N>(
    activities: I,
    config: &SortConfiguration,
    names: &N,
    now: DateTime<Utc>,
) -> Vec<&'a CompletedActivity>
where
    I: IntoIterator<Item = &'a CompletedActivity>,
    N: ActivityNames + ?Sized,
{
    let cutoff = time_range_cutoff(config.time_range, now);

    let mut sorted: Vec<_> = activities
        .into_iter()
        .filter(|activity| cutoff.map_or(true, |cutoff| activity.period >= cutoff))
        .collect();

    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, config.sort_by, names);
        match config.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    debug!(
        "Sorted {} activities by {:?} ({:?}, {:?})",
        sorted.len(),
        config.sort_by,
        config.order,
        config.time_range
    );
    sorted
}

fn compare<N>(a: &CompletedActivity, b: &CompletedActivity, key: SortKey, names: &N) -> Ordering
where
    N: ActivityNames + ?Sized,
{
    match key {
        SortKey::Time => a.period.cmp(&b.period),
        SortKey::Duration => a.duration_seconds().cmp(&b.duration_seconds()),
        SortKey::Name => compare_names(
            names.activity_name(a.activity_hash).unwrap_or(""),
            names.activity_name(b.activity_hash).unwrap_or(""),
        ),
    }
}

/// Human ordering for display names.
///
/// Compared in three passes: base letters ignoring accents and case, then
/// accents, then exact text. "Éclipse" therefore sorts with the E's, just
/// after "eclipse".
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| a.cmp(b))
}

/// Lowercased canonical decomposition.
fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

/// [`folded`] with combining marks removed.
fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    folded(name).filter(|c| !is_combining_mark(*c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::models::{TimeRange, RAID_ACTIVITY_MODE, STRIKE_ACTIVITY_MODE};
    use crate::reset::{daily_reset, weekly_reset};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn now() -> DateTime<Utc> {
        // Saturday
        Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap()
    }

    fn at(id: &str, period: DateTime<Utc>, hash: u32, secs: u32) -> CompletedActivity {
        CompletedActivity::new(id, period, hash, vec![RAID_ACTIVITY_MODE], true, secs)
    }

    fn ids(sorted: &[&CompletedActivity]) -> Vec<String> {
        sorted.iter().map(|a| a.instance_id.clone()).collect()
    }

    fn all(sort_by: SortKey, order: SortOrder) -> SortConfiguration {
        SortConfiguration::new(sort_by, order, TimeRange::All)
    }

    fn no_names() -> HashMap<u32, String> {
        HashMap::new()
    }

    fn history() -> Vec<CompletedActivity> {
        let now = now();
        vec![
            at("a", now - Duration::hours(1), 1441982566, 3000),
            at("b", now - Duration::hours(30), 2122313384, 1200),
            at("c", now - Duration::days(6), 910380154, 3000),
            at("d", now - Duration::days(20), 3881495763, 600),
            at("e", now - Duration::days(60), 1374392663, 4500),
        ]
    }

    #[test]
    fn test_sort_by_time() {
        let history = history();
        let names = no_names();

        let desc = sort_activities(&history, &all(SortKey::Time, SortOrder::Desc), &names, now());
        assert_eq!(ids(&desc), vec!["a", "b", "c", "d", "e"]);

        let asc = sort_activities(&history, &all(SortKey::Time, SortOrder::Asc), &names, now());
        assert_eq!(ids(&asc), vec!["e", "d", "c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_duration_is_stable() {
        let history = history();
        let names = no_names();

        let asc = sort_activities(
            &history,
            &all(SortKey::Duration, SortOrder::Asc),
            &names,
            now(),
        );
        assert_eq!(ids(&asc), vec!["d", "b", "a", "c", "e"]);
        assert!(asc
            .windows(2)
            .all(|w| w[0].duration_seconds() <= w[1].duration_seconds()));

        // "a" and "c" tie on 3000s and keep their input order
        let desc = sort_activities(
            &history,
            &all(SortKey::Duration, SortOrder::Desc),
            &names,
            now(),
        );
        assert_eq!(ids(&desc), vec!["e", "a", "c", "b", "d"]);
    }

    #[test]
    fn test_sort_by_name() {
        let history = history();

        let asc = sort_activities(&history, &all(SortKey::Name, SortOrder::Asc), catalog(), now());
        // Deep Stone Crypt, King's Fall, Last Wish, Vault of Glass, Vow of the Disciple
        assert_eq!(ids(&asc), vec!["c", "e", "b", "d", "a"]);
    }

    #[test]
    fn test_unresolved_names_sort_first() {
        let now = now();
        let history = vec![
            at("known", now, 1441982566, 10),
            at("unknown", now, 12345, 10),
        ];

        let asc = sort_activities(&history, &all(SortKey::Name, SortOrder::Asc), catalog(), now);
        assert_eq!(ids(&asc), vec!["unknown", "known"]);
    }

    #[test]
    fn test_name_lookup_falls_back_to_extra_names() {
        let now = now();
        let mut extra: HashMap<u32, String> = HashMap::new();
        extra.insert(555, "Arms Dealer".to_string());
        let history = vec![
            at("vow", now, 1441982566, 10),
            CompletedActivity::new("strike", now, 555, vec![STRIKE_ACTIVITY_MODE], true, 10),
        ];

        let names = (catalog(), &extra);
        let asc = sort_activities(&history, &all(SortKey::Name, SortOrder::Asc), &names, now);
        assert_eq!(ids(&asc), vec!["strike", "vow"]);
    }

    #[test]
    fn test_time_range_today() {
        let history = history();
        let config = SortConfiguration::new(SortKey::Time, SortOrder::Desc, TimeRange::Today);
        let sorted = sort_activities(&history, &config, &no_names(), now());

        assert_eq!(ids(&sorted), vec!["a"]);
        assert!(sorted.iter().all(|a| a.period >= daily_reset(now())));
    }

    #[test]
    fn test_time_range_week() {
        let history = history();
        let config = SortConfiguration::new(SortKey::Time, SortOrder::Desc, TimeRange::Week);
        let sorted = sort_activities(&history, &config, &no_names(), now());

        // Weekly reset was Tuesday 2025-06-10 17:00; "c" is six days back
        assert_eq!(ids(&sorted), vec!["a", "b"]);
        assert!(sorted.iter().all(|a| a.period >= weekly_reset(now())));
    }

    #[test]
    fn test_time_range_month_uses_reset_cycles() {
        let history = history();
        let config = SortConfiguration::new(SortKey::Time, SortOrder::Desc, TimeRange::Month);
        let sorted = sort_activities(&history, &config, &no_names(), now());

        assert_eq!(ids(&sorted), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let reset = daily_reset(now());
        let history = vec![
            at("on", reset, 1, 10),
            at("before", reset - Duration::seconds(1), 1, 10),
        ];
        let config = SortConfiguration::new(SortKey::Time, SortOrder::Desc, TimeRange::Today);
        let sorted = sort_activities(&history, &config, &no_names(), now());
        assert_eq!(ids(&sorted), vec!["on"]);
    }

    #[test]
    fn test_input_not_mutated() {
        let history = history();
        let before = history.clone();
        let config = all(SortKey::Duration, SortOrder::Asc);
        let _ = sort_activities(&history, &config, &no_names(), now());
        assert_eq!(history, before);
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Banana", "apple"), Ordering::Greater);
        assert_eq!(compare_names("", "a"), Ordering::Less);
        assert_eq!(compare_names("Same", "Same"), Ordering::Equal);
        assert_ne!(compare_names("same", "Same"), Ordering::Equal);
    }

    #[test]
    fn test_compare_names_accents() {
        assert_eq!(compare_names("Éclipse", "Zephyr"), Ordering::Less);
        assert_eq!(compare_names("Ärger", "Bastion"), Ordering::Less);
        assert_eq!(compare_names("Crépuscule", "Crota's End"), Ordering::Less);

        // Accents only break ties between equal base letters
        assert_eq!(compare_names("eclipse", "éclipse"), Ordering::Less);
        assert_eq!(compare_names("Éclipse", "éclipse"), Ordering::Less);

        // Precomposed and decomposed forms share a position
        assert_eq!(compare_names("Éa", "E\u{301}b"), Ordering::Less);
    }

    #[test]
    fn test_sort_by_name_with_accented_extra_names() {
        let now = now();
        let mut extra: HashMap<u32, String> = HashMap::new();
        extra.insert(1, "Zephyr".to_string());
        extra.insert(2, "Éclipse".to_string());
        extra.insert(3, "Abyss".to_string());
        extra.insert(4, "eclipse".to_string());
        let history = vec![
            at("zephyr", now, 1, 10),
            at("accented", now, 2, 10),
            at("abyss", now, 3, 10),
            at("plain", now, 4, 10),
        ];

        let asc = sort_activities(&history, &all(SortKey::Name, SortOrder::Asc), &extra, now);
        assert_eq!(ids(&asc), vec!["abyss", "plain", "accented", "zephyr"]);
    }
}
