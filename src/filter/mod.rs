//! Activity history filtering.
//!
//! Applies type, specific-instance, completion-method, completion-status and
//! duration criteria to a history list. Every criterion must pass; the
//! retained records keep their input order.

use tracing::debug;

use crate::catalog::ActivityCatalog;
use crate::classify::classify_activity;
use crate::models::{
    has_selection, ActivityHash, ActivityType, CompletedActivity, FilterConfiguration,
};

/// Return the activities that match `config`, in input order.
pub fn filter_activities<'a>(
    activities: &'a [CompletedActivity],
    config: &FilterConfiguration,
    catalog: &ActivityCatalog,
) -> Vec<&'a CompletedActivity> {
    let kept: Vec<_> = activities
        .iter()
        .filter(|activity| matches(activity, config, catalog))
        .collect();

    debug!("Filtered {} of {} activities", kept.len(), activities.len());
    kept
}

/// Whether a single activity passes every criterion.
pub fn matches(
    activity: &CompletedActivity,
    config: &FilterConfiguration,
    catalog: &ActivityCatalog,
) -> bool {
    let Some(activity_type) = classify_activity(activity) else {
        return false;
    };

    // Specific selections never bring back a type that is switched off
    if !config.shows_type(activity_type) {
        return false;
    }

    matches_specific(activity, activity_type, config, catalog)
        && matches_completion_method(activity, config)
        && matches_completion_status(activity, config)
        && matches_duration(activity, config)
}

fn matches_specific(
    activity: &CompletedActivity,
    activity_type: ActivityType,
    config: &FilterConfiguration,
    catalog: &ActivityCatalog,
) -> bool {
    match activity_type {
        ActivityType::Raid => {
            if !has_selection(&config.specific_raids) {
                return true;
            }
            let is_selected = |hash: ActivityHash| {
                config.specific_raids.get(&hash).copied().unwrap_or(false)
            };

            // Any hash carrying the same raid name counts as a match
            match catalog.raid_aliases_of(activity.activity_hash) {
                Some(aliases) => aliases.iter().any(|hash| is_selected(*hash)),
                None => is_selected(activity.activity_hash),
            }
        }
        ActivityType::Dungeon => {
            !has_selection(&config.specific_dungeons)
                || config
                    .specific_dungeons
                    .get(&activity.activity_hash)
                    .copied()
                    .unwrap_or(false)
        }
        ActivityType::Strike | ActivityType::LostSector => true,
    }
}

fn matches_completion_method(activity: &CompletedActivity, config: &FilterConfiguration) -> bool {
    match activity.started_fresh() {
        Some(true) => config.show_fresh_start,
        Some(false) => config.show_checkpoint,
        None => true,
    }
}

fn matches_completion_status(activity: &CompletedActivity, config: &FilterConfiguration) -> bool {
    if activity.completed {
        config.show_completed
    } else {
        config.show_incomplete
    }
}

fn matches_duration(activity: &CompletedActivity, config: &FilterConfiguration) -> bool {
    let seconds = activity.duration_seconds();

    if config.min_duration_seconds.is_some_and(|min| seconds < min) {
        return false;
    }
    if config.max_duration_seconds.is_some_and(|max| seconds > max) {
        return false;
    }
    true
}
