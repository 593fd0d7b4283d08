//! Filter configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ActivityHash, ActivityType};

/// A fully-populated filter over an activity history.
///
/// Every field is required. Defaulting of partial preferences happens in
/// [`crate::config::FilterPreferences`] before a configuration reaches the
/// filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfiguration {
    pub show_raids: bool,
    pub show_dungeons: bool,
    pub show_strikes: bool,
    pub show_lost_sectors: bool,

    pub show_completed: bool,
    pub show_incomplete: bool,

    pub show_fresh_start: bool,
    pub show_checkpoint: bool,

    /// Inclusive lower bound in seconds (None = unbounded)
    pub min_duration_seconds: Option<u32>,

    /// Inclusive upper bound in seconds (None = unbounded)
    pub max_duration_seconds: Option<u32>,

    /// Per-raid inclusion overrides. Only `true` entries narrow the view.
    pub specific_raids: HashMap<ActivityHash, bool>,

    /// Per-dungeon inclusion overrides. Only `true` entries narrow the view.
    pub specific_dungeons: HashMap<ActivityHash, bool>,
}

impl FilterConfiguration {
    /// Every type and status shown, no bounds, no per-instance narrowing.
    pub fn show_all() -> Self {
        Self {
            show_raids: true,
            show_dungeons: true,
            show_strikes: true,
            show_lost_sectors: true,
            show_completed: true,
            show_incomplete: true,
            show_fresh_start: true,
            show_checkpoint: true,
            min_duration_seconds: None,
            max_duration_seconds: None,
            specific_raids: HashMap::new(),
            specific_dungeons: HashMap::new(),
        }
    }

    /// Whether the type-level toggle for `activity_type` is on.
    pub fn shows_type(&self, activity_type: ActivityType) -> bool {
        match activity_type {
            ActivityType::Raid => self.show_raids,
            ActivityType::Dungeon => self.show_dungeons,
            ActivityType::Strike => self.show_strikes,
            ActivityType::LostSector => self.show_lost_sectors,
        }
    }

    /// Set the type-level toggle for `activity_type`.
    pub fn with_type(mut self, activity_type: ActivityType, show: bool) -> Self {
        match activity_type {
            ActivityType::Raid => self.show_raids = show,
            ActivityType::Dungeon => self.show_dungeons = show,
            ActivityType::Strike => self.show_strikes = show,
            ActivityType::LostSector => self.show_lost_sectors = show,
        }
        self
    }

    /// Mark a raid hash as selected.
    pub fn with_specific_raid(mut self, hash: ActivityHash) -> Self {
        self.specific_raids.insert(hash, true);
        self
    }

    /// Mark a dungeon hash as selected.
    pub fn with_specific_dungeon(mut self, hash: ActivityHash) -> Self {
        self.specific_dungeons.insert(hash, true);
        self
    }

    /// Set both duration bounds.
    pub fn with_duration_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_duration_seconds = min;
        self.max_duration_seconds = max;
        self
    }
}

/// True when the mapping selects at least one instance.
///
/// An empty mapping and an all-`false` mapping both mean "no narrowing".
pub fn has_selection(specific: &HashMap<ActivityHash, bool>) -> bool {
    specific.values().any(|selected| *selected)
}
