//! Activity type classification from game-mode tags.

use crate::models::{
    ActivityType, CompletedActivity, ModeTag, DUNGEON_ACTIVITY_MODE, LOSTSECTOR_ACTIVITY_MODE,
    RAID_ACTIVITY_MODE, STRIKE_ACTIVITY_MODE,
};

/// Map a single mode tag to its activity type.
pub fn type_for_mode(mode: ModeTag) -> Option<ActivityType> {
    match mode {
        RAID_ACTIVITY_MODE => Some(ActivityType::Raid),
        DUNGEON_ACTIVITY_MODE => Some(ActivityType::Dungeon),
        STRIKE_ACTIVITY_MODE => Some(ActivityType::Strike),
        LOSTSECTOR_ACTIVITY_MODE => Some(ActivityType::LostSector),
        _ => None,
    }
}

/// Classify a list of mode tags.
///
/// The first recognised tag wins, so a record listing a strike mode before a
/// raid mode is a strike. Returns `None` when no tag is recognised.
pub fn classify(modes: &[ModeTag]) -> Option<ActivityType> {
    modes.iter().find_map(|mode| type_for_mode(*mode))
}

/// Classify a completion record by its mode tags.
pub fn classify_activity(activity: &CompletedActivity) -> Option<ActivityType> {
    classify(&activity.modes)
}
