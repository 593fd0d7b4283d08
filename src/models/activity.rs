//! Completed activity records and activity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric identifier of a specific activity (map, encounter, difficulty).
pub type ActivityHash = u32;

/// Numeric game-mode tag attached to a completion record.
pub type ModeTag = u32;

/// Mode tag carried by raid completions.
pub const RAID_ACTIVITY_MODE: ModeTag = 4;

/// Mode tag carried by dungeon completions.
pub const DUNGEON_ACTIVITY_MODE: ModeTag = 82;

/// Mode tag carried by strike completions.
pub const STRIKE_ACTIVITY_MODE: ModeTag = 18;

/// Mode tag carried by lost sector completions.
pub const LOSTSECTOR_ACTIVITY_MODE: ModeTag = 87;

/// Fixed activity categories derived from mode tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    Raid,
    Dungeon,
    Strike,
    LostSector,
}

impl ActivityType {
    /// All activity types, in display order.
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Raid,
        ActivityType::Dungeon,
        ActivityType::Strike,
        ActivityType::LostSector,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Raid => "Raid",
            ActivityType::Dungeon => "Dungeon",
            ActivityType::Strike => "Strike",
            ActivityType::LostSector => "Lost Sector",
        }
    }

    /// The mode tag that identifies this type.
    pub fn mode(&self) -> ModeTag {
        match self {
            ActivityType::Raid => RAID_ACTIVITY_MODE,
            ActivityType::Dungeon => DUNGEON_ACTIVITY_MODE,
            ActivityType::Strike => STRIKE_ACTIVITY_MODE,
            ActivityType::LostSector => LOSTSECTOR_ACTIVITY_MODE,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Duration of a play-through.
///
/// `seconds` is authoritative for comparisons; `display` is whatever the
/// upstream report rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDuration {
    pub display: String,
    pub seconds: u32,
}

impl ActivityDuration {
    /// Build a duration from a seconds count, rendering the display string.
    pub fn from_seconds(seconds: u32) -> Self {
        Self {
            display: format_duration(seconds),
            seconds,
        }
    }
}

/// Render a seconds count as `1h 02m 03s` / `4m 05s` / `9s`.
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// A historical completion record. Owned by the caller, never mutated by the
/// filtering and sorting code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedActivity {
    /// When the activity ended
    pub period: DateTime<Utc>,

    /// Unique identifier of this play-through
    pub instance_id: String,

    pub completed: bool,

    pub duration: ActivityDuration,

    pub activity_hash: ActivityHash,

    /// Game-mode tags, in the order the upstream report listed them
    #[serde(default)]
    pub modes: Vec<ModeTag>,

    #[serde(default)]
    pub completion_reason: u32,

    /// Preferred fresh-start signal
    #[serde(default)]
    pub activity_was_started_from_beginning: Option<bool>,

    /// Fallback fresh-start signal (0 = fresh start)
    #[serde(default)]
    pub starting_phase_index: Option<u32>,
}

impl CompletedActivity {
    /// Create a record with no fresh-start information.
    pub fn new(
        instance_id: impl Into<String>,
        period: DateTime<Utc>,
        activity_hash: ActivityHash,
        modes: Vec<ModeTag>,
        completed: bool,
        duration_seconds: u32,
    ) -> Self {
        Self {
            period,
            instance_id: instance_id.into(),
            completed,
            duration: ActivityDuration::from_seconds(duration_seconds),
            activity_hash,
            modes,
            completion_reason: if completed { 0 } else { 2 },
            activity_was_started_from_beginning: None,
            starting_phase_index: None,
        }
    }

    /// Set the preferred fresh-start flag.
    pub fn with_started_from_beginning(mut self, fresh: bool) -> Self {
        self.activity_was_started_from_beginning = Some(fresh);
        self
    }

    /// Set the fallback starting phase index.
    pub fn with_starting_phase_index(mut self, index: u32) -> Self {
        self.starting_phase_index = Some(index);
        self
    }

    /// Whether this play-through began at the start of the activity.
    ///
    /// Uses `activity_was_started_from_beginning` when present, otherwise
    /// `starting_phase_index == 0`; `None` when neither is known.
    pub fn started_fresh(&self) -> Option<bool> {
        self.activity_was_started_from_beginning
            .or_else(|| self.starting_phase_index.map(|index| index == 0))
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> u32 {
        self.duration.seconds
    }

    /// Whether any of the mode tags is the given one.
    pub fn has_mode(&self, mode: ModeTag) -> bool {
        self.modes.contains(&mode)
    }
}
