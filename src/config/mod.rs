//! Configuration loading and validation.
//!
//! Preferences are stored with every field optional. This module is where
//! missing values get their defaults and where textual sort settings are
//! parsed, so the filter and sort code only ever sees complete
//! configurations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{ActivityHash, FilterConfiguration, SortConfiguration};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Stored filter preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct FilterPreferences {
    pub show_raids: bool,
    pub show_dungeons: bool,
    pub show_strikes: bool,
    pub show_lost_sectors: bool,
    pub show_completed: bool,
    pub show_incomplete: bool,
    pub show_fresh_start: bool,
    pub show_checkpoint: bool,
    pub min_duration_seconds: Option<u32>,
    pub max_duration_seconds: Option<u32>,
    #[serde(with = "hash_keys")]
    pub specific_raids: HashMap<ActivityHash, bool>,
    #[serde(with = "hash_keys")]
    pub specific_dungeons: HashMap<ActivityHash, bool>,
}

/// TOML tables only have string keys, so activity hashes are written as
/// decimal strings and parsed back on load.
mod hash_keys {
    use std::collections::{BTreeMap, HashMap};

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::models::ActivityHash;

    pub fn serialize<S>(
        map: &HashMap<ActivityHash, bool>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let keyed: BTreeMap<String, bool> = map
            .iter()
            .map(|(hash, selected)| (hash.to_string(), *selected))
            .collect();
        keyed.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<ActivityHash, bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        HashMap::<String, bool>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, selected)| {
                key.trim()
                    .parse::<ActivityHash>()
                    .map(|hash| (hash, selected))
                    .map_err(|_| D::Error::custom(format!("invalid activity hash: {}", key)))
            })
            .collect()
    }
}

impl Default for FilterPreferences {
    fn default() -> Self {
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
}

impl FilterPreferences {
    /// Resolve into a complete filter configuration.
    pub fn to_filter(&self) -> Result<FilterConfiguration, ConfigError> {
        check_duration_bounds(self.min_duration_seconds, self.max_duration_seconds)?;

        Ok(FilterConfiguration {
            show_raids: self.show_raids,
            show_dungeons: self.show_dungeons,
            show_strikes: self.show_strikes,
            show_lost_sectors: self.show_lost_sectors,
            show_completed: self.show_completed,
            show_incomplete: self.show_incomplete,
            show_fresh_start: self.show_fresh_start,
            show_checkpoint: self.show_checkpoint,
            min_duration_seconds: self.min_duration_seconds,
            max_duration_seconds: self.max_duration_seconds,
            specific_raids: self.specific_raids.clone(),
            specific_dungeons: self.specific_dungeons.clone(),
        })
    }
}

/// Reject a minimum duration above the maximum.
pub fn check_duration_bounds(min: Option<u32>, max: Option<u32>) -> Result<(), ConfigError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ConfigError::ValidationError(format!(
            "Minimum duration ({}s) is greater than maximum duration ({}s)",
            min, max
        ))),
        _ => Ok(()),
    }
}

/// Stored sort preferences, as the strings the settings screen writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct SortPreferences {
    /// "time", "duration" or "name"
    pub sort_by: String,

    /// "asc" or "desc"
    pub sort_order: String,

    /// "all", "today", "week" or "month"
    pub time_range: String,
}

impl Default for SortPreferences {
    fn default() -> Self {
        Self {
            sort_by: "time".to_string(),
            sort_order: "desc".to_string(),
            time_range: "all".to_string(),
        }
    }
}

impl SortPreferences {
    /// Parse into a complete sort configuration.
    pub fn to_sort(&self) -> Result<SortConfiguration, ConfigError> {
        let invalid = |e: crate::models::ParseError| ConfigError::ValidationError(e.to_string());

        Ok(SortConfiguration {
            sort_by: self.sort_by.parse().map_err(invalid)?,
            order: self.sort_order.parse().map_err(invalid)?,
            time_range: self.time_range.parse().map_err(invalid)?,
        })
    }
}

/// User preferences relevant to the history views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Preferences {
    pub display_daily_clears: bool,
    pub filters: FilterPreferences,
    pub sorting: SortPreferences,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            display_daily_clears: true,
            filters: FilterPreferences::default(),
            sorting: SortPreferences::default(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Extra hash → name table for activities outside the catalog
    #[serde(default)]
    pub names_path: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub preferences: Preferences,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("./data/history.jsonl")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            names_path: None,
            log_level: default_log_level(),
            preferences: Preferences::default(),
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration from a TOML file, or use defaults if it is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Like [`AppConfig::load_or_default`], also reporting which one happened.
    ///
    /// Callers that load configuration before a subscriber is installed log
    /// the source themselves.
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            let config = Self::from_file(path)?;
            Ok((config, ConfigSource::File(path.to_path_buf())))
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.preferences.filters.to_filter()?;
        self.preferences.sorting.to_sort()?;
        Ok(())
    }
}
