//! Sort configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a textual sort setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown sort key: {0} (expected time, duration or name)")]
    SortKey(String),

    #[error("Unknown sort order: {0} (expected asc or desc)")]
    SortOrder(String),

    #[error("Unknown time range: {0} (expected all, today, week or month)")]
    TimeRange(String),
}

/// What to order activities by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// The `period` instant
    Time,
    /// Duration in seconds
    Duration,
    /// Resolved display name
    Name,
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" | "date" => Ok(SortKey::Time),
            "duration" => Ok(SortKey::Duration),
            "name" => Ok(SortKey::Name),
            _ => Err(ParseError::SortKey(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ParseError::SortOrder(s.to_string())),
        }
    }
}

/// Window applied before sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeRange {
    All,
    /// Since the most recent daily reset
    Today,
    /// Since the most recent weekly reset
    Week,
    /// Four weekly resets back, not a calendar month
    Month,
}

impl FromStr for TimeRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TimeRange::All),
            "today" | "day" => Ok(TimeRange::Today),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            _ => Err(ParseError::TimeRange(s.to_string())),
        }
    }
}

/// A fully-populated sort request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfiguration {
    pub sort_by: SortKey,
    pub order: SortOrder,
    pub time_range: TimeRange,
}

impl SortConfiguration {
    pub fn new(sort_by: SortKey, order: SortOrder, time_range: TimeRange) -> Self {
        Self {
            sort_by,
            order,
            time_range,
        }
    }
}
