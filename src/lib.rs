//! # Activity Ledger
//!
//! Classification, filtering and sorting of Destiny 2 activity history.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (completed activities, filter and sort configurations)
//! - **catalog**: Known raid and dungeon names, with raid name aliasing
//! - **classify**: Activity type from game-mode tags
//! - **reset**: Daily and weekly reset schedule
//! - **filter**: Multi-criteria history filter
//! - **sort**: Time-range restriction and ordering
//! - **calculate**: Derived counts such as daily clears
//! - **history**: Deduplication, merging and retention of history lists
//! - **config**: Configuration loading and preference defaulting
//! - **storage**: History files and the extra name table

pub mod calculate;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod filter;
pub mod history;
pub mod models;
pub mod reset;
pub mod sort;
pub mod storage;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "2h", "30m", "90s").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.trim().parse().ok()?;
    Some(Duration::from_secs(num.checked_mul(multiplier)?))
}

/// Parse a duration string into whole seconds for duration bounds.
pub fn parse_duration_seconds(s: &str) -> Option<u32> {
    parse_duration(s).and_then(|d| u32::try_from(d.as_secs()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_hours() {
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("30m"), Some(Duration::from_secs(1800)));
    }

    #[test]
    fn test_parse_duration_seconds() {
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_parse_duration_default_seconds() {
        assert_eq!(parse_duration("120"), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_parse_duration_seconds_bound() {
        assert_eq!(parse_duration_seconds("20m"), Some(1200));
        assert_eq!(parse_duration_seconds("0s"), Some(0));
        assert_eq!(parse_duration_seconds("9999999h"), None);
    }
}
