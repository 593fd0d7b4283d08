//! Activity catalog.
//!
//! Maps known activity hashes to display names for raids and dungeons, and
//! keeps a reverse index from raid name to every hash that carries it. The
//! process-wide catalog is built once from [`tables`] and never modified.

mod tables;

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use thiserror::Error;

use crate::models::ActivityHash;

pub use tables::{DUNGEON_TABLE, RAID_TABLE};

static CATALOG: LazyLock<ActivityCatalog> =
    LazyLock::new(|| ActivityCatalog::from_tables(RAID_TABLE, DUNGEON_TABLE));

/// The process-wide catalog.
pub fn catalog() -> &'static ActivityCatalog {
    &CATALOG
}

/// Catalog definition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Hash {hash} is listed as both {first:?} and {second:?}")]
    ConflictingName {
        hash: ActivityHash,
        first: String,
        second: String,
    },

    #[error("Hash {0} is listed as both a raid and a dungeon")]
    RaidAndDungeon(ActivityHash),

    #[error("Dungeon name {name:?} is shared by hashes {first} and {second}")]
    SharedDungeonName {
        name: String,
        first: ActivityHash,
        second: ActivityHash,
    },

    #[error("Hash {0} has an empty name")]
    EmptyName(ActivityHash),

    #[error("Reverse index for {0:?} is out of sync with the raid table")]
    ReverseIndexMismatch(String),
}

/// Resolves an activity hash to a display name.
pub trait ActivityNames {
    fn activity_name(&self, hash: ActivityHash) -> Option<&str>;
}

impl ActivityNames for HashMap<ActivityHash, String> {
    fn activity_name(&self, hash: ActivityHash) -> Option<&str> {
        self.get(&hash).map(String::as_str)
    }
}

impl<T: ActivityNames + ?Sized> ActivityNames for &T {
    fn activity_name(&self, hash: ActivityHash) -> Option<&str> {
        (**self).activity_name(hash)
    }
}

/// Tries the first resolver, then the second.
impl<A: ActivityNames, B: ActivityNames> ActivityNames for (A, B) {
    fn activity_name(&self, hash: ActivityHash) -> Option<&str> {
        self.0
            .activity_name(hash)
            .or_else(|| self.1.activity_name(hash))
    }
}

/// Raid and dungeon display names keyed by activity hash.
#[derive(Debug, Clone, Default)]
pub struct ActivityCatalog {
    raids: HashMap<ActivityHash, &'static str>,
    dungeons: HashMap<ActivityHash, &'static str>,
    raid_aliases: HashMap<&'static str, BTreeSet<ActivityHash>>,
}

impl ActivityCatalog {
    /// Build a catalog from hash/name tables.
    ///
    /// A hash listed more than once keeps its last name; use
    /// [`ActivityCatalog::try_from_tables`] to reject such tables.
    pub fn from_tables(
        raids: &[(ActivityHash, &'static str)],
        dungeons: &[(ActivityHash, &'static str)],
    ) -> Self {
        let raids: HashMap<_, _> = raids.iter().copied().collect();
        let dungeons = dungeons.iter().copied().collect();

        let mut raid_aliases: HashMap<&'static str, BTreeSet<ActivityHash>> = HashMap::new();
        for (&hash, &name) in &raids {
            raid_aliases.entry(name).or_default().insert(hash);
        }

        Self {
            raids,
            dungeons,
            raid_aliases,
        }
    }

    /// Build a catalog, rejecting tables that break the catalog invariants.
    pub fn try_from_tables(
        raids: &[(ActivityHash, &'static str)],
        dungeons: &[(ActivityHash, &'static str)],
    ) -> Result<Self, CatalogError> {
        check_table(raids)?;
        check_table(dungeons)?;

        let mut dungeon_names: HashMap<&str, ActivityHash> = HashMap::new();
        for &(hash, name) in dungeons {
            if raids.iter().any(|(raid_hash, _)| *raid_hash == hash) {
                return Err(CatalogError::RaidAndDungeon(hash));
            }
            if let Some(&first) = dungeon_names.get(name) {
                if first != hash {
                    return Err(CatalogError::SharedDungeonName {
                        name: name.to_string(),
                        first,
                        second: hash,
                    });
                }
            }
            dungeon_names.insert(name, hash);
        }

        let catalog = Self::from_tables(raids, dungeons);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that the reverse index agrees with the raid table.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (&hash, &name) in &self.raids {
            let contains = self
                .raid_aliases
                .get(name)
                .is_some_and(|hashes| hashes.contains(&hash));
            if !contains {
                return Err(CatalogError::ReverseIndexMismatch(name.to_string()));
            }
        }

        for (&name, hashes) in &self.raid_aliases {
            if hashes.is_empty() || hashes.iter().any(|h| self.raids.get(h) != Some(&name)) {
                return Err(CatalogError::ReverseIndexMismatch(name.to_string()));
            }
        }

        Ok(())
    }

    pub fn name_for_raid(&self, hash: ActivityHash) -> Option<&'static str> {
        self.raids.get(&hash).copied()
    }

    pub fn name_for_dungeon(&self, hash: ActivityHash) -> Option<&'static str> {
        self.dungeons.get(&hash).copied()
    }

    pub fn is_raid(&self, hash: ActivityHash) -> bool {
        self.raids.contains_key(&hash)
    }

    pub fn is_dungeon(&self, hash: ActivityHash) -> bool {
        self.dungeons.contains_key(&hash)
    }

    /// Every raid hash that shares `name`, or `None` for an unknown name.
    pub fn hashes_sharing_raid_name(&self, name: &str) -> Option<&BTreeSet<ActivityHash>> {
        self.raid_aliases.get(name)
    }

    /// Every raid hash that shares the name of `hash` (including `hash`).
    pub fn raid_aliases_of(&self, hash: ActivityHash) -> Option<&BTreeSet<ActivityHash>> {
        self.name_for_raid(hash)
            .and_then(|name| self.hashes_sharing_raid_name(name))
    }

    /// Canonical raid names with their hashes, sorted by name.
    pub fn raids_by_name(&self) -> Vec<(&'static str, &BTreeSet<ActivityHash>)> {
        let mut raids: Vec<_> = self
            .raid_aliases
            .iter()
            .map(|(&name, hashes)| (name, hashes))
            .collect();
        raids.sort_by_key(|(name, _)| *name);
        raids
    }

    /// Dungeons as (name, hash), sorted by name.
    pub fn dungeons_by_name(&self) -> Vec<(&'static str, ActivityHash)> {
        let mut dungeons: Vec<_> = self
            .dungeons
            .iter()
            .map(|(&hash, &name)| (name, hash))
            .collect();
        dungeons.sort();
        dungeons
    }
}

impl ActivityNames for ActivityCatalog {
    fn activity_name(&self, hash: ActivityHash) -> Option<&str> {
        self.name_for_raid(hash)
            .or_else(|| self.name_for_dungeon(hash))
    }
}

fn check_table(table: &[(ActivityHash, &str)]) -> Result<(), CatalogError> {
    let mut seen: HashMap<ActivityHash, &str> = HashMap::new();

    for &(hash, name) in table {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName(hash));
        }
        if let Some(&first) = seen.get(&hash) {
            if first != name {
                return Err(CatalogError::ConflictingName {
                    hash,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }
        seen.insert(hash, name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_consistent() {
        let catalog = ActivityCatalog::try_from_tables(RAID_TABLE, DUNGEON_TABLE);
        assert!(catalog.is_ok(), "{:?}", catalog.err());
        assert!(super::catalog().validate().is_ok());
    }

    #[test]
    fn test_lookup_by_hash() {
        let catalog = catalog();

        assert_eq!(catalog.name_for_raid(1441982566), Some("Vow of the Disciple"));
        assert_eq!(catalog.name_for_dungeon(2823159265), Some("Duality"));
        assert!(catalog.is_raid(2122313384));
        assert!(!catalog.is_raid(2823159265));
        assert!(catalog.is_dungeon(2823159265));
        assert_eq!(catalog.name_for_raid(1), None);
    }

    #[test]
    fn test_reverse_index() {
        let catalog = catalog();
        let hashes = catalog
            .hashes_sharing_raid_name("Garden of Salvation")
            .unwrap();

        assert!(hashes.contains(&2659723068));
        assert!(hashes.contains(&3458480158));
        assert!(hashes
            .iter()
            .all(|h| catalog.name_for_raid(*h) == Some("Garden of Salvation")));
        assert!(catalog.hashes_sharing_raid_name("Not A Raid").is_none());
    }

    #[test]
    fn test_raid_aliases_of() {
        let catalog = catalog();
        let aliases = catalog.raid_aliases_of(1374392663).unwrap();
        assert!(aliases.contains(&1063970578));
        assert!(catalog.raid_aliases_of(2823159265).is_none());
    }

    #[test]
    fn test_conflicting_raid_name_rejected() {
        let raids = [(1, "Alpha"), (1, "Beta")];
        let err = ActivityCatalog::try_from_tables(&raids, &[]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::ConflictingName {
                hash: 1,
                first: "Alpha".to_string(),
                second: "Beta".to_string(),
            }
        );
    }

    #[test]
    fn test_raid_and_dungeon_rejected() {
        let err = ActivityCatalog::try_from_tables(&[(7, "Alpha")], &[(7, "Cellar")]).unwrap_err();
        assert_eq!(err, CatalogError::RaidAndDungeon(7));
    }

    #[test]
    fn test_shared_dungeon_name_rejected() {
        let dungeons = [(1, "Cellar"), (2, "Cellar")];
        assert!(matches!(
            ActivityCatalog::try_from_tables(&[], &dungeons),
            Err(CatalogError::SharedDungeonName { .. })
        ));
    }

    #[test]
    fn test_duplicate_identical_entry_allowed() {
        let raids = [(1, "Alpha"), (1, "Alpha"), (2, "Alpha")];
        let catalog = ActivityCatalog::try_from_tables(&raids, &[]).unwrap();
        assert_eq!(catalog.hashes_sharing_raid_name("Alpha").unwrap().len(), 2);
    }

    #[test]
    fn test_activity_names_fallback() {
        let mut extra: HashMap<ActivityHash, String> = HashMap::new();
        extra.insert(42, "The Corrupted".to_string());

        let names = (catalog(), &extra);
        assert_eq!(names.activity_name(2823159265), Some("Duality"));
        assert_eq!(names.activity_name(42), Some("The Corrupted"));
        assert_eq!(names.activity_name(43), None);
    }

    #[test]
    fn test_raids_by_name_sorted() {
        let raids = catalog().raids_by_name();
        let names: Vec<_> = raids.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(catalog().dungeons_by_name().len(), DUNGEON_TABLE.len());
    }
}
