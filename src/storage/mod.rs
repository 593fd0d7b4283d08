//! History files.
//!
//! Reads and rewrites the activity history a data-fetch layer exported as
//! JSON Lines, and reads the optional hash → name table used to label
//! activities the catalog does not know.

mod jsonl;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::{ActivityHash, CompletedActivity};

pub use jsonl::{JsonlReader, JsonlWriter};

/// Errors that can occur while reading input files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Read an activity history file. A missing file is an empty history.
pub fn read_history(path: &Path) -> Result<Vec<CompletedActivity>, StorageError> {
    let activities = JsonlReader::new(path.to_path_buf()).read_all()?;
    info!("Loaded {} activities from {:?}", activities.len(), path);
    Ok(activities)
}

/// Replace an activity history file.
pub fn write_history(path: &Path, activities: &[CompletedActivity]) -> Result<usize, StorageError> {
    JsonlWriter::new(path.to_path_buf()).write_all(activities)
}

/// Read a JSON object mapping activity hashes to display names.
pub fn read_name_table(path: &Path) -> Result<HashMap<ActivityHash, String>, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let names: HashMap<ActivityHash, String> = serde_json::from_str(&contents)?;
    info!("Loaded {} activity names from {:?}", names.len(), path);
    Ok(names)
}
