//! JSON Lines reader.
//!
//! Each non-blank line is one JSON object.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Replace the file with `entities`, one per line.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        for entity in entities {
            writeln!(writer, "{}", serde_json::to_string(entity)?)?;
        }
        writer.flush()?;

        info!("Wrote {} entities to {:?}", entities.len(), self.path);
        Ok(entities.len())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read every parseable line, in file order.
    ///
    /// Lines that fail to parse are logged and skipped; a missing file reads
    /// as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            debug!("{:?} does not exist, nothing to read", self.path);
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entities = Vec::new();
        let mut skipped = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    skipped += 1;
                    warn!("Failed to parse line {} in {:?}: {}", index + 1, self.path, e);
                }
            }
        }

        debug!(
            "Read {} entities from {:?} ({} skipped)",
            entities.len(),
            self.path,
            skipped
        );
        Ok(entities)
    }
}
