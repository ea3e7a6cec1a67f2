//! Persistence of the last entered birth record.

use crate::ephemeris::{Instant, InstantError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed key the birth record is stored under.
pub const STORAGE_KEY: &str = "astrodex_chart_data";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize birth data: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Birth details as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthData {
    pub name: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub time: String,
    pub location: String,
}

impl BirthData {
    pub fn instant(&self, utc_offset_hours: f64) -> Result<Instant, InstantError> {
        Instant::parse_local(&self.date, &self.time, utc_offset_hours)
    }
}

pub trait ChartStore {
    fn save(&self, data: &BirthData) -> Result<(), StorageError>;
    /// `None` when nothing usable is stored.
    fn load(&self) -> Result<Option<BirthData>, StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Stores the record as `<dir>/astrodex_chart_data.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ChartStore for JsonFileStore {
    fn save(&self, data: &BirthData) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(data)?;
        fs::write(self.path(), json)?;
        log::debug!("Saved birth data for '{}' to {}", data.name, self.path().display());
        Ok(())
    }

    fn load(&self) -> Result<Option<BirthData>, StorageError> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                log::warn!("Ignoring unreadable birth data in {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(self.path()) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
