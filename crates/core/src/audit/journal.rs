//! Append-only log stored as a single pretty-printed JSON array.
//!
//! Every append holds an exclusive lock on the file for the whole
//! read-modify-write, so concurrent hook invocations queue up instead of
//! overwriting each other's records.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{HookError, Result};

pub struct JsonArrayLog {
    path: PathBuf,
    /// Keep only the newest N records (None = keep everything)
    retain: Option<usize>,
}

/// Exclusively locked log file, unlocked on drop
struct LockedFile {
    file: File,
}

impl LockedFile {
    fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to unlock log file: {}", e);
        }
    }
}

impl JsonArrayLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            retain: None,
        }
    }

    /// Cap the log at the newest `max` records, dropping older ones on append.
    pub fn with_retention(mut self, max: usize) -> Self {
        self.retain = Some(max);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and return the number of records now stored.
    ///
    /// Creates the parent directory and the file if needed. An existing file
    /// that is not a JSON array is left untouched and reported as
    /// `HookError::CorruptLog`.
    pub fn append<T: Serialize>(&self, record: &T) -> Result<usize> {
        let record = serde_json::to_value(record).map_err(HookError::Serialize)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut locked = LockedFile::open(&self.path)?;
        let mut records = self.read_records(&mut locked.file)?;
        records.push(record);

        if let Some(max) = self.retain
            && records.len() > max
        {
            let excess = records.len() - max;
            records.drain(..excess);
        }

        let mut content =
            serde_json::to_vec_pretty(&records).map_err(HookError::Serialize)?;
        content.push(b'\n');

        locked.file.set_len(0)?;
        locked.file.seek(SeekFrom::Start(0))?;
        locked.file.write_all(&content)?;
        if let Err(e) = locked.file.sync_data() {
            warn!(error = %e, "Failed to sync {}", self.path.display());
        }

        debug!("Appended record {} to {}", records.len(), self.path.display());
        Ok(records.len())
    }

    /// All records currently stored; a missing file reads as empty.
    pub fn entries(&self) -> Result<Vec<Value>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut file = File::open(&self.path)?;
        self.read_records(&mut file)
    }

    fn read_records(&self, file: &mut File) -> Result<Vec<Value>> {
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| HookError::CorruptLog {
            path: self.path.clone(),
            source,
        })
    }
}
