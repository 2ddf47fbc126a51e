//! File-backed price history
//!
//! Stores one JSON object per line. The handle is opened explicitly, holds the
//! file for its lifetime, and releases it on [`PriceHistory::close`] or drop.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::core::{PriceRecord, StoreError};

use super::store::{validate_batch, PriceStore};

/// Price history kept in a JSON-lines file
#[derive(Debug)]
pub struct PriceHistory {
    path: PathBuf,
    file: Mutex<File>,
    rows: RwLock<Vec<PriceRecord>>,
}

impl PriceHistory {
    /// Open (or create) the history file and load its rows
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let rows = if path.exists() {
            read_rows(&path)?
        } else {
            Vec::new()
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        tracing::info!("Opened price history {:?} with {} records", path, rows.len());
        Ok(Self {
            path,
            file: Mutex::new(file),
            rows: RwLock::new(rows),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush to disk and release the file
    pub fn close(self) -> Result<(), StoreError> {
        let file = self.file.into_inner().map_err(|_| StoreError::Poisoned)?;
        file.sync_all()?;
        tracing::info!("Closed price history {:?}", self.path);
        Ok(())
    }
}

impl PriceStore for PriceHistory {
    fn upload(&self, records: &[PriceRecord]) -> Result<(), StoreError> {
        validate_batch(records)?;

        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }

        let mut file = self.file.lock().map_err(|_| StoreError::Poisoned)?;
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        let len = file.metadata()?.len();

        if let Err(e) = file.write_all(&buf).and_then(|_| file.sync_data()) {
            // drop any partial batch
            file.set_len(len)?;
            return Err(e.into());
        }

        rows.extend_from_slice(records);

        tracing::info!(
            "Appended {} price records to {:?} ({} total)",
            records.len(),
            self.path,
            rows.len()
        );
        Ok(())
    }

    fn records(&self) -> Result<Vec<PriceRecord>, StoreError> {
        Ok(self.rows.read().map_err(|_| StoreError::Poisoned)?.clone())
    }
}

fn read_rows(path: &Path) -> Result<Vec<PriceRecord>, StoreError> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| StoreError::Corrupt {
            line: i + 1,
            reason: e.to_string(),
        })?;
        rows.push(record);
    }

    Ok(rows)
}
