//! Price history storage
//!
//! The pricing path only needs two things from storage: append a batch of
//! records, and read the rows back. Both go through [`PriceStore`] so the
//! backing engine can be swapped (in-memory, JSON-lines file, a database).

use std::sync::RwLock;

use crate::core::{PriceRecord, PriceSnapshot, StoreError};

use super::latest::latest;

/// Append-only price history
pub trait PriceStore: Send + Sync {
    /// Append all records or none of them
    fn upload(&self, records: &[PriceRecord]) -> Result<(), StoreError>;

    /// Consistent copy of every stored record
    fn records(&self) -> Result<Vec<PriceRecord>, StoreError>;

    /// Latest price per asset
    fn latest_prices(&self) -> Result<PriceSnapshot, StoreError> {
        Ok(latest(&self.records()?))
    }
}

/// Reject the batch if any record is unusable.
pub fn validate_batch(records: &[PriceRecord]) -> Result<(), StoreError> {
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|reason| StoreError::InvalidRecord { index, reason })?;
    }
    Ok(())
}

/// In-memory history
#[derive(Debug, Default)]
pub struct MemoryPriceStore {
    rows: RwLock<Vec<PriceRecord>>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PriceRecord>) -> Self {
        Self {
            rows: RwLock::new(records),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.rows.read().map_err(|_| StoreError::Poisoned)?.len())
    }
}

impl PriceStore for MemoryPriceStore {
    fn upload(&self, records: &[PriceRecord]) -> Result<(), StoreError> {
        validate_batch(records)?;

        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        rows.extend_from_slice(records);

        tracing::info!("Stored {} price records ({} total)", records.len(), rows.len());
        Ok(())
    }

    fn records(&self) -> Result<Vec<PriceRecord>, StoreError> {
        Ok(self.rows.read().map_err(|_| StoreError::Poisoned)?.clone())
    }
}
