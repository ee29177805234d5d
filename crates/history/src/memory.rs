use std::sync::{PoisonError, RwLock};

use clipsend_protocol::TransferResult;

use crate::{HistoryError, HistoryStore};

/// History kept in process memory. Lost on exit.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: RwLock<Vec<TransferResult>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&self, result: &TransferResult) -> Result<(), HistoryError> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<TransferResult>, HistoryError> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn clear(&self) -> Result<bool, HistoryError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let had_records = !records.is_empty();
        records.clear();
        Ok(had_records)
    }
}
