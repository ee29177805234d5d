use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use clipsend_protocol::TransferResult;
use tracing::debug;

use crate::{HistoryError, HistoryStore};

/// History persisted as a JSON array in a single file.
///
/// The file is re-read on every operation, so records appended by another
/// process between calls are kept. A missing file is an empty history;
/// clearing deletes the file.
pub struct JsonFileHistory {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &[TransferResult]) -> Result<(), HistoryError> {
        let json = serde_json::to_string(records)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        debug!("persisted {} history record(s) to {:?}", records.len(), self.path);
        Ok(())
    }
}

impl HistoryStore for JsonFileHistory {
    fn append(&self, result: &TransferResult) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = load_records(&self.path)?;
        records.push(result.clone());
        self.persist(&records)
    }

    fn read_all(&self) -> Result<Vec<TransferResult>, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        load_records(&self.path)
    }

    fn clear(&self) -> Result<bool, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("removed history file {:?}", self.path);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Loads records from a JSON file on disk.
fn load_records(path: &Path) -> Result<Vec<TransferResult>, HistoryError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(path)?;
    let records: Vec<TransferResult> = serde_json::from_str(&data)?;
    debug!("loaded {} history record(s) from {:?}", records.len(), path);
    Ok(records)
}
