//! Transfer history.
//!
//! History is an ordered, append-only sequence of [`TransferResult`] records.
//! Records are never edited or removed one by one; the only destructive
//! operation clears the whole sequence. Callers depend on [`HistoryStore`] so
//! tests can swap the JSON file for [`MemoryHistory`].

mod file;
mod memory;

pub use file::JsonFileHistory;
pub use memory::MemoryHistory;

use clipsend_protocol::TransferResult;

/// Default history file name, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "processing_history.json";

/// Errors produced by history stores.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage for transfer history.
pub trait HistoryStore: Send + Sync {
    /// Appends one record at the end of the sequence.
    fn append(&self, result: &TransferResult) -> Result<(), HistoryError>;

    /// Returns every record in insertion order.
    fn read_all(&self) -> Result<Vec<TransferResult>, HistoryError>;

    /// Removes every record. Returns `false` if there was nothing to clear.
    fn clear(&self) -> Result<bool, HistoryError>;
}
