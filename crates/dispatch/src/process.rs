//! Caller layer: timing, metadata and history around a dispatch.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use clipsend_history::{HistoryError, HistoryStore};
use clipsend_protocol::TransferResult;
use tracing::{info, warn};

use crate::dispatcher::Dispatcher;
use crate::types::TransferParams;

/// Runs transfers and records each one in the history store.
pub struct Processor {
    dispatcher: Dispatcher,
    history: Arc<dyn HistoryStore>,
}

impl Processor {
    pub fn new(dispatcher: Dispatcher, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            dispatcher,
            history,
        }
    }

    /// Transfers the file at `path` with the named option.
    ///
    /// Produces exactly one [`TransferResult`] per call and appends it to
    /// history. A history write failure is logged; the result is still returned.
    pub async fn process(
        &self,
        path: &Path,
        option: &str,
        params: &TransferParams,
    ) -> TransferResult {
        let started = Instant::now();
        let outcome = self.dispatcher.dispatch(path, option, params).await;
        let elapsed = started.elapsed();

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let result = TransferResult::new(outcome, elapsed, filename, option);

        info!(
            file = %result.filename,
            %option,
            success = result.success(),
            elapsed_ms = elapsed.as_millis() as u64,
            "transfer processed"
        );

        if let Err(e) = self.history.append(&result) {
            warn!(error = %e, "failed to record transfer history");
        }
        result
    }

    /// Every recorded transfer, oldest first.
    pub fn history(&self) -> Result<Vec<TransferResult>, HistoryError> {
        self.history.read_all()
    }

    /// Clears recorded transfers. Returns `false` if there was nothing to clear.
    pub fn clear_history(&self) -> Result<bool, HistoryError> {
        self.history.clear()
    }
}
