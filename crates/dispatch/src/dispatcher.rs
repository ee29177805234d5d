//! Strategy dispatcher.
//!
//! Maps an option name to one of the four transfer strategies and folds every
//! result, including I/O failures, into an [`Outcome`]. Timing and history
//! live one layer up in [`Processor`](crate::Processor).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clipsend_protocol::{Outcome, TransferOption};
use clipsend_transfer::{DEFAULT_COMPRESSION_LEVEL, compress_file};
use tracing::{debug, error, info};

use crate::error::DispatchError;
use crate::parallel::{ParallelSender, read_chunks};
use crate::transmitter::Transmitter;
use crate::types::{Delivery, DispatchConfig, TransferParams};

/// Error text for option names that match no strategy.
pub const INVALID_OPTION_MESSAGE: &str = "Invalid option";

/// Outcome of a strategy that made a single upload.
pub fn unit_outcome(option: TransferOption, delivery: &Delivery) -> Outcome {
    match delivery {
        Delivery::Accepted => Outcome::message(format!(
            "File sent to receiver successfully using {option} method"
        )),
        Delivery::Rejected(status) => Outcome::error(format!(
            "Failed to send file to receiver. Status code: {status}"
        )),
        Delivery::Unreachable(reason) => {
            Outcome::error(format!("Failed to connect to receiver: {reason}"))
        }
    }
}

/// Selects and runs transfer strategies.
pub struct Dispatcher {
    transmitter: Arc<dyn Transmitter>,
    parallel: ParallelSender,
    chunk_size: usize,
}

impl Dispatcher {
    /// Creates a dispatcher sending through `transmitter`.
    ///
    /// Only `pool_size` and `chunk_size` are read from `config`; the endpoint
    /// and timeout belong to the transmitter.
    pub fn new(transmitter: Arc<dyn Transmitter>, config: &DispatchConfig) -> Self {
        let parallel =
            ParallelSender::new(Arc::clone(&transmitter), config.pool_size, config.chunk_size);
        Self {
            transmitter,
            parallel,
            chunk_size: config.chunk_size,
        }
    }

    /// Runs the strategy named by `option` on the file at `path`.
    ///
    /// Never fails: unknown options, I/O errors and receiver failures all come
    /// back as [`Outcome::Error`]. An unknown option makes no network call.
    pub async fn dispatch(&self, path: &Path, option: &str, params: &TransferParams) -> Outcome {
        match self.try_dispatch(path, option, params).await {
            Ok(outcome) => {
                info!(%option, success = outcome.is_success(), "strategy finished");
                outcome
            }
            Err(DispatchError::Unsupported(e)) => {
                debug!(error = %e, "rejected option");
                Outcome::error(INVALID_OPTION_MESSAGE)
            }
            Err(e) => {
                error!(%option, path = %path.display(), error = %e, "strategy aborted");
                Outcome::error(e.to_string())
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch) but surfaces validation and I/O errors.
    pub async fn try_dispatch(
        &self,
        path: &Path,
        option: &str,
        params: &TransferParams,
    ) -> Result<Outcome, DispatchError> {
        let option: TransferOption = option.parse()?;
        debug!(%option, path = %path.display(), "dispatching");

        match option {
            TransferOption::Send => self.send_whole(path, option).await,
            TransferOption::Compress => {
                let level = params
                    .compression_level
                    .unwrap_or(DEFAULT_COMPRESSION_LEVEL);
                let artifact = compress(path, level).await?;
                self.send_whole(&artifact, option).await
            }
            TransferOption::Split => {
                let chunks = read_chunks(path, self.chunk_size).await?;
                debug!(chunks = chunks.len(), "sending bundled chunks");
                let delivery = self.transmitter.send_bundle(chunks, option).await;
                Ok(unit_outcome(option, &delivery))
            }
            TransferOption::ParallelSplit => {
                let report = self.parallel.send(path, option).await?;
                Ok(report.outcome())
            }
        }
    }

    async fn send_whole(&self, path: &Path, option: TransferOption) -> Result<Outcome, DispatchError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = tokio::fs::read(path).await?;
        debug!(file = %name, bytes = data.len(), "sending whole file");
        let delivery = self.transmitter.send_file(name, data, option).await;
        Ok(unit_outcome(option, &delivery))
    }
}

/// Gzips a file on the blocking pool.
async fn compress(path: &Path, level: u32) -> Result<PathBuf, DispatchError> {
    let path = path.to_path_buf();
    let artifact = tokio::task::spawn_blocking(move || compress_file(&path, level))
        .await
        .map_err(|e| DispatchError::Task(e.to_string()))??;
    Ok(artifact)
}
