//! Parallel chunk upload through a bounded worker pool.
//!
//! Every chunk is attempted exactly once. A failed chunk never stops its
//! siblings; the aggregate succeeds only if all of them were accepted.
//! Completion order is arbitrary, the receiver reorders by `chunk_num`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clipsend_protocol::{Outcome, TransferOption};
use clipsend_transfer::{Chunk, split_file};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::error::DispatchError;
use crate::transmitter::Transmitter;
use crate::types::Delivery;

pub const PARALLEL_SUCCESS_MESSAGE: &str =
    "All chunks sent successfully using parallel transmission";
pub const PARALLEL_FAILURE_MESSAGE: &str =
    "Some chunks failed to send during parallel transmission";

/// Per-batch result of a parallel upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelReport {
    /// Number of chunks submitted.
    pub total: usize,
    /// Indices of chunks that were not accepted, ascending.
    pub failed: Vec<u32>,
}

impl ParallelReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Collapses the report into the user-facing outcome.
    pub fn outcome(&self) -> Outcome {
        if self.is_success() {
            Outcome::message(PARALLEL_SUCCESS_MESSAGE)
        } else {
            Outcome::error(PARALLEL_FAILURE_MESSAGE)
        }
    }
}

/// Uploads chunks concurrently, at most `pool_size` at a time.
pub struct ParallelSender {
    transmitter: Arc<dyn Transmitter>,
    pool_size: usize,
    chunk_size: usize,
}

impl ParallelSender {
    /// `pool_size` 0 is treated as 1; `chunk_size` 0 selects 1 MiB.
    pub fn new(transmitter: Arc<dyn Transmitter>, pool_size: usize, chunk_size: usize) -> Self {
        Self {
            transmitter,
            pool_size: pool_size.max(1),
            chunk_size,
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Chunks the file at `path` and uploads every chunk.
    ///
    /// Only reading the file can fail; upload failures land in the report.
    pub async fn send(
        &self,
        path: &Path,
        option: TransferOption,
    ) -> Result<ParallelReport, DispatchError> {
        let chunks = read_chunks(path, self.chunk_size).await?;
        Ok(self.send_chunks(chunks, option).await)
    }

    /// Uploads already-prepared chunks and waits for all of them.
    pub async fn send_chunks(&self, chunks: Vec<Chunk>, option: TransferOption) -> ParallelReport {
        let total = chunks.len();
        let expected: Vec<u32> = chunks.iter().map(|c| c.index).collect();
        let permits = Arc::new(Semaphore::new(self.pool_size));
        let mut workers = JoinSet::new();

        debug!(chunks = total, pool_size = self.pool_size, %option, "dispatching chunks");

        for chunk in chunks {
            let transmitter = Arc::clone(&self.transmitter);
            let permits = Arc::clone(&permits);
            workers.spawn(async move {
                let index = chunk.index;
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (index, Delivery::Unreachable("worker pool closed".into()));
                };
                let delivery = transmitter.send_chunk(chunk, option).await;
                (index, delivery)
            });
        }

        // Join point: every submitted send finishes (or panics) before we return.
        let mut accepted = BTreeSet::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((index, Delivery::Accepted)) => {
                    debug!(chunk = index, "chunk accepted");
                    accepted.insert(index);
                }
                Ok((index, Delivery::Rejected(status))) => {
                    warn!(chunk = index, status, "chunk rejected");
                }
                Ok((index, Delivery::Unreachable(reason))) => {
                    warn!(chunk = index, error = %reason, "chunk not delivered");
                }
                Err(e) => {
                    error!(error = %e, "chunk worker failed");
                }
            }
        }

        let mut failed: Vec<u32> = expected
            .into_iter()
            .filter(|i| !accepted.contains(i))
            .collect();
        failed.sort_unstable();

        if failed.is_empty() {
            info!(chunks = total, "all chunks delivered");
        } else {
            warn!(chunks = total, failed = ?failed, "parallel upload incomplete");
        }

        ParallelReport { total, failed }
    }
}

/// Splits a file on the blocking pool.
pub(crate) async fn read_chunks(path: &Path, chunk_size: usize) -> Result<Vec<Chunk>, DispatchError> {
    let path: PathBuf = path.to_path_buf();
    let chunks = tokio::task::spawn_blocking(move || split_file(&path, chunk_size))
        .await
        .map_err(|e| DispatchError::Task(e.to_string()))??;
    Ok(chunks)
}
