//! Test doubles shared by the unit tests of this crate.

use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use clipsend_protocol::TransferOption;
use clipsend_transfer::Chunk;

use crate::transmitter::Transmitter;
use crate::types::Delivery;

/// One recorded transmitter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    File {
        name: String,
        data: Vec<u8>,
        option: TransferOption,
    },
    Bundle {
        indices: Vec<u32>,
        sizes: Vec<usize>,
        option: TransferOption,
    },
    Chunk {
        index: u32,
        size: usize,
        option: TransferOption,
    },
}

/// Records every call and answers from a script.
pub struct MockTransmitter {
    calls: Mutex<Vec<Call>>,
    fail_chunks: HashSet<u32>,
    panic_chunks: HashSet<u32>,
    answer: Delivery,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransmitter {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_chunks: HashSet::new(),
            panic_chunks: HashSet::new(),
            answer: Delivery::Accepted,
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Answer 500 for chunk `index`.
    pub fn fail_chunk(mut self, index: u32) -> Self {
        self.fail_chunks.insert(index);
        self
    }

    /// Panic while sending chunk `index`.
    pub fn panic_on_chunk(mut self, index: u32) -> Self {
        self.panic_chunks.insert(index);
        self
    }

    /// Answer every request with `status`.
    pub fn rejecting(mut self, status: u16) -> Self {
        self.answer = Delivery::Rejected(status);
        self
    }

    /// Answer every request as if the receiver were down.
    pub fn unreachable(mut self) -> Self {
        self.answer = Delivery::Unreachable("connection refused".into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Sequence numbers of single-chunk requests, sorted.
    pub fn chunk_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Chunk { index, .. } => Some(index),
                _ => None,
            })
            .collect();
        numbers.sort_unstable();
        numbers
    }

    /// Payload sizes of single-chunk requests, ordered by sequence number.
    pub fn chunk_sizes(&self) -> Vec<usize> {
        let mut sized: Vec<(u32, usize)> = self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Chunk { index, size, .. } => Some((index, size)),
                _ => None,
            })
            .collect();
        sized.sort_unstable();
        sized.into_iter().map(|(_, size)| size).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond(&self, call: Call, fail: bool) -> Delivery {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(call);

        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if fail {
            Delivery::Rejected(500)
        } else {
            self.answer.clone()
        }
    }
}

impl Transmitter for MockTransmitter {
    fn send_file(
        &self,
        name: String,
        data: Vec<u8>,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>> {
        Box::pin(async move { self.respond(Call::File { name, data, option }, false).await })
    }

    fn send_bundle(
        &self,
        chunks: Vec<Chunk>,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>> {
        Box::pin(async move {
            let call = Call::Bundle {
                indices: chunks.iter().map(|c| c.index).collect(),
                sizes: chunks.iter().map(Chunk::len).collect(),
                option,
            };
            self.respond(call, false).await
        })
    }

    fn send_chunk(
        &self,
        chunk: Chunk,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>> {
        Box::pin(async move {
            if self.panic_chunks.contains(&chunk.index) {
                panic!("scripted panic on chunk {}", chunk.index);
            }
            let fail = self.fail_chunks.contains(&chunk.index);
            let call = Call::Chunk {
                index: chunk.index,
                size: chunk.len(),
                option,
            };
            self.respond(call, fail).await
        })
    }
}

/// Writes `len` bytes of a repeating pattern to `dir/name`.
pub fn write_patterned(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, data).unwrap();
    path
}
