//! Data types for the dispatch flow.

use std::time::Duration;

use clipsend_protocol::constants::DEFAULT_RECEIVER_ENDPOINT;
use clipsend_transfer::DEFAULT_CHUNK_SIZE;

/// Concurrent chunk uploads used by `parallel_split` unless configured otherwise.
pub const DEFAULT_POOL_SIZE: usize = 5;

/// How the receiver answered a single upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// HTTP 200.
    Accepted,
    /// Any other HTTP status.
    Rejected(u16),
    /// No HTTP response: connection refused, timeout, transport error.
    Unreachable(String),
}

impl Delivery {
    pub fn is_success(&self) -> bool {
        matches!(self, Delivery::Accepted)
    }
}

/// Settings shared by every strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    /// Receiver base URL, e.g. `http://localhost:5001`.
    pub receiver_endpoint: String,
    /// Worker pool size for `parallel_split`. 0 is treated as 1.
    pub pool_size: usize,
    /// Chunk size for `split` and `parallel_split`. 0 selects 1 MiB.
    pub chunk_size: usize,
    /// Per-request HTTP timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            receiver_endpoint: DEFAULT_RECEIVER_ENDPOINT.into(),
            pool_size: DEFAULT_POOL_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            request_timeout: None,
        }
    }
}

/// Per-request parameters supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferParams {
    /// Gzip level for `compress`; defaults to 6.
    pub compression_level: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_accepted_is_success() {
        assert!(Delivery::Accepted.is_success());
        assert!(!Delivery::Rejected(500).is_success());
        assert!(!Delivery::Rejected(201).is_success());
        assert!(!Delivery::Unreachable("refused".into()).is_success());
    }

    #[test]
    fn default_config() {
        let config = DispatchConfig::default();
        assert_eq!(config.receiver_endpoint, "http://localhost:5001");
        assert_eq!(config.pool_size, 5);
        assert_eq!(config.chunk_size, 1024 * 1024);
        assert!(config.request_timeout.is_none());
    }
}
