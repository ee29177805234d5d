//! Dispatch error types.

use clipsend_protocol::UnsupportedOption;

/// Errors that abort a strategy before or between network calls.
///
/// Network failures are not errors here: they surface as
/// [`Delivery`](crate::Delivery) values.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedOption),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transfer error: {0}")]
    Transfer(#[from] clipsend_transfer::TransferError),

    #[error("task join error: {0}")]
    Task(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}
