//! Transfer strategy dispatch for clipsend.
//!
//! This crate holds the sender's business logic. It talks to the receiver
//! only through the [`Transmitter`] trait; [`HttpTransmitter`] is the
//! production implementation and tests plug in mocks.
//!
//! # Strategies
//!
//! - `send`: whole file in one request
//! - `compress`: gzip the file, send the artifact whole
//! - `split`: chunk the file, send every chunk in one bundled request
//! - `parallel_split`: chunk the file, send chunks concurrently through a
//!   bounded worker pool, one request per chunk
//!
//! [`Dispatcher`] maps an option name to a strategy and returns an
//! [`Outcome`](clipsend_protocol::Outcome). [`Processor`] wraps it with timing
//! and history bookkeeping.

pub mod dispatcher;
pub mod error;
pub mod http;
pub mod parallel;
pub mod process;
pub mod transmitter;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use http::HttpTransmitter;
pub use parallel::{ParallelReport, ParallelSender};
pub use process::Processor;
pub use transmitter::Transmitter;
pub use types::{Delivery, DispatchConfig, TransferParams};
