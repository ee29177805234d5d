//! Types shared between the clipsend sender crates.
//!
//! The receiver is an external HTTP service; [`constants`] pins the paths and
//! multipart field names it expects, [`types`] holds the transfer option and
//! result records that end up in the history log.

pub mod constants;
pub mod types;

pub use types::{Outcome, TransferOption, TransferResult, UnsupportedOption};
