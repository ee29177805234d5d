//! Receiver transmitter trait.
//!
//! `Transmitter` is implemented by [`HttpTransmitter`](crate::HttpTransmitter)
//! for the real receiver. Keeping the strategies behind a trait lets them be
//! tested against mocks that count and fail requests on demand.

use std::future::Future;
use std::pin::Pin;

use clipsend_protocol::TransferOption;
use clipsend_transfer::Chunk;

use crate::types::Delivery;

/// Uploads units to the receiver.
///
/// Every method makes exactly one attempt and reports the answer as a
/// [`Delivery`]; transport failures never escape as errors or panics.
pub trait Transmitter: Send + Sync {
    /// Uploads a whole file under `name`.
    fn send_file(
        &self,
        name: String,
        data: Vec<u8>,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>>;

    /// Uploads every chunk of a file in one request, in index order.
    fn send_bundle(
        &self,
        chunks: Vec<Chunk>,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>>;

    /// Uploads one chunk tagged with its sequence number.
    fn send_chunk(
        &self,
        chunk: Chunk,
        option: TransferOption,
    ) -> Pin<Box<dyn Future<Output = Delivery> + Send + '_>>;
}
