//! File preparation for transfers: fixed-size chunking and gzip compression.

mod chunked;
mod compress;
mod types;

pub use chunked::{ChunkReader, split, split_file};
pub use compress::{COMPRESSED_SUFFIX, DEFAULT_COMPRESSION_LEVEL, compress_file, compressed_path};
pub use types::Chunk;

/// Default chunk size: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file too large: more than {} chunks", u32::MAX)]
    TooManyChunks,
}
