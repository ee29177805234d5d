use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::types::Chunk;
use crate::{DEFAULT_CHUNK_SIZE, TransferError};

// ---------------------------------------------------------------------------
// ChunkReader
// ---------------------------------------------------------------------------

/// Reads a byte stream in fixed-size, sequentially indexed chunks.
///
/// Every chunk holds exactly `chunk_size` bytes except the last, which holds
/// the remainder. Short reads from the underlying reader are filled before a
/// chunk is emitted, so chunk boundaries only depend on the input bytes.
pub struct ChunkReader<R> {
    reader: R,
    chunk_size: usize,
    next_index: u64,
    offset: u64,
    done: bool,
}

impl ChunkReader<File> {
    /// Opens `path` for chunked reading.
    ///
    /// If `chunk_size` is 0, [`DEFAULT_CHUNK_SIZE`] (1 MiB) is used.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, TransferError> {
        let file = File::open(path)?;
        Ok(Self::new(file, chunk_size))
    }
}

impl<R: Read> ChunkReader<R> {
    /// Wraps `reader`. A `chunk_size` of 0 selects [`DEFAULT_CHUNK_SIZE`].
    pub fn new(reader: R, chunk_size: usize) -> Self {
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        Self {
            reader,
            chunk_size,
            next_index: 0,
            offset: 0,
            done: false,
        }
    }

    /// Reads the next chunk. Returns `None` at EOF.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>, TransferError> {
        if self.done {
            return Ok(None);
        }

        let mut buf = Vec::with_capacity(self.chunk_size);
        let n = self
            .reader
            .by_ref()
            .take(self.chunk_size as u64)
            .read_to_end(&mut buf)?;
        if n == 0 {
            self.done = true;
            return Ok(None);
        }
        // `take` + `read_to_end` only stops short at EOF.
        if n < self.chunk_size {
            self.done = true;
        }

        let index = u32::try_from(self.next_index).map_err(|_| TransferError::TooManyChunks)?;
        self.next_index += 1;
        self.offset += n as u64;
        Ok(Some(Chunk { index, data: buf }))
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Chunk size in effect.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks produced so far.
    pub fn chunks_read(&self) -> u64 {
        self.next_index
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Chunk, TransferError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_chunk() {
            Ok(chunk) => chunk.map(Ok),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Whole-stream helpers
// ---------------------------------------------------------------------------

/// Splits `reader` into chunks, reading it to exhaustion.
///
/// Empty input yields no chunks.
pub fn split<R: Read>(reader: R, chunk_size: usize) -> Result<Vec<Chunk>, TransferError> {
    ChunkReader::new(reader, chunk_size).collect()
}

/// Splits the file at `path` into chunks.
///
/// The file handle is closed before returning, on success and on error.
pub fn split_file(path: &Path, chunk_size: usize) -> Result<Vec<Chunk>, TransferError> {
    let reader = ChunkReader::open(path, chunk_size)?;
    let size = reader.chunk_size();
    let chunks: Vec<Chunk> = reader.collect::<Result<_, _>>()?;
    debug!(path = %path.display(), chunk_size = size, chunks = chunks.len(), "file split");
    Ok(chunks)
}
