/// A slice of a file's content, tagged with its position.
///
/// Chunks of one file carry indices `0..N` with no gaps; concatenating their
/// payloads in index order yields the original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position within the file (also the sequence number sent to the receiver).
    pub index: u32,
    /// Raw chunk data.
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
