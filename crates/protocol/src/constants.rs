//! Receiver wire contract.

/// Receiver used when no endpoint is configured.
pub const DEFAULT_RECEIVER_ENDPOINT: &str = "http://localhost:5001";

/// Path accepting whole-file and bundled-chunk uploads.
pub const RECEIVE_PATH: &str = "/receive";

/// Path accepting one chunk per request.
pub const RECEIVE_CHUNK_PATH: &str = "/receive_chunk";

/// Multipart field carrying a whole (possibly compressed) file.
pub const FIELD_VIDEO: &str = "video";

/// Repeated multipart field carrying bundled chunks, in original order.
pub const FIELD_CHUNKS: &str = "chunks";

/// Multipart field carrying a single chunk.
pub const FIELD_CHUNK: &str = "chunk";

/// Text field naming the strategy.
pub const FIELD_OPTION: &str = "option";

/// Text field carrying a chunk's sequence number.
pub const FIELD_CHUNK_NUM: &str = "chunk_num";

/// File name the receiver sees for chunk `index`.
pub fn chunk_part_name(index: u32) -> String {
    format!("chunk_{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_part_names() {
        assert_eq!(chunk_part_name(0), "chunk_0");
        assert_eq!(chunk_part_name(17), "chunk_17");
    }
}
