//! Gzip compression of whole files.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::debug;

use crate::TransferError;

/// Compression level used when the caller does not pick one.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Suffix appended to the source path to name the compressed artifact.
pub const COMPRESSED_SUFFIX: &str = ".gz";

/// Highest level the gzip encoder understands.
const MAX_LEVEL: u32 = 9;

/// Path of the artifact produced for `source`: the source path plus `.gz`.
pub fn compressed_path(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_owned();
    name.push(COMPRESSED_SUFFIX);
    PathBuf::from(name)
}

/// Gzips `source` into [`compressed_path`]`(source)` and returns that path.
///
/// The source file is only read. An existing artifact at the destination is
/// overwritten. Levels above 9 are clamped to 9.
pub fn compress_file(source: &Path, level: u32) -> Result<PathBuf, TransferError> {
    let dest = compressed_path(source);
    let level = level.min(MAX_LEVEL);

    let mut input = BufReader::new(File::open(source)?);
    let output = BufWriter::new(File::create(&dest)?);

    let mut encoder = GzEncoder::new(output, Compression::new(level));
    let copied = io::copy(&mut input, &mut encoder)?;
    let mut output = encoder.finish()?;
    output.flush()?;

    debug!(
        source = %source.display(),
        dest = %dest.display(),
        level,
        bytes_in = copied,
        "file compressed"
    );
    Ok(dest)
}
