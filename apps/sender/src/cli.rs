//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "clipsend", version, about = "Send video files to a clipsend receiver")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Receiver base URL, overriding the configuration.
    #[arg(long, global = true)]
    pub receiver: Option<String>,

    /// Parallel upload workers, overriding the configuration.
    #[arg(long, global = true)]
    pub pool_size: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Transfer a file and record the result.
    Process {
        /// File name inside the upload directory, or an absolute path.
        filename: String,

        /// Transfer strategy: send, compress, split or parallel_split.
        #[arg(long, short)]
        option: String,

        /// Gzip level for `compress` (0-9).
        #[arg(long)]
        compression_level: Option<u32>,
    },
    /// Print every recorded transfer.
    History,
    /// Delete the transfer history.
    ClearHistory,
}
