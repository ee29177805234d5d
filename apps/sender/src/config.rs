//! Sender configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/clipsend/sender.toml`
//! - Windows: `%APPDATA%/clipsend/sender.toml`
//!
//! A missing file means defaults; nothing is written back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clipsend_dispatch::DispatchConfig;
use clipsend_dispatch::types::DEFAULT_POOL_SIZE;
use clipsend_history::DEFAULT_HISTORY_FILE;
use clipsend_protocol::constants::DEFAULT_RECEIVER_ENDPOINT;
use serde::{Deserialize, Serialize};

/// Sender configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Receiver base URL.
    #[serde(default = "default_receiver_endpoint")]
    pub receiver_endpoint: String,

    /// Concurrent chunk uploads for `parallel_split`.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Chunk size in bytes for `split` and `parallel_split`.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Per-request timeout in seconds (0 = none).
    #[serde(default)]
    pub request_timeout_secs: u64,

    /// Directory relative file names are resolved against.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Transfer history file.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

fn default_receiver_endpoint() -> String {
    DEFAULT_RECEIVER_ENDPOINT.into()
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_chunk_size() -> usize {
    1024 * 1024
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_history_path() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            receiver_endpoint: default_receiver_endpoint(),
            pool_size: default_pool_size(),
            chunk_size: default_chunk_size(),
            request_timeout_secs: 0,
            upload_dir: default_upload_dir(),
            history_path: default_history_path(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the platform default location.
    ///
    /// An explicit path must exist. The default location may be absent, in
    /// which case defaults are returned.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = config_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Strategy settings derived from this configuration.
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            receiver_endpoint: self.receiver_endpoint.clone(),
            pool_size: self.pool_size.max(1),
            chunk_size: self.chunk_size,
            request_timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
        }
    }

    /// Resolves a file name against the upload directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve_upload(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.upload_dir.join(path)
        }
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("clipsend")
            .join("sender.toml"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("clipsend").join("sender.toml"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp/clipsend/sender.toml"))
    }
}
