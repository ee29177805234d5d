use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an option name that is not a known strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported transfer option: {0}")]
pub struct UnsupportedOption(pub String);

/// Transfer strategy selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferOption {
    /// Whole file in one request.
    Send,
    /// Gzip the file, then send the artifact whole.
    Compress,
    /// Chunk the file and send every chunk in one bundled request.
    Split,
    /// Chunk the file and send chunks concurrently, one request each.
    ParallelSplit,
}

impl TransferOption {
    /// Every supported option, in menu order.
    pub const ALL: [TransferOption; 4] = [
        TransferOption::Send,
        TransferOption::Compress,
        TransferOption::Split,
        TransferOption::ParallelSplit,
    ];

    /// Wire name, as sent in the receiver's `option` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferOption::Send => "send",
            TransferOption::Compress => "compress",
            TransferOption::Split => "split",
            TransferOption::ParallelSplit => "parallel_split",
        }
    }
}

impl fmt::Display for TransferOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferOption {
    type Err = UnsupportedOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransferOption::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnsupportedOption(s.to_string()))
    }
}

/// What a strategy reports back: a success message or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Message(String),
    Error(String),
}

impl Outcome {
    pub fn message(text: impl Into<String>) -> Self {
        Outcome::Message(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Outcome::Error(text.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Message(_))
    }

    /// The message or error text.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Message(s) | Outcome::Error(s) => s,
        }
    }
}

/// One entry of the transfer history.
///
/// Serialized as `{"message"|"error": .., "time": <secs>, "filename": .., "option": ..}`,
/// the record shape existing history files already use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransferResult")]
pub struct TransferResult {
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(rename = "time", serialize_with = "secs_f64::serialize")]
    pub elapsed: Duration,
    pub filename: String,
    /// Requested option name. Kept as text so rejected requests are recorded too.
    pub option: String,
}

impl TransferResult {
    pub fn new(
        outcome: Outcome,
        elapsed: Duration,
        filename: impl Into<String>,
        option: impl Into<String>,
    ) -> Self {
        Self {
            outcome,
            elapsed,
            filename: filename.into(),
            option: option.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Message(s) => Some(s),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error(s) => Some(s),
            Outcome::Message(_) => None,
        }
    }

    /// Parsed option, if the recorded name is a supported strategy.
    pub fn transfer_option(&self) -> Option<TransferOption> {
        self.option.parse().ok()
    }
}

/// Wire form used to validate records on the way in.
#[derive(Deserialize)]
struct RawTransferResult {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    time: f64,
    filename: String,
    option: String,
}

impl TryFrom<RawTransferResult> for TransferResult {
    type Error = String;

    fn try_from(raw: RawTransferResult) -> Result<Self, Self::Error> {
        let outcome = match (raw.message, raw.error) {
            (Some(m), None) => Outcome::Message(m),
            (None, Some(e)) => Outcome::Error(e),
            (Some(_), Some(_)) => {
                return Err("record carries both message and error".into());
            }
            (None, None) => return Err("record carries neither message nor error".into()),
        };
        let elapsed = Duration::try_from_secs_f64(raw.time)
            .map_err(|e| format!("invalid time {}: {e}", raw.time))?;
        Ok(TransferResult {
            outcome,
            elapsed,
            filename: raw.filename,
            option: raw.option,
        })
    }
}

mod secs_f64 {
    use std::time::Duration;

    use serde::{Serialize, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        d.as_secs_f64().serialize(serializer)
    }
}
