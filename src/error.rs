use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompareError>;

/// Everything that can go wrong between reading a result file and
/// computing its delta. Each variant names the file involved.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {what} must be a JSON object", path.display())]
    NotAnObject { path: PathBuf, what: String },

    #[error("{}: expected exactly one result entry, found {count}", path.display())]
    EntryCount { path: PathBuf, count: usize },

    #[error("{}: result '{key}' has no '{field}' count", path.display())]
    MissingField {
        path: PathBuf,
        key: String,
        field: &'static str,
    },

    #[error("{}: '{field}' of result '{key}' is not an integer: {value}", path.display())]
    InvalidCount {
        path: PathBuf,
        key: String,
        field: &'static str,
        value: String,
    },

    #[error("{field} delta overflows ({current} - {baseline})")]
    Overflow {
        field: &'static str,
        current: i64,
        baseline: i64,
    },
}

impl CompareError {
    /// Stable short name, used in JSON output and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Parse { .. } => "parse",
            Self::NotAnObject { .. } => "not_an_object",
            Self::EntryCount { .. } => "entry_count",
            Self::MissingField { .. } => "missing_field",
            Self::InvalidCount { .. } => "invalid_count",
            Self::Overflow { .. } => "overflow",
        }
    }
}
