use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Duplicate {0}")]
    Duplicate(String),
    #[error("Budget overlaps an existing {0} budget")]
    Overlap(String),
    #[error("No more commands to undo")]
    NoUndoAvailable,
    #[error("No more commands to redo")]
    NoRedoAvailable,
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
    #[error("Amount total exceeds the supported range")]
    AmountOverflow,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub(crate) fn invalid_format(what: &str, input: &str) -> Self {
        LedgerError::InvalidFormat(format!("{what} `{input}`"))
    }
}
