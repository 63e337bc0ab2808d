use loto_store::StoreError;
use loto_types::{DrawNumber, TypeError};

/// Errors produced by ledger operations.
///
/// None of these are fatal: every failing operation leaves the ledger
/// exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid number {0:?}: expected an integer from 01 to 90")]
    InvalidNumber(String),

    #[error("number {number} was already drawn (draw #{})", .index + 1)]
    DuplicateNumber { number: DrawNumber, index: usize },

    #[error("no draw at position {index} (history has {len} draws)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("a ticket needs exactly {expected} numbers, got {actual}")]
    InvalidTicket { expected: usize, actual: usize },

    #[error("at least {required} draws are needed to verify a ticket, only {available} so far")]
    InsufficientHistory { required: usize, available: usize },

    #[error("stored history is unreadable: {0}")]
    CorruptState(String),

    #[error("invalid timestamp format {0:?}")]
    InvalidTimestampFormat(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store error: {0}")]
    Storage(#[from] StoreError),
}

impl From<TypeError> for LedgerError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidNumber(raw) => Self::InvalidNumber(raw),
            TypeError::InvalidTicket { expected, actual } => {
                Self::InvalidTicket { expected, actual }
            }
        }
    }
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
