use thiserror::Error;

/// Errors produced while validating operator input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid number {0:?}: expected an integer from 01 to 90")]
    InvalidNumber(String),

    #[error("a ticket needs exactly {expected} numbers, got {actual}")]
    InvalidTicket { expected: usize, actual: usize },
}
