//! Draw-history ledger and ticket verification.
//!
//! This crate is the heart of the loto checker. It provides:
//! - [`DrawLedger`]: the ordered, persisted history of drawn numbers with
//!   validated append, in-place edit, and clear
//! - [`verify`]: non-reusing, first-fit matching of a five-number ticket
//!   against draw history
//! - CSV rendering of the history for export

pub mod entry;
pub mod error;
pub mod export;
pub mod ledger;
pub mod verify;

pub use entry::DrawEntry;
pub use error::{LedgerError, LedgerResult};
pub use export::{default_export_file_name, to_csv};
pub use ledger::{
    timestamp_clock, Clock, DrawLedger, RestoreReport, DEFAULT_TIMESTAMP_FORMAT, HISTORY_KEY,
    MIN_DRAWS_FOR_VERIFY,
};
pub use verify::{verify, MatchResult, Verification};
