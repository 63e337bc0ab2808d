//! Foundation types for the loto ticket checker.
//!
//! Every other loto crate depends on `loto-types`.
//!
//! # Key Types
//!
//! - [`DrawNumber`] -- a validated number in `1..=90`, displayed zero-padded
//! - [`Ticket`] -- exactly five draw numbers submitted for verification
//! - [`transcript::extract_number`] -- pull a draw number out of dictated text

pub mod error;
pub mod number;
pub mod ticket;
pub mod transcript;

pub use error::TypeError;
pub use number::DrawNumber;
pub use ticket::{Ticket, TICKET_SIZE};
