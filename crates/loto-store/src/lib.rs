//! Key-value storage for the loto draw ledger.
//!
//! The ledger persists a single keyed record. Where that record lives is a
//! backend concern, abstracted behind [`KeyValueStore`].
//!
//! # Storage Backends
//!
//! - [`InMemoryStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileStore`] -- one JSON file per key inside a directory
//! - [`LayeredStore`] -- several scopes written together, read by priority
//!
//! # Design Rules
//!
//! 1. Writes are synchronous: `put` returns only once the value is stored.
//! 2. The store never interprets values -- it is a pure key-value store.
//! 3. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod layered;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use layered::{LayeredStore, Scope};
pub use memory::InMemoryStore;
pub use traits::KeyValueStore;
