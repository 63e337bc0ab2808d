/// Errors from key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be mapped onto the backend (e.g. not a safe file name).
    #[error("invalid key {0:?}")]
    InvalidKey(String),

    /// A stored value is not valid UTF-8.
    #[error("value for key {key:?} is not valid UTF-8")]
    NotUtf8 { key: String },

    /// Storage backend is read-only or otherwise unavailable.
    #[error("store is read-only")]
    ReadOnly,

    /// A layered store was built without any scope.
    #[error("layered store has no scopes")]
    NoScopes,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
