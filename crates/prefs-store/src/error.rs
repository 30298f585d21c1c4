use std::path::PathBuf;

/// Errors from preference store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted preferences file could not be decoded.
    #[error("corrupt preferences file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Serialization of the in-memory map failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
