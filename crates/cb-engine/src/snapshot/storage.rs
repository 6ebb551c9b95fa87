//! Raw slot storage backends.

use thiserror::Error;

/// Errors from a slot storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend refused the write.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage for serialized snapshots.
///
/// Implementations hold one opaque string payload per key.
pub trait SlotStorage {
    /// Read a payload. `Ok(None)` when the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a payload, replacing any previous one.
    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError>;
}
