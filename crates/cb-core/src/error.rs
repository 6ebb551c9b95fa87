//! Error types for the Cellblock data model.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two player keys normalize to the same identity.
    #[error("duplicate identity: \"{0}\"")]
    DuplicateIdentity(String),

    /// A player key is empty after trimming.
    #[error("player key is empty")]
    EmptyIdentity,

    /// The game data file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The game data file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The game data root is valid JSON but not an object.
    #[error("game data must be a JSON object")]
    NotAnObject,
}
