//! Error types for the Cellblock engine.

use thiserror::Error;

use crate::snapshot::StorageError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the engine.
///
/// Bad player input is never an error; it becomes an [`Outcome`](crate::Outcome).
/// These cover calls made in the wrong state and persistence failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A result is still on screen; acknowledge it first.
    #[error("a result is still being presented")]
    Busy,

    /// The narration has not finished revealing.
    #[error("narration is still being revealed")]
    NarrationInProgress,

    /// No result is being presented.
    #[error("nothing to acknowledge")]
    NothingToAcknowledge,

    /// The GM console is open; ordinary input is suspended.
    #[error("the GM console is open")]
    GmConsoleOpen,

    /// The GM console is closed.
    #[error("the GM console is closed")]
    GmConsoleClosed,

    /// Confirm or decline with no save/load awaiting confirmation.
    #[error("no save or load is awaiting confirmation")]
    NoPendingAction,

    /// Slot number outside 1-3.
    #[error("invalid slot: {0} (expected 1-3)")]
    InvalidSlot(String),

    /// Slot storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
