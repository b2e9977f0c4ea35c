//! Error types for canvas operations.

use thiserror::Error;

use crate::block::BlockType;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
///
/// None of these terminate an editing session: structural misses are
/// recovered as no-ops by the caller, corrupt inputs fall back to an
/// empty canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// A type tag outside the closed block catalog was used.
    ///
    /// This is a programming error in the caller; the catalog is not
    /// extensible at runtime.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// A structural operation referenced an index outside the sequence.
    #[error("Index {index} out of range for canvas of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Canvas length at the time of the operation.
        len: usize,
    },

    /// A block id did not resolve to any block on the canvas.
    #[error("Block not found: {0}")]
    NotFound(String),

    /// An update attempted to change a block's kind.
    ///
    /// A block's type is immutable after creation.
    #[error("Block kind changed during update: {was} -> {now}")]
    KindChanged {
        /// The kind before the update.
        was: BlockType,
        /// The kind the update tried to install.
        now: BlockType,
    },

    /// An operation was applied to a block of the wrong kind.
    #[error("Invalid operation on block: {0}")]
    InvalidOperation(String),

    /// A transfer payload or durable slot value could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Sequence serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
