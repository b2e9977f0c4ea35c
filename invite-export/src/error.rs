//! Error types for export operations.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while producing the export document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the document to its destination failed.
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
