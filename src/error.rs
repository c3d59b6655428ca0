//! Error types for the whiteboard core.
//!
//! One taxonomy for the whole crate: configuration failures are fatal at
//! construction, validation failures are recoverable (callers fall back to a
//! fresh document), precondition violations guard internal invariants, and
//! storage errors are absorbed at the repository boundary.

use thiserror::Error;

/// Errors that can occur in the whiteboard core.
#[derive(Error, Debug)]
pub enum Error {
    /// A required surface or storage location is missing at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Persisted data failed the schema check.
    #[error("validation error: {0}")]
    Validation(#[from] serde_json::Error),

    /// An internal invariant was violated by the caller.
    #[error("precondition violation: {0}")]
    Precondition(String),

    /// A requested document does not exist.
    #[error("document not found: {id}")]
    NotFound { id: String },

    /// IO error from std::io.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for whiteboard operations.
pub type BoardResult<T> = Result<T, Error>;
