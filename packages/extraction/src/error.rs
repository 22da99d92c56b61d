//! Typed errors for the extraction and storage core.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Extraction itself never errors: a field with no usable match is the
//! `Unavailable` sentinel, not a failure. Errors here are reserved for
//! the persistence layer, where an unreadable or unwritable store is
//! fatal and must propagate to the caller.

use thiserror::Error;

/// Errors that can occur in the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing files failed
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be serialized or deserialized
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
