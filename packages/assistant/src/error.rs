//! Typed errors for the FAQ assistant.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Only two things
//! can actually fail a query: the record store (fatal, propagated) and
//! missing configuration at construction time. Classification misses,
//! unresolved scheme names and enhancer failures are all expected
//! outcomes handled inline, never errors.

use thiserror::Error;

/// Errors that can surface from answering a query.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The record store failed; there is no answer without it
    #[error("store error: {0}")]
    Store(#[from] fund_extraction::StoreError),
}

/// Result type alias for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Failures of the optional enhancement adapter.
///
/// These are expected and recoverable: every one of them triggers a
/// silent fallback to the deterministic path and is never surfaced to
/// the caller as an error.
#[derive(Debug, Error)]
pub enum EnhancerError {
    /// The adapter did not answer within its time box
    #[error("enhancement timed out")]
    Timeout,

    /// The underlying provider call failed
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider answered with nothing usable
    #[error("empty enhancement response")]
    Empty,
}
