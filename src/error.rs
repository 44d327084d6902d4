//! Error types for the chunking library.

use thiserror::Error;

/// Errors surfaced by registry and configuration code.
///
/// Splitting itself never fails: degenerate parameters are clamped instead.
#[derive(Debug, Error)]
pub enum ChunkerError {
    /// No strategy is registered, so nothing can be resolved
    #[error("no chunking strategy is registered")]
    EmptyRegistry,

    /// An environment setting could not be parsed
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: String, value: String },

    /// A background chunking task panicked or was cancelled
    #[error("chunking task failed: {0}")]
    Task(String),
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, ChunkerError>;
