//! Error types for core buffer operations.

use thiserror::Error;

/// Result type alias using [`CoreError`] as the error type.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while building or combining pixel buffers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Buffers that must agree in size do not.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),
}
