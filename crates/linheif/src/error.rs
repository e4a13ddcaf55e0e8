//! Load error types.

use thiserror::Error;

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading a container image.
///
/// Only failures on the primary image are surfaced here; color-profile,
/// metadata, and auxiliary-layer problems degrade to warnings and a reduced
/// but valid result.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input bytes do not match the expected container signature.
    ///
    /// Non-fatal to a multi-format caller; signals "try another loader".
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Codec context/handle allocation or sample decode failed, or the image
    /// has zero-area dimensions.
    #[error("decode failed: {0}")]
    Decode(String),

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
