//! Error types for rastex-core operations.
//!
//! The [`Error`] enum covers the failure modes of texel buffer
//! construction. Per-texel access on the sampling hot path never returns
//! an error; bounds problems there are resolved by clamping at the call
//! site (see `rastex-sample`).

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing texel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero. A [`crate::MipLevel`] must
    /// always have at least one texel along each axis.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Texel buffer length doesn't match the declared dimensions.
    ///
    /// A width x height RGB level requires exactly `3 * width * height`
    /// bytes.
    #[error("texel buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferSizeMismatch {
        /// Required buffer length in bytes
        expected: usize,
        /// Actual buffer length in bytes
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::BufferSizeMismatch`] error.
    #[inline]
    pub fn buffer_size_mismatch(expected: usize, got: usize) -> Self {
        Self::BufferSizeMismatch { expected, got }
    }
}
