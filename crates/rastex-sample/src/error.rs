//! Error types for pyramid operations.

use thiserror::Error;

/// Error type for mip pyramid construction.
///
/// Sampling itself is total and never fails; only the explicit pyramid
/// build step can reject its input.
#[derive(Error, Debug)]
pub enum SampleError {
    /// Mip generation was requested from a level index that does not exist.
    ///
    /// The pyramid is left untouched when this is returned.
    #[error("invalid base level {level}: pyramid has {count} level(s)")]
    InvalidBaseLevel {
        /// Requested base level index
        level: usize,
        /// Number of populated levels
        count: usize,
    },

    /// The supplied base level has a zero extent.
    #[error("base level is empty ({width}x{height})")]
    EmptyBaseLevel {
        /// Base level width
        width: u32,
        /// Base level height
        height: u32,
    },
}

/// Result type for pyramid operations.
pub type SampleResult<T> = Result<T, SampleError>;
