//! # rastex-core
//!
//! Core types for the rastex software-rasterizer texture subsystem.
//!
//! This crate provides the foundational value types shared by the rest of
//! the rastex workspace:
//!
//! - [`Color`] - 3-component floating-point RGB value used for all
//!   interpolation arithmetic
//! - [`MipLevel`] - an owned 2D grid of 8-bit RGB texels (one image in a
//!   mip pyramid)
//! - [`channel_to_f32`] / [`channel_to_u8`] - pure conversions between the
//!   8-bit storage representation and normalized floats
//!
//! # Design
//!
//! Texels are stored 3 bytes per texel in **row-major** order:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! A [`MipLevel`] exclusively owns its buffer; higher layers (the pyramid
//! in `rastex-sample`) own their levels by value and never alias them, so
//! a fully built pyramid can be sampled from many threads without locking.
//!
//! # Usage
//!
//! ```rust
//! use rastex_core::{Color, MipLevel};
//!
//! let mut base = MipLevel::new(4, 4);
//! base.set_texel(0, 0, Color::new(1.0, 0.5, 0.25));
//!
//! let c = base.texel(0, 0);
//! assert!((c.r - 1.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod error;
pub mod level;

pub use color::{channel_to_f32, channel_to_u8, Color};
pub use error::{Error, Result};
pub use level::{MipLevel, BYTES_PER_TEXEL};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use rastex_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{channel_to_f32, channel_to_u8, Color};
    pub use crate::error::{Error, Result};
    pub use crate::level::{MipLevel, BYTES_PER_TEXEL};
}
