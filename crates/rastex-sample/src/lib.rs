//! # rastex-sample
//!
//! Mip pyramid generation and filtered texture sampling for the rastex
//! software rasterizer.
//!
//! Given a texture coordinate and its screen-space rate of change, this
//! crate returns one representative color from a much higher-resolution
//! source image without aliasing: minification is hidden behind a mip
//! pyramid built with an area filter, and per-pixel fetches interpolate
//! within and between pyramid levels.
//!
//! # Modules
//!
//! - [`pyramid`] - [`MipPyramid`] storage and area-filter downsampling
//! - [`filter`] - per-axis box/trapezoid weights used by the downsampler
//! - [`sampler`] - nearest / bilinear fetch from one level
//! - [`texture`] - level-of-detail selection and the [`Texture`] facade
//!
//! # Example
//!
//! ```rust
//! use glam::Vec2;
//! use rastex_core::{Color, MipLevel};
//! use rastex_sample::{LevelFilter, PixelFilter, SampleParams, Texture};
//!
//! // Base image from the loader (here: flat gray), mips generated once.
//! let base = MipLevel::filled(64, 64, Color::from_texel([128, 128, 128]));
//! let texture = Texture::with_mips(base).unwrap();
//!
//! // Per covered pixel, the rasterizer asks for one filtered color.
//! let uv = Vec2::new(0.25, 0.75);
//! let color = texture.sample(&SampleParams {
//!     uv,
//!     du_uv: uv + Vec2::new(2.0 / 64.0, 0.0),
//!     dv_uv: uv + Vec2::new(0.0, 2.0 / 64.0),
//!     pixel_filter: PixelFilter::Bilinear,
//!     level_filter: LevelFilter::Linear,
//! });
//! assert_eq!(color.to_texel(), [128, 128, 128]);
//! ```
//!
//! # Concurrency
//!
//! Build, then freeze: pyramid generation is a single batch mutation, and
//! every sampling entry point takes `&self` over immutable levels. Once a
//! texture is built, any number of threads may sample it concurrently.
//!
//! # Feature Flags
//!
//! - `parallel` - parallelize downsampling rows with rayon (enabled by
//!   default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod pyramid;
pub mod sampler;
pub mod texture;

pub use error::{SampleError, SampleResult};
pub use pyramid::{MipPyramid, MAX_MIP_LEVELS};
pub use sampler::PixelFilter;
pub use texture::{LevelFilter, SampleParams, Texture};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use rastex_sample::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{SampleError, SampleResult};
    pub use crate::pyramid::{MipPyramid, MAX_MIP_LEVELS};
    pub use crate::sampler::PixelFilter;
    pub use crate::texture::{LevelFilter, SampleParams, Texture};
}
