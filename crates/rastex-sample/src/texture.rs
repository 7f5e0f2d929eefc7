//! Mip level selection and the texture facade.
//!
//! [`Texture`] is what the rasterizer talks to: it owns a [`MipPyramid`]
//! and turns one [`SampleParams`] into one filtered [`Color`] per covered
//! pixel.
//!
//! Level selection estimates how many base-level texels one screen pixel
//! covers from the screen-space UV derivatives, takes `log2` of that
//! footprint as a continuous level of detail, and then either snaps it to
//! one level or blends the two neighboring levels, per the closed
//! [`LevelFilter`] policy set. Computed level indices are always clamped
//! into the populated range - saturation at the coarsest level is part of
//! the selection contract, not an error.
//!
//! # Usage
//!
//! ```rust
//! use glam::Vec2;
//! use rastex_core::{Color, MipLevel};
//! use rastex_sample::{LevelFilter, PixelFilter, SampleParams, Texture};
//!
//! let base = MipLevel::filled(256, 256, Color::from_texel([128, 128, 128]));
//! let texture = Texture::with_mips(base).unwrap();
//!
//! let uv = Vec2::new(0.5, 0.5);
//! let params = SampleParams {
//!     uv,
//!     du_uv: uv + Vec2::new(1.0 / 256.0, 0.0),
//!     dv_uv: uv + Vec2::new(0.0, 1.0 / 256.0),
//!     pixel_filter: PixelFilter::Bilinear,
//!     level_filter: LevelFilter::Linear,
//! };
//!
//! let color = texture.sample(&params);
//! assert_eq!(color.to_texel(), [128, 128, 128]);
//! ```

use glam::Vec2;
use rastex_core::{Color, MipLevel};

use crate::error::SampleResult;
use crate::pyramid::MipPyramid;
use crate::sampler::{self, PixelFilter};

/// Mip-level selection policy.
///
/// A closed set dispatched by `match`; it does not grow at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    /// Always sample the full-resolution base level.
    #[default]
    Base,
    /// Round the level of detail to the nearest single level.
    Nearest,
    /// Sample the two levels straddling the level of detail and blend
    /// them by its fractional part.
    Linear,
}

/// One texture sample request.
///
/// `du_uv` and `dv_uv` are the texture coordinates of the points one
/// screen pixel to the right of and below `uv`; their deltas against `uv`
/// drive level selection. Transient - built per sample call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleParams {
    /// Texture coordinate of the sampled pixel
    pub uv: Vec2,
    /// Texture coordinate one screen pixel to the right
    pub du_uv: Vec2,
    /// Texture coordinate one screen pixel down
    pub dv_uv: Vec2,
    /// Per-level pixel sampling policy
    pub pixel_filter: PixelFilter,
    /// Mip-level selection policy
    pub level_filter: LevelFilter,
}

/// A mip-mapped texture: the sampling facade over a [`MipPyramid`].
///
/// Build it once (the pyramid generation is the only mutating step), then
/// sample it freely; `sample` takes `&self`, performs no mutation and no
/// allocation, so concurrent sampling from multiple threads is safe.
#[derive(Debug)]
pub struct Texture {
    pyramid: MipPyramid,
}

impl Texture {
    /// Creates a texture holding only the base level (no mip chain yet).
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::EmptyBaseLevel`](crate::SampleError::EmptyBaseLevel)
    /// if the base has a zero extent.
    pub fn new(base: MipLevel) -> SampleResult<Self> {
        Ok(Self {
            pyramid: MipPyramid::new(base)?,
        })
    }

    /// Creates a texture and generates its full mip chain.
    pub fn with_mips(base: MipLevel) -> SampleResult<Self> {
        let mut texture = Self::new(base)?;
        texture.pyramid.generate_mips(0)?;
        Ok(texture)
    }

    /// Base level width in texels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pyramid.base().width()
    }

    /// Base level height in texels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pyramid.base().height()
    }

    /// Returns the underlying pyramid.
    #[inline]
    pub fn pyramid(&self) -> &MipPyramid {
        &self.pyramid
    }

    /// Regenerates mip levels below `base_level`.
    ///
    /// See [`MipPyramid::generate_mips`].
    pub fn generate_mips(&mut self, base_level: usize) -> SampleResult<()> {
        self.pyramid.generate_mips(base_level)
    }

    /// Continuous level of detail for a sample request.
    ///
    /// Scales the per-axis UV deltas into base-level pixel units and takes
    /// `log2` of the larger magnitude: 0.0 means one screen pixel covers
    /// one base texel, 1.0 means two texels, and so on. The value is NOT
    /// clamped here; a footprint smaller than one texel yields a negative
    /// LOD (and a zero footprint `-inf`), which the selection policies
    /// clamp into the populated level range.
    pub fn lod(&self, params: &SampleParams) -> f32 {
        let base = self.pyramid.base();
        let extent = Vec2::new(base.width() as f32, base.height() as f32);
        let dx = (params.du_uv - params.uv) * extent;
        let dy = (params.dv_uv - params.uv) * extent;
        dx.length().max(dy.length()).log2()
    }

    /// Returns one filtered color for a sample request.
    ///
    /// Dispatches on [`SampleParams::level_filter`]; the per-level fetch
    /// honors [`SampleParams::pixel_filter`]. Total over all inputs: level
    /// indices saturate at the pyramid bounds and degenerate blends
    /// collapse to single-level samples.
    pub fn sample(&self, params: &SampleParams) -> Color {
        match params.level_filter {
            LevelFilter::Base => self.sample_level(params.uv, 0, params.pixel_filter),
            LevelFilter::Nearest => {
                let level = self.clamp_level(self.lod(params).round());
                self.sample_level(params.uv, level, params.pixel_filter)
            }
            LevelFilter::Linear => {
                let max = (self.pyramid.len() - 1) as f32;
                let lod = self.lod(params).clamp(0.0, max);
                let lower = lod.floor();
                let upper = lod.ceil();
                if lower == upper {
                    // Integer LOD: both candidates are the same level.
                    return self.sample_level(params.uv, lower as usize, params.pixel_filter);
                }
                let c1 = self.sample_level(params.uv, lower as usize, params.pixel_filter);
                let c2 = self.sample_level(params.uv, upper as usize, params.pixel_filter);
                c1 + (c2 - c1) * (lod - lower)
            }
        }
    }

    /// Samples one specific mip level, clamped into the populated range.
    #[inline]
    pub fn sample_level(&self, uv: Vec2, level: usize, filter: PixelFilter) -> Color {
        sampler::sample_level(self.pyramid.level_clamped(level), uv, filter)
    }

    /// Rounds a continuous level into a valid level index.
    #[inline]
    fn clamp_level(&self, level: f32) -> usize {
        let max = (self.pyramid.len() - 1) as f32;
        level.clamp(0.0, max) as usize
    }
}
