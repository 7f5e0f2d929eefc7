//! Per-level pixel sampling.
//!
//! Fetches one filtered color from a single [`MipLevel`] at a normalized
//! UV coordinate. Two interchangeable policies exist, chosen per call via
//! the closed [`PixelFilter`] enum:
//!
//! - [`PixelFilter::Nearest`] - round to the nearest texel, no blending
//! - [`PixelFilter::Bilinear`] - blend the four surrounding texel centers
//!
//! Normalized coordinates map to the level's own pixel grid as
//! `pixel = uv * extent`. Coordinates outside [0, 1] (or interpolation
//! taps pushed past the border) clamp to the edge texels; there is no wrap
//! or border-color addressing.
//!
//! Sampling is pure and error-free: every input coordinate produces a
//! color, so the rasterizer's per-pixel hot path never branches on
//! failure.

use glam::Vec2;
use rastex_core::{Color, MipLevel};

/// Pixel-sampling policy for a single mip level.
///
/// A closed set dispatched by `match`; it does not grow at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFilter {
    /// Nearest-neighbor (fastest, blocky under magnification).
    #[default]
    Nearest,
    /// Bilinear interpolation of the four surrounding texel centers.
    Bilinear,
}

/// Samples `level` at `uv` with the requested filter.
#[inline]
pub fn sample_level(level: &MipLevel, uv: Vec2, filter: PixelFilter) -> Color {
    match filter {
        PixelFilter::Nearest => sample_nearest(level, uv),
        PixelFilter::Bilinear => sample_bilinear(level, uv),
    }
}

/// Nearest-neighbor sample.
///
/// Rounds the scaled coordinate to the nearest texel and clamps the index
/// into the level, so `uv = 1.0` (which scales to one past the last texel)
/// still reads the edge texel instead of out-of-bounds memory.
pub fn sample_nearest(level: &MipLevel, uv: Vec2) -> Color {
    let x = (uv.x * level.width() as f32).round();
    let y = (uv.y * level.height() as f32).round();
    let x = (x.max(0.0) as u32).min(level.width() - 1);
    let y = (y.max(0.0) as u32).min(level.height() - 1);
    level.texel(x, y)
}

/// Bilinear sample.
///
/// Snaps the scaled coordinate to the nearest texel corner, takes the four
/// texel centers around it, clamps each center into the valid sampling
/// region `[0.5, extent - 0.5]` per axis (clamp-to-edge), then combines
/// the four colors with two horizontal lerps and one vertical lerp. On a
/// 1-texel-wide axis the centers coincide and the lerp degenerates to the
/// single available color.
pub fn sample_bilinear(level: &MipLevel, uv: Vec2) -> Color {
    let extent = Vec2::new(level.width() as f32, level.height() as f32);
    let scaled = uv * extent;
    let snapped = scaled.round();

    let lo = Vec2::splat(0.5);
    let hi = extent - 0.5;

    let p00 = (snapped + Vec2::new(-0.5, -0.5)).clamp(lo, hi);
    let p10 = (snapped + Vec2::new(0.5, -0.5)).clamp(lo, hi);
    let p01 = (snapped + Vec2::new(-0.5, 0.5)).clamp(lo, hi);
    let p11 = (snapped + Vec2::new(0.5, 0.5)).clamp(lo, hi);

    let c00 = texel_at(level, p00);
    let c10 = texel_at(level, p10);
    let c01 = texel_at(level, p01);
    let c11 = texel_at(level, p11);

    let lower = lerp_between(c00, c10, p00, p10, Vec2::new(scaled.x, p00.y));
    let upper = lerp_between(c01, c11, p01, p11, Vec2::new(scaled.x, p01.y));
    lerp_between(
        lower,
        upper,
        Vec2::new(scaled.x, p00.y),
        Vec2::new(scaled.x, p01.y),
        scaled,
    )
}

/// Linear interpolation between two colors pinned at two points.
///
/// The fraction is the Euclidean distance from `p1` to `at` over the
/// distance from `p1` to `p2`. Coincident endpoints return `c1` unchanged
/// rather than dividing by zero, which is exactly the right answer when a
/// clamped interpolation interval collapses at a texture edge.
///
/// # Example
///
/// ```rust
/// use glam::Vec2;
/// use rastex_core::Color;
/// use rastex_sample::sampler::lerp_between;
///
/// let a = Color::new(0.0, 0.0, 0.0);
/// let b = Color::new(1.0, 1.0, 1.0);
/// let p1 = Vec2::new(0.5, 0.5);
/// let p2 = Vec2::new(1.5, 0.5);
///
/// assert_eq!(lerp_between(a, b, p1, p2, p1), a);
/// assert_eq!(lerp_between(a, b, p1, p2, p2), b);
/// assert_eq!(lerp_between(a, b, p1, p1, p1), a); // degenerate interval
/// ```
#[inline]
pub fn lerp_between(c1: Color, c2: Color, p1: Vec2, p2: Vec2, at: Vec2) -> Color {
    if p1 == p2 {
        return c1;
    }
    let t = (at - p1).length() / (p2 - p1).length();
    c1 + (c2 - c1) * t
}

/// Fetches the texel whose center is at `center` (floor indexing).
#[inline]
fn texel_at(level: &MipLevel, center: Vec2) -> Color {
    level.texel(center.x as u32, center.y as u32)
}
