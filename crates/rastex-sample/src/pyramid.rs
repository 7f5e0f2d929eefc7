//! Mip pyramid storage and generation.
//!
//! A [`MipPyramid`] is an ordered sequence of [`MipLevel`]s: index 0 is the
//! caller-supplied base image, and each following level halves the previous
//! one (per axis, floor division, minimum 1 texel) through the separable
//! area filter in [`crate::filter`].
//!
//! Generation is an explicit batch step: build the pyramid, then hand it to
//! samplers. A `&MipPyramid` never mutates, so once [`generate_mips`]
//! (or [`Texture::with_mips`](crate::Texture::with_mips)) has returned,
//! any number of threads may sample it concurrently without locking.
//!
//! [`generate_mips`]: MipPyramid::generate_mips
//!
//! # Usage
//!
//! ```rust
//! use rastex_core::{Color, MipLevel};
//! use rastex_sample::MipPyramid;
//!
//! let base = MipLevel::filled(4, 4, Color::from_texel([128, 128, 128]));
//! let mut pyramid = MipPyramid::new(base).unwrap();
//! pyramid.generate_mips(0).unwrap();
//!
//! // 4x4 -> 2x2 -> 1x1
//! assert_eq!(pyramid.len(), 3);
//! assert_eq!(pyramid.level(2).unwrap().dimensions(), (1, 1));
//! ```

use rastex_core::{Color, MipLevel, BYTES_PER_TEXEL};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{SampleError, SampleResult};
use crate::filter::AxisFilter;

/// Hard cap on the total number of levels in one pyramid.
///
/// Bounds the chain for pathologically large base images; generation stops
/// here even if the coarsest level has not collapsed to 1x1 yet.
pub const MAX_MIP_LEVELS: usize = 14;

/// An ordered chain of progressively halved mip levels.
///
/// Always holds at least the base level. Levels after the base are produced
/// exclusively by [`generate_mips`](Self::generate_mips) and never mutated
/// afterwards; the pyramid exclusively owns every level.
#[derive(Debug)]
pub struct MipPyramid {
    levels: Vec<MipLevel>,
}

impl MipPyramid {
    /// Creates a pyramid holding only the given base level.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::EmptyBaseLevel`] if the base has a zero
    /// extent along either axis.
    pub fn new(base: MipLevel) -> SampleResult<Self> {
        if base.is_empty() {
            return Err(SampleError::EmptyBaseLevel {
                width: base.width(),
                height: base.height(),
            });
        }
        Ok(Self { levels: vec![base] })
    }

    /// Number of populated levels (always >= 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if the pyramid holds no levels.
    ///
    /// Construction guarantees a base level, so this is always `false`;
    /// provided for container-API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the base (full-resolution) level.
    #[inline]
    pub fn base(&self) -> &MipLevel {
        &self.levels[0]
    }

    /// Returns the level at `index`, or `None` past the populated range.
    #[inline]
    pub fn level(&self, index: usize) -> Option<&MipLevel> {
        self.levels.get(index)
    }

    /// Returns the level at `index`, clamped into the populated range.
    ///
    /// Level selection computes indices from a continuous LOD value and is
    /// defined to saturate at the coarsest level rather than fault; this is
    /// the total lookup backing that contract.
    #[inline]
    pub fn level_clamped(&self, index: usize) -> &MipLevel {
        &self.levels[index.min(self.levels.len() - 1)]
    }

    /// Returns all populated levels, finest first.
    #[inline]
    pub fn levels(&self) -> &[MipLevel] {
        &self.levels
    }

    /// Regenerates every level below `base_level` by repeated halving.
    ///
    /// Existing levels past `base_level` are discarded first, so calling
    /// this again (or with a replaced base) rebuilds a consistent chain.
    /// Generation stops when the coarsest level reaches 1x1 or the pyramid
    /// holds [`MAX_MIP_LEVELS`] levels, whichever comes first.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::InvalidBaseLevel`] if `base_level` is not a
    /// populated level; the pyramid is left untouched in that case.
    pub fn generate_mips(&mut self, base_level: usize) -> SampleResult<()> {
        let count = self.levels.len();
        if base_level >= count {
            return Err(SampleError::InvalidBaseLevel {
                level: base_level,
                count,
            });
        }

        let (width, height) = self.levels[base_level].dimensions();
        debug!(base_level, width, height, "generating mip chain");

        self.levels.truncate(base_level + 1);
        while self.levels.len() < MAX_MIP_LEVELS {
            let prev = &self.levels[self.levels.len() - 1];
            if prev.width() == 1 && prev.height() == 1 {
                break;
            }
            let next = downsample(prev);
            trace!(
                level = self.levels.len(),
                width = next.width(),
                height = next.height(),
                "generated mip level"
            );
            self.levels.push(next);
        }
        Ok(())
    }
}

/// Produces the next-coarser level from `prev` with the area filter.
///
/// `prev` must have at least one axis longer than 1 texel.
fn downsample(prev: &MipLevel) -> MipLevel {
    debug_assert!(prev.width() > 1 || prev.height() > 1);

    let dst_w = (prev.width() / 2).max(1);
    let dst_h = (prev.height() / 2).max(1);
    let mut out = MipLevel::new(dst_w, dst_h);

    if dst_h == prev.height() {
        // Only the horizontal extent shrinks (the level is a single row).
        let wf = AxisFilter::new(prev.width(), dst_w);
        for i in 0..dst_w {
            let ww = wf.weights(i as usize);
            let mut acc = Color::BLACK;
            for ii in 0..wf.support() {
                acc += prev.texel(2 * i + ii as u32, 0) * ww[ii];
            }
            out.set_texel(i, 0, acc);
        }
    } else if dst_w == prev.width() {
        // Only the vertical extent shrinks (the level is a single column).
        let hf = AxisFilter::new(prev.height(), dst_h);
        for j in 0..dst_h {
            let hw = hf.weights(j as usize);
            let mut acc = Color::BLACK;
            for jj in 0..hf.support() {
                acc += prev.texel(0, 2 * j + jj as u32) * hw[jj];
            }
            out.set_texel(0, j, acc);
        }
    } else {
        // Both axes shrink: separable 2D filter, one output row at a time.
        let wf = AxisFilter::new(prev.width(), dst_w);
        let hf = AxisFilter::new(prev.height(), dst_h);
        let pitch = out.pitch();
        let texels = out.texels_mut();

        #[cfg(feature = "parallel")]
        texels
            .par_chunks_exact_mut(pitch)
            .enumerate()
            .for_each(|(j, row)| reduce_row(prev, &wf, &hf, j, row));

        #[cfg(not(feature = "parallel"))]
        for (j, row) in texels.chunks_exact_mut(pitch).enumerate() {
            reduce_row(prev, &wf, &hf, j, row);
        }
    }

    out
}

/// Fills output row `j` of a 2D reduction.
fn reduce_row(prev: &MipLevel, wf: &AxisFilter, hf: &AxisFilter, j: usize, row: &mut [u8]) {
    let hw = hf.weights(j);
    let dst_w = row.len() / BYTES_PER_TEXEL;
    for i in 0..dst_w {
        let ww = wf.weights(i);
        let mut acc = Color::BLACK;
        for jj in 0..hf.support() {
            for ii in 0..wf.support() {
                let c = prev.texel((2 * i + ii) as u32, (2 * j + jj) as u32);
                acc += c * (hw[jj] * ww[ii]);
            }
        }
        row[BYTES_PER_TEXEL * i..BYTES_PER_TEXEL * (i + 1)].copy_from_slice(&acc.to_texel());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> Color {
        Color::from_texel([128, 128, 128])
    }

    #[test]
    fn test_rejects_empty_base() {
        let result = MipPyramid::new(MipLevel::new(0, 4));
        assert!(matches!(result, Err(SampleError::EmptyBaseLevel { .. })));
    }

    #[test]
    fn test_invalid_base_level_leaves_pyramid_untouched() {
        let mut pyramid = MipPyramid::new(MipLevel::filled(4, 4, gray())).unwrap();
        let result = pyramid.generate_mips(1);
        assert!(matches!(
            result,
            Err(SampleError::InvalidBaseLevel { level: 1, count: 1 })
        ));
        assert_eq!(pyramid.len(), 1);
    }

    #[test]
    fn test_flat_color_invariance() {
        let mut pyramid = MipPyramid::new(MipLevel::filled(4, 4, gray())).unwrap();
        pyramid.generate_mips(0).unwrap();

        assert_eq!(pyramid.len(), 3);
        assert_eq!(pyramid.level(1).unwrap().dimensions(), (2, 2));
        assert_eq!(pyramid.level(2).unwrap().dimensions(), (1, 1));

        for level in pyramid.levels() {
            for y in 0..level.height() {
                for x in 0..level.width() {
                    assert_eq!(level.texel(x, y).to_texel(), [128, 128, 128]);
                }
            }
        }
    }

    #[test]
    fn test_even_box_average() {
        let mut base = MipLevel::new(2, 2);
        base.set_texel(0, 0, Color::new(1.0, 0.0, 0.0));
        base.set_texel(1, 0, Color::new(0.0, 1.0, 0.0));
        base.set_texel(0, 1, Color::new(0.0, 0.0, 1.0));
        base.set_texel(1, 1, Color::new(1.0, 1.0, 1.0));

        let mut pyramid = MipPyramid::new(base).unwrap();
        pyramid.generate_mips(0).unwrap();

        let top = pyramid.level(1).unwrap().texel(0, 0).to_texel();
        // Each channel averages two 255s and two 0s.
        let expected = rastex_core::channel_to_u8(0.5 * 1.0);
        assert_eq!(top, [expected; 3]);
    }

    #[test]
    fn test_odd_golden_blend() {
        let mut base = MipLevel::new(3, 3);
        base.set_texel(0, 0, Color::new(1.0, 0.0, 0.0));
        base.set_texel(2, 0, Color::new(0.0, 1.0, 0.0));
        base.set_texel(0, 2, Color::new(0.0, 0.0, 1.0));
        base.set_texel(2, 2, Color::WHITE);

        let mut pyramid = MipPyramid::new(base).unwrap();
        pyramid.generate_mips(0).unwrap();

        assert_eq!(pyramid.len(), 2);
        let top = pyramid.level(1).unwrap();
        assert_eq!(top.dimensions(), (1, 1));

        // Collapsing 3 -> 1 gives uniform 1/3 taps per axis, so the single
        // output texel is the 1/9-weighted blend of all nine inputs.
        let w = 1.0f32 / 3.0;
        let mut expected = Color::BLACK;
        for j in 0..3 {
            for i in 0..3 {
                expected += pyramid.base().texel(i, j) * (w * w);
            }
        }
        assert_eq!(top.texel(0, 0).to_texel(), expected.to_texel());
    }

    #[test]
    fn test_dimension_collapse_never_hits_zero() {
        let mut pyramid = MipPyramid::new(MipLevel::filled(5, 3, gray())).unwrap();
        pyramid.generate_mips(0).unwrap();

        // 5x3 -> 2x1 -> 1x1
        assert_eq!(pyramid.len(), 3);
        assert_eq!(pyramid.level(1).unwrap().dimensions(), (2, 1));
        assert_eq!(pyramid.level(2).unwrap().dimensions(), (1, 1));
        for level in pyramid.levels() {
            assert!(level.width() >= 1 && level.height() >= 1);
        }
    }

    #[test]
    fn test_single_row_reduction() {
        // 6x1 exercises the horizontal-only path twice: 6 -> 3 -> 1.
        let mut base = MipLevel::new(6, 1);
        for x in 0..6 {
            let v = if x < 3 { 0.0 } else { 1.0 };
            base.set_texel(x, 0, Color::new(v, v, v));
        }
        let mut pyramid = MipPyramid::new(base).unwrap();
        pyramid.generate_mips(0).unwrap();

        assert_eq!(pyramid.len(), 3);
        assert_eq!(pyramid.level(1).unwrap().dimensions(), (3, 1));
        assert_eq!(pyramid.level(2).unwrap().dimensions(), (1, 1));

        // Half black, half white collapses to mid gray.
        let top = pyramid.level(2).unwrap().texel(0, 0);
        assert!((top.r - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_single_column_reduction() {
        let mut pyramid = MipPyramid::new(MipLevel::filled(1, 4, gray())).unwrap();
        pyramid.generate_mips(0).unwrap();

        assert_eq!(pyramid.len(), 3);
        assert_eq!(pyramid.level(1).unwrap().dimensions(), (1, 2));
        assert_eq!(pyramid.level(2).unwrap().texel(0, 0).to_texel(), [128; 3]);
    }

    #[test]
    fn test_level_cap() {
        // 32768 wide would need 15 halvings; the cap stops the chain first.
        let mut pyramid = MipPyramid::new(MipLevel::filled(32768, 1, gray())).unwrap();
        pyramid.generate_mips(0).unwrap();

        assert_eq!(pyramid.len(), MAX_MIP_LEVELS);
        let coarsest = pyramid.level(MAX_MIP_LEVELS - 1).unwrap();
        assert_eq!(coarsest.dimensions(), (4, 1));
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let mut pyramid = MipPyramid::new(MipLevel::filled(8, 8, gray())).unwrap();
        pyramid.generate_mips(0).unwrap();
        let first_len = pyramid.len();

        pyramid.generate_mips(0).unwrap();
        assert_eq!(pyramid.len(), first_len);
        assert_eq!(
            pyramid.level(first_len - 1).unwrap().texel(0, 0).to_texel(),
            [128; 3]
        );
    }

    #[test]
    fn test_level_clamped_saturates() {
        let mut pyramid = MipPyramid::new(MipLevel::filled(4, 4, gray())).unwrap();
        pyramid.generate_mips(0).unwrap();

        assert_eq!(pyramid.level_clamped(99).dimensions(), (1, 1));
        assert_eq!(pyramid.level_clamped(0).dimensions(), (4, 4));
        assert!(pyramid.level(99).is_none());
    }
}
