//! Per-axis weights for the halving area filter.
//!
//! Downsampling a mip level halves each axis independently (the 2D filter
//! is separable). Along one axis the filter shape depends on the parity of
//! the source extent:
//!
//! - **Even extent**: every output texel averages exactly 2 source texels
//!   with equal weight - a plain box filter.
//! - **Odd extent**: every output texel covers 3 source texels with
//!   trapezoidal weights that shift by `1 / dst_extent` per output texel,
//!   redistributing the one "extra" source row/column evenly across the
//!   output instead of dropping it at one edge.
//!
//! Weights always sum to 1, so flat regions survive downsampling exactly.

/// Per-axis filter parameters for one halving step.
///
/// Build one per axis with [`AxisFilter::new`], then query
/// [`weights`](Self::weights) per output index. Only the first
/// [`support`](Self::support) entries of the returned array are meaningful.
///
/// # Example
///
/// ```rust
/// use rastex_sample::filter::AxisFilter;
///
/// // Even source: box filter
/// let f = AxisFilter::new(4, 2);
/// assert_eq!(f.support(), 2);
/// assert_eq!(f.weights(0)[0], 0.5);
///
/// // Odd source: trapezoid over 3 taps
/// let f = AxisFilter::new(5, 2);
/// assert_eq!(f.support(), 3);
/// let w = f.weights(1);
/// assert!((w[0] + w[1] + w[2] - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AxisFilter {
    /// Taps per output texel (2 or 3)
    support: usize,
    /// Per-output-texel weight shift (0 for even sources)
    decimal: f32,
    /// Normalization so weights sum to 1
    norm: f32,
}

impl AxisFilter {
    /// Builds the filter for halving `src_extent` texels down to
    /// `dst_extent`.
    ///
    /// `dst_extent` must be `max(1, src_extent / 2)`; the caller only
    /// invokes this for an axis that actually shrinks.
    pub fn new(src_extent: u32, dst_extent: u32) -> Self {
        debug_assert_eq!(dst_extent, (src_extent / 2).max(1));
        if src_extent & 1 == 1 {
            let decimal = 1.0 / dst_extent as f32;
            Self {
                support: 3,
                decimal,
                norm: 1.0 / (2.0 + decimal),
            }
        } else {
            Self {
                support: 2,
                decimal: 0.0,
                norm: 0.5,
            }
        }
    }

    /// Number of source taps contributing to each output texel.
    #[inline]
    pub fn support(&self) -> usize {
        self.support
    }

    /// Tap weights for output texel `i`.
    ///
    /// The trapezoid anchors at the start of the row and shifts by
    /// `decimal` per output texel; for even sources this collapses to the
    /// constant pair (1/2, 1/2).
    #[inline]
    pub fn weights(&self, i: usize) -> [f32; 3] {
        [
            self.norm * (1.0 - self.decimal * i as f32),
            self.norm,
            self.norm * self.decimal * (i as f32 + 1.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_even_source_is_box() {
        let f = AxisFilter::new(8, 4);
        assert_eq!(f.support(), 2);
        for i in 0..4 {
            let w = f.weights(i);
            assert_relative_eq!(w[0], 0.5);
            assert_relative_eq!(w[1], 0.5);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        for src in [2u32, 3, 4, 5, 7, 8, 9, 16, 31, 255, 256, 257] {
            let dst = (src / 2).max(1);
            let f = AxisFilter::new(src, dst);
            for i in 0..dst as usize {
                let w = f.weights(i);
                let sum: f32 = w[..f.support()].iter().sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_odd_trapezoid_shape() {
        // 5 -> 2: decimal = 0.5, norm = 0.4
        let f = AxisFilter::new(5, 2);
        assert_eq!(f.support(), 3);

        let w0 = f.weights(0);
        assert_relative_eq!(w0[0], 0.4);
        assert_relative_eq!(w0[1], 0.4);
        assert_relative_eq!(w0[2], 0.2);

        let w1 = f.weights(1);
        assert_relative_eq!(w1[0], 0.2);
        assert_relative_eq!(w1[1], 0.4);
        assert_relative_eq!(w1[2], 0.4);
    }

    #[test]
    fn test_collapse_to_single_texel_is_uniform() {
        // 3 -> 1: all three taps weigh 1/3
        let f = AxisFilter::new(3, 1);
        let w = f.weights(0);
        for tap in w {
            assert_relative_eq!(tap, 1.0 / 3.0, epsilon = 1e-6);
        }
    }
}
