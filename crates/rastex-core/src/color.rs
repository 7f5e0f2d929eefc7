//! Floating-point RGB color and texel conversions.
//!
//! [`Color`] is the value type all filtering arithmetic runs on: texels
//! are widened from their 8-bit storage form to normalized `f32` channels,
//! blended, and narrowed back on store.
//!
//! # Usage
//!
//! ```rust
//! use rastex_core::Color;
//!
//! let a = Color::new(0.2, 0.4, 0.6);
//! let b = Color::new(1.0, 1.0, 1.0);
//!
//! // The operators used by interpolation: c1 + (c2 - c1) * t
//! let mid = a + (b - a) * 0.5;
//! assert!((mid.r - 0.6).abs() < 1e-6);
//! ```

use std::ops::{Add, AddAssign, Mul, Sub};

/// Converts an 8-bit channel value to a normalized float in [0, 1].
///
/// # Example
///
/// ```rust
/// use rastex_core::channel_to_f32;
///
/// assert_eq!(channel_to_f32(0), 0.0);
/// assert_eq!(channel_to_f32(255), 1.0);
/// ```
#[inline]
pub fn channel_to_f32(v: u8) -> f32 {
    v as f32 / 255.0
}

/// Converts a normalized float channel back to 8 bits.
///
/// The value is clamped to [0, 1] before scaling, so accumulated filter
/// output slightly outside the range stores as pure black or white rather
/// than wrapping.
///
/// # Example
///
/// ```rust
/// use rastex_core::channel_to_u8;
///
/// assert_eq!(channel_to_u8(0.0), 0);
/// assert_eq!(channel_to_u8(1.0), 255);
/// assert_eq!(channel_to_u8(2.0), 255);
/// assert_eq!(channel_to_u8(-1.0), 0);
/// ```
#[inline]
pub fn channel_to_u8(v: f32) -> u8 {
    (255.0 * v.clamp(0.0, 1.0)) as u8
}

/// A 3-component RGB color with `f32` channels.
///
/// Channels are conceptually in [0, 1] while stored in a mip level, but the
/// type itself does not clamp: intermediate interpolation results may step
/// outside the range and are only clamped on conversion back to texel form.
///
/// Supports the arithmetic interpolation needs: addition, subtraction and
/// scalar multiplication. Immutable value type (`Copy`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// White (1, 1, 1).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new color from channel values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Widens a 3-byte texel to a normalized float color.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rastex_core::Color;
    ///
    /// let c = Color::from_texel([255, 0, 0]);
    /// assert_eq!(c, Color::new(1.0, 0.0, 0.0));
    /// ```
    #[inline]
    pub fn from_texel(texel: [u8; 3]) -> Self {
        Self {
            r: channel_to_f32(texel[0]),
            g: channel_to_f32(texel[1]),
            b: channel_to_f32(texel[2]),
        }
    }

    /// Narrows this color to a 3-byte texel, clamping each channel to [0, 1].
    ///
    /// # Example
    ///
    /// ```rust
    /// use rastex_core::Color;
    ///
    /// let texel = Color::new(1.0, 0.0, 2.0).to_texel();
    /// assert_eq!(texel, [255, 0, 255]);
    /// ```
    #[inline]
    pub fn to_texel(self) -> [u8; 3] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
        ]
    }

    /// Clamps all channels to [0, 1].
    #[inline]
    pub fn clamp01(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }
}

impl Add for Color {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Sub for Color {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_channel_round_trip() {
        for v in [0u8, 1, 63, 127, 128, 200, 254, 255] {
            assert_eq!(channel_to_u8(channel_to_f32(v)), v);
        }
    }

    #[test]
    fn test_channel_clamping() {
        assert_eq!(channel_to_u8(-0.5), 0);
        assert_eq!(channel_to_u8(1.5), 255);
    }

    #[test]
    fn test_color_ops() {
        let a = Color::new(0.1, 0.2, 0.3);
        let b = Color::new(0.4, 0.5, 0.6);

        let sum = a + b;
        assert_relative_eq!(sum.r, 0.5);
        assert_relative_eq!(sum.g, 0.7);
        assert_relative_eq!(sum.b, 0.9);

        let diff = b - a;
        assert_relative_eq!(diff.r, 0.3);

        let scaled = a * 2.0;
        assert_relative_eq!(scaled.g, 0.4);

        let mut acc = Color::BLACK;
        acc += a;
        acc += a;
        assert_relative_eq!(acc.b, 0.6);
    }

    #[test]
    fn test_texel_conversion() {
        let c = Color::from_texel([128, 128, 128]);
        assert_eq!(c.to_texel(), [128, 128, 128]);

        // Out-of-range channels clamp on store
        let hot = Color::new(1.2, -0.2, 0.5);
        let texel = hot.to_texel();
        assert_eq!(texel[0], 255);
        assert_eq!(texel[1], 0);
    }

    #[test]
    fn test_clamp01() {
        let c = Color::new(1.2, -0.2, 0.5).clamp01();
        assert_eq!(c, Color::new(1.0, 0.0, 0.5));
    }
}
