//! One image in a mip pyramid.
//!
//! [`MipLevel`] is a fixed-size 2D grid of 3-channel 8-bit texels with an
//! exclusively owned backing buffer. Level 0 of a pyramid is supplied by
//! the caller (e.g. an image loader); coarser levels are produced by the
//! downsampling filter in `rastex-sample` and never mutated afterwards.
//!
//! # Usage
//!
//! ```rust
//! use rastex_core::{Color, MipLevel};
//!
//! let mut level = MipLevel::filled(2, 2, Color::new(0.5, 0.5, 0.5));
//! level.set_texel(1, 1, Color::WHITE);
//!
//! assert_eq!(level.texel(1, 1).to_texel(), [255, 255, 255]);
//! assert_eq!(level.texels().len(), 3 * 2 * 2);
//! ```

use crate::color::Color;
use crate::error::{Error, Result};

/// Bytes per texel (8-bit RGB).
pub const BYTES_PER_TEXEL: usize = 3;

/// A 2D grid of 8-bit RGB texels, stored row-major.
///
/// Invariant: `texels.len() == 3 * width * height`. Construction through
/// [`from_texels`](Self::from_texels) enforces this; the other constructors
/// uphold it by allocation.
#[derive(Clone)]
pub struct MipLevel {
    /// Width in texels
    width: u32,
    /// Height in texels
    height: u32,
    /// Texel data, 3 bytes per texel, row-major
    texels: Vec<u8>,
}

impl MipLevel {
    /// Creates a level filled with black.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rastex_core::MipLevel;
    ///
    /// let level = MipLevel::new(16, 8);
    /// assert_eq!(level.dimensions(), (16, 8));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texels: vec![0; BYTES_PER_TEXEL * width as usize * height as usize],
        }
    }

    /// Creates a level filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let texel = color.to_texel();
        let count = width as usize * height as usize;
        let mut texels = Vec::with_capacity(BYTES_PER_TEXEL * count);
        for _ in 0..count {
            texels.extend_from_slice(&texel);
        }
        Self {
            width,
            height,
            texels,
        }
    }

    /// Creates a level from an existing texel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero and
    /// [`Error::BufferSizeMismatch`] if the buffer is not exactly
    /// `3 * width * height` bytes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rastex_core::MipLevel;
    ///
    /// let texels = vec![128u8; 3 * 4 * 4];
    /// let level = MipLevel::from_texels(4, 4, texels).unwrap();
    /// assert_eq!(level.texel(3, 3).to_texel(), [128, 128, 128]);
    /// ```
    pub fn from_texels(width: u32, height: u32, texels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "level extents must be > 0",
            ));
        }
        let expected = BYTES_PER_TEXEL * width as usize * height as usize;
        if texels.len() != expected {
            return Err(Error::buffer_size_mismatch(expected, texels.len()));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Returns the level width in texels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the level height in texels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns `true` if the level has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the row pitch in bytes.
    #[inline]
    pub fn pitch(&self) -> usize {
        BYTES_PER_TEXEL * self.width as usize
    }

    /// Returns a reference to the raw texel data.
    #[inline]
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Returns a mutable reference to the raw texel data.
    #[inline]
    pub fn texels_mut(&mut self) -> &mut [u8] {
        &mut self.texels
    }

    /// Returns the byte offset of the texel at (x, y).
    #[inline]
    fn texel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_TEXEL
    }

    /// Returns the texel at (x, y) widened to a float [`Color`].
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> Color {
        debug_assert!(x < self.width && y < self.height, "texel out of bounds");
        let offset = self.texel_offset(x, y);
        Color::from_texel([
            self.texels[offset],
            self.texels[offset + 1],
            self.texels[offset + 2],
        ])
    }

    /// Returns the texel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_texel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.texel(x, y))
        } else {
            None
        }
    }

    /// Stores a color at (x, y), narrowing it to 8-bit channels.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_texel(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(x < self.width && y < self.height, "texel out of bounds");
        let offset = self.texel_offset(x, y);
        self.texels[offset..offset + BYTES_PER_TEXEL].copy_from_slice(&color.to_texel());
    }

    /// Fills the whole level with one color.
    pub fn fill(&mut self, color: Color) {
        let texel = color.to_texel();
        for chunk in self.texels.chunks_exact_mut(BYTES_PER_TEXEL) {
            chunk.copy_from_slice(&texel);
        }
    }
}

impl std::fmt::Debug for MipLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MipLevel")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let level = MipLevel::new(4, 2);
        assert_eq!(level.texels().len(), 3 * 4 * 2);
        assert_eq!(level.texel(3, 1), Color::BLACK);
    }

    #[test]
    fn test_filled() {
        let level = MipLevel::filled(3, 3, Color::new(0.0, 1.0, 0.0));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(level.texel(x, y).to_texel(), [0, 255, 0]);
            }
        }
    }

    #[test]
    fn test_from_texels_validates_length() {
        let result = MipLevel::from_texels(4, 4, vec![0u8; 47]);
        assert!(matches!(result, Err(Error::BufferSizeMismatch { .. })));

        let level = MipLevel::from_texels(4, 4, vec![0u8; 48]).unwrap();
        assert_eq!(level.dimensions(), (4, 4));
    }

    #[test]
    fn test_from_texels_rejects_zero_extent() {
        let result = MipLevel::from_texels(0, 4, vec![]);
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_set_get_texel() {
        let mut level = MipLevel::new(2, 2);
        level.set_texel(1, 0, Color::new(1.0, 0.5, 0.0));
        let texel = level.texel(1, 0).to_texel();
        assert_eq!(texel[0], 255);
        assert!((texel[1] as i32 - 128).abs() <= 1);
        assert_eq!(texel[2], 0);
    }

    #[test]
    fn test_get_texel_bounds() {
        let level = MipLevel::new(2, 2);
        assert!(level.get_texel(1, 1).is_some());
        assert!(level.get_texel(2, 1).is_none());
        assert!(level.get_texel(1, 2).is_none());
    }

    #[test]
    fn test_fill() {
        let mut level = MipLevel::new(3, 2);
        level.fill(Color::WHITE);
        assert_eq!(level.texel(2, 1).to_texel(), [255, 255, 255]);
    }

    #[test]
    fn test_pitch() {
        let level = MipLevel::new(5, 1);
        assert_eq!(level.pitch(), 15);
    }
}
