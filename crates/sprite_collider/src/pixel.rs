//! RGBA pixel samples and borrowed image views.
//!
//! Images use the usual raster layout: row 0 is the top of the image and
//! data is stored row-major, four bytes per pixel (`r, g, b, a`).

use crate::error::ColliderError;

/// Pixels with alpha below this value are empty.
pub const ALPHA_THRESHOLD: u8 = 40;

/// Pixels whose `r + g + b` is below this value are empty.
pub const LUMINANCE_THRESHOLD: u16 = 50;

/// RGBA pixel with 8 bits per channel.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Rgba {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Rgba {
  /// Creates a new RGBA pixel.
  #[inline]
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Creates an opaque RGB pixel (alpha = 255).
  #[inline]
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Transparent black.
  pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

  /// Opaque black.
  pub const BLACK: Self = Self::rgb(0, 0, 0);

  /// Opaque white.
  pub const WHITE: Self = Self::rgb(255, 255, 255);

  /// Sum of the color channels, a cheap stand-in for luminance.
  #[inline]
  pub const fn channel_sum(self) -> u16 {
    self.r as u16 + self.g as u16 + self.b as u16
  }

  /// Whether this pixel counts as part of a sprite silhouette.
  ///
  /// Near-transparent and near-black pixels are empty.
  #[inline]
  pub const fn is_solid(self) -> bool {
    self.a >= ALPHA_THRESHOLD && self.channel_sum() >= LUMINANCE_THRESHOLD
  }
}

/// A rectangular region in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
}

impl Rect {
  /// Creates a new rectangle.
  #[inline]
  pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// Creates a rectangle covering an entire image.
  #[inline]
  pub fn full(image_width: u32, image_height: u32) -> Self {
    Self::new(0, 0, image_width, image_height)
  }

  /// Returns true if the rect has no area.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.width == 0 || self.height == 0
  }

  /// Returns true if the rect lies entirely within `bound_width x bound_height`.
  pub fn fits_within(&self, bound_width: u32, bound_height: u32) -> bool {
    let right = self.x as u64 + self.width as u64;
    let bottom = self.y as u64 + self.height as u64;
    right <= bound_width as u64 && bottom <= bound_height as u64
  }
}

/// Read-only view over an RGBA8 pixel buffer.
#[derive(Clone, Copy, Debug)]
pub struct RgbaImage<'a> {
  data: &'a [u8],
  width: u32,
  height: u32,
}

impl<'a> RgbaImage<'a> {
  /// Wraps a tightly packed RGBA8 buffer.
  ///
  /// Fails if `data.len()` is not `width * height * 4`.
  pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self, ColliderError> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
      return Err(ColliderError::BufferSize {
        expected,
        actual: data.len(),
      });
    }
    Ok(Self {
      data,
      width,
      height,
    })
  }

  /// Returns the width of the image.
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  /// Returns the height of the image.
  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  /// Returns the pixel at (x, y), or `None` if out of bounds.
  #[inline]
  pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
    if x >= self.width || y >= self.height {
      return None;
    }
    let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
    Some(Rgba::new(
      self.data[idx],
      self.data[idx + 1],
      self.data[idx + 2],
      self.data[idx + 3],
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn thresholds_classify_pixels() {
    assert!(Rgba::WHITE.is_solid());
    assert!(!Rgba::TRANSPARENT.is_solid());
    assert!(!Rgba::BLACK.is_solid(), "opaque black is treated as empty");
    assert!(!Rgba::new(255, 255, 255, 39).is_solid());
    assert!(Rgba::new(255, 255, 255, 40).is_solid());
    assert!(!Rgba::rgb(20, 20, 9).is_solid());
    assert!(Rgba::rgb(20, 20, 10).is_solid());
  }

  #[test]
  fn channel_sum_does_not_overflow() {
    assert_eq!(Rgba::WHITE.channel_sum(), 765);
  }

  #[test]
  fn rect_bounds() {
    assert!(Rect::new(0, 0, 4, 4).fits_within(4, 4));
    assert!(!Rect::new(1, 0, 4, 4).fits_within(4, 4));
    assert!(!Rect::new(u32::MAX, 0, 2, 1).fits_within(4, 4));
    assert!(Rect::new(2, 2, 0, 1).is_empty());
  }

  #[test]
  fn image_rejects_short_buffer() {
    let data = [0u8; 15];
    let err = RgbaImage::new(&data, 2, 2).unwrap_err();
    assert!(matches!(
      err,
      ColliderError::BufferSize {
        expected: 16,
        actual: 15
      }
    ));
  }

  #[test]
  fn image_reads_row_major() {
    let mut data = vec![0u8; 2 * 2 * 4];
    // (0, 1) is the third pixel.
    data[8..12].copy_from_slice(&[1, 2, 3, 4]);
    let image = RgbaImage::new(&data, 2, 2).unwrap();
    assert_eq!(image.get(0, 1), Some(Rgba::new(1, 2, 3, 4)));
    assert_eq!(image.get(2, 0), None);
  }
}
