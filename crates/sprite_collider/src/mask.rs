//! Sprite region to occupancy grid conversion.

use crate::error::ColliderError;
use crate::grid::{Grid, OccupancyGrid};
use crate::pixel::{Rect, RgbaImage};

/// Thresholds a sprite region into a padded occupancy grid.
///
/// Pixel (px, py) of the region lands at grid cell (px + 1, py + 1); the
/// border ring stays empty. A pixel is solid when [`Rgba::is_solid`] holds.
///
/// Fails with [`ColliderError::InvalidRegion`] if the region is empty or not
/// fully inside the image.
///
/// [`Rgba::is_solid`]: crate::Rgba::is_solid
pub fn build_mask(image: &RgbaImage<'_>, region: Rect) -> Result<OccupancyGrid, ColliderError> {
  if region.is_empty() || !region.fits_within(image.width(), image.height()) {
    return Err(ColliderError::InvalidRegion {
      region,
      image_width: image.width(),
      image_height: image.height(),
    });
  }

  let mut grid = Grid::padded(region.width, region.height);
  for py in 0..region.height {
    for px in 0..region.width {
      let solid = image
        .get(region.x + px, region.y + py)
        .is_some_and(|pixel| pixel.is_solid());
      if solid {
        grid.set(px as i32 + 1, py as i32 + 1, true);
      }
    }
  }

  log::debug!(
    "build_mask: {}x{} region at ({}, {}), {} solid pixels",
    region.width,
    region.height,
    region.x,
    region.y,
    grid.solid_count()
  );

  Ok(grid)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::pixel::Rgba;

  fn image_bytes(width: u32, height: u32, pixel: impl Fn(u32, u32) -> Rgba) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
      for x in 0..width {
        let p = pixel(x, y);
        data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
      }
    }
    data
  }

  #[test]
  fn opaque_region_fills_interior() {
    let data = image_bytes(4, 3, |_, _| Rgba::WHITE);
    let image = RgbaImage::new(&data, 4, 3).unwrap();
    let grid = build_mask(&image, Rect::full(4, 3)).unwrap();

    assert_eq!(grid.width(), 6);
    assert_eq!(grid.height(), 5);
    assert_eq!(grid.solid_count(), 12);
    assert!(grid.is_border_clear());
    for y in 1..4 {
      for x in 1..5 {
        assert!(grid.get(x, y));
      }
    }
  }

  #[test]
  fn transparent_region_is_empty() {
    let data = image_bytes(3, 3, |_, _| Rgba::TRANSPARENT);
    let image = RgbaImage::new(&data, 3, 3).unwrap();
    let grid = build_mask(&image, Rect::full(3, 3)).unwrap();
    assert_eq!(grid.solid_count(), 0);
  }

  #[test]
  fn subregion_is_offset_into_grid() {
    // Only pixel (5, 2) is solid; sampled through a region starting at (4, 1).
    let data = image_bytes(8, 4, |x, y| {
      if (x, y) == (5, 2) {
        Rgba::WHITE
      } else {
        Rgba::TRANSPARENT
      }
    });
    let image = RgbaImage::new(&data, 8, 4).unwrap();
    let grid = build_mask(&image, Rect::new(4, 1, 3, 3)).unwrap();

    assert_eq!(grid.solid_count(), 1);
    assert!(grid.get(2, 2));
  }

  #[test]
  fn dark_pixels_are_empty() {
    let data = image_bytes(2, 1, |x, _| if x == 0 { Rgba::BLACK } else { Rgba::WHITE });
    let image = RgbaImage::new(&data, 2, 1).unwrap();
    let grid = build_mask(&image, Rect::full(2, 1)).unwrap();
    assert!(!grid.get(1, 1));
    assert!(grid.get(2, 1));
  }

  #[test]
  fn region_outside_image_is_rejected() {
    let data = image_bytes(4, 4, |_, _| Rgba::WHITE);
    let image = RgbaImage::new(&data, 4, 4).unwrap();

    let err = build_mask(&image, Rect::new(2, 2, 3, 2)).unwrap_err();
    assert!(matches!(err, ColliderError::InvalidRegion { .. }));

    let err = build_mask(&image, Rect::new(0, 0, 0, 2)).unwrap_err();
    assert!(matches!(err, ColliderError::InvalidRegion { .. }));
  }
}
