//! Sprite atlas frames and batch collider generation.

use bevy_math::UVec2;
use rayon::prelude::*;

use crate::collider::{ColliderShape, generate_collider};
use crate::config::ColliderConfig;
use crate::error::ColliderError;
use crate::pixel::{Rect, RgbaImage};

/// Uniform grid of equally sized frames inside an atlas image.
///
/// Frames are numbered row by row: frame `i` sits at column `i % columns`,
/// row `i / columns`, counted from `origin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasGrid {
  pub origin: UVec2,
  pub frame_size: UVec2,
  pub columns: u32,
}

impl AtlasGrid {
  /// Creates a frame grid. A column count of 0 is treated as 1.
  pub fn new(origin: UVec2, frame_size: UVec2, columns: u32) -> Self {
    Self {
      origin,
      frame_size,
      columns: columns.max(1),
    }
  }

  /// Pixel rect of frame `index`, or `None` if its position does not fit
  /// in `u32`.
  pub fn frame(&self, index: u32) -> Option<Rect> {
    let columns = self.columns.max(1);
    self.cell(index % columns, index / columns)
  }

  fn cell(&self, column: u32, row: u32) -> Option<Rect> {
    let x = column.checked_mul(self.frame_size.x)?.checked_add(self.origin.x)?;
    let y = row.checked_mul(self.frame_size.y)?.checked_add(self.origin.y)?;
    Some(Rect::new(x, y, self.frame_size.x, self.frame_size.y))
  }

  /// All frames that lie fully inside an image of the given size, in frame
  /// order.
  pub fn frames_within(&self, image_width: u32, image_height: u32) -> Vec<Rect> {
    if self.frame_size.x == 0 || self.frame_size.y == 0 {
      return Vec::new();
    }
    let fitting_columns = image_width.saturating_sub(self.origin.x) / self.frame_size.x;
    let columns = self.columns.max(1).min(fitting_columns);
    let rows = image_height.saturating_sub(self.origin.y) / self.frame_size.y;

    (0..rows)
      .flat_map(|row| (0..columns).map(move |column| (column, row)))
      .filter_map(|(column, row)| self.cell(column, row))
      .filter(|frame| frame.fits_within(image_width, image_height))
      .collect()
  }
}

/// Generates colliders for many frames of one image in parallel.
///
/// Frames are independent; each entry of the result matches the frame at the
/// same position in `frames`.
pub fn generate_atlas_colliders(
  image: &RgbaImage<'_>,
  frames: &[Rect],
  config: &ColliderConfig,
) -> Vec<Result<ColliderShape, ColliderError>> {
  let shapes: Vec<_> = frames
    .par_iter()
    .map(|&frame| generate_collider(image, frame, config))
    .collect();

  log::debug!(
    "generate_atlas_colliders: {} of {} frames produced a collider",
    shapes.iter().filter(|s| s.is_ok()).count(),
    frames.len()
  );

  shapes
}
