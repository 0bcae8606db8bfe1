//! Collider generation from sprite silhouettes.
//!
//! Thresholds a sprite region into an occupancy grid, cleans it with one
//! morphology pass, walks the outline with marching squares, simplifies it
//! with Douglas-Peucker and triangulates the result for physics collision.
//! Building the physics body itself is left to the caller.

use bevy_math::Vec2;

use crate::config::ColliderConfig;
use crate::error::ColliderError;
use crate::grid::{MorphedGrid, OccupancyGrid};
use crate::mask::build_mask;
use crate::morph::{Morphed, morph};
use crate::pixel::{Rect, RgbaImage};
use crate::polygon::{Winding, scaled, with_winding};
use crate::simplify::{reduce, reduce_closed};
use crate::trace::{Contour, detect_edges};
use crate::triangulate::{Triangle, convex_parts, triangulate_polygon};

/// Intermediate grids for one sprite region.
///
/// Keeps both the thresholded and the cleaned grid around so callers can
/// inspect or draw them before tracing.
#[derive(Clone, Debug)]
pub struct SilhouetteTrace {
  region: Rect,
  occupancy: OccupancyGrid,
  morphed: Morphed,
}

impl SilhouetteTrace {
  /// Thresholds and cleans `region` of `image`.
  pub fn new(image: &RgbaImage<'_>, region: Rect) -> Result<Self, ColliderError> {
    let occupancy = build_mask(image, region)?;
    Ok(Self::from_occupancy(region, occupancy))
  }

  /// Cleans an already thresholded grid that was padded around `region`.
  pub fn from_occupancy(region: Rect, occupancy: OccupancyGrid) -> Self {
    let morphed = morph(&occupancy);
    Self {
      region,
      occupancy,
      morphed,
    }
  }

  /// The sampled region.
  #[inline]
  pub fn region(&self) -> Rect {
    self.region
  }

  /// Thresholded pixels.
  #[inline]
  pub fn occupancy(&self) -> &OccupancyGrid {
    &self.occupancy
  }

  /// Grid after morphology.
  #[inline]
  pub fn morphed(&self) -> &MorphedGrid {
    &self.morphed.grid
  }

  /// Trace start index, `None` for an empty silhouette.
  #[inline]
  pub fn seed(&self) -> Option<usize> {
    self.morphed.seed
  }

  /// Walks the silhouette outline.
  ///
  /// Fails with [`ColliderError::EmptySilhouette`] if nothing survived
  /// morphology. Incomplete walks are returned with their status set.
  pub fn trace(&self) -> Result<Contour, ColliderError> {
    let seed = self.morphed.seed.ok_or(ColliderError::EmptySilhouette)?;
    Ok(detect_edges(&self.morphed.grid, seed))
  }
}

/// Simplifies a traced contour.
///
/// Closed contours are simplified as rings so the trace start leaves no
/// extra vertex; open ones as polylines with both ends kept.
pub fn simplify_contour(contour: &Contour, tolerance: f32) -> Vec<Vec2> {
  if contour.is_closed() {
    reduce_closed(&contour.points, tolerance)
  } else {
    reduce(&contour.points, tolerance)
  }
}

/// Collision geometry ready for a physics engine.
#[derive(Clone, Debug, PartialEq)]
pub struct ColliderShape {
  /// Polygon vertices in physics units, wound as configured.
  pub polygon: Vec<Vec2>,
  /// Triangles indexing into `polygon`; empty if triangulation is off or the
  /// polygon could not be triangulated.
  pub triangles: Vec<Triangle>,
  /// Convex pieces built from `triangles`, as index lists into `polygon`
  /// wound like the polygon. Each has at most `max_vertices` vertices.
  pub parts: Vec<Vec<usize>>,
  /// False if the outline walk did not close.
  pub complete: bool,
}

impl ColliderShape {
  /// Scales, orients and decomposes pixel-space `points`.
  ///
  /// With triangulation on, `max_vertices` caps each convex part and the
  /// outline is kept whole. With it off, the outline itself is cut to the
  /// first `max_vertices` vertices.
  pub fn from_polygon(points: &[Vec2], complete: bool, config: &ColliderConfig) -> Self {
    let mut polygon = with_winding(scaled(points, config.scale()), config.winding);

    if !config.triangulate {
      if let Some(max) = config.max_vertices {
        polygon.truncate(max);
      }
      return Self {
        polygon,
        triangles: Vec::new(),
        parts: Vec::new(),
        complete,
      };
    }

    let triangles = triangulate_polygon(&polygon);
    let mut parts = convex_parts(&polygon, &triangles, config.max_vertices);
    if config.winding == Winding::Clockwise {
      parts.iter_mut().for_each(|part| part.reverse());
    }

    Self {
      polygon,
      triangles,
      parts,
      complete,
    }
  }

  /// A box covering the whole region, centred on the origin.
  pub fn bounding_box(region: Rect, config: &ColliderConfig) -> Self {
    let half = Vec2::new(region.width as f32, region.height as f32) / 2.0;
    let corners = [
      Vec2::new(-half.x, -half.y),
      Vec2::new(half.x, -half.y),
      half,
      Vec2::new(-half.x, half.y),
    ];
    Self::from_polygon(&corners, true, config)
  }

  /// Number of polygon vertices.
  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.polygon.len()
  }

  /// Vertex positions of convex part `index`.
  pub fn part_points(&self, index: usize) -> Option<Vec<Vec2>> {
    let part = self.parts.get(index)?;
    Some(part.iter().map(|&i| self.polygon[i]).collect())
  }
}

/// Generates a collider for one sprite region.
///
/// Returns [`ColliderError::InvalidRegion`] for regions outside the image and
/// [`ColliderError::EmptySilhouette`] when no solid pixels remain.
pub fn generate_collider(
  image: &RgbaImage<'_>,
  region: Rect,
  config: &ColliderConfig,
) -> Result<ColliderShape, ColliderError> {
  let trace = SilhouetteTrace::new(image, region)?;
  let contour = trace.trace()?;
  let tolerance = config.tolerance.value();
  let simplified = simplify_contour(&contour, tolerance);

  log::debug!(
    "generate_collider: {} contour points -> {} vertices (tolerance {})",
    contour.len(),
    simplified.len(),
    tolerance
  );

  Ok(ColliderShape::from_polygon(
    &simplified,
    contour.is_closed(),
    config,
  ))
}

/// Like [`generate_collider`], but substitutes a bounding box for empty or
/// incompletely traced silhouettes.
///
/// Region and buffer errors are still returned.
pub fn generate_collider_or_box(
  image: &RgbaImage<'_>,
  region: Rect,
  config: &ColliderConfig,
) -> Result<ColliderShape, ColliderError> {
  match generate_collider(image, region, config) {
    Ok(shape) if shape.complete && shape.vertex_count() >= 3 => Ok(shape),
    Ok(shape) => {
      log::warn!(
        "generate_collider_or_box: incomplete outline ({} vertices), using bounding box",
        shape.vertex_count()
      );
      Ok(ColliderShape::bounding_box(region, config))
    }
    Err(ColliderError::EmptySilhouette) => {
      log::warn!("generate_collider_or_box: empty silhouette, using bounding box");
      Ok(ColliderShape::bounding_box(region, config))
    }
    Err(err) => Err(err),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grid::Grid;
  use crate::polygon::{Winding, winding};
  use crate::trace::TraceStatus;

  fn transparent_image(width: u32, height: u32) -> Vec<u8> {
    vec![0; (width * height * 4) as usize]
  }

  #[test]
  fn empty_region_reports_empty_silhouette() {
    let data = transparent_image(8, 8);
    let image = RgbaImage::new(&data, 8, 8).unwrap();
    let err = generate_collider(&image, Rect::full(8, 8), &ColliderConfig::default()).unwrap_err();
    assert!(matches!(err, ColliderError::EmptySilhouette));
  }

  #[test]
  fn empty_region_falls_back_to_box() {
    let data = transparent_image(8, 6);
    let image = RgbaImage::new(&data, 8, 6).unwrap();
    let config = ColliderConfig::default().with_scale(Vec2::splat(0.5));
    let shape = generate_collider_or_box(&image, Rect::full(8, 6), &config).unwrap();

    assert_eq!(shape.vertex_count(), 4);
    assert_eq!(shape.triangles.len(), 2);
    assert!(shape.polygon.contains(&Vec2::new(2.0, 1.5)));
    assert!(shape.polygon.contains(&Vec2::new(-2.0, -1.5)));
  }

  #[test]
  fn invalid_region_is_not_masked_by_fallback() {
    let data = transparent_image(4, 4);
    let image = RgbaImage::new(&data, 4, 4).unwrap();
    let err = generate_collider_or_box(&image, Rect::new(2, 2, 4, 4), &ColliderConfig::default())
      .unwrap_err();
    assert!(matches!(err, ColliderError::InvalidRegion { .. }));
  }

  #[test]
  fn open_contour_keeps_both_ends() {
    let contour = Contour {
      points: vec![Vec2::ZERO, Vec2::X, Vec2::X * 2.0, Vec2::new(2.0, 2.0)],
      status: TraceStatus::Truncated,
    };
    let simplified = simplify_contour(&contour, 0.5);
    assert_eq!(simplified, vec![Vec2::ZERO, Vec2::X * 2.0, Vec2::new(2.0, 2.0)]);
  }

  #[test]
  fn from_occupancy_exposes_stages() {
    let mut grid = Grid::padded(3, 3);
    for y in 1..4 {
      for x in 1..4 {
        grid.set(x, y, true);
      }
    }
    let trace = SilhouetteTrace::from_occupancy(Rect::full(3, 3), grid.clone());
    assert_eq!(trace.occupancy(), &grid);
    assert_eq!(trace.morphed(), &grid);
    assert_eq!(trace.seed(), Some(0));
    assert!(trace.trace().unwrap().is_closed());
  }

  #[test]
  fn winding_follows_config() {
    let square = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    let config = ColliderConfig::default().with_winding(Winding::Clockwise);
    let shape = ColliderShape::from_polygon(&square, true, &config);
    assert_eq!(winding(&shape.polygon), Some(Winding::Clockwise));
    assert_eq!(shape.parts.len(), 1);
    assert_eq!(winding(&shape.part_points(0).unwrap()), Some(Winding::Clockwise));
  }

  #[test]
  fn vertex_cap_applies_to_parts_or_outline() {
    let octagon: Vec<Vec2> = (0..8)
      .map(|i| Vec2::from_angle(i as f32 * std::f32::consts::TAU / 8.0) * 10.0)
      .collect();

    let config = ColliderConfig::default().with_max_vertices(4);
    let shape = ColliderShape::from_polygon(&octagon, true, &config);
    assert_eq!(shape.vertex_count(), 8);
    assert!(shape.parts.len() >= 2);
    assert!(shape.parts.iter().all(|p| p.len() <= 4));

    let shape = ColliderShape::from_polygon(&octagon, true, &config.with_triangulation(false));
    assert_eq!(shape.vertex_count(), 4);
    assert!(shape.parts.is_empty());
  }
}
