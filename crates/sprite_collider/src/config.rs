//! Collider generation settings.
//!
//! Settings load from TOML; every field is optional:
//!
//! ```toml
//! tolerance = 1.25        # Douglas-Peucker tolerance in pixels, 0..=5
//! scale = [0.1, 0.1]      # pixels to world units, per axis
//! winding = "counter_clockwise"
//! max_vertices = 8        # cap per convex part, omit for no cap
//! triangulate = true
//! ```
//!
//! Pixel thresholds and morphology sums are fixed in code, not configured.

use std::fs;
use std::path::Path;

use bevy_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::polygon::Winding;

/// Douglas-Peucker tolerance, clamped to `[MIN, MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Tolerance(f32);

impl Tolerance {
  pub const MIN: f32 = 0.0;
  pub const MAX: f32 = 5.0;
  /// Increment used by [`increase`](Self::increase) and
  /// [`decrease`](Self::decrease).
  pub const STEP: f32 = 0.25;
  pub const DEFAULT: f32 = 1.25;

  /// Creates a tolerance, clamping into range. NaN becomes the default.
  pub fn new(value: f32) -> Self {
    if value.is_nan() {
      return Self(Self::DEFAULT);
    }
    Self(value.clamp(Self::MIN, Self::MAX))
  }

  /// Returns the tolerance in pixels.
  #[inline]
  pub fn value(self) -> f32 {
    self.0
  }

  /// Raises the tolerance by one step, saturating at `MAX`.
  pub fn increase(&mut self) {
    *self = Self::new(self.0 + Self::STEP);
  }

  /// Lowers the tolerance by one step, saturating at `MIN`.
  pub fn decrease(&mut self) {
    *self = Self::new(self.0 - Self::STEP);
  }
}

impl Default for Tolerance {
  fn default() -> Self {
    Self(Self::DEFAULT)
  }
}

impl TryFrom<f32> for Tolerance {
  type Error = String;

  fn try_from(value: f32) -> Result<Self, Self::Error> {
    if !value.is_finite() || value < Self::MIN {
      return Err(format!("tolerance must be a finite non-negative number, got {}", value));
    }
    Ok(Self::new(value))
  }
}

impl From<Tolerance> for f32 {
  fn from(tolerance: Tolerance) -> Self {
    tolerance.0
  }
}

/// Configuration for collider generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColliderConfig {
  /// Douglas-Peucker simplification tolerance in pixels.
  /// Higher values produce simpler polygons with fewer vertices.
  /// Default: 1.25
  pub tolerance: Tolerance,

  /// Per-axis factor from sprite pixels to physics units.
  /// Default: [1.0, 1.0]
  pub scale: [f32; 2],

  /// Winding the polygon is normalized to after scaling.
  /// Default: counter-clockwise
  pub winding: Winding,

  /// Vertex cap for each convex part. Without triangulation the
  /// outline is cut to its first N vertices instead.
  /// Default: no cap
  pub max_vertices: Option<usize>,

  /// Whether to split the polygon into triangles and convex parts.
  /// Default: true
  pub triangulate: bool,
}

impl Default for ColliderConfig {
  fn default() -> Self {
    Self {
      tolerance: Tolerance::default(),
      scale: [1.0, 1.0],
      winding: Winding::default(),
      max_vertices: None,
      triangulate: true,
    }
  }
}

impl ColliderConfig {
  /// Parses and validates a TOML document.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads and validates a TOML file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let config = Self::from_toml_str(&source)?;
    log::debug!("loaded collider config from {}", path.display());
    Ok(config)
  }

  /// Checks values serde cannot express.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
      return Err(ConfigError::Invalid(format!(
        "scale must be finite and non-zero, got {:?}",
        self.scale
      )));
    }
    if let Some(max) = self.max_vertices.filter(|&max| max < 3) {
      return Err(ConfigError::Invalid(format!(
        "max_vertices must be at least 3, got {}",
        max
      )));
    }
    Ok(())
  }

  /// Returns the scale as a vector.
  #[inline]
  pub fn scale(&self) -> Vec2 {
    Vec2::from_array(self.scale)
  }

  /// Sets the simplification tolerance (clamped).
  pub fn with_tolerance(mut self, tolerance: f32) -> Self {
    self.tolerance = Tolerance::new(tolerance);
    self
  }

  /// Sets the pixel to physics unit scale.
  pub fn with_scale(mut self, scale: Vec2) -> Self {
    self.scale = scale.to_array();
    self
  }

  /// Sets the output winding.
  pub fn with_winding(mut self, winding: Winding) -> Self {
    self.winding = winding;
    self
  }

  /// Caps the vertex count of each convex part.
  pub fn with_max_vertices(mut self, max: usize) -> Self {
    self.max_vertices = Some(max);
    self
  }

  /// Enables or disables triangulation.
  pub fn with_triangulation(mut self, enabled: bool) -> Self {
    self.triangulate = enabled;
    self
  }
}
