//! Error types for collider generation.

use std::io;

use crate::pixel::Rect;

/// Error building a collider from a sprite region.
#[derive(Debug)]
pub enum ColliderError {
  /// The region is empty or reaches outside the source image.
  InvalidRegion {
    region: Rect,
    image_width: u32,
    image_height: u32,
  },
  /// The RGBA buffer length does not match `width * height * 4`.
  BufferSize { expected: usize, actual: usize },
  /// The region contains no solid pixels after morphology.
  EmptySilhouette,
}

impl std::fmt::Display for ColliderError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::InvalidRegion {
        region,
        image_width,
        image_height,
      } => write!(
        f,
        "invalid region {}x{} at ({}, {}) for {}x{} image",
        region.width, region.height, region.x, region.y, image_width, image_height
      ),
      Self::BufferSize { expected, actual } => {
        write!(f, "RGBA buffer size mismatch: expected={}, actual={}", expected, actual)
      }
      Self::EmptySilhouette => write!(f, "region has no solid pixels"),
    }
  }
}

impl std::error::Error for ColliderError {}

/// Error loading a [`ColliderConfig`](crate::ColliderConfig).
#[derive(Debug)]
pub enum ConfigError {
  Io(io::Error),
  Parse(toml::de::Error),
  Invalid(String),
}

impl From<io::Error> for ConfigError {
  fn from(err: io::Error) -> Self {
    Self::Io(err)
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {}", e),
      Self::Parse(e) => write!(f, "parse error: {}", e),
      Self::Invalid(msg) => write!(f, "invalid value: {}", msg),
    }
  }
}

impl std::error::Error for ConfigError {}
