//! Sprite Collider - collision polygons traced from sprite silhouettes.
//!
//! Turns a frame of an RGBA sprite atlas into a polygon a 2D physics engine
//! can use as a collision shape.
//!
//! # Pipeline
//!
//! 1. [`build_mask`]: threshold region pixels into a padded occupancy grid
//! 2. [`morph`]: 3x3 neighbour-sum cleanup, locating the trace seed
//! 3. [`detect_edges`]: marching squares walk around the silhouette
//! 4. [`reduce`] / [`reduce_closed`]: Douglas-Peucker simplification
//! 5. [`ColliderShape`]: scaling, winding, triangulation into convex parts
//!
//! # Usage
//!
//! ```ignore
//! let image = RgbaImage::new(&pixels, atlas_width, atlas_height)?;
//! let config = ColliderConfig::default()
//!   .with_tolerance(1.25)
//!   .with_scale(Vec2::splat(0.1));
//! let shape = generate_collider(&image, Rect::new(66, 0, 32, 32), &config)?;
//! ```

pub mod atlas;
pub mod collider;
pub mod config;
pub mod error;
pub mod grid;
pub mod mask;
pub mod morph;
pub mod pixel;
pub mod polygon;
pub mod simplify;
pub mod trace;
pub mod triangulate;

pub use atlas::{AtlasGrid, generate_atlas_colliders};
pub use bevy_math::Vec2;
pub use collider::{
  ColliderShape, SilhouetteTrace, generate_collider, generate_collider_or_box, simplify_contour,
};
pub use config::{ColliderConfig, Tolerance};
pub use error::{ColliderError, ConfigError};
pub use grid::{Grid, MorphedGrid, OccupancyGrid};
pub use mask::build_mask;
pub use morph::{ERODE_MAX_SUM, FILL_MIN_SUM, Morphed, morph};
pub use pixel::{ALPHA_THRESHOLD, LUMINANCE_THRESHOLD, Rect, Rgba, RgbaImage};
pub use polygon::{Winding, is_convex, point_in_polygon, signed_area, winding, with_winding};
pub use simplify::{reduce, reduce_closed};
pub use trace::{Contour, TraceStatus, detect_edges};
pub use triangulate::{Triangle, convex_parts, triangulate_polygon};
