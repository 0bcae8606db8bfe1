//! Marching squares boundary walk.
//!
//! The tracer slides a 2x2 window along the edge of a morphed grid. At each
//! step the four sampled cells form a key:
//!
//! ```text
//!   +------+------+
//!   | self | right|      self = 8, right = 4
//!   |  (8) |  (4) |      below = 2, below-right = 1
//!   +------+------+
//!   | below|  b-r |
//!   |  (2) |  (1) |
//!   +------+------+
//! ```
//!
//! and the key picks the next move. Starting just up-left of the first solid
//! cell, the walk runs right along the top of the silhouette, down its right
//! side, left along the bottom and back up to the start.

use bevy_math::{IVec2, Vec2};

use crate::grid::MorphedGrid;

/// How a boundary walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceStatus {
  /// The walk returned to its seed; the contour is a closed loop.
  Closed,
  /// The step cap (twice the padded grid's cell count) ran out before the
  /// walk closed.
  Truncated,
  /// The window hit a key with no move (saddle or non-boundary cell).
  Stalled,
}

/// Ordered boundary points of a silhouette.
///
/// Points are grid positions relative to the region centre, in walk order.
/// The closing edge from the last point back to the first is implied.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
  pub points: Vec<Vec2>,
  pub status: TraceStatus,
}

impl Contour {
  /// Returns true if the walk closed on its seed.
  #[inline]
  pub fn is_closed(&self) -> bool {
    self.status == TraceStatus::Closed
  }

  /// Number of points.
  #[inline]
  pub fn len(&self) -> usize {
    self.points.len()
  }

  /// Returns true if no points were traced.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }
}

/// Packs the 2x2 window with its top-left cell at (x, y) into a 4-bit key.
#[inline]
pub fn window_key(grid: &MorphedGrid, x: i32, y: i32) -> u8 {
  (grid.get(x, y) as u8) << 3
    | (grid.get(x + 1, y) as u8) << 2
    | (grid.get(x, y + 1) as u8) << 1
    | grid.get(x + 1, y + 1) as u8
}

/// Move for a window key, or `None` where the walk cannot continue.
#[inline]
pub fn step_for_key(key: u8) -> Option<IVec2> {
  match key {
    1 | 3 | 11 => Some(IVec2::new(1, 0)),
    8 | 12 | 13 => Some(IVec2::new(-1, 0)),
    4 | 5 | 7 => Some(IVec2::new(0, -1)),
    2 | 10 | 14 => Some(IVec2::new(0, 1)),
    _ => None,
  }
}

/// Walks the boundary of `grid` starting from `seed`.
///
/// `seed` is the index produced by [`morph`](crate::morph::morph). Each step
/// records the window position `(x - 1, y - 1)` minus the region centre
/// `(w / 2, h / 2)`. The walk ends when it returns to the seed, stalls, or
/// has taken twice as many steps as the grid has cells, more than any
/// outline in the grid can need. The last two cases are reported through
/// [`Contour::status`] and still return what was traced.
pub fn detect_edges(grid: &MorphedGrid, seed: usize) -> Contour {
  let (region_w, region_h) = (grid.region_width(), grid.region_height());
  let center = Vec2::new((region_w / 2) as f32, (region_h / 2) as f32);
  let max_steps = 2 * grid.width() * grid.height();

  let (sx, sy) = grid.coords(seed);
  let start = IVec2::new(sx, sy);
  let mut pos = start;
  let mut points = Vec::new();
  let mut status = TraceStatus::Truncated;

  for _ in 0..max_steps {
    let Some(step) = step_for_key(window_key(grid, pos.x, pos.y)) else {
      status = TraceStatus::Stalled;
      break;
    };
    pos += step;
    points.push(Vec2::new((pos.x - 1) as f32, (pos.y - 1) as f32) - center);

    if pos == start {
      status = TraceStatus::Closed;
      break;
    }
  }

  match status {
    TraceStatus::Closed => {
      log::debug!("detect_edges: closed contour with {} points", points.len());
    }
    TraceStatus::Truncated => {
      log::warn!(
        "detect_edges: step cap {} reached without closing, {} points kept",
        max_steps,
        points.len()
      );
    }
    TraceStatus::Stalled => {
      log::warn!(
        "detect_edges: stalled at ({}, {}) after {} points",
        pos.x,
        pos.y,
        points.len()
      );
    }
  }

  Contour { points, status }
}
