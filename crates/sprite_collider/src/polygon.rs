//! Polygon helpers for handing contours to a physics engine.
//!
//! Winding is named in the Y+ up convention used by physics engines: a
//! positive shoelace area is counter-clockwise. Traced contours are in image
//! coordinates (Y+ down) and come out with positive area, i.e. they look
//! clockwise on screen but are [`Winding::CounterClockwise`] by the formula.

use bevy_math::Vec2;
use serde::{Deserialize, Serialize};

/// Vertex order of a closed polygon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
  /// Positive signed area.
  #[default]
  CounterClockwise,
  /// Negative signed area.
  Clockwise,
}

impl Winding {
  /// The opposite winding.
  pub fn reversed(self) -> Self {
    match self {
      Self::CounterClockwise => Self::Clockwise,
      Self::Clockwise => Self::CounterClockwise,
    }
  }
}

/// Shoelace signed area of a closed polygon.
pub fn signed_area(points: &[Vec2]) -> f32 {
  if points.len() < 3 {
    return 0.0;
  }
  edges(points).map(|(a, b)| a.perp_dot(b)).sum::<f32>() * 0.5
}

/// Winding of a closed polygon, or `None` if it has no area.
pub fn winding(points: &[Vec2]) -> Option<Winding> {
  let area = signed_area(points);
  if area > 0.0 {
    Some(Winding::CounterClockwise)
  } else if area < 0.0 {
    Some(Winding::Clockwise)
  } else {
    None
  }
}

/// Reverses `points` if needed so the polygon has the requested winding.
///
/// Polygons without area are returned as-is.
pub fn with_winding(mut points: Vec<Vec2>, target: Winding) -> Vec<Vec2> {
  if winding(&points) == Some(target.reversed()) {
    points.reverse();
  }
  points
}

/// Scales every point per axis (e.g. pixels to world units).
///
/// A negative component mirrors the polygon and flips its winding.
pub fn scaled(points: &[Vec2], scale: Vec2) -> Vec<Vec2> {
  points.iter().map(|&p| p * scale).collect()
}

/// Returns true if no two non-adjacent edges of the closed polygon cross.
pub fn is_simple(points: &[Vec2]) -> bool {
  let n = points.len();
  let edge = |i: usize| (points[i], points[(i + 1) % n]);
  (0..n).all(|i| {
    (i + 2..n)
      .filter(|&j| (j + 1) % n != i)
      .all(|j| !segments_cross(edge(i), edge(j)))
  })
}

/// Returns true if the polygon is counter-clockwise and every corner turns
/// strictly left. Collinear corners do not count as convex.
pub fn is_convex(points: &[Vec2]) -> bool {
  let n = points.len();
  n >= 3 && (0..n).all(|i| orient(points[i], points[(i + 1) % n], points[(i + 2) % n]) > 0.0)
}

/// Winding-number test: true if `point` lies inside the closed polygon.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
  if polygon.len() < 3 {
    return false;
  }
  let winding_number: i32 = edges(polygon)
    .map(|(a, b)| {
      if a.y <= point.y {
        (b.y > point.y && orient(a, b, point) > 0.0) as i32
      } else {
        -((b.y <= point.y && orient(a, b, point) < 0.0) as i32)
      }
    })
    .sum();
  winding_number != 0
}

/// Twice the signed area of triangle `abc`: positive when `c` is left of
/// `a -> b`.
#[inline]
pub(crate) fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
  (b - a).perp_dot(c - a)
}

/// Closed-loop edges `(p[i], p[i + 1])`, wrapping at the end.
fn edges(points: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
  points
    .iter()
    .copied()
    .zip(points.iter().copied().cycle().skip(1))
}

/// Proper crossing only: shared endpoints and touching do not count.
fn segments_cross((p, q): (Vec2, Vec2), (r, s): (Vec2, Vec2)) -> bool {
  let opposite = |x: f32, y: f32| x * y < 0.0;
  opposite(orient(r, s, p), orient(r, s, q)) && opposite(orient(p, q, r), orient(p, q, s))
}
