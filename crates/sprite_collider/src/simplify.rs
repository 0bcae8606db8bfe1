//! Douglas-Peucker reduction of traced outlines.
//!
//! A traced outline has one point per pixel edge. Points lying within the
//! tolerance of the chord between their kept neighbours are dropped, so long
//! straight pixel runs collapse to their two ends.

use bevy_math::Vec2;

/// Simplifies an open polyline using the Douglas-Peucker algorithm.
///
/// # Arguments
/// * `points` - Ordered polyline vertices.
/// * `tolerance` - Maximum allowed perpendicular distance from the simplified
///   line. Expected to be non-negative.
///
/// # Returns
/// An order-preserving subset of `points` that always contains the first and
/// last input point. Inputs with fewer than 3 points are returned unchanged.
pub fn reduce(points: &[Vec2], tolerance: f32) -> Vec<Vec2> {
  if points.len() < 3 {
    return points.to_vec();
  }
  reduce_indices(points, tolerance)
    .into_iter()
    .map(|i| points[i])
    .collect()
}

/// Simplifies a closed ring (last point implicitly joined to the first).
///
/// The ring is split at its two mutually farthest vertices and each half is
/// reduced with [`reduce`], so the simplification does not depend on where
/// the ring happens to start. The result keeps the input order.
pub fn reduce_closed(ring: &[Vec2], tolerance: f32) -> Vec<Vec2> {
  if ring.len() <= 3 {
    return ring.to_vec();
  }

  let n = ring.len();
  let (start, end) = farthest_pair(ring);

  // First half: start..=end. Second half: end..n then wrapping to ..=start.
  let half1 = &ring[start..=end];
  let half2: Vec<Vec2> = ring[end..].iter().chain(&ring[..=start]).copied().collect();

  let mut keep: Vec<usize> = reduce_indices(half1, tolerance)
    .into_iter()
    .map(|i| start + i)
    .collect();
  keep.extend(
    reduce_indices(&half2, tolerance)
      .into_iter()
      .map(|i| (end + i) % n),
  );
  keep.sort_unstable();
  keep.dedup();

  keep.into_iter().map(|i| ring[i]).collect()
}

/// Runs Douglas-Peucker over `points` and returns the kept indices in
/// ascending order.
fn reduce_indices(points: &[Vec2], tolerance: f32) -> Vec<usize> {
  if points.len() < 3 {
    return (0..points.len()).collect();
  }

  let first = 0;
  let mut last = points.len() - 1;
  let mut keep = vec![first, last];

  // A zero-length baseline has no direction; pull the end back until the
  // chord is non-degenerate.
  while last > first && points[first] == points[last] {
    last -= 1;
  }

  reduce_range(points, first, last, tolerance, &mut keep);
  keep.sort_unstable();
  keep.dedup();
  keep
}

fn reduce_range(points: &[Vec2], first: usize, last: usize, tolerance: f32, keep: &mut Vec<usize>) {
  if last <= first + 1 {
    return;
  }

  let (start, end) = (points[first], points[last]);
  let mut max_distance = 0.0f32;
  let mut farthest = None;

  for (i, &point) in points.iter().enumerate().take(last).skip(first + 1) {
    let distance = perpendicular_distance(point, start, end);
    if distance > max_distance {
      max_distance = distance;
      farthest = Some(i);
    }
  }

  match farthest {
    Some(i) if max_distance > tolerance => {
      keep.push(i);
      reduce_range(points, first, i, tolerance, keep);
      reduce_range(points, i, last, tolerance, keep);
    }
    _ => {}
  }
}

/// Distance from `point` to the infinite line through `line_start` and
/// `line_end`: twice the triangle area over the base length.
fn perpendicular_distance(point: Vec2, line_start: Vec2, line_end: Vec2) -> f32 {
  let base = line_end - line_start;
  let length = base.length();

  if length < 1e-6 {
    return point.distance(line_start);
  }

  base.perp_dot(point - line_start).abs() / length
}

/// Indices `(i, j)`, `i < j`, of the two vertices farthest apart. Ties keep
/// the first pair in index order.
fn farthest_pair(ring: &[Vec2]) -> (usize, usize) {
  let mut best = (0, 1);
  let mut best_distance = f32::NEG_INFINITY;
  for (i, a) in ring.iter().enumerate() {
    for (j, b) in ring.iter().enumerate().skip(i + 1) {
      let distance = a.distance_squared(*b);
      if distance > best_distance {
        best_distance = distance;
        best = (i, j);
      }
    }
  }
  best
}
