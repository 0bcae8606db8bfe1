//! Splitting collider outlines into convex pieces.
//!
//! Physics engines take convex shapes, usually with a small vertex cap per
//! shape (8 in Box2D). The outline is cut into triangles with spade's
//! constrained Delaunay triangulation, then neighbouring pieces are glued
//! back together while the union stays convex and within the cap.

use std::collections::HashMap;

use bevy_math::Vec2;
use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation};

use crate::polygon::{is_convex, is_simple, orient, point_in_polygon};

/// A triangle represented by three vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
  pub a: usize,
  pub b: usize,
  pub c: usize,
}

impl Triangle {
  /// The three indices in order.
  #[inline]
  pub fn indices(self) -> [usize; 3] {
    [self.a, self.b, self.c]
  }
}

type Mesh = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Inserts every outline vertex and pins every outline edge.
///
/// Returns the mesh with a map back to outline indices, or `None` if spade
/// rejects a coordinate.
fn outline_mesh(polygon: &[Vec2]) -> Option<(Mesh, HashMap<FixedVertexHandle, usize>)> {
  let mut mesh = Mesh::new();
  let mut handles = Vec::with_capacity(polygon.len());
  let mut outline_index = HashMap::with_capacity(polygon.len());

  for (i, v) in polygon.iter().enumerate() {
    let handle = mesh
      .insert(Point2::new(f64::from(v.x), f64::from(v.y)))
      .ok()?;
    outline_index.entry(handle).or_insert(i);
    handles.push(handle);
  }

  for (&from, &to) in handles.iter().zip(handles.iter().cycle().skip(1)) {
    if from != to {
      mesh.add_constraint(from, to);
    }
  }

  Some((mesh, outline_index))
}

/// Triangulates a simple polygon.
///
/// Triangles index into `polygon`. Self-intersecting or degenerate outlines
/// give an empty result.
pub fn triangulate_polygon(polygon: &[Vec2]) -> Vec<Triangle> {
  match polygon.len() {
    0..=2 => return Vec::new(),
    3 => return vec![Triangle { a: 0, b: 1, c: 2 }],
    _ => {}
  }

  if !is_simple(polygon) {
    log::debug!(
      "triangulate_polygon: outline with {} vertices crosses itself",
      polygon.len()
    );
    return Vec::new();
  }

  let Some((mesh, outline_index)) = outline_mesh(polygon) else {
    return Vec::new();
  };

  // The mesh fills the convex hull; faces in concave notches are dropped.
  mesh
    .inner_faces()
    .filter_map(|face| {
      let [a, b, c] = face.vertices().map(|v| outline_index.get(&v.fix()).copied());
      let triangle = Triangle {
        a: a?,
        b: b?,
        c: c?,
      };
      let centroid = (polygon[triangle.a] + polygon[triangle.b] + polygon[triangle.c]) / 3.0;
      point_in_polygon(centroid, polygon).then_some(triangle)
    })
    .collect()
}

/// Glues `triangles` of `polygon` into convex pieces of at most
/// `max_vertices` vertices (`None` for no cap, values below 3 act as 3).
///
/// Each piece is a counter-clockwise list of indices into `polygon`. Two
/// pieces sharing an edge are merged whenever the result is convex and
/// within the cap, until no such pair is left.
pub fn convex_parts(
  polygon: &[Vec2],
  triangles: &[Triangle],
  max_vertices: Option<usize>,
) -> Vec<Vec<usize>> {
  let cap = max_vertices.map_or(usize::MAX, |max| max.max(3));

  let mut parts: Vec<Vec<usize>> = triangles
    .iter()
    .map(|t| {
      let mut part = t.indices().to_vec();
      if orient(polygon[t.a], polygon[t.b], polygon[t.c]) < 0.0 {
        part.reverse();
      }
      part
    })
    .collect();

  while let Some((keep, absorbed, merged)) = next_merge(polygon, &parts, cap) {
    parts[keep] = merged;
    parts.swap_remove(absorbed);
  }

  parts
}

/// First pair `(i, j)`, `i < j`, whose union is convex and within `cap`.
fn next_merge(
  polygon: &[Vec2],
  parts: &[Vec<usize>],
  cap: usize,
) -> Option<(usize, usize, Vec<usize>)> {
  for i in 0..parts.len() {
    for j in i + 1..parts.len() {
      if parts[i].len() + parts[j].len() - 2 > cap {
        continue;
      }
      let merged = join_on_shared_edge(&parts[i], &parts[j]).filter(|merged| {
        let points: Vec<Vec2> = merged.iter().map(|&k| polygon[k]).collect();
        is_convex(&points)
      });
      if let Some(merged) = merged {
        return Some((i, j, merged));
      }
    }
  }
  None
}

/// Joins two counter-clockwise pieces along an edge that `p` runs as
/// `a -> b` and `q` runs as `b -> a`. The shared edge is dropped.
fn join_on_shared_edge(p: &[usize], q: &[usize]) -> Option<Vec<usize>> {
  let (n, m) = (p.len(), q.len());
  for s in 0..n {
    let (a, b) = (p[s], p[(s + 1) % n]);
    let Some(t) = (0..m).find(|&t| q[t] == b && q[(t + 1) % m] == a) else {
      continue;
    };
    // `p` from b round to a, then the rest of `q` after a.
    let mut joined: Vec<usize> = (1..=n).map(|k| p[(s + k) % n]).collect();
    joined.extend((2..m).map(|k| q[(t + k) % m]));
    return Some(joined);
  }
  None
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::polygon::signed_area;

  fn part_area(polygon: &[Vec2], part: &[usize]) -> f32 {
    let points: Vec<Vec2> = part.iter().map(|&i| polygon[i]).collect();
    signed_area(&points)
  }

  fn l_shape() -> Vec<Vec2> {
    vec![
      Vec2::new(0.0, 0.0),
      Vec2::new(2.0, 0.0),
      Vec2::new(2.0, 1.0),
      Vec2::new(1.0, 1.0),
      Vec2::new(1.0, 2.0),
      Vec2::new(0.0, 2.0),
    ]
  }

  #[test]
  fn triangle_is_passed_through() {
    let tri = [Vec2::ZERO, Vec2::X, Vec2::Y];
    assert_eq!(triangulate_polygon(&tri), vec![Triangle { a: 0, b: 1, c: 2 }]);
  }

  #[test]
  fn concave_l_shape_stays_inside() {
    let l_shape = l_shape();
    let triangles = triangulate_polygon(&l_shape);
    assert_eq!(triangles.len(), 4, "6-gon without holes has n - 2 triangles");

    for tri in &triangles {
      let centroid = (l_shape[tri.a] + l_shape[tri.b] + l_shape[tri.c]) / 3.0;
      assert!(point_in_polygon(centroid, &l_shape));
      assert!(!(centroid.x > 1.0 && centroid.y > 1.0), "notch must stay empty");
    }
  }

  #[test]
  fn degenerate_polygon_rejected() {
    assert!(triangulate_polygon(&[Vec2::ZERO, Vec2::ONE]).is_empty());
    assert!(convex_parts(&[], &[], Some(8)).is_empty());
  }

  #[test]
  fn square_merges_into_one_part() {
    let square = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    let parts = convex_parts(&square, &triangulate_polygon(&square), Some(8));
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].len(), 4);
    assert!((part_area(&square, &parts[0]) - 1.0).abs() < 1e-6);
  }

  #[test]
  fn l_shape_needs_two_or_more_parts() {
    let l_shape = l_shape();
    let parts = convex_parts(&l_shape, &triangulate_polygon(&l_shape), None);

    assert!(parts.len() >= 2 && parts.len() < 4, "{:?}", parts);
    let total: f32 = parts.iter().map(|p| part_area(&l_shape, p)).sum();
    assert!((total - 3.0).abs() < 1e-5);
    for part in &parts {
      let points: Vec<Vec2> = part.iter().map(|&i| l_shape[i]).collect();
      assert!(is_convex(&points), "{:?}", part);
    }
  }

  #[test]
  fn vertex_cap_limits_part_size() {
    let hexagon: Vec<Vec2> = (0..6)
      .map(|i| Vec2::from_angle(i as f32 * std::f32::consts::TAU / 6.0) * 4.0)
      .collect();
    let triangles = triangulate_polygon(&hexagon);

    let uncapped = convex_parts(&hexagon, &triangles, None);
    assert_eq!(uncapped.len(), 1);
    assert_eq!(uncapped[0].len(), 6);

    let capped = convex_parts(&hexagon, &triangles, Some(4));
    assert!(capped.len() >= 2);
    assert!(capped.iter().all(|p| p.len() <= 4));
  }

  #[test]
  fn clockwise_triangles_are_reoriented() {
    let square = [Vec2::ZERO, Vec2::Y, Vec2::ONE, Vec2::X];
    let triangles = [Triangle { a: 0, b: 1, c: 2 }];
    let parts = convex_parts(&square, &triangles, None);
    assert!(part_area(&square, &parts[0]) > 0.0);
  }
}
