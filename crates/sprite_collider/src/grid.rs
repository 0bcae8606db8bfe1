//! Padded binary grids with bounds-checked access.
//!
//! A [`Grid`] built for a `w x h` sprite region is `(w + 2) x (h + 2)` cells:
//! the region sits at offset (1, 1) and the outer ring of cells is always
//! empty. Cell (x, y) lives at linear index `x + y * width`.
//!
//! Every reader goes through [`Grid::get`], which treats anything outside the
//! grid as empty, so neighbour lookups at the edges need no special cases.

use std::fmt;

/// A binary occupancy grid (`true` = solid).
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
  cells: Box<[bool]>,
  width: usize,
  height: usize,
}

/// Thresholded sprite pixels, before morphology.
pub type OccupancyGrid = Grid;

/// Occupancy after the neighbour-sum cleanup pass.
pub type MorphedGrid = Grid;

impl Grid {
  /// Creates an empty grid of exactly `width x height` cells.
  pub fn new(width: usize, height: usize) -> Self {
    Self {
      cells: vec![false; width * height].into_boxed_slice(),
      width,
      height,
    }
  }

  /// Creates an empty grid for a `region_width x region_height` region,
  /// padded by one cell on every side.
  pub fn padded(region_width: u32, region_height: u32) -> Self {
    Self::new(region_width as usize + 2, region_height as usize + 2)
  }

  /// Returns the width of the grid, padding included.
  #[inline]
  pub fn width(&self) -> usize {
    self.width
  }

  /// Returns the height of the grid, padding included.
  #[inline]
  pub fn height(&self) -> usize {
    self.height
  }

  /// Width of the region the grid was padded around.
  #[inline]
  pub fn region_width(&self) -> usize {
    self.width.saturating_sub(2)
  }

  /// Height of the region the grid was padded around.
  #[inline]
  pub fn region_height(&self) -> usize {
    self.height.saturating_sub(2)
  }

  /// Total number of cells.
  #[inline]
  pub fn len(&self) -> usize {
    self.cells.len()
  }

  /// Returns true if the grid has no cells at all.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  /// Converts (x, y) to a linear index, or `None` if out of bounds.
  #[inline]
  pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
    if x < 0 || y < 0 {
      return None;
    }
    let (x, y) = (x as usize, y as usize);
    if x < self.width && y < self.height {
      Some(y * self.width + x)
    } else {
      None
    }
  }

  /// Converts a linear index back to (x, y).
  #[inline]
  pub fn coords(&self, index: usize) -> (i32, i32) {
    ((index % self.width) as i32, (index / self.width) as i32)
  }

  /// Returns the cell at (x, y); anything outside the grid reads as empty.
  #[inline]
  pub fn get(&self, x: i32, y: i32) -> bool {
    self
      .index_of(x, y)
      .map(|i| self.cells[i])
      .unwrap_or(false)
  }

  /// Sets the cell at (x, y). Returns false if out of bounds.
  #[inline]
  pub fn set(&mut self, x: i32, y: i32, solid: bool) -> bool {
    match self.index_of(x, y) {
      Some(i) => {
        self.cells[i] = solid;
        true
      }
      None => false,
    }
  }

  /// Number of solid cells in the 3x3 block centred on (x, y), the centre
  /// included.
  pub fn neighborhood_sum(&self, x: i32, y: i32) -> u8 {
    let mut sum = 0;
    for dy in -1..=1 {
      for dx in -1..=1 {
        sum += self.get(x + dx, y + dy) as u8;
      }
    }
    sum
  }

  /// Returns the number of solid cells.
  pub fn solid_count(&self) -> usize {
    self.cells.iter().filter(|&&c| c).count()
  }

  /// Returns true if the outer ring of cells is empty.
  pub fn is_border_clear(&self) -> bool {
    if self.width == 0 || self.height == 0 {
      return true;
    }
    let (w, h) = (self.width as i32, self.height as i32);
    let rows = (0..w).all(|x| !self.get(x, 0) && !self.get(x, h - 1));
    let cols = (0..h).all(|y| !self.get(0, y) && !self.get(w - 1, y));
    rows && cols
  }
}

impl fmt::Debug for Grid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Grid {}x{}", self.width, self.height)?;
    fmt::Display::fmt(self, f)
  }
}

/// Renders the grid as rows of `#` (solid) and `.` (empty).
impl fmt::Display for Grid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in self.cells.chunks(self.width.max(1)) {
      for &cell in row {
        f.write_str(if cell { "#" } else { "." })?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn block(region: u32, from: i32, to: i32) -> Grid {
    let mut grid = Grid::padded(region, region);
    for y in from..to {
      for x in from..to {
        grid.set(x, y, true);
      }
    }
    grid
  }

  #[test]
  fn padded_adds_border() {
    let grid = Grid::padded(4, 3);
    assert_eq!(grid.width(), 6);
    assert_eq!(grid.height(), 5);
    assert_eq!(grid.region_width(), 4);
    assert_eq!(grid.region_height(), 3);
    assert_eq!(grid.len(), 30);
  }

  #[test]
  fn out_of_bounds_reads_empty() {
    let grid = block(2, 0, 4);
    assert!(grid.get(0, 0));
    assert!(!grid.get(-1, 0));
    assert!(!grid.get(0, -1));
    assert!(!grid.get(4, 0));
    assert!(!grid.get(0, 4));
  }

  #[test]
  fn set_out_of_bounds_is_rejected() {
    let mut grid = Grid::padded(2, 2);
    assert!(!grid.set(-1, 2, true));
    assert!(!grid.set(9, 2, true));
    assert_eq!(grid.solid_count(), 0);
  }

  #[test]
  fn index_roundtrip() {
    let grid = Grid::padded(5, 3);
    let i = grid.index_of(3, 2).unwrap();
    assert_eq!(i, 3 + 2 * 7);
    assert_eq!(grid.coords(i), (3, 2));
  }

  #[test]
  fn neighborhood_sum_counts_self_and_neighbors() {
    let grid = block(3, 1, 4);
    assert_eq!(grid.neighborhood_sum(2, 2), 9);
    assert_eq!(grid.neighborhood_sum(1, 1), 4);
    assert_eq!(grid.neighborhood_sum(0, 0), 1);
    assert_eq!(grid.neighborhood_sum(-1, -1), 0);
  }

  #[test]
  fn border_detection() {
    assert!(block(3, 1, 4).is_border_clear());
    assert!(!block(3, 0, 2).is_border_clear());
  }

  #[test]
  fn display_draws_cells() {
    let grid = block(1, 1, 2);
    assert_eq!(grid.to_string(), "...\n.#.\n...\n");
  }
}
