//! Neighbour-sum cleanup of occupancy grids.
//!
//! Each cell is reclassified from the 3x3 block around it in the source grid:
//! nearly empty blocks erase the cell, nearly full blocks fill it, and
//! anything in between keeps the source value.

use crate::grid::{Grid, MorphedGrid, OccupancyGrid};

/// Blocks with at most this many solid cells become empty.
pub const ERODE_MAX_SUM: u8 = 1;

/// Blocks with at least this many solid cells become solid.
pub const FILL_MIN_SUM: u8 = 7;

/// Result of [`morph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Morphed {
  /// The cleaned grid.
  pub grid: MorphedGrid,
  /// Trace start: the cell diagonally up-left of the first solid cell in
  /// row-major order. `None` if the cleaned grid is empty.
  pub seed: Option<usize>,
}

/// Runs one cleanup pass over `source`.
///
/// The outer ring of the output is always empty, whatever the input holds,
/// so the seed and the tracer's 2x2 window always stay inside the grid.
pub fn morph(source: &OccupancyGrid) -> Morphed {
  let (width, height) = (source.width() as i32, source.height() as i32);
  let mut grid = Grid::new(source.width(), source.height());
  let mut first_solid = None;

  for y in 1..height - 1 {
    for x in 1..width - 1 {
      let sum = source.neighborhood_sum(x, y);
      let solid = if sum <= ERODE_MAX_SUM {
        false
      } else if sum >= FILL_MIN_SUM {
        true
      } else {
        source.get(x, y)
      };

      if solid {
        grid.set(x, y, true);
        if first_solid.is_none() {
          first_solid = grid.index_of(x - 1, y - 1);
        }
      }
    }
  }

  log::debug!(
    "morph: {} -> {} solid cells, seed {:?}",
    source.solid_count(),
    grid.solid_count(),
    first_solid
  );

  Morphed {
    grid,
    seed: first_solid,
  }
}
