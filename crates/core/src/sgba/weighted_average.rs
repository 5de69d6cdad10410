//! Weighted-average (WA) sub-grid burning area
//!
//! Smooths the level-set field with a fixed 9-point stencil:
//!
//! ```text
//! S = 9/16 φ(c) + 3/32 (φ(n) + φ(s) + φ(e) + φ(w)) + 1/64 (φ(ne) + φ(nw) + φ(se) + φ(sw))
//! ```
//!
//! The weights sum to 1, so a constant field maps to itself.

use crate::error::SgbaError;
use crate::field::{FractionField, LevelSetField};
use crate::sgba::grid_loop::fill_interior;
use crate::sgba::interpolation::CellNeighbourhood;

/// Weight of the cell itself
pub const CENTER_WEIGHT: f64 = 9.0 / 16.0;
/// Weight of each edge-sharing neighbour
pub const EDGE_WEIGHT: f64 = 3.0 / 32.0;
/// Weight of each diagonal neighbour
pub const DIAGONAL_WEIGHT: f64 = 1.0 / 64.0;

/// Stencil average of one cell neighbourhood
#[inline]
#[must_use]
pub fn stencil_average(n: &CellNeighbourhood) -> f64 {
    CENTER_WEIGHT * n.center
        + EDGE_WEIGHT * (n.west + n.south + n.east + n.north)
        + DIAGONAL_WEIGHT * (n.south_west + n.south_east + n.north_west + n.north_east)
}

/// Weighted-average burning fraction over the whole grid
///
/// # Errors
///
/// None per cell; the signature matches the front-reconstruction method so both
/// are interchangeable.
pub fn weighted_average_field(
    field: &LevelSetField<'_>,
    boundary_value: f64,
) -> Result<FractionField, SgbaError> {
    fill_interior(field, boundary_value, |n, _, _| Ok(stencil_average(n)))
}
