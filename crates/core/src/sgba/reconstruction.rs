//! Explicit fire-front reconstruction (EFFR) sub-grid burning area
//!
//! Each interior cell is split into four quadrants around its center. Every
//! quadrant is classified against the front threshold and its burning area is
//! evaluated in closed form; the cell fraction is the mean of the four.

use crate::error::{AreaError, SgbaError};
use crate::field::{FractionField, LevelSetField};
use crate::sgba::classifier::{classify, Quadrant, QuadrantState};
use crate::sgba::grid_loop::fill_interior;
use crate::sgba::interpolation::{CellNeighbourhood, InterpolatedNodes, QuadrantPosition};

/// Burning area of one quadrant, in `[0, 1]`
///
/// # Errors
///
/// - [`AreaError::InvalidCase`] if the sign pattern has no formula
/// - [`AreaError::DegenerateDivision`] if the formula's denominator is degenerate
pub fn quadrant_area(q: &Quadrant) -> Result<f64, AreaError> {
    match classify(q)? {
        QuadrantState::Burning => Ok(1.0),
        QuadrantState::Unburnt => Ok(0.0),
        QuadrantState::Front(case) => case.area(q),
    }
}

/// Burning fraction of the cell at `(x, y)` from its 3×3 neighbourhood
///
/// # Errors
///
/// The first failing quadrant in SW, SE, NE, NW order, tagged with `(x, y)`.
pub fn reconstruct_cell(n: &CellNeighbourhood, x: usize, y: usize) -> Result<f64, SgbaError> {
    let nodes = InterpolatedNodes::from_neighbourhood(n);
    let mut total = 0.0;
    for position in QuadrantPosition::ALL {
        total += quadrant_area(&nodes.quadrant(position)).map_err(|e| e.at(x, y, position))?;
    }
    Ok(0.25 * total)
}

/// Front-reconstruction burning fraction over the whole grid
///
/// # Errors
///
/// The first failing cell in row-major order, see [`reconstruct_cell`].
pub fn front_reconstruction_field(
    field: &LevelSetField<'_>,
    boundary_value: f64,
) -> Result<FractionField, SgbaError> {
    fill_interior(field, boundary_value, reconstruct_cell)
}
