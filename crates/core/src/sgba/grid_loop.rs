//! Interior traversal shared by both SGBA methods
//!
//! Each interior row is a disjoint `&mut [f64]` chunk of the output, so rows are
//! filled in parallel without synchronisation when the `parallel` feature is on.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::SgbaError;
use crate::field::{FractionField, LevelSetField};
use crate::sgba::interpolation::CellNeighbourhood;

/// Evaluate `cell` for every interior cell and assemble the fraction field
///
/// The boundary ring is pre-filled with `boundary_value`. Each row stops at its
/// first failing cell and the first failing row in row-major order wins, so the
/// reported cell matches what a sequential scan would report.
///
/// # Arguments
///
/// * `field` - Validated level-set field
/// * `boundary_value` - Fill value for rows/columns that are not computed
/// * `cell` - Per-cell kernel receiving the 3×3 neighbourhood and `(x, y)`
pub(crate) fn fill_interior<F>(
    field: &LevelSetField<'_>,
    boundary_value: f64,
    cell: F,
) -> Result<FractionField, SgbaError>
where
    F: Fn(&CellNeighbourhood, usize, usize) -> Result<f64, SgbaError> + Sync,
{
    let nx = field.nx();
    let ny = field.ny();
    let mut data = vec![boundary_value; nx * ny];

    if field.has_interior() {
        let fill_row = |(row_offset, row): (usize, &mut [f64])| -> Result<(), SgbaError> {
            let y = row_offset + 1;
            for x in 1..nx - 1 {
                row[x] = cell(&CellNeighbourhood::gather(field, x, y), x, y)?;
            }
            Ok(())
        };

        let interior_rows = &mut data[nx..(ny - 1) * nx];

        #[cfg(feature = "parallel")]
        let row_results: Vec<Result<(), SgbaError>> = interior_rows
            .par_chunks_mut(nx)
            .enumerate()
            .map(fill_row)
            .collect();

        #[cfg(not(feature = "parallel"))]
        let row_results: Vec<Result<(), SgbaError>> =
            interior_rows.chunks_mut(nx).enumerate().map(fill_row).collect();

        row_results.into_iter().collect::<Result<(), SgbaError>>()?;
    }

    Ok(FractionField::from_parts(data, nx, ny, boundary_value))
}
