//! Level-set input and burning-fraction output grids
//!
//! Both grids are stored as flat row-major slices (`y * nx + x`), with `y` running
//! south to north and `x` running west to east.

use std::borrow::Cow;

use crate::error::SgbaError;

/// Level-set value marking the fire front
///
/// Values above the threshold are on the burning side, values below on the
/// unburnt side.
pub const FRONT_THRESHOLD: f64 = 0.5;

/// Default fill for the boundary ring of a [`FractionField`]
///
/// Neither SGBA method computes row/column 0 or the last row/column, so they hold
/// this sentinel unless the caller picks another value through
/// [`SgbaConfig::boundary_value`](crate::config::SgbaConfig::boundary_value).
pub const UNDEFINED_FRACTION: f64 = f64::NAN;

/// Validated level-set field (phi)
///
/// Borrows the caller's buffer when constructed from a slice, so large fire grids
/// coming through the FFI are not copied.
#[derive(Debug, Clone)]
pub struct LevelSetField<'a> {
    values: Cow<'a, [f64]>,
    nx: usize,
    ny: usize,
}

impl<'a> LevelSetField<'a> {
    /// Wrap row-major level-set values
    ///
    /// # Arguments
    ///
    /// * `values` - Level-set samples, `nx * ny` of them, row-major
    /// * `nx` - Grid size in x (columns)
    /// * `ny` - Grid size in y (rows)
    ///
    /// # Errors
    ///
    /// - [`SgbaError::ShapeMismatch`] if `values.len() != nx * ny`
    /// - [`SgbaError::NonFiniteValue`] for the first NaN or infinite sample
    pub fn new(values: impl Into<Cow<'a, [f64]>>, nx: usize, ny: usize) -> Result<Self, SgbaError> {
        let values = values.into();
        let len = values.len();
        if nx.checked_mul(ny) != Some(len) {
            return Err(SgbaError::ShapeMismatch { nx, ny, len });
        }
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(SgbaError::NonFiniteValue {
                x: idx % nx,
                y: idx / nx,
                value: values[idx],
            });
        }
        Ok(Self { values, nx, ny })
    }

    /// Build an owned field from rows, southernmost row first
    ///
    /// # Errors
    ///
    /// [`SgbaError::ShapeMismatch`] if the rows are ragged, plus everything
    /// [`LevelSetField::new`] rejects.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<LevelSetField<'static>, SgbaError> {
        let ny = rows.len();
        let nx = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != nx) {
            let len = rows.iter().map(|r| r.as_ref().len()).sum();
            return Err(SgbaError::ShapeMismatch { nx, ny, len });
        }
        let values: Vec<f64> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        LevelSetField::new(values, nx, ny)
    }

    /// Grid size in x
    #[must_use]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Grid size in y
    #[must_use]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Raw row-major values
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Value at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.nx && y < self.ny, "Coordinates out of bounds");
        self.values[y * self.nx + x]
    }

    /// Whether the grid has at least one interior cell
    #[must_use]
    pub fn has_interior(&self) -> bool {
        self.nx >= 3 && self.ny >= 3
    }
}

/// Sub-grid burning fraction per cell (S)
///
/// Interior cells hold a fraction in `[0, 1]`. The boundary ring holds
/// [`FractionField::boundary_value`], which is never a computed result.
#[derive(Debug, Clone)]
pub struct FractionField {
    data: Vec<f64>,
    nx: usize,
    ny: usize,
    boundary_value: f64,
}

impl FractionField {
    pub(crate) fn from_parts(data: Vec<f64>, nx: usize, ny: usize, boundary_value: f64) -> Self {
        debug_assert_eq!(data.len(), nx * ny);
        Self {
            data,
            nx,
            ny,
            boundary_value,
        }
    }

    /// Grid size in x
    #[must_use]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Grid size in y
    #[must_use]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Value written into the uncomputed boundary ring
    #[must_use]
    pub fn boundary_value(&self) -> f64 {
        self.boundary_value
    }

    /// Raw row-major values including the boundary ring
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the field and return its row-major values
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Whether `(x, y)` is a computed interior cell
    #[must_use]
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x + 1 < self.nx && y + 1 < self.ny
    }

    /// Value at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.nx && y < self.ny, "Coordinates out of bounds");
        self.data[y * self.nx + x]
    }

    /// Interior fraction at `(x, y)`, `None` on the boundary ring or out of bounds
    #[must_use]
    pub fn interior(&self, x: usize, y: usize) -> Option<f64> {
        self.is_interior(x, y).then(|| self.data[y * self.nx + x])
    }

    /// Iterate `(x, y, fraction)` over interior cells in row-major order
    pub fn interior_values(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let nx = self.nx;
        (1..self.ny.saturating_sub(1)).flat_map(move |y| {
            (1..nx.saturating_sub(1)).map(move |x| (x, y, self.data[y * nx + x]))
        })
    }

    /// Total burning area of the interior in the caller's area unit
    ///
    /// This is what the flux coupling scales heat and mass release by.
    ///
    /// # Arguments
    ///
    /// * `cell_area` - Area of one fire-grid cell (e.g. `dx * dy` in m²)
    #[must_use]
    pub fn burning_area(&self, cell_area: f64) -> f64 {
        self.interior_values().map(|(_, _, s)| s).sum::<f64>() * cell_area
    }
}
