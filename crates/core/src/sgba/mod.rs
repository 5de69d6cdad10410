//! Sub-grid burning area (SGBA) solvers
//!
//! Both methods share one contract: a level-set field in, a burning fraction per
//! cell out, with the boundary ring left at the configured boundary value. The
//! `BurningAreaSolver` trait is the seam the coupling layer programs against.
//!
//! # Feature Flags
//!
//! - `parallel` (default): fills interior rows concurrently with rayon. Disable
//!   with `--no-default-features` for a single-threaded build.
//!
//! # Example
//!
//! ```rust
//! use fire_sgba_core::sgba::{create_solver, BurningAreaSolver};
//! use fire_sgba_core::{LevelSetField, SgbaConfig, SgbaMethod};
//!
//! let phi = LevelSetField::from_rows(&[
//!     [0.0, 0.2, 0.0],
//!     [0.2, 0.6, 0.2],
//!     [0.0, 0.2, 0.0],
//! ])
//! .unwrap();
//! let solver = create_solver(&SgbaConfig::with_method(SgbaMethod::FrontReconstruction));
//! let fraction = solver.compute(&phi).unwrap();
//! assert!((fraction.get(1, 1) - 0.125).abs() < 1e-12);
//! ```

pub mod classifier;
pub mod formulas;
mod grid_loop;
pub mod interpolation;
pub mod reconstruction;
pub mod weighted_average;

pub use classifier::{case_identifier, classify, FrontCase, Quadrant, QuadrantState};
pub use formulas::{complement_triangle_area, trapezoid_area, triangle_area, AreaFormula};
pub use interpolation::{CellNeighbourhood, InterpolatedNodes, QuadrantPosition};
pub use reconstruction::{front_reconstruction_field, quadrant_area, reconstruct_cell};
pub use weighted_average::{stencil_average, weighted_average_field};

use tracing::{debug, info, warn};

use crate::config::{SgbaConfig, SgbaMethod};
use crate::error::SgbaError;
use crate::field::{FractionField, LevelSetField, UNDEFINED_FRACTION};

/// Backend-agnostic interface for sub-grid burning area computation
///
/// Implementations are stateless between calls; one solver can serve every
/// snapshot of a run, from any thread.
pub trait BurningAreaSolver: Send + Sync {
    /// Method this solver implements
    fn method(&self) -> SgbaMethod;

    /// Compute the burning fraction of every interior cell
    ///
    /// # Errors
    ///
    /// The first failing cell in row-major order. There is no partial output.
    fn compute(&self, phi: &LevelSetField<'_>) -> Result<FractionField, SgbaError>;
}

/// Weighted-average (WA) solver
#[derive(Debug, Clone, Copy)]
pub struct WeightedAverage {
    boundary_value: f64,
}

impl WeightedAverage {
    /// Solver filling the boundary ring with `boundary_value`
    #[must_use]
    pub const fn new(boundary_value: f64) -> Self {
        Self { boundary_value }
    }
}

impl Default for WeightedAverage {
    fn default() -> Self {
        Self::new(UNDEFINED_FRACTION)
    }
}

impl BurningAreaSolver for WeightedAverage {
    fn method(&self) -> SgbaMethod {
        SgbaMethod::WeightedAverage
    }

    fn compute(&self, phi: &LevelSetField<'_>) -> Result<FractionField, SgbaError> {
        run_logged(self.method(), phi, || {
            weighted_average_field(phi, self.boundary_value)
        })
    }
}

/// Explicit fire-front reconstruction (EFFR) solver
#[derive(Debug, Clone, Copy)]
pub struct FrontReconstruction {
    boundary_value: f64,
}

impl FrontReconstruction {
    /// Solver filling the boundary ring with `boundary_value`
    #[must_use]
    pub const fn new(boundary_value: f64) -> Self {
        Self { boundary_value }
    }
}

impl Default for FrontReconstruction {
    fn default() -> Self {
        Self::new(UNDEFINED_FRACTION)
    }
}

impl BurningAreaSolver for FrontReconstruction {
    fn method(&self) -> SgbaMethod {
        SgbaMethod::FrontReconstruction
    }

    fn compute(&self, phi: &LevelSetField<'_>) -> Result<FractionField, SgbaError> {
        run_logged(self.method(), phi, || {
            front_reconstruction_field(phi, self.boundary_value)
        })
    }
}

fn run_logged<F>(method: SgbaMethod, phi: &LevelSetField<'_>, run: F) -> Result<FractionField, SgbaError>
where
    F: FnOnce() -> Result<FractionField, SgbaError>,
{
    debug!(
        "Computing {} burning area on {}x{} fire grid",
        method,
        phi.nx(),
        phi.ny()
    );
    if !phi.has_interior() {
        warn!(
            "{}x{} fire grid has no interior cells, output is boundary only",
            phi.nx(),
            phi.ny()
        );
    }
    run().inspect_err(|e| warn!("{} burning area failed: {}", method, e))
}

/// Create a solver for the configured method
///
/// # Arguments
///
/// * `config` - Method and boundary fill value
///
/// # Returns
///
/// A boxed `BurningAreaSolver` trait object
pub fn create_solver(config: &SgbaConfig) -> Box<dyn BurningAreaSolver> {
    #[cfg(feature = "parallel")]
    info!(
        "Using {} burning area solver ({} rayon threads)",
        config.method,
        rayon::current_num_threads()
    );

    #[cfg(not(feature = "parallel"))]
    info!(
        "Using {} burning area solver (parallel feature disabled)",
        config.method
    );

    match config.method {
        SgbaMethod::WeightedAverage => Box::new(WeightedAverage::new(config.boundary_value)),
        SgbaMethod::FrontReconstruction => {
            Box::new(FrontReconstruction::new(config.boundary_value))
        }
    }
}

/// One-shot computation with the configured method
///
/// # Errors
///
/// See [`BurningAreaSolver::compute`].
pub fn compute_burning_area(
    phi: &LevelSetField<'_>,
    config: &SgbaConfig,
) -> Result<FractionField, SgbaError> {
    match config.method {
        SgbaMethod::WeightedAverage => WeightedAverage::new(config.boundary_value).compute(phi),
        SgbaMethod::FrontReconstruction => {
            FrontReconstruction::new(config.boundary_value).compute(phi)
        }
    }
}

/// Weighted-average burning fraction of a row-major `nx * ny` level-set buffer
///
/// The boundary ring holds [`UNDEFINED_FRACTION`].
///
/// # Errors
///
/// [`SgbaError::ShapeMismatch`] or [`SgbaError::NonFiniteValue`] for bad input.
pub fn sgba_wa(phi: &[f64], nx: usize, ny: usize) -> Result<FractionField, SgbaError> {
    WeightedAverage::default().compute(&LevelSetField::new(phi, nx, ny)?)
}

/// Front-reconstruction burning fraction of a row-major `nx * ny` level-set buffer
///
/// The boundary ring holds [`UNDEFINED_FRACTION`].
///
/// # Errors
///
/// Input validation errors, [`SgbaError::InvalidCase`] or
/// [`SgbaError::DegenerateDivision`] for the first failing cell.
pub fn sgba_effr(phi: &[f64], nx: usize, ny: usize) -> Result<FractionField, SgbaError> {
    FrontReconstruction::default().compute(&LevelSetField::new(phi, nx, ny)?)
}
