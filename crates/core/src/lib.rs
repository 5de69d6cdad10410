//! Fire SGBA Core Library
//!
//! Sub-grid burning area (SGBA) estimation for coupled atmosphere-fire simulation.
//! Given a level-set field sampled at fire-grid cell centers, computes the fraction
//! of each cell lying on the burning side of the front (φ > 0.5). The coupling
//! layer scales heat and mass release by this fraction.
//!
//! ## Methods
//!
//! - **WA** (weighted average): fixed 9-point smoothing of φ.
//! - **EFFR** (explicit fire-front reconstruction): each cell is split into four
//!   quadrants, the front-crossing pattern of each is classified, and the burning
//!   area is evaluated in closed form.
//!
//! Both are pure, stateless transforms. The boundary ring of the output is never
//! computed and holds a documented fill value ([`UNDEFINED_FRACTION`] by default).

pub mod config;
pub mod error;
pub mod field;
pub mod sgba;

pub use config::{ParseMethodError, SgbaConfig, SgbaMethod};
pub use error::{AreaError, SgbaError};
pub use field::{FractionField, LevelSetField, FRONT_THRESHOLD, UNDEFINED_FRACTION};
pub use sgba::{
    compute_burning_area, create_solver, sgba_effr, sgba_wa, BurningAreaSolver,
    FrontReconstruction, WeightedAverage,
};
