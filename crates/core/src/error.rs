//! Error types for sub-grid burning area computation
//!
//! Two layers:
//! - [`AreaError`] is raised by the case classifier and the area formula bank, which
//!   only ever see one quadrant and know nothing about grid coordinates.
//! - [`SgbaError`] is what grid-level entry points return. Quadrant failures are
//!   lifted into it with [`AreaError::at`] so the offending cell and quadrant are
//!   always reported.

use std::error::Error;
use std::fmt;

use crate::sgba::formulas::AreaFormula;
use crate::sgba::interpolation::QuadrantPosition;

/// Failure while evaluating a single quadrant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaError {
    /// The sign-difference identifier is not in the case table
    InvalidCase {
        /// Base-3 case identifier in `[0, 80]`
        case: u8,
    },
    /// A formula denominator was zero, subnormal or non-finite
    DegenerateDivision {
        /// Formula that rejected its arguments
        formula: AreaFormula,
        /// The offending denominator
        denominator: f64,
    },
}

impl AreaError {
    /// Attach grid coordinates and the quadrant position to this error
    #[must_use]
    pub fn at(self, x: usize, y: usize, quadrant: QuadrantPosition) -> SgbaError {
        match self {
            Self::InvalidCase { case } => SgbaError::InvalidCase {
                x,
                y,
                quadrant,
                case,
            },
            Self::DegenerateDivision {
                formula,
                denominator,
            } => SgbaError::DegenerateDivision {
                x,
                y,
                quadrant,
                formula,
                denominator,
            },
        }
    }
}

impl fmt::Display for AreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCase { case } => {
                write!(f, "invalid quadrant case identifier {case}")
            }
            Self::DegenerateDivision {
                formula,
                denominator,
            } => write!(
                f,
                "degenerate denominator {denominator:e} in {formula} area formula"
            ),
        }
    }
}

impl Error for AreaError {}

/// Error returned by grid-level SGBA operations
///
/// Every computation either completes for the whole grid or reports the first
/// failing cell in row-major order. There is no partial output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SgbaError {
    /// Declared dimensions disagree with the number of samples supplied
    ShapeMismatch {
        /// Declared x dimension
        nx: usize,
        /// Declared y dimension
        ny: usize,
        /// Number of values actually supplied
        len: usize,
    },
    /// A level-set sample is NaN or infinite
    NonFiniteValue {
        /// Column of the sample
        x: usize,
        /// Row of the sample
        y: usize,
        /// The offending value
        value: f64,
    },
    /// The quadrant sign pattern has no area formula
    ///
    /// Only reachable when a node value sits exactly on the front threshold in a
    /// way that breaks the crossing pattern.
    InvalidCase {
        /// Column of the cell
        x: usize,
        /// Row of the cell
        y: usize,
        /// Quadrant of the cell that failed
        quadrant: QuadrantPosition,
        /// Base-3 case identifier in `[0, 80]`
        case: u8,
    },
    /// An area formula hit a zero or negligible denominator
    DegenerateDivision {
        /// Column of the cell
        x: usize,
        /// Row of the cell
        y: usize,
        /// Quadrant of the cell that failed
        quadrant: QuadrantPosition,
        /// Formula that rejected its arguments
        formula: AreaFormula,
        /// The offending denominator
        denominator: f64,
    },
}

impl SgbaError {
    /// Cell coordinates `(x, y)` the error refers to, if any
    #[must_use]
    pub const fn cell(&self) -> Option<(usize, usize)> {
        match *self {
            Self::ShapeMismatch { .. } => None,
            Self::NonFiniteValue { x, y, .. }
            | Self::InvalidCase { x, y, .. }
            | Self::DegenerateDivision { x, y, .. } => Some((x, y)),
        }
    }
}

impl fmt::Display for SgbaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { nx, ny, len } => write!(
                f,
                "shape mismatch: declared {nx}x{ny} grid but got {len} values"
            ),
            Self::NonFiniteValue { x, y, value } => {
                write!(f, "non-finite level-set value {value} at cell ({x}, {y})")
            }
            Self::InvalidCase {
                x,
                y,
                quadrant,
                case,
            } => write!(
                f,
                "invalid case identifier {case} in {quadrant} quadrant of cell ({x}, {y}), check input level-set field"
            ),
            Self::DegenerateDivision {
                x,
                y,
                quadrant,
                formula,
                denominator,
            } => write!(
                f,
                "degenerate denominator {denominator:e} in {formula} area formula, {quadrant} quadrant of cell ({x}, {y})"
            ),
        }
    }
}

impl Error for SgbaError {}
