//! Closed-form quadrant area formulas
//!
//! A quadrant is a unit square whose four corners carry level-set values. Front
//! crossings are placed by linear interpolation along the edges, so the front cuts
//! off either a triangle around one isolated corner or a trapezoid along one side.
//! Every front case of the classifier reduces to one of these with a permutation
//! of the corners, a complement, or (saddles) the sum of two triangles.
//!
//! All functions are pure. Denominators are checked before dividing so a
//! degenerate quadrant surfaces as [`AreaError::DegenerateDivision`] instead of
//! an infinite or NaN area.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AreaError;
use crate::field::FRONT_THRESHOLD;

/// Identifies an area formula in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaFormula {
    /// Burning triangle around one isolated corner
    Triangle,
    /// Quadrant minus an unburnt triangle around one isolated corner
    ComplementTriangle,
    /// Burning strip along one side of the quadrant
    Trapezoid,
}

impl fmt::Display for AreaFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Triangle => "triangle",
            Self::ComplementTriangle => "complement triangle",
            Self::Trapezoid => "trapezoid",
        };
        f.write_str(name)
    }
}

/// Divide, rejecting zero, subnormal and non-finite denominators
#[inline]
fn checked_ratio(numerator: f64, denominator: f64, formula: AreaFormula) -> Result<f64, AreaError> {
    let ratio = numerator / denominator;
    if denominator.is_normal() && ratio.is_finite() {
        Ok(ratio)
    } else {
        Err(AreaError::DegenerateDivision {
            formula,
            denominator,
        })
    }
}

/// Area of the triangle cut off around an isolated corner
///
/// The front crosses the two edges leaving `isolated`; the crossing points are
/// found by linear interpolation along each edge, giving legs of length
/// `(0.5 - isolated) / (a - isolated)` and `(0.5 - isolated) / (b - isolated)`.
///
/// # Arguments
///
/// * `isolated` - Value at the corner alone on its side of the front
/// * `a` - Value at one edge-adjacent corner
/// * `b` - Value at the other edge-adjacent corner
///
/// # Errors
///
/// [`AreaError::DegenerateDivision`] if `a` or `b` equals `isolated` (or the
/// product of differences underflows).
pub fn triangle_area(isolated: f64, a: f64, b: f64) -> Result<f64, AreaError> {
    let offset = FRONT_THRESHOLD - isolated;
    checked_ratio(
        offset * offset,
        2.0 * (a - isolated) * (b - isolated),
        AreaFormula::Triangle,
    )
}

/// Quadrant area left after removing the triangle around `isolated`
///
/// Used when the isolated corner is the only unburnt one.
///
/// # Errors
///
/// Same as [`triangle_area`], reported as [`AreaFormula::ComplementTriangle`].
pub fn complement_triangle_area(isolated: f64, a: f64, b: f64) -> Result<f64, AreaError> {
    match triangle_area(isolated, a, b) {
        Ok(area) => Ok(1.0 - area),
        Err(AreaError::DegenerateDivision { denominator, .. }) => {
            Err(AreaError::DegenerateDivision {
                formula: AreaFormula::ComplementTriangle,
                denominator,
            })
        }
        Err(err) => Err(err),
    }
}

/// Area of the strip between side `p1`-`p2` and the front
///
/// Corners are given in rotational order starting from the burning side: `p1`
/// and `p2` are the two corners of the burning side, `p4` faces `p1` and `p3`
/// faces `p2`. The strip is a trapezoid whose parallel sides are the crossing
/// fractions along edges `p1`-`p4` and `p2`-`p3`.
///
/// # Errors
///
/// [`AreaError::DegenerateDivision`] if either crossed edge has equal end values.
pub fn trapezoid_area(p1: f64, p2: f64, p3: f64, p4: f64) -> Result<f64, AreaError> {
    let first = checked_ratio(FRONT_THRESHOLD - p1, p4 - p1, AreaFormula::Trapezoid)?;
    let second = checked_ratio(FRONT_THRESHOLD - p2, p3 - p2, AreaFormula::Trapezoid)?;
    Ok(0.5 * (first + second))
}
