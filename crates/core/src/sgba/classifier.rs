//! Quadrant case classification
//!
//! A quadrant's corners are compared to the front threshold, giving a side
//! `s ∈ {-1, 0, 1}` per corner. Each of the four quadrant edges gets a crossing
//! digit `D = (s_a - s_b) / 2` (truncated toward zero), and the digits are packed
//! into a base-3 identifier:
//!
//! ```text
//! D1 = edge P1-P2 (south)     D2 = edge P2-P3 (east)
//! D3 = edge P4-P3 (north)     D4 = edge P1-P4 (west)
//! C  = (1 + D1) + 3 (1 + D2) + 9 (1 + D3) + 27 (1 + D4)
//! ```
//!
//! Every strict sign pattern with at least one corner on each side of the front
//! maps to exactly one [`FrontCase`]. Anything else (a corner sitting exactly on
//! the threshold in a way that breaks the crossing pattern) is rejected as
//! [`AreaError::InvalidCase`].

use crate::error::AreaError;
use crate::field::FRONT_THRESHOLD;
use crate::sgba::formulas::{complement_triangle_area, trapezoid_area, triangle_area};

/// Level-set values at the four corners of a quadrant
///
/// Rotational order: `p1` south-west, `p2` south-east, `p3` north-east,
/// `p4` north-west.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrant {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
}

impl Quadrant {
    #[must_use]
    pub const fn new(p1: f64, p2: f64, p3: f64, p4: f64) -> Self {
        Self { p1, p2, p3, p4 }
    }

    /// Corner values in rotational order
    #[must_use]
    pub const fn values(&self) -> [f64; 4] {
        [self.p1, self.p2, self.p3, self.p4]
    }
}

/// Outcome of classifying one quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadrantState {
    /// Every corner above the threshold, area 1
    Burning,
    /// Every corner below the threshold, area 0
    Unburnt,
    /// The front crosses the quadrant
    Front(FrontCase),
}

/// Front-crossing configurations with a closed-form area
///
/// Variants are named after the corners on the burning side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontCase {
    /// Only the south-west corner burns
    SouthWestCorner,
    /// Everything but the south-west corner burns
    AllButSouthWest,
    /// Only the south-east corner burns
    SouthEastCorner,
    /// Everything but the south-east corner burns
    AllButSouthEast,
    /// Only the north-east corner burns
    NorthEastCorner,
    /// Everything but the north-east corner burns
    AllButNorthEast,
    /// Only the north-west corner burns
    NorthWestCorner,
    /// Everything but the north-west corner burns
    AllButNorthWest,
    /// South side burns
    SouthStrip,
    /// North side burns
    NorthStrip,
    /// West side burns
    WestStrip,
    /// East side burns
    EastStrip,
    /// South-west and north-east corners burn, two separate triangles
    SaddleSouthWestNorthEast,
    /// South-east and north-west corners burn, two separate triangles
    SaddleSouthEastNorthWest,
}

impl FrontCase {
    /// Every front case
    pub const ALL: [Self; 14] = [
        Self::SouthWestCorner,
        Self::AllButSouthWest,
        Self::SouthEastCorner,
        Self::AllButSouthEast,
        Self::NorthEastCorner,
        Self::AllButNorthEast,
        Self::NorthWestCorner,
        Self::AllButNorthWest,
        Self::SouthStrip,
        Self::NorthStrip,
        Self::WestStrip,
        Self::EastStrip,
        Self::SaddleSouthWestNorthEast,
        Self::SaddleSouthEastNorthWest,
    ];

    /// Base-3 case identifier of this configuration
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::SouthWestCorner => 68,
            Self::AllButSouthWest => 12,
            Self::SouthEastCorner => 42,
            Self::AllButSouthEast => 38,
            Self::NorthEastCorner => 28,
            Self::AllButNorthEast => 52,
            Self::NorthWestCorner => 22,
            Self::AllButNorthWest => 58,
            Self::SouthStrip => 70,
            Self::NorthStrip => 10,
            Self::WestStrip => 50,
            Self::EastStrip => 30,
            Self::SaddleSouthWestNorthEast => 56,
            Self::SaddleSouthEastNorthWest => 24,
        }
    }

    /// Look up a case identifier
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        let case = match id {
            68 => Self::SouthWestCorner,
            12 => Self::AllButSouthWest,
            42 => Self::SouthEastCorner,
            38 => Self::AllButSouthEast,
            28 => Self::NorthEastCorner,
            52 => Self::AllButNorthEast,
            22 => Self::NorthWestCorner,
            58 => Self::AllButNorthWest,
            70 => Self::SouthStrip,
            10 => Self::NorthStrip,
            50 => Self::WestStrip,
            30 => Self::EastStrip,
            56 => Self::SaddleSouthWestNorthEast,
            24 => Self::SaddleSouthEastNorthWest,
            _ => return None,
        };
        Some(case)
    }

    /// Which corners (SW, SE, NE, NW) are on the burning side
    #[must_use]
    pub const fn burning_corners(self) -> [bool; 4] {
        match self {
            Self::SouthWestCorner => [true, false, false, false],
            Self::AllButSouthWest => [false, true, true, true],
            Self::SouthEastCorner => [false, true, false, false],
            Self::AllButSouthEast => [true, false, true, true],
            Self::NorthEastCorner => [false, false, true, false],
            Self::AllButNorthEast => [true, true, false, true],
            Self::NorthWestCorner => [false, false, false, true],
            Self::AllButNorthWest => [true, true, true, false],
            Self::SouthStrip => [true, true, false, false],
            Self::NorthStrip => [false, false, true, true],
            Self::WestStrip => [true, false, false, true],
            Self::EastStrip => [false, true, true, false],
            Self::SaddleSouthWestNorthEast => [true, false, true, false],
            Self::SaddleSouthEastNorthWest => [false, true, false, true],
        }
    }

    /// Burning area of a quadrant in this configuration
    ///
    /// # Errors
    ///
    /// [`AreaError::DegenerateDivision`] from the underlying formula.
    pub fn area(self, q: &Quadrant) -> Result<f64, AreaError> {
        let Quadrant { p1, p2, p3, p4 } = *q;
        match self {
            Self::SouthWestCorner => triangle_area(p1, p2, p4),
            Self::AllButSouthWest => complement_triangle_area(p1, p2, p4),
            Self::SouthEastCorner => triangle_area(p2, p1, p3),
            Self::AllButSouthEast => complement_triangle_area(p2, p1, p3),
            Self::NorthEastCorner => triangle_area(p3, p2, p4),
            Self::AllButNorthEast => complement_triangle_area(p3, p2, p4),
            Self::NorthWestCorner => triangle_area(p4, p1, p3),
            Self::AllButNorthWest => complement_triangle_area(p4, p1, p3),
            Self::SouthStrip => trapezoid_area(p1, p2, p3, p4),
            Self::NorthStrip => Ok(1.0 - trapezoid_area(p1, p2, p3, p4)?),
            Self::WestStrip => trapezoid_area(p1, p4, p3, p2),
            Self::EastStrip => Ok(1.0 - trapezoid_area(p1, p4, p3, p2)?),
            Self::SaddleSouthWestNorthEast => {
                Ok(triangle_area(p1, p2, p4)? + triangle_area(p3, p2, p4)?)
            }
            Self::SaddleSouthEastNorthWest => {
                Ok(triangle_area(p4, p1, p3)? + triangle_area(p2, p1, p3)?)
            }
        }
    }
}

/// Side of the front a value lies on: 1 burning, -1 unburnt, 0 on the front
#[inline]
fn front_side(value: f64) -> i8 {
    if value > FRONT_THRESHOLD {
        1
    } else if value < FRONT_THRESHOLD {
        -1
    } else {
        0
    }
}

/// Base-3 sign-difference identifier of a quadrant, in `[0, 80]`
///
/// Meaningful only when the quadrant is neither fully burning nor fully unburnt.
#[must_use]
pub fn case_identifier(q: &Quadrant) -> u8 {
    let [s1, s2, s3, s4] = q.values().map(front_side);
    // Integer division truncates toward zero, so a corner on the front
    // never produces a crossing digit on its own
    let digits = [(s1 - s2) / 2, (s2 - s3) / 2, (s4 - s3) / 2, (s1 - s4) / 2];
    digits
        .iter()
        .rev()
        .fold(0u8, |acc, &d| acc * 3 + (1 + d) as u8)
}

/// Classify a quadrant against the front threshold
///
/// # Errors
///
/// [`AreaError::InvalidCase`] if the identifier has no entry in the case table.
pub fn classify(q: &Quadrant) -> Result<QuadrantState, AreaError> {
    let values = q.values();
    if values.iter().all(|&v| v > FRONT_THRESHOLD) {
        return Ok(QuadrantState::Burning);
    }
    if values.iter().all(|&v| v < FRONT_THRESHOLD) {
        return Ok(QuadrantState::Unburnt);
    }
    let case = case_identifier(q);
    FrontCase::from_id(case)
        .map(QuadrantState::Front)
        .ok_or(AreaError::InvalidCase { case })
}
