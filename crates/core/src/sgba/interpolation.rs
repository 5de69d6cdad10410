//! Cell neighbourhood gather and auxiliary node interpolation
//!
//! Each interior cell is split into four quadrants around its center. The quadrant
//! corners are the cell center, two edge midpoints and one cell corner; midpoints
//! average the two cells sharing the edge and corners average the four cells
//! sharing the corner. Values are computed per cell on the fly, never stored as
//! full-grid arrays.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::LevelSetField;
use crate::sgba::classifier::Quadrant;

/// Position of a quadrant inside its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuadrantPosition {
    /// Lower-left quadrant
    SouthWest,
    /// Lower-right quadrant
    SouthEast,
    /// Upper-right quadrant
    NorthEast,
    /// Upper-left quadrant
    NorthWest,
}

impl QuadrantPosition {
    /// All quadrants in rotational order
    pub const ALL: [Self; 4] = [
        Self::SouthWest,
        Self::SouthEast,
        Self::NorthEast,
        Self::NorthWest,
    ];
}

impl fmt::Display for QuadrantPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SouthWest => "south-west",
            Self::SouthEast => "south-east",
            Self::NorthEast => "north-east",
            Self::NorthWest => "north-west",
        };
        f.write_str(name)
    }
}

/// 3×3 block of level-set samples centred on one interior cell
///
/// South is row `y - 1`, north is row `y + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellNeighbourhood {
    pub south_west: f64,
    pub south: f64,
    pub south_east: f64,
    pub west: f64,
    pub center: f64,
    pub east: f64,
    pub north_west: f64,
    pub north: f64,
    pub north_east: f64,
}

impl CellNeighbourhood {
    /// Read the 3×3 block around `(x, y)`
    ///
    /// `(x, y)` must be an interior cell: `1 <= x <= nx - 2`, `1 <= y <= ny - 2`.
    #[inline]
    #[must_use]
    pub fn gather(field: &LevelSetField<'_>, x: usize, y: usize) -> Self {
        let nx = field.nx();
        let phi = field.as_slice();
        let row_s = (y - 1) * nx;
        let row_c = y * nx;
        let row_n = (y + 1) * nx;
        Self {
            south_west: phi[row_s + x - 1],
            south: phi[row_s + x],
            south_east: phi[row_s + x + 1],
            west: phi[row_c + x - 1],
            center: phi[row_c + x],
            east: phi[row_c + x + 1],
            north_west: phi[row_n + x - 1],
            north: phi[row_n + x],
            north_east: phi[row_n + x + 1],
        }
    }

    /// Same value everywhere
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            south_west: value,
            south: value,
            south_east: value,
            west: value,
            center: value,
            east: value,
            north_west: value,
            north: value,
            north_east: value,
        }
    }
}

/// Level-set values at the 9 quadrant nodes of one cell
///
/// `center` is the cell's own sample; the edge fields are midpoints and the
/// diagonal fields are cell corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedNodes {
    pub center: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    pub west: f64,
    pub south_west: f64,
    pub south_east: f64,
    pub north_east: f64,
    pub north_west: f64,
}

impl InterpolatedNodes {
    /// Interpolate edge midpoints and corners from a cell neighbourhood
    #[inline]
    #[must_use]
    pub fn from_neighbourhood(n: &CellNeighbourhood) -> Self {
        let c = n.center;
        Self {
            center: c,
            south: 0.5 * (n.south + c),
            east: 0.5 * (n.east + c),
            north: 0.5 * (n.north + c),
            west: 0.5 * (n.west + c),
            south_west: 0.25 * (n.south_west + n.south + c + n.west),
            south_east: 0.25 * (n.south + n.south_east + n.east + c),
            north_east: 0.25 * (c + n.east + n.north_east + n.north),
            north_west: 0.25 * (n.west + c + n.north + n.north_west),
        }
    }

    /// Corner values of one quadrant in SW, SE, NE, NW order
    #[inline]
    #[must_use]
    pub fn quadrant(&self, position: QuadrantPosition) -> Quadrant {
        match position {
            QuadrantPosition::SouthWest => {
                Quadrant::new(self.south_west, self.south, self.center, self.west)
            }
            QuadrantPosition::SouthEast => {
                Quadrant::new(self.south, self.south_east, self.east, self.center)
            }
            QuadrantPosition::NorthEast => {
                Quadrant::new(self.center, self.east, self.north_east, self.north)
            }
            QuadrantPosition::NorthWest => {
                Quadrant::new(self.west, self.center, self.north, self.north_west)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangles_field() -> LevelSetField<'static> {
        LevelSetField::from_rows(&[[0.0, 0.2, 0.0], [0.2, 0.6, 0.2], [0.0, 0.2, 0.0]]).unwrap()
    }

    #[test]
    fn test_gather_orientation() {
        // Row 0 is south, row 2 is north
        let field = LevelSetField::from_rows(&[
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ])
        .unwrap();
        let n = CellNeighbourhood::gather(&field, 1, 1);
        assert_eq!(n.south_west, 1.0);
        assert_eq!(n.south, 2.0);
        assert_eq!(n.south_east, 3.0);
        assert_eq!(n.west, 4.0);
        assert_eq!(n.center, 5.0);
        assert_eq!(n.east, 6.0);
        assert_eq!(n.north_west, 7.0);
        assert_eq!(n.north, 8.0);
        assert_eq!(n.north_east, 9.0);
    }

    #[test]
    fn test_interpolated_nodes() {
        let field = triangles_field();
        let nodes = InterpolatedNodes::from_neighbourhood(&CellNeighbourhood::gather(&field, 1, 1));
        assert_relative_eq!(nodes.center, 0.6);
        for mid in [nodes.south, nodes.east, nodes.north, nodes.west] {
            assert_relative_eq!(mid, 0.4, epsilon = 1e-15);
        }
        for corner in [
            nodes.south_west,
            nodes.south_east,
            nodes.north_east,
            nodes.north_west,
        ] {
            assert_relative_eq!(corner, 0.25, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_uniform_neighbourhood_is_fixed_point() {
        let nodes = InterpolatedNodes::from_neighbourhood(&CellNeighbourhood::uniform(0.3));
        for position in QuadrantPosition::ALL {
            let q = nodes.quadrant(position);
            for v in q.values() {
                assert_relative_eq!(v, 0.3, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_quadrants_share_center() {
        let field = triangles_field();
        let nodes = InterpolatedNodes::from_neighbourhood(&CellNeighbourhood::gather(&field, 1, 1));
        // Center sits at P3, P4, P1, P2 of the SW, SE, NE, NW quadrants
        assert_eq!(nodes.quadrant(QuadrantPosition::SouthWest).p3, 0.6);
        assert_eq!(nodes.quadrant(QuadrantPosition::SouthEast).p4, 0.6);
        assert_eq!(nodes.quadrant(QuadrantPosition::NorthEast).p1, 0.6);
        assert_eq!(nodes.quadrant(QuadrantPosition::NorthWest).p2, 0.6);
    }

    #[test]
    fn test_quadrant_position_display() {
        assert_eq!(QuadrantPosition::NorthWest.to_string(), "north-west");
    }
}
