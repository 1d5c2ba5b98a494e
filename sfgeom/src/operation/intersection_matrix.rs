//! Dimensionally extended nine-intersection matrix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::Location;
use crate::dimension::Dimension;
use crate::error::GeometryError;

const LOCATIONS: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];

/// Dimensionally extended nine-intersection matrix (DE-9IM) of two geometries.
///
/// Rows correspond to the interior, boundary and exterior of the first geometry, columns to the
/// same parts of the second one. Every cell holds the dimension of the intersection of the two
/// parts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntersectionMatrix {
    matrix: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self {
            matrix: [[Dimension::False; 3]; 3],
        }
    }
}

impl IntersectionMatrix {
    /// Creates a matrix by evaluating the function for every pair of locations.
    pub fn from_fn(mut f: impl FnMut(Location, Location) -> Dimension) -> Self {
        let mut matrix = Self::default();
        for a in LOCATIONS {
            for b in LOCATIONS {
                matrix.set(a, b, f(a, b));
            }
        }
        matrix
    }

    /// Value of the cell.
    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.matrix[a.index()][b.index()]
    }

    /// Sets the value of the cell.
    pub fn set(&mut self, a: Location, b: Location, dimension: Dimension) {
        self.matrix[a.index()][b.index()] = dimension;
    }

    /// Matrix of the same relation with the operands swapped.
    pub fn transpose(&self) -> Self {
        Self::from_fn(|a, b| self.get(b, a))
    }

    /// Tests the matrix against a pattern of 9 characters, one per cell in row-major order:
    ///
    /// * `T` - the intersection is not empty
    /// * `F` - the intersection is empty
    /// * `*` - any value
    /// * `0`, `1`, `2` - the intersection has exactly the given dimension
    pub fn matches(&self, pattern: &str) -> Result<bool, GeometryError> {
        let symbols: Vec<char> = pattern.chars().collect();
        if symbols.len() != 9 {
            return Err(GeometryError::InvalidArgument(format!(
                "Should be length 9: {pattern}"
            )));
        }

        let mut matches = true;
        for (i, symbol) in symbols.into_iter().enumerate() {
            let actual = self.matrix[i / 3][i % 3];
            let cell_matches = match symbol {
                '*' => true,
                'T' | 't' => actual.is_true(),
                _ => match Dimension::from_symbol(symbol) {
                    Some(required) => actual == required,
                    None => {
                        return Err(GeometryError::InvalidArgument(format!(
                            "invalid dimension symbol '{symbol}' in pattern {pattern}"
                        )))
                    }
                },
            };
            matches &= cell_matches;
        }

        Ok(matches)
    }

    fn ii(&self) -> Dimension {
        self.get(Location::Interior, Location::Interior)
    }

    fn ib(&self) -> Dimension {
        self.get(Location::Interior, Location::Boundary)
    }

    fn ie(&self) -> Dimension {
        self.get(Location::Interior, Location::Exterior)
    }

    fn bi(&self) -> Dimension {
        self.get(Location::Boundary, Location::Interior)
    }

    fn bb(&self) -> Dimension {
        self.get(Location::Boundary, Location::Boundary)
    }

    fn be(&self) -> Dimension {
        self.get(Location::Boundary, Location::Exterior)
    }

    fn ei(&self) -> Dimension {
        self.get(Location::Exterior, Location::Interior)
    }

    fn eb(&self) -> Dimension {
        self.get(Location::Exterior, Location::Boundary)
    }

    /// `FF*FF****`
    pub fn is_disjoint(&self) -> bool {
        !self.ii().is_true() && !self.ib().is_true() && !self.bi().is_true() && !self.bb().is_true()
    }

    /// Negation of [`IntersectionMatrix::is_disjoint`].
    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// `FT*******`, `F**T*****` or `F***T****`, unless both geometries are points.
    pub fn is_touches(&self, dimension_a: Dimension, dimension_b: Dimension) -> bool {
        if dimension_a > dimension_b {
            return self.transpose().is_touches(dimension_b, dimension_a);
        }

        let applicable = matches!(
            (dimension_a, dimension_b),
            (Dimension::A, Dimension::A)
                | (Dimension::L, Dimension::L)
                | (Dimension::L, Dimension::A)
                | (Dimension::P, Dimension::A)
                | (Dimension::P, Dimension::L)
        );

        applicable
            && !self.ii().is_true()
            && (self.ib().is_true() || self.bi().is_true() || self.bb().is_true())
    }

    /// `T*T******` for P/L, P/A and L/A, `T*****T**` for L/P, A/P and A/L, `0********` for L/L.
    pub fn is_crosses(&self, dimension_a: Dimension, dimension_b: Dimension) -> bool {
        use Dimension::*;
        match (dimension_a, dimension_b) {
            (P, L) | (P, A) | (L, A) => self.ii().is_true() && self.ie().is_true(),
            (L, P) | (A, P) | (A, L) => self.ii().is_true() && self.ei().is_true(),
            (L, L) => self.ii() == P,
            _ => false,
        }
    }

    /// `T*F**F***`
    pub fn is_within(&self) -> bool {
        self.ii().is_true() && !self.ie().is_true() && !self.be().is_true()
    }

    /// `T*****FF*`
    pub fn is_contains(&self) -> bool {
        self.ii().is_true() && !self.ei().is_true() && !self.eb().is_true()
    }

    /// `T*****FF*`, `*T****FF*`, `***T**FF*` or `****T*FF*`
    pub fn is_covers(&self) -> bool {
        let has_common_point =
            self.ii().is_true() || self.ib().is_true() || self.bi().is_true() || self.bb().is_true();
        has_common_point && !self.ei().is_true() && !self.eb().is_true()
    }

    /// `T*F**F***`, `*TF**F***`, `**FT*F***` or `**F*TF***`
    pub fn is_covered_by(&self) -> bool {
        let has_common_point =
            self.ii().is_true() || self.ib().is_true() || self.bi().is_true() || self.bb().is_true();
        has_common_point && !self.ie().is_true() && !self.be().is_true()
    }

    /// `T*F**FFF*` for geometries of the same dimension.
    pub fn is_equals(&self, dimension_a: Dimension, dimension_b: Dimension) -> bool {
        dimension_a == dimension_b
            && self.ii().is_true()
            && !self.ie().is_true()
            && !self.be().is_true()
            && !self.ei().is_true()
            && !self.eb().is_true()
    }

    /// `T*T***T**` for P/P and A/A, `1*T***T**` for L/L.
    pub fn is_overlaps(&self, dimension_a: Dimension, dimension_b: Dimension) -> bool {
        match (dimension_a, dimension_b) {
            (Dimension::P, Dimension::P) | (Dimension::A, Dimension::A) => {
                self.ii().is_true() && self.ie().is_true() && self.ei().is_true()
            }
            (Dimension::L, Dimension::L) => {
                self.ii() == Dimension::L && self.ie().is_true() && self.ei().is_true()
            }
            _ => false,
        }
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.matrix {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for IntersectionMatrix {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != 9 {
            return Err(GeometryError::InvalidArgument(format!(
                "Should be length 9: {s}"
            )));
        }

        let mut matrix = Self::default();
        for (i, symbol) in symbols.into_iter().enumerate() {
            matrix.matrix[i / 3][i % 3] = Dimension::from_symbol(symbol).ok_or_else(|| {
                GeometryError::InvalidArgument(format!("invalid dimension symbol '{symbol}'"))
            })?;
        }

        Ok(matrix)
    }
}
