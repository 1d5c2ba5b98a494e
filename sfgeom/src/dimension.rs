//! Topological dimension of geometries and of DE-9IM matrix entries.

use serde::{Deserialize, Serialize};

/// Dimension of a point set.
///
/// The variants are ordered: `False < P < L < A`, so the dimension of a union of point sets is the
/// maximum of the dimensions of its parts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Empty point set.
    False,
    /// Points.
    P,
    /// Curves.
    L,
    /// Surfaces.
    A,
}

impl Dimension {
    /// Integer value: -1, 0, 1 or 2.
    pub fn value(self) -> i32 {
        match self {
            Dimension::False => -1,
            Dimension::P => 0,
            Dimension::L => 1,
            Dimension::A => 2,
        }
    }

    /// DE-9IM symbol of the dimension.
    pub fn symbol(self) -> char {
        match self {
            Dimension::False => 'F',
            Dimension::P => '0',
            Dimension::L => '1',
            Dimension::A => '2',
        }
    }

    /// Parses a DE-9IM dimension symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'F' | 'f' => Some(Dimension::False),
            '0' => Some(Dimension::P),
            '1' => Some(Dimension::L),
            '2' => Some(Dimension::A),
            _ => None,
        }
    }

    /// Returns true for any non-empty dimension.
    pub fn is_true(self) -> bool {
        self != Dimension::False
    }
}

impl TryFrom<i32> for Dimension {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Dimension::False),
            0 => Ok(Dimension::P),
            1 => Ok(Dimension::L),
            2 => Ok(Dimension::A),
            other => Err(other),
        }
    }
}
