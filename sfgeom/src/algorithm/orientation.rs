//! Orientation of point triplets and rings.

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points. Non-finite input is treated as collinear.
    pub fn triplet(p: &Coordinate, q: &Coordinate, r: &Coordinate) -> Self {
        let v = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
        if v > 0.0 {
            Self::Clockwise
        } else if v < 0.0 {
            Self::Counterclockwise
        } else {
            Self::Collinear
        }
    }
}

/// Signed area of a closed ring (shoelace formula). Positive for counter-clockwise rings.
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let x0 = ring[0].x;
    let mut sum = 0.0;
    for i in 1..ring.len() - 1 {
        let x = ring[i].x - x0;
        let y1 = ring[i + 1].y;
        let y2 = ring[i - 1].y;
        sum += x * (y2 - y1);
    }

    -sum / 2.0
}

/// Returns true if the closed ring goes counter-clockwise. Degenerate rings are not
/// counter-clockwise.
pub fn is_ccw(ring: &[Coordinate]) -> bool {
    signed_area(ring) > 0.0
}
