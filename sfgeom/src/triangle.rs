//! Planar triangle computations.

use crate::algorithm::orientation::Orientation;
use crate::coord::Coordinate;

/// A triangle given by its three vertices.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub p0: Coordinate,
    /// Second vertex.
    pub p1: Coordinate,
    /// Third vertex.
    pub p2: Coordinate,
}

fn det(m00: f64, m01: f64, m10: f64, m11: f64) -> f64 {
    m00 * m11 - m01 * m10
}

fn is_acute_angle(a: &Coordinate, b: &Coordinate, c: &Coordinate) -> bool {
    (a.vector() - b.vector()).dot(&(c.vector() - b.vector())) > 0.0
}

impl Triangle {
    /// Creates a triangle.
    pub fn new(p0: Coordinate, p1: Coordinate, p2: Coordinate) -> Self {
        Self { p0, p1, p2 }
    }

    /// Centre of the inscribed circle: the mean of the vertices weighted by the lengths of the
    /// opposite sides.
    pub fn in_centre(&self) -> Coordinate {
        let len0 = self.p1.distance(&self.p2);
        let len1 = self.p0.distance(&self.p2);
        let len2 = self.p0.distance(&self.p1);
        let circumference = len0 + len1 + len2;

        let centre = (self.p0.vector() * len0 + self.p1.vector() * len1 + self.p2.vector() * len2)
            / circumference;
        Coordinate::from_vector(centre)
    }

    /// Centre of the circle passing through all three vertices.
    ///
    /// The result is not finite if the vertices are collinear.
    pub fn circumcentre(&self) -> Coordinate {
        let cx = self.p2.x;
        let cy = self.p2.y;
        let ax = self.p0.x - cx;
        let ay = self.p0.y - cy;
        let bx = self.p1.x - cx;
        let by = self.p1.y - cy;

        let denom = 2.0 * det(ax, ay, bx, by);
        let numx = det(ay, ax * ax + ay * ay, by, bx * bx + by * by);
        let numy = det(ax, ax * ax + ay * ay, bx, bx * bx + by * by);

        Coordinate::xy(cx - numx / denom, cy + numy / denom)
    }

    /// Radius of the circumscribed circle, infinite for a degenerate triangle.
    pub fn circumradius(&self) -> f64 {
        let a = self.p0.distance(&self.p1);
        let b = self.p1.distance(&self.p2);
        let c = self.p2.distance(&self.p0);
        let area = self.area();
        if area == 0.0 {
            return f64::INFINITY;
        }

        (a * b * c) / (4.0 * area)
    }

    /// True if at least two sides have exactly the same length.
    pub fn is_isoceles(&self) -> bool {
        let len0 = self.p0.distance(&self.p1);
        let len1 = self.p1.distance(&self.p2);
        let len2 = self.p2.distance(&self.p0);
        len0 == len1 || len1 == len2 || len2 == len0
    }

    /// True if all angles are smaller than a right angle.
    pub fn is_acute(&self) -> bool {
        is_acute_angle(&self.p0, &self.p1, &self.p2)
            && is_acute_angle(&self.p1, &self.p2, &self.p0)
            && is_acute_angle(&self.p2, &self.p0, &self.p1)
    }

    /// True if the vertices go counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        Orientation::triplet(&self.p0, &self.p1, &self.p2) == Orientation::Counterclockwise
    }

    /// True if the point lies inside or on the border of the triangle.
    pub fn intersects(&self, p: &Coordinate) -> bool {
        let exterior = if self.is_ccw() {
            Orientation::Clockwise
        } else {
            Orientation::Counterclockwise
        };

        Orientation::triplet(&self.p0, &self.p1, p) != exterior
            && Orientation::triplet(&self.p1, &self.p2, p) != exterior
            && Orientation::triplet(&self.p2, &self.p0, p) != exterior
    }

    /// Length of the longest side.
    pub fn longest_side_length(&self) -> f64 {
        self.p0
            .distance(&self.p1)
            .max(self.p1.distance(&self.p2))
            .max(self.p2.distance(&self.p0))
    }

    /// Perimeter.
    pub fn length(&self) -> f64 {
        self.p0.distance(&self.p1) + self.p1.distance(&self.p2) + self.p2.distance(&self.p0)
    }

    /// Signed area: positive for counter-clockwise triangles.
    pub fn area_signed(&self) -> f64 {
        det(
            self.p1.x - self.p0.x,
            self.p2.x - self.p0.x,
            self.p1.y - self.p0.y,
            self.p2.y - self.p0.y,
        ) / 2.0
    }

    /// Area.
    pub fn area(&self) -> f64 {
        self.area_signed().abs()
    }
}
