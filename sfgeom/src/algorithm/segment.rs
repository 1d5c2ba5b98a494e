//! Straight line segments.

use crate::algorithm::orientation::Orientation;
use crate::coord::Coordinate;

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a>(pub &'a Coordinate, pub &'a Coordinate);

impl Segment<'_> {
    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.0.distance(self.1)
    }

    /// Shortest euclidean distance between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value
    ///   is the length of the normal
    /// * otherwise the returned value is the distance to the closer endpoint
    pub fn distance_to_point(&self, point: &Coordinate) -> f64 {
        self.closest_point(point).distance(point)
    }

    /// The point of the segment closest to the given point.
    pub fn closest_point(&self, point: &Coordinate) -> Coordinate {
        let r = self.fraction_of(point);
        if r <= 0.0 {
            *self.0
        } else if r >= 1.0 {
            *self.1
        } else {
            let ds = self.1.vector() - self.0.vector();
            Coordinate::from_vector(self.0.vector() + ds * r)
        }
    }

    /// Position of the projection of the point onto the segment as a fraction of the segment
    /// length, clamped to `[0, 1]`. Degenerate segments give 0.
    pub fn fraction_of(&self, point: &Coordinate) -> f64 {
        if self.0.equals_2d(self.1) {
            return 0.0;
        }

        let ds = self.1.vector() - self.0.vector();
        let dp = point.vector() - self.0.vector();
        (dp.dot(&ds) / ds.norm_squared()).clamp(0.0, 1.0)
    }

    /// Returns true, if the segment has at least one common point with the `other` segment.
    pub fn intersects(&self, other: &Segment) -> bool {
        fn on_segment(p: &Coordinate, q: &Coordinate, r: &Coordinate) -> bool {
            q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
        }

        let o1 = Orientation::triplet(self.0, other.0, self.1);
        let o2 = Orientation::triplet(self.0, other.1, self.1);
        let o3 = Orientation::triplet(other.0, self.0, other.1);
        let o4 = Orientation::triplet(other.0, self.1, other.1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && on_segment(self.0, other.0, self.1))
            || (o2 == Orientation::Collinear && on_segment(self.0, other.1, self.1))
            || (o3 == Orientation::Collinear && on_segment(other.0, self.0, other.1))
            || (o4 == Orientation::Collinear && on_segment(other.0, self.1, other.1))
    }

    /// Shortest distance between two segments, 0 if they intersect.
    pub fn distance_to_segment(&self, other: &Segment) -> f64 {
        if self.intersects(other) {
            return 0.0;
        }

        self.distance_to_point(other.0)
            .min(self.distance_to_point(other.1))
            .min(other.distance_to_point(self.0))
            .min(other.distance_to_point(self.1))
    }
}
