use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

/// Axis-aligned bounding box of a geometry.
///
/// The envelope of an empty geometry is *null*: it contains nothing, intersects nothing and is
/// the identity of [`Envelope::merge`]. Two null envelopes are equal.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::null()
    }
}

impl Envelope {
    /// Creates an envelope from the given corners. The values are reordered if needed.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x_min: x1.min(x2),
            y_min: y1.min(y2),
            x_max: x1.max(x2),
            y_max: y1.max(y2),
        }
    }

    /// Creates a null envelope.
    pub const fn null() -> Self {
        Self {
            x_min: f64::INFINITY,
            y_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    /// Envelope containing a single coordinate.
    pub fn from_coordinate(c: &Coordinate) -> Self {
        Self {
            x_min: c.x,
            y_min: c.y,
            x_max: c.x,
            y_max: c.y,
        }
    }

    /// Returns true for the envelope of an empty geometry.
    pub fn is_null(&self) -> bool {
        self.x_min > self.x_max
    }

    /// Minimum x ordinate.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Maximum x ordinate.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Minimum y ordinate.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum y ordinate.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Width of the envelope, 0 for a null envelope.
    pub fn width(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.x_max - self.x_min
        }
    }

    /// Height of the envelope, 0 for a null envelope.
    pub fn height(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.y_max - self.y_min
        }
    }

    /// Area of the envelope.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Centre of the envelope, `None` for a null envelope.
    pub fn centre(&self) -> Option<Coordinate> {
        if self.is_null() {
            return None;
        }

        Some(Coordinate::xy(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        ))
    }

    /// Grows the envelope to contain the coordinate.
    pub fn expand_to_include(&mut self, c: &Coordinate) {
        if c.x < self.x_min {
            self.x_min = c.x;
        }
        if c.x > self.x_max {
            self.x_max = c.x;
        }
        if c.y < self.y_min {
            self.y_min = c.y;
        }
        if c.y > self.y_max {
            self.y_max = c.y;
        }
    }

    /// Grows the envelope to contain the other envelope.
    pub fn expand_to_include_envelope(&mut self, other: &Envelope) {
        *self = self.merge(other);
    }

    /// Union of two envelopes.
    pub fn merge(&self, other: &Self) -> Self {
        if self.is_null() {
            return *other;
        }
        if other.is_null() {
            return *self;
        }

        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Returns true if the envelopes have at least one common point.
    pub fn intersects(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }

        !(other.x_min > self.x_max
            || other.x_max < self.x_min
            || other.y_min > self.y_max
            || other.y_max < self.y_min)
    }

    /// Returns true if every point of `other` lies in this envelope.
    pub fn covers(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }

        other.x_min >= self.x_min
            && other.x_max <= self.x_max
            && other.y_min >= self.y_min
            && other.y_max <= self.y_max
    }

    /// Returns true if the coordinate lies inside or on the border of the envelope.
    pub fn contains_coordinate(&self, c: &Coordinate) -> bool {
        !self.is_null()
            && self.x_min <= c.x
            && self.x_max >= c.x
            && self.y_min <= c.y
            && self.y_max >= c.y
    }

    /// Euclidean distance between the envelopes, 0 if they intersect.
    pub fn distance(&self, other: &Envelope) -> f64 {
        if self.intersects(other) {
            return 0.0;
        }

        let dx = if self.x_max < other.x_min {
            other.x_min - self.x_max
        } else if self.x_min > other.x_max {
            self.x_min - other.x_max
        } else {
            0.0
        };
        let dy = if self.y_max < other.y_min {
            other.y_min - self.y_max
        } else if self.y_min > other.y_max {
            self.y_min - other.y_max
        } else {
            0.0
        };

        dx.hypot(dy)
    }

    /// Corners of the envelope going clockwise from the lower left corner, closed.
    pub fn into_ring(self) -> [Coordinate; 5] {
        [
            Coordinate::xy(self.x_min, self.y_min),
            Coordinate::xy(self.x_min, self.y_max),
            Coordinate::xy(self.x_max, self.y_max),
            Coordinate::xy(self.x_max, self.y_min),
            Coordinate::xy(self.x_min, self.y_min),
        ]
    }
}

impl FromIterator<Envelope> for Envelope {
    fn from_iter<T: IntoIterator<Item = Envelope>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Envelope::null(), |acc, envelope| acc.merge(&envelope))
    }
}

impl AbsDiffEq for Envelope {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        if self.is_null() || other.is_null() {
            return self.is_null() == other.is_null();
        }

        self.x_min.abs_diff_eq(&other.x_min, epsilon)
            && self.y_min.abs_diff_eq(&other.y_min, epsilon)
            && self.x_max.abs_diff_eq(&other.x_max, epsilon)
            && self.y_max.abs_diff_eq(&other.y_max, epsilon)
    }
}
