//! Coordinates and coordinate sequences.
//!
//! A [`Coordinate`] always carries `x` and `y`. The `z` and `m` ordinates are `NaN` when the
//! coordinate does not have them. Whether a whole sequence is 3- or 4-dimensional is a property of
//! the [`CoordinateSequence`], not of the individual coordinates.

use std::cmp::Ordering;
use std::ops::Index;

use approx::AbsDiffEq;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;

/// A position in the plane with optional elevation (`z`) and measure (`m`).
///
/// Equality compares all four ordinates, treating absent (`NaN`) ordinates as equal.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Coordinate {
    /// X ordinate.
    pub x: f64,
    /// Y ordinate.
    pub y: f64,
    /// Z ordinate, `NaN` if absent.
    pub z: f64,
    /// M ordinate, `NaN` if absent.
    pub m: f64,
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::xy(0.0, 0.0)
    }
}

impl Coordinate {
    /// Creates a 2d coordinate.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: f64::NAN,
            m: f64::NAN,
        }
    }

    /// Creates a coordinate with elevation.
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            m: f64::NAN,
        }
    }

    /// Creates a coordinate with a measure value.
    pub const fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: f64::NAN,
            m,
        }
    }

    /// Creates a coordinate with elevation and measure.
    pub const fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z, m }
    }

    /// Compares `x` and `y` only.
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Compares `x` and `y` within the given tolerance.
    ///
    /// A zero tolerance means exact 2d equality.
    pub fn equals_with_tolerance(&self, other: &Coordinate, tolerance: f64) -> bool {
        if tolerance == 0.0 {
            return self.equals_2d(other);
        }

        self.distance(other) <= tolerance
    }

    /// Compares all four ordinates. `NaN` ordinates are equal to each other.
    pub fn equals_identical(&self, other: &Coordinate) -> bool {
        fn same(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }

        same(self.x, other.x) && same(self.y, other.y) && same(self.z, other.z) && same(self.m, other.m)
    }

    /// Lexicographic comparison by `x`, then `y`.
    pub fn compare_to(&self, other: &Coordinate) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }

    /// Euclidean 2d distance.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.vector() - other.vector()).norm()
    }

    /// Position vector of the coordinate.
    pub fn vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Creates a 2d coordinate from a position vector.
    pub fn from_vector(v: Vector2<f64>) -> Self {
        Self::xy(v.x, v.y)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.equals_identical(other)
    }
}

impl AbsDiffEq for Coordinate {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::xy(x, y)
    }
}

/// Ordered list of coordinates of a single geometry component.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSequence {
    coords: Vec<Coordinate>,
    has_z: bool,
    has_m: bool,
}

impl CoordinateSequence {
    /// Creates a sequence with explicit ordinate flags.
    pub fn new(coords: Vec<Coordinate>, has_z: bool, has_m: bool) -> Self {
        Self {
            coords,
            has_z,
            has_m,
        }
    }

    /// Creates a 2d sequence.
    pub fn xy(coords: Vec<Coordinate>) -> Self {
        Self::new(coords, false, false)
    }

    /// Creates a 2d sequence from `(x, y)` pairs.
    pub fn from_xy(pairs: &[(f64, f64)]) -> Self {
        Self::xy(pairs.iter().map(|&p| Coordinate::from(p)).collect())
    }

    /// Creates a sequence and detects `z` and `m` from the coordinates: the sequence has an
    /// ordinate if any coordinate has a non-`NaN` value of it.
    pub fn detect(coords: Vec<Coordinate>) -> Self {
        let has_z = coords.iter().any(|c| !c.z.is_nan());
        let has_m = coords.iter().any(|c| !c.m.is_nan());
        Self::new(coords, has_z, has_m)
    }

    /// Creates an empty sequence with the given ordinate flags.
    pub fn empty(has_z: bool, has_m: bool) -> Self {
        Self::new(Vec::new(), has_z, has_m)
    }

    /// Raises the ordinate flags for ordinates that some coordinate has acquired.
    pub(crate) fn refresh_ordinates(&mut self) {
        self.has_z |= self.coords.iter().any(|c| !c.z.is_nan());
        self.has_m |= self.coords.iter().any(|c| !c.m.is_nan());
    }

    /// Number of coordinates.
    pub fn size(&self) -> usize {
        self.coords.len()
    }

    /// Returns true if the sequence has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Whether the coordinates carry elevation.
    pub fn has_z(&self) -> bool {
        self.has_z
    }

    /// Whether the coordinates carry a measure.
    pub fn has_m(&self) -> bool {
        self.has_m
    }

    /// Number of ordinates per coordinate: 2, 3 or 4.
    pub fn dimension(&self) -> u8 {
        2 + u8::from(self.has_z) + u8::from(self.has_m)
    }

    /// Returns the coordinate at `index`.
    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.coords.get(index)
    }

    /// First coordinate.
    pub fn first(&self) -> Option<&Coordinate> {
        self.coords.first()
    }

    /// Last coordinate.
    pub fn last(&self) -> Option<&Coordinate> {
        self.coords.last()
    }

    /// Replaces the coordinate at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, coord: Coordinate) {
        self.coords[index] = coord;
    }

    /// Mutable access to the coordinate at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Coordinate> {
        self.coords.get_mut(index)
    }

    /// Appends a coordinate.
    pub fn push(&mut self, coord: Coordinate) {
        self.coords.push(coord);
    }

    /// Appends all coordinates of `other`.
    pub fn extend_from(&mut self, other: &CoordinateSequence) {
        self.coords.extend_from_slice(&other.coords);
    }

    /// Iterates over the coordinates.
    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.coords.iter()
    }

    /// Iterates mutably over the coordinates.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Coordinate> {
        self.coords.iter_mut()
    }

    /// The coordinates as a slice.
    pub fn as_slice(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Reverses the order of the coordinates in place.
    pub fn reverse(&mut self) {
        self.coords.reverse();
    }

    /// Returns a copy with the coordinates in reverse order.
    pub fn reversed(&self) -> Self {
        let mut copy = self.clone();
        copy.reverse();
        copy
    }

    /// Returns true if the sequence has at least one coordinate and the first and the last
    /// coordinates are equal in 2d.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }

    /// Returns true if the sequence is closed and has enough points to form a ring.
    pub fn is_ring(&self) -> bool {
        self.size() >= 4 && self.is_closed()
    }

    /// Appends the first coordinate if the sequence is not closed yet.
    pub fn close_ring(&mut self) {
        if let Some(first) = self.coords.first().copied() {
            if !self.is_closed() {
                self.coords.push(first);
            }
        }
    }

    /// Smallest coordinate in the `(x, y)` lexicographic order.
    pub fn min_coordinate(&self) -> Option<&Coordinate> {
        self.coords.iter().min_by(|a, b| a.compare_to(b))
    }

    /// Rotates the sequence so that it starts with the first coordinate equal to `first`.
    ///
    /// The sequence is treated as a list of unique ring points: the closing point must be
    /// removed before scrolling and added back afterwards.
    pub fn scroll(&mut self, first: &Coordinate) {
        if let Some(index) = self.coords.iter().position(|c| c.equals_2d(first)) {
            self.coords.rotate_left(index);
        }
    }

    /// Removes consecutive duplicate coordinates (2d comparison).
    pub fn remove_repeated(&mut self) {
        self.coords.dedup_by(|a, b| a.equals_2d(b));
    }

    /// Bounding box of the coordinates.
    pub fn envelope(&self) -> Envelope {
        let mut envelope = Envelope::null();
        for coord in &self.coords {
            envelope.expand_to_include(coord);
        }
        envelope
    }

    /// Compares two sequences element-wise. A longer sequence with an equal prefix is greater.
    pub fn compare_to(&self, other: &CoordinateSequence) -> Ordering {
        for (a, b) in self.coords.iter().zip(other.coords.iter()) {
            let comparison = a.compare_to(b);
            if comparison != Ordering::Equal {
                return comparison;
            }
        }

        self.size().cmp(&other.size())
    }

    /// Returns true if both sequences have the same ordinate set and all ordinates are equal.
    pub fn equals_identical(&self, other: &CoordinateSequence) -> bool {
        self.size() == other.size()
            && self.has_z == other.has_z
            && self.has_m == other.has_m
            && self
                .coords
                .iter()
                .zip(other.coords.iter())
                .all(|(a, b)| a.equals_identical(b))
    }

    /// Returns true if both sequences have the same size and coordinates are equal within the
    /// `tolerance` (2d comparison).
    pub fn equals_exact(&self, other: &CoordinateSequence, tolerance: f64) -> bool {
        self.size() == other.size()
            && self
                .coords
                .iter()
                .zip(other.coords.iter())
                .all(|(a, b)| a.equals_with_tolerance(b, tolerance))
    }
}

impl Index<usize> for CoordinateSequence {
    type Output = Coordinate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.coords[index]
    }
}

impl From<Vec<Coordinate>> for CoordinateSequence {
    fn from(coords: Vec<Coordinate>) -> Self {
        Self::detect(coords)
    }
}

impl<'a> IntoIterator for &'a CoordinateSequence {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identical_comparison_treats_nan_as_equal() {
        let a = Coordinate::xy(1.0, 2.0);
        let b = Coordinate::xy(1.0, 2.0);
        assert!(a.equals_identical(&b));
        assert!(!a.equals_identical(&Coordinate::xyz(1.0, 2.0, 0.0)));
    }

    #[test]
    fn tolerance_comparison() {
        let a = Coordinate::xy(0.0, 0.0);
        let b = Coordinate::xy(0.0, 0.1);
        assert!(!a.equals_with_tolerance(&b, 0.0));
        assert!(a.equals_with_tolerance(&b, 0.1));
        assert_abs_diff_eq!(a, b, epsilon = 0.11);
    }

    #[test]
    fn scroll_and_close() {
        let mut seq = CoordinateSequence::from_xy(&[(1.0, 1.0), (0.0, 0.0), (1.0, 0.0)]);
        let min = *seq.min_coordinate().unwrap();
        assert_eq!(min, Coordinate::xy(0.0, 0.0));

        seq.scroll(&min);
        assert_eq!(seq[0], Coordinate::xy(0.0, 0.0));
        assert_eq!(seq[2], Coordinate::xy(1.0, 1.0));

        seq.close_ring();
        assert_eq!(seq.size(), 4);
        assert!(seq.is_ring());

        seq.close_ring();
        assert_eq!(seq.size(), 4);
    }

    #[test]
    fn detect_dimension() {
        let seq = CoordinateSequence::detect(vec![
            Coordinate::xy(0.0, 0.0),
            Coordinate::xyzm(1.0, 1.0, 2.0, 3.0),
        ]);
        assert_eq!(seq.dimension(), 4);
        assert_eq!(CoordinateSequence::from_xy(&[(0.0, 0.0)]).dimension(), 2);
    }

    #[test]
    fn longer_sequence_is_greater() {
        let short = CoordinateSequence::from_xy(&[(0.0, 0.0)]);
        let long = CoordinateSequence::from_xy(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(short.compare_to(&long), Ordering::Less);
        assert_eq!(long.compare_to(&short), Ordering::Greater);
        assert_eq!(long.compare_to(&long.clone()), Ordering::Equal);
    }
}
