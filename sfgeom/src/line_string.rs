use std::any::Any;
use std::cmp::Ordering;
use std::ops::Deref;
use std::sync::Arc;

use crate::coord::{Coordinate, CoordinateSequence};
use crate::curve::{normalize_ring, SimpleCurve};
use crate::dimension::Dimension;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::filter::{CoordinateFilter, CoordinateFilterMut, CoordinateSequenceFilter};
use crate::geometry::{Geom, Geometry, GeometryBase};
use crate::geometry_type::GeometryTypeId;

/// A curve built of straight segments between consecutive points.
#[derive(Debug, Clone)]
pub struct LineString {
    curve: SimpleCurve,
}

impl LineString {
    pub(crate) fn new(points: CoordinateSequence, factory: &Arc<GeometryFactory>) -> Self {
        Self {
            curve: SimpleCurve::new(points, factory),
        }
    }

    /// The points of the linestring.
    pub fn coordinate_sequence(&self) -> &CoordinateSequence {
        &self.curve.points
    }

    /// Gives in-place access to the points. The number of points cannot change through the
    /// returned guard. The envelope and the ordinate flags are refreshed when it is dropped.
    pub fn coordinates_mut(&mut self) -> CoordinatesMut<'_> {
        CoordinatesMut {
            curve: &mut self.curve,
        }
    }

    /// First point, `None` if empty.
    pub fn start_point(&self) -> Option<&Coordinate> {
        self.curve.start_point()
    }

    /// Last point, `None` if empty.
    pub fn end_point(&self) -> Option<&Coordinate> {
        self.curve.end_point()
    }

    /// True if the linestring is not empty and its first and last points are equal.
    pub fn is_closed(&self) -> bool {
        self.curve.is_closed()
    }

    /// True if the linestring is closed and has enough points to form a ring.
    pub fn is_ring(&self) -> bool {
        self.curve.points.is_ring()
    }

    pub(crate) fn reversed(&self) -> Self {
        Self {
            curve: self.curve.with_points(self.curve.points.reversed()),
        }
    }
}

impl Geometry for LineString {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_geometry(&self) -> &dyn Geometry {
        self
    }

    fn as_geometry_mut(&mut self) -> &mut dyn Geometry {
        self
    }

    fn base(&self) -> &GeometryBase {
        &self.curve.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.curve.base
    }

    fn clone_geom(&self) -> Geom {
        Geom::LineString(self.clone())
    }

    fn reverse(&self) -> Geom {
        Geom::LineString(self.reversed())
    }

    fn geometry_type_id(&self) -> GeometryTypeId {
        GeometryTypeId::LineString
    }

    fn coordinate(&self) -> Option<&Coordinate> {
        self.curve.start_point()
    }

    fn coordinates(&self) -> CoordinateSequence {
        self.curve.points.clone()
    }

    fn num_points(&self) -> usize {
        self.curve.points.size()
    }

    fn is_empty(&self) -> bool {
        self.curve.points.is_empty()
    }

    fn dimension(&self) -> Dimension {
        Dimension::L
    }

    fn coordinate_dimension(&self) -> u8 {
        self.curve.coordinate_dimension()
    }

    fn has_z(&self) -> bool {
        self.curve.points.has_z()
    }

    fn has_m(&self) -> bool {
        self.curve.points.has_m()
    }

    fn boundary(&self) -> Result<Geom, GeometryError> {
        Ok(self.curve.boundary().into())
    }

    fn boundary_dimension(&self) -> Dimension {
        if self.is_closed() {
            Dimension::False
        } else {
            Dimension::P
        }
    }

    fn envelope_internal(&self) -> &Envelope {
        &self.curve.envelope
    }

    fn equals_exact(&self, other: &dyn Geometry, tolerance: f64) -> bool {
        other
            .as_any()
            .downcast_ref::<LineString>()
            .is_some_and(|other| self.curve.equals_exact(&other.curve, tolerance))
    }

    fn equals_identical(&self, other: &dyn Geometry) -> bool {
        other
            .as_any()
            .downcast_ref::<LineString>()
            .is_some_and(|other| self.curve.equals_identical(&other.curve))
    }

    fn apply_coordinate_filter(&self, filter: &mut dyn CoordinateFilter) {
        self.curve.apply_coordinate_filter(filter);
    }

    fn apply_coordinate_filter_mut(&mut self, filter: &mut dyn CoordinateFilterMut) {
        self.curve.apply_coordinate_filter_mut(filter);
        self.geometry_changed();
    }

    fn apply_sequence_filter(&self, filter: &mut dyn CoordinateSequenceFilter) {
        self.curve.apply_sequence_filter(filter);
    }

    fn apply_sequence_filter_mut(&mut self, filter: &mut dyn CoordinateSequenceFilter) {
        if self.curve.apply_sequence_filter_mut(filter) {
            self.geometry_changed();
        }
    }

    fn normalize(&mut self) {
        if self.is_closed() {
            normalize_ring(&mut self.curve.points, true);
        } else {
            self.curve.normalize_direction();
        }
    }

    fn compare_to_same_class(&self, other: &dyn Geometry) -> Ordering {
        debug_assert_eq!(self.sort_index(), other.sort_index());
        let Some(other) = other.as_any().downcast_ref::<LineString>() else {
            return self.sort_index().cmp(&other.sort_index());
        };
        self.curve.compare(&other.curve)
    }

    fn length(&self) -> f64 {
        self.curve.linear_length()
    }

    fn geometry_changed_action(&mut self) {
        self.curve.refresh();
    }
}

/// A closed linestring used as a polygon ring.
#[derive(Debug, Clone)]
pub struct LinearRing {
    curve: SimpleCurve,
}

impl LinearRing {
    pub(crate) fn new(points: CoordinateSequence, factory: &Arc<GeometryFactory>) -> Self {
        Self {
            curve: SimpleCurve::new(points, factory),
        }
    }

    /// The points of the ring. The last point repeats the first one.
    pub fn coordinate_sequence(&self) -> &CoordinateSequence {
        &self.curve.points
    }

    /// Signed area of the ring: positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        crate::algorithm::orientation::signed_area(self.curve.points.as_slice())
    }

    /// True if the ring goes counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        crate::algorithm::orientation::is_ccw(self.curve.points.as_slice())
    }

    /// Converts the ring to a linestring with the same points.
    pub fn to_line_string(&self) -> LineString {
        LineString {
            curve: self.curve.clone(),
        }
    }

    pub(crate) fn reversed(&self) -> Self {
        Self {
            curve: self.curve.with_points(self.curve.points.reversed()),
        }
    }

    pub(crate) fn normalize_oriented(&mut self, clockwise: bool) {
        normalize_ring(&mut self.curve.points, clockwise);
    }
}

impl Geometry for LinearRing {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_geometry(&self) -> &dyn Geometry {
        self
    }

    fn as_geometry_mut(&mut self) -> &mut dyn Geometry {
        self
    }

    fn base(&self) -> &GeometryBase {
        &self.curve.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.curve.base
    }

    fn clone_geom(&self) -> Geom {
        Geom::LinearRing(self.clone())
    }

    fn reverse(&self) -> Geom {
        Geom::LinearRing(self.reversed())
    }

    fn geometry_type_id(&self) -> GeometryTypeId {
        GeometryTypeId::LinearRing
    }

    fn coordinate(&self) -> Option<&Coordinate> {
        self.curve.start_point()
    }

    fn coordinates(&self) -> CoordinateSequence {
        self.curve.points.clone()
    }

    fn num_points(&self) -> usize {
        self.curve.points.size()
    }

    fn is_empty(&self) -> bool {
        self.curve.points.is_empty()
    }

    fn dimension(&self) -> Dimension {
        Dimension::L
    }

    fn coordinate_dimension(&self) -> u8 {
        self.curve.coordinate_dimension()
    }

    fn has_z(&self) -> bool {
        self.curve.points.has_z()
    }

    fn has_m(&self) -> bool {
        self.curve.points.has_m()
    }

    fn boundary(&self) -> Result<Geom, GeometryError> {
        Ok(self.curve.boundary().into())
    }

    fn boundary_dimension(&self) -> Dimension {
        Dimension::False
    }

    fn envelope_internal(&self) -> &Envelope {
        &self.curve.envelope
    }

    fn equals_exact(&self, other: &dyn Geometry, tolerance: f64) -> bool {
        other
            .as_any()
            .downcast_ref::<LinearRing>()
            .is_some_and(|other| self.curve.equals_exact(&other.curve, tolerance))
    }

    fn equals_identical(&self, other: &dyn Geometry) -> bool {
        other
            .as_any()
            .downcast_ref::<LinearRing>()
            .is_some_and(|other| self.curve.equals_identical(&other.curve))
    }

    fn apply_coordinate_filter(&self, filter: &mut dyn CoordinateFilter) {
        self.curve.apply_coordinate_filter(filter);
    }

    fn apply_coordinate_filter_mut(&mut self, filter: &mut dyn CoordinateFilterMut) {
        self.curve.apply_coordinate_filter_mut(filter);
        self.geometry_changed();
    }

    fn apply_sequence_filter(&self, filter: &mut dyn CoordinateSequenceFilter) {
        self.curve.apply_sequence_filter(filter);
    }

    fn apply_sequence_filter_mut(&mut self, filter: &mut dyn CoordinateSequenceFilter) {
        if self.curve.apply_sequence_filter_mut(filter) {
            self.geometry_changed();
        }
    }

    fn normalize(&mut self) {
        self.normalize_oriented(true);
    }

    fn compare_to_same_class(&self, other: &dyn Geometry) -> Ordering {
        debug_assert_eq!(self.sort_index(), other.sort_index());
        let Some(other) = other.as_any().downcast_ref::<LinearRing>() else {
            return self.sort_index().cmp(&other.sort_index());
        };
        self.curve.compare(&other.curve)
    }

    fn length(&self) -> f64 {
        self.curve.linear_length()
    }

    fn geometry_changed_action(&mut self) {
        self.curve.refresh();
    }
}

/// In-place view of the points of a linestring. Dropping it refreshes the envelope and the
/// ordinate flags.
pub struct CoordinatesMut<'a> {
    curve: &'a mut SimpleCurve,
}

impl CoordinatesMut<'_> {
    /// Mutable access to the point at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Coordinate> {
        self.curve.points.get_mut(index)
    }

    /// Iterates mutably over the points.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Coordinate> {
        self.curve.points.iter_mut()
    }
}

impl Deref for CoordinatesMut<'_> {
    type Target = CoordinateSequence;

    fn deref(&self) -> &Self::Target {
        &self.curve.points
    }
}

impl Drop for CoordinatesMut<'_> {
    fn drop(&mut self) {
        self.curve.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line(pairs: &[(f64, f64)]) -> LineString {
        GeometryFactory::new()
            .create_line_string(CoordinateSequence::from_xy(pairs))
            .expect("valid line")
    }

    #[test]
    fn length_and_boundary() {
        let line = line(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
        assert_abs_diff_eq!(line.length(), 11.0);
        assert_eq!(line.boundary_dimension(), Dimension::P);

        let boundary = line.boundary().expect("line boundary");
        assert_eq!(boundary.geometry_type_id(), GeometryTypeId::MultiPoint);
        assert_eq!(boundary.num_points(), 2);
    }

    #[test]
    fn closed_line_has_empty_boundary() {
        let line = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(line.is_closed());
        assert!(line.is_ring());
        assert!(line.boundary().expect("line boundary").is_empty());
        assert_eq!(line.boundary_dimension(), Dimension::False);
    }

    #[test]
    fn reverse_twice() {
        let line = line(&[(0.0, 0.0), (1.0, 2.0), (3.0, 3.0)]);
        let reversed = line.reverse();
        assert_eq!(reversed.coordinate(), Some(&Coordinate::xy(3.0, 3.0)));
        assert!(reversed.reverse().equals_exact(&line, 0.0));
    }

    #[test]
    fn normalize_open_line() {
        let mut line = line(&[(5.0, 5.0), (1.0, 2.0), (0.0, 0.0)]);
        line.normalize();
        assert_eq!(line.coordinate(), Some(&Coordinate::xy(0.0, 0.0)));
    }

    #[test]
    fn coordinates_mut_refreshes_envelope() {
        let mut line = line(&[(0.0, 0.0), (1.0, 1.0)]);
        if let Some(c) = line.coordinates_mut().get_mut(1) {
            *c = Coordinate::xy(5.0, -1.0);
        }
        assert_eq!(*line.envelope_internal(), Envelope::new(0.0, -1.0, 5.0, 0.0));
        assert_eq!(line.num_points(), 2);
    }

    #[test]
    fn coordinates_mut_keeps_point_count() {
        let mut line = line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        {
            let mut points = line.coordinates_mut();
            for c in points.iter_mut() {
                c.y += 1.0;
            }
            assert_eq!(points.size(), 3);
        }
        assert_eq!(line.num_points(), 3);
        assert_eq!(*line.envelope_internal(), Envelope::new(0.0, 1.0, 2.0, 2.0));

        let mut empty = GeometryFactory::new().create_empty_line_string();
        assert_eq!(empty.coordinates_mut().get_mut(0), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn coordinates_mut_raises_ordinate_flags() {
        let mut line = line(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(!line.has_z());
        assert_eq!(line.coordinate_dimension(), 2);

        if let Some(c) = line.coordinates_mut().get_mut(0) {
            c.z = 7.0;
        }
        assert!(line.has_z());
        assert!(!line.has_m());
        assert_eq!(line.coordinate_dimension(), 3);
    }

    #[test]
    fn ring_orientation() {
        let factory = GeometryFactory::new();
        let ring = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 1.0),
                (0.0, 0.0),
            ]))
            .expect("valid ring");
        assert!(ring.is_ccw());
        assert_abs_diff_eq!(ring.signed_area(), 1.0);
        assert_eq!(ring.area(), 0.0);
        assert_abs_diff_eq!(ring.length(), 4.0);

        let mut normalized = ring.clone();
        normalized.normalize();
        assert!(!normalized.is_ccw());
    }
}
