//! Single points.

use std::any::Any;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::coord::{Coordinate, CoordinateSequence};
use crate::dimension::Dimension;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::filter::{CoordinateFilter, CoordinateFilterMut, CoordinateSequenceFilter};
use crate::geometry::{Geom, Geometry, GeometryBase};
use crate::geometry_type::GeometryTypeId;

/// A single position, or nothing if the point is empty.
#[derive(Debug, Clone)]
pub struct Point {
    base: GeometryBase,
    coordinates: CoordinateSequence,
    envelope: Envelope,
}

impl Point {
    pub(crate) fn new(coordinates: CoordinateSequence, factory: &Arc<GeometryFactory>) -> Self {
        let envelope = coordinates.envelope();
        Self {
            base: GeometryBase::new(factory),
            coordinates,
            envelope,
        }
    }

    /// X ordinate, `None` for an empty point.
    pub fn x(&self) -> Option<f64> {
        self.coordinates.first().map(|c| c.x)
    }

    /// Y ordinate, `None` for an empty point.
    pub fn y(&self) -> Option<f64> {
        self.coordinates.first().map(|c| c.y)
    }

    /// Z ordinate, `None` for an empty point or a point without elevation.
    pub fn z(&self) -> Option<f64> {
        self.coordinates
            .first()
            .map(|c| c.z)
            .filter(|z| !z.is_nan())
    }

    /// M ordinate, `None` for an empty point or a point without a measure.
    pub fn m(&self) -> Option<f64> {
        self.coordinates
            .first()
            .map(|c| c.m)
            .filter(|m| !m.is_nan())
    }

    /// The coordinate sequence of the point (0 or 1 elements).
    pub fn coordinate_sequence(&self) -> &CoordinateSequence {
        &self.coordinates
    }

    /// Moves the point to the given position. An empty point becomes non-empty.
    pub fn set_coordinate(&mut self, coord: Coordinate) {
        let has_z = self.coordinates.has_z() || !coord.z.is_nan();
        let has_m = self.coordinates.has_m() || !coord.m.is_nan();
        self.coordinates = CoordinateSequence::new(vec![coord], has_z, has_m);
        self.geometry_changed();
    }
}

impl Geometry for Point {
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
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    fn clone_geom(&self) -> Geom {
        Geom::Point(self.clone())
    }

    fn reverse(&self) -> Geom {
        self.clone_geom()
    }

    fn geometry_type_id(&self) -> GeometryTypeId {
        GeometryTypeId::Point
    }

    fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinates.first()
    }

    fn coordinates(&self) -> CoordinateSequence {
        self.coordinates.clone()
    }

    fn num_points(&self) -> usize {
        self.coordinates.size()
    }

    fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    fn dimension(&self) -> Dimension {
        Dimension::P
    }

    fn coordinate_dimension(&self) -> u8 {
        self.coordinates.dimension()
    }

    fn has_z(&self) -> bool {
        self.coordinates.has_z()
    }

    fn has_m(&self) -> bool {
        self.coordinates.has_m()
    }

    fn boundary(&self) -> Result<Geom, GeometryError> {
        Ok(self.factory().create_geometry_collection(vec![]).into())
    }

    fn boundary_dimension(&self) -> Dimension {
        Dimension::False
    }

    fn envelope_internal(&self) -> &Envelope {
        &self.envelope
    }

    fn equals_exact(&self, other: &dyn Geometry, tolerance: f64) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Point>() else {
            return false;
        };

        self.coordinates.equals_exact(&other.coordinates, tolerance)
    }

    fn equals_identical(&self, other: &dyn Geometry) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Point>() else {
            return false;
        };

        self.envelope == other.envelope && self.coordinates.equals_identical(&other.coordinates)
    }

    fn apply_coordinate_filter(&self, filter: &mut dyn CoordinateFilter) {
        for coord in &self.coordinates {
            filter.filter(coord);
        }
    }

    fn apply_coordinate_filter_mut(&mut self, filter: &mut dyn CoordinateFilterMut) {
        for coord in self.coordinates.iter_mut() {
            filter.filter(coord);
        }
        self.geometry_changed();
    }

    fn apply_sequence_filter(&self, filter: &mut dyn CoordinateSequenceFilter) {
        if self.is_empty() {
            return;
        }

        filter.filter_ro(&self.coordinates, 0);
        debug_assert!(
            !filter.is_geometry_changed(),
            "read-only coordinate sequence filter reported a change"
        );
    }

    fn apply_sequence_filter_mut(&mut self, filter: &mut dyn CoordinateSequenceFilter) {
        if self.is_empty() {
            return;
        }

        filter.filter_rw(&mut self.coordinates, 0);
        if filter.is_geometry_changed() {
            self.geometry_changed();
        }
    }

    fn normalize(&mut self) {}

    fn compare_to_same_class(&self, other: &dyn Geometry) -> Ordering {
        debug_assert_eq!(self.sort_index(), other.sort_index());
        let Some(other) = other.as_any().downcast_ref::<Point>() else {
            return self.sort_index().cmp(&other.sort_index());
        };
        self.coordinates.compare_to(&other.coordinates)
    }

    fn geometry_changed_action(&mut self) {
        self.coordinates.refresh_ordinates();
        self.envelope = self.coordinates.envelope();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_point() {
        let factory = GeometryFactory::new();
        let point = factory.create_empty_point();
        assert!(point.is_empty());
        assert_eq!(point.x(), None);
        assert_eq!(point.num_points(), 0);
        assert!(point.envelope_internal().is_null());
        assert_eq!(point.coordinate_dimension(), 2);
    }

    #[test]
    fn boundary_is_empty_collection() {
        let factory = GeometryFactory::new();
        let point = factory.create_point(Coordinate::xy(1.0, 2.0));
        let boundary = point.boundary().expect("point boundary");
        assert!(boundary.is_empty());
        assert_eq!(boundary.geometry_type_id(), GeometryTypeId::GeometryCollection);
        assert_eq!(point.boundary_dimension(), Dimension::False);
    }

    #[test]
    fn ordinates() {
        let factory = GeometryFactory::new();
        let point = factory.create_point(Coordinate::xyz(1.0, 2.0, 3.0));
        assert_eq!(point.x(), Some(1.0));
        assert_eq!(point.y(), Some(2.0));
        assert_eq!(point.z(), Some(3.0));
        assert_eq!(point.m(), None);
        assert!(point.has_z());
        assert_eq!(point.coordinate_dimension(), 3);
    }

    #[test]
    fn set_coordinate_refreshes_envelope() {
        let factory = GeometryFactory::new();
        let mut point = factory.create_empty_point();
        point.set_coordinate(Coordinate::xy(3.0, 4.0));
        assert_eq!(
            *point.envelope_internal(),
            Envelope::new(3.0, 4.0, 3.0, 4.0)
        );
    }

    #[test]
    fn filter_moves_point() {
        let factory = GeometryFactory::new();
        let mut point = factory.create_point(Coordinate::xy(1.0, 1.0));
        point.apply_coordinate_filter_mut(&mut |c: &mut Coordinate| c.x += 10.0);
        assert_eq!(point.x(), Some(11.0));
        assert_eq!(point.envelope_internal().x_min(), 11.0);
    }
}
