//! Visitors applied to geometries.
//!
//! Geometries dispatch filters in a fixed order: collections visit themselves first and then
//! their members in the stored order; polygons visit themselves, then the shell, then the holes.
//! Component and coordinate-sequence filters can stop the traversal early with `is_done`, which is
//! checked after each member. A traversal that was stopped early leaves the already visited part
//! modified.
//!
//! Every mutable traversal refreshes the cached envelope and flags of the visited geometries when
//! it completes, so callers never need to signal the change themselves.

use crate::coord::{Coordinate, CoordinateSequence};
use crate::geometry::Geometry;

/// Inspects coordinates.
pub trait CoordinateFilter {
    /// Called for every coordinate of the geometry.
    fn filter(&mut self, coord: &Coordinate);
}

/// Modifies coordinates in place.
pub trait CoordinateFilterMut {
    /// Called for every coordinate of the geometry.
    fn filter(&mut self, coord: &mut Coordinate);
}

impl<F: FnMut(&Coordinate)> CoordinateFilter for F {
    fn filter(&mut self, coord: &Coordinate) {
        self(coord)
    }
}

impl<F: FnMut(&mut Coordinate)> CoordinateFilterMut for F {
    fn filter(&mut self, coord: &mut Coordinate) {
        self(coord)
    }
}

/// Visits whole geometries: the geometry itself and every member of a collection.
pub trait GeometryFilter {
    /// Called for every visited geometry.
    fn filter(&mut self, geometry: &dyn Geometry);
}

/// Mutable version of [`GeometryFilter`].
pub trait GeometryFilterMut {
    /// Called for every visited geometry.
    fn filter(&mut self, geometry: &mut dyn Geometry);
}

impl<F: FnMut(&dyn Geometry)> GeometryFilter for F {
    fn filter(&mut self, geometry: &dyn Geometry) {
        self(geometry)
    }
}

impl<F: FnMut(&mut dyn Geometry)> GeometryFilterMut for F {
    fn filter(&mut self, geometry: &mut dyn Geometry) {
        self(geometry)
    }
}

/// Visits every component of a geometry, including the rings of polygons.
pub trait GeometryComponentFilter {
    /// Called for every component.
    fn filter(&mut self, component: &dyn Geometry);

    /// Returning `true` stops the traversal.
    fn is_done(&self) -> bool {
        false
    }
}

/// Mutable version of [`GeometryComponentFilter`].
pub trait GeometryComponentFilterMut {
    /// Called for every component.
    fn filter(&mut self, component: &mut dyn Geometry);

    /// Returning `true` stops the traversal.
    fn is_done(&self) -> bool {
        false
    }
}

/// Visits the coordinate sequences of every component, one coordinate index at a time.
pub trait CoordinateSequenceFilter {
    /// Called in read-only traversals for every index of every sequence.
    fn filter_ro(&mut self, _sequence: &CoordinateSequence, _index: usize) {}

    /// Called in mutable traversals for every index of every sequence.
    fn filter_rw(&mut self, _sequence: &mut CoordinateSequence, _index: usize) {}

    /// Returning `true` stops the traversal.
    fn is_done(&self) -> bool;

    /// Whether the filter has modified any coordinates. Read-only filters must always return
    /// `false`.
    fn is_geometry_changed(&self) -> bool;
}
