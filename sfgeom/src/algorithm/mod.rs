//! Algorithms working on geometries of any kind.

pub mod centroid;
pub mod convex_hull;
pub mod distance;
pub mod interior_point;
pub mod linear_referencing;
pub mod locate;
pub mod orientation;
pub mod segment;

pub use locate::Location;
pub use orientation::Orientation;
pub use segment::Segment;

use crate::coord::{Coordinate, CoordinateSequence};
use crate::error::GeometryError;
use crate::geometry::Geometry;
use crate::line_string::{LineString, LinearRing};
use crate::point::Point;
use crate::polygon::Polygon;
use crate::CircularString;

/// Fails with [`GeometryError::Unsupported`] if the geometry has circular arcs.
pub(crate) fn ensure_linear(geometry: &dyn Geometry, operation: &str) -> Result<(), GeometryError> {
    if geometry.has_curved_components() {
        return Err(GeometryError::Unsupported(format!(
            "{operation} is not supported for geometries with curved components"
        )));
    }

    Ok(())
}

/// Leaf components of a geometry grouped by dimension.
#[derive(Debug, Default)]
pub(crate) struct Components<'a> {
    pub points: Vec<&'a Coordinate>,
    pub lines: Vec<&'a CoordinateSequence>,
    pub polygons: Vec<&'a Polygon>,
}

impl<'a> Components<'a> {
    pub fn extract(geometry: &'a dyn Geometry) -> Self {
        let mut components = Self::default();
        components.visit(geometry);
        components
    }

    fn visit(&mut self, geometry: &'a dyn Geometry) {
        if geometry.is_collection() {
            for i in 0..geometry.num_geometries() {
                self.visit(geometry.geometry_n(i));
            }
            return;
        }

        if geometry.is_empty() {
            return;
        }

        let any = geometry.as_any();
        if let Some(point) = any.downcast_ref::<Point>() {
            self.points.extend(point.coordinate());
        } else if let Some(line) = any.downcast_ref::<LineString>() {
            self.lines.push(line.coordinate_sequence());
        } else if let Some(ring) = any.downcast_ref::<LinearRing>() {
            self.lines.push(ring.coordinate_sequence());
        } else if let Some(curve) = any.downcast_ref::<CircularString>() {
            self.lines.push(curve.coordinate_sequence());
        } else if let Some(polygon) = any.downcast_ref::<Polygon>() {
            self.polygons.push(polygon);
        }
    }

    /// Coordinate sequences of all linear components and polygon rings.
    pub fn segment_sequences(&self) -> impl Iterator<Item = &'a CoordinateSequence> + '_ {
        self.lines.iter().copied().chain(
            self.polygons
                .iter()
                .copied()
                .flat_map(|polygon| polygon.rings().map(|ring| ring.coordinate_sequence())),
        )
    }

    /// One vertex of every component.
    pub fn representative_coordinates(&self) -> Vec<&'a Coordinate> {
        let mut result = self.points.clone();
        result.extend(self.lines.iter().filter_map(|line| line.first()));
        result.extend(
            self.polygons
                .iter()
                .filter_map(|polygon| polygon.exterior_ring().coordinate_sequence().first()),
        );
        result
    }

    /// True if the coordinate lies on any of the components.
    pub fn intersects_coordinate(&self, c: &Coordinate) -> bool {
        self.points.iter().any(|p| p.equals_2d(c))
            || self
                .lines
                .iter()
                .any(|line| locate::is_on_line(c, line.as_slice()))
            || locate::locate_in_polygons(c, self.polygons.iter().copied()) != Location::Exterior
    }
}
