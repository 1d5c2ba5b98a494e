//! Conversion between the geometry model of this crate and the [`geo_types`] model used by the
//! `geo` algorithms.
//!
//! `geo_types` has 2d coordinates only, so `z` and `m` ordinates are lost when converting. Empty
//! components of collections are skipped because they do not contribute any points.

use std::sync::Arc;

use geo_types::{Coord, LineString as GeoLineString, Polygon as GeoPolygon};

use crate::collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
use crate::coord::{Coordinate, CoordinateSequence};
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geometry::{Geom, Geometry};
use crate::line_string::{LineString, LinearRing};
use crate::point::Point;
use crate::polygon::Polygon;
use crate::CircularString;

fn to_geo_coord(c: &Coordinate) -> Coord<f64> {
    Coord { x: c.x, y: c.y }
}

fn to_geo_line(points: &CoordinateSequence) -> GeoLineString<f64> {
    GeoLineString(points.iter().map(to_geo_coord).collect())
}

fn to_geo_polygon(polygon: &Polygon) -> GeoPolygon<f64> {
    GeoPolygon::new(
        to_geo_line(polygon.exterior_ring().coordinate_sequence()),
        polygon
            .interior_rings()
            .iter()
            .filter(|hole| !hole.is_empty())
            .map(|hole| to_geo_line(hole.coordinate_sequence()))
            .collect(),
    )
}

/// Converts a geometry into a [`geo_types::Geometry`].
///
/// An empty point has no `geo_types` counterpart and becomes an empty multipoint. Linear rings
/// become linestrings. Fails with [`GeometryError::Unsupported`] for geometries with circular
/// arcs.
pub fn to_geo(geometry: &dyn Geometry) -> Result<geo_types::Geometry<f64>, GeometryError> {
    let any = geometry.as_any();

    let converted = if let Some(point) = any.downcast_ref::<Point>() {
        match point.coordinate() {
            Some(c) => geo_types::Geometry::Point(geo_types::Point(to_geo_coord(c))),
            None => geo_types::Geometry::MultiPoint(geo_types::MultiPoint(vec![])),
        }
    } else if let Some(line) = any.downcast_ref::<LineString>() {
        geo_types::Geometry::LineString(to_geo_line(line.coordinate_sequence()))
    } else if let Some(ring) = any.downcast_ref::<LinearRing>() {
        geo_types::Geometry::LineString(to_geo_line(ring.coordinate_sequence()))
    } else if let Some(polygon) = any.downcast_ref::<Polygon>() {
        geo_types::Geometry::Polygon(to_geo_polygon(polygon))
    } else if let Some(multi_point) = any.downcast_ref::<MultiPoint>() {
        geo_types::Geometry::MultiPoint(geo_types::MultiPoint(
            multi_point
                .iter()
                .filter_map(|point| point.coordinate())
                .map(|c| geo_types::Point(to_geo_coord(c)))
                .collect(),
        ))
    } else if let Some(multi_line) = any.downcast_ref::<MultiLineString>() {
        geo_types::Geometry::MultiLineString(geo_types::MultiLineString(
            multi_line
                .iter()
                .filter(|line| !line.is_empty())
                .map(|line| to_geo_line(line.coordinate_sequence()))
                .collect(),
        ))
    } else if let Some(multi_polygon) = any.downcast_ref::<MultiPolygon>() {
        geo_types::Geometry::MultiPolygon(to_geo_multi_polygon(multi_polygon))
    } else if let Some(collection) = any.downcast_ref::<GeometryCollection>() {
        let members = collection
            .iter()
            .filter(|member| !member.is_empty())
            .map(|member| to_geo(&**member))
            .collect::<Result<Vec<_>, _>>()?;
        geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(members))
    } else if any.is::<CircularString>() {
        return Err(GeometryError::Unsupported(
            "circular arcs cannot be converted to geo-types".into(),
        ));
    } else {
        return Err(GeometryError::Unsupported(format!(
            "conversion of {} to geo-types",
            geometry.geometry_type()
        )));
    };

    Ok(converted)
}

/// Converts a multipolygon into a [`geo_types::MultiPolygon`], skipping empty members.
pub fn to_geo_multi_polygon(multi_polygon: &MultiPolygon) -> geo_types::MultiPolygon<f64> {
    geo_types::MultiPolygon(
        multi_polygon
            .iter()
            .filter(|polygon| !polygon.is_empty())
            .map(to_geo_polygon)
            .collect(),
    )
}

impl GeometryFactory {
    fn from_geo_coords<'a>(&self, coords: impl IntoIterator<Item = &'a Coord<f64>>) -> CoordinateSequence {
        let precision = self.precision_model();
        let mut sequence = CoordinateSequence::xy(
            coords
                .into_iter()
                .map(|c| Coordinate::xy(precision.make_precise(c.x), precision.make_precise(c.y)))
                .collect(),
        );
        if !precision.is_floating() {
            sequence.remove_repeated();
        }
        sequence
    }

    fn from_geo_line(
        self: &Arc<Self>,
        line: &GeoLineString<f64>,
    ) -> Result<LineString, GeometryError> {
        let points = self.from_geo_coords(&line.0);
        if points.size() == 1 {
            // collapsed to a single point by rounding
            return Ok(self.create_empty_line_string());
        }
        self.create_line_string(points)
    }

    fn from_geo_ring(self: &Arc<Self>, ring: &GeoLineString<f64>) -> Result<LinearRing, GeometryError> {
        let mut points = self.from_geo_coords(&ring.0);
        if points.is_empty() {
            return Ok(self.create_empty_linear_ring());
        }

        points.close_ring();
        if points.size() < 4 {
            return Ok(self.create_empty_linear_ring());
        }
        self.create_linear_ring(points)
    }

    pub(crate) fn from_geo_polygon(
        self: &Arc<Self>,
        polygon: &GeoPolygon<f64>,
    ) -> Result<Polygon, GeometryError> {
        let shell = self.from_geo_ring(polygon.exterior())?;
        if shell.is_empty() {
            return Ok(self.create_empty_polygon());
        }

        let holes = polygon
            .interiors()
            .iter()
            .map(|hole| self.from_geo_ring(hole))
            .filter(|hole| !matches!(hole, Ok(hole) if hole.is_empty()))
            .collect::<Result<Vec<_>, _>>()?;
        self.create_polygon(shell, holes)
    }

    /// Converts a [`geo_types::Geometry`] into a geometry of this factory.
    ///
    /// Coordinates are rounded with the precision model of the factory. Lines and rings that
    /// collapse because of rounding become empty. `Line`, `Rect` and `Triangle` are converted to
    /// a linestring and polygons respectively.
    pub fn from_geo(self: &Arc<Self>, geometry: &geo_types::Geometry<f64>) -> Result<Geom, GeometryError> {
        use geo_types::Geometry as G;

        let converted: Geom = match geometry {
            G::Point(point) => {
                let c = self.from_geo_coords([&point.0]);
                self.create_point_from_sequence(c)?.into()
            }
            G::Line(line) => self
                .from_geo_line(&GeoLineString(vec![line.start, line.end]))?
                .into(),
            G::LineString(line) => self.from_geo_line(line)?.into(),
            G::Polygon(polygon) => self.from_geo_polygon(polygon)?.into(),
            G::MultiPoint(multi_point) => self
                .create_multi_point(
                    multi_point
                        .iter()
                        .map(|point| self.create_point_from_sequence(self.from_geo_coords([&point.0])))
                        .collect::<Result<Vec<_>, _>>()?,
                )
                .into(),
            G::MultiLineString(multi_line) => self
                .create_multi_line_string(
                    multi_line
                        .iter()
                        .map(|line| self.from_geo_line(line))
                        .collect::<Result<Vec<_>, _>>()?,
                )
                .into(),
            G::MultiPolygon(multi_polygon) => self
                .create_multi_polygon(
                    multi_polygon
                        .iter()
                        .map(|polygon| self.from_geo_polygon(polygon))
                        .collect::<Result<Vec<_>, _>>()?,
                )
                .into(),
            G::GeometryCollection(collection) => self
                .create_geometry_collection(
                    collection
                        .iter()
                        .map(|member| self.from_geo(member))
                        .collect::<Result<Vec<_>, _>>()?,
                )
                .into(),
            G::Rect(rect) => self.from_geo_polygon(&rect.to_polygon())?.into(),
            G::Triangle(triangle) => self.from_geo_polygon(&triangle.to_polygon())?.into(),
        };

        Ok(converted)
    }
}
