//! Construction of geometries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
use crate::coord::{Coordinate, CoordinateSequence};
use crate::dimension::Dimension;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::geometry::{Geom, Geometry};
use crate::geometry_type::GeometryTypeId;
use crate::line_string::{LineString, LinearRing};
use crate::point::Point;
use crate::polygon::Polygon;
use crate::precision::PrecisionModel;
use crate::CircularString;

/// Creates geometries and holds the settings shared by them.
///
/// A factory is always used through an `Arc`: every geometry keeps a reference to the factory
/// that created it. The factory is immutable, so it can be shared between threads freely.
///
/// ```
/// use sfgeom::{Coordinate, Geometry, GeometryFactoryBuilder};
///
/// let factory = GeometryFactoryBuilder::default().with_srid(3857).build();
/// let point = factory.create_point(Coordinate::xy(1.0, 2.0));
///
/// assert_eq!(point.srid(), 3857);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryFactory {
    srid: i32,
    precision_model: PrecisionModel,
}

impl GeometryFactory {
    /// Creates a factory with SRID 0 and floating precision.
    pub fn new() -> Arc<Self> {
        GeometryFactoryBuilder::default().build()
    }

    /// SRID assigned to created geometries.
    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Precision model of the geometries.
    pub fn precision_model(&self) -> &PrecisionModel {
        &self.precision_model
    }

    /// Creates a point.
    pub fn create_point(self: &Arc<Self>, coord: Coordinate) -> Point {
        let has_z = !coord.z.is_nan();
        let has_m = !coord.m.is_nan();
        log::trace!("Creating point {coord:?}");
        Point::new(CoordinateSequence::new(vec![coord], has_z, has_m), self)
    }

    /// Creates a point from a sequence of at most one coordinate.
    pub fn create_point_from_sequence(
        self: &Arc<Self>,
        coordinates: CoordinateSequence,
    ) -> Result<Point, GeometryError> {
        if coordinates.size() > 1 {
            return Err(GeometryError::invalid_argument(
                "Point coordinate list must contain a single element",
            ));
        }

        Ok(Point::new(coordinates, self))
    }

    /// Creates an empty point.
    pub fn create_empty_point(self: &Arc<Self>) -> Point {
        Point::new(CoordinateSequence::empty(false, false), self)
    }

    /// Creates a linestring. The sequence must have 0 or at least 2 points.
    pub fn create_line_string(
        self: &Arc<Self>,
        coordinates: impl Into<CoordinateSequence>,
    ) -> Result<LineString, GeometryError> {
        let coordinates = coordinates.into();
        if coordinates.size() == 1 {
            return Err(GeometryError::invalid_argument(
                "point array must contain 0 or >1 elements",
            ));
        }

        log::trace!("Creating linestring with {} points", coordinates.size());
        Ok(LineString::new(coordinates, self))
    }

    /// Creates an empty linestring.
    pub fn create_empty_line_string(self: &Arc<Self>) -> LineString {
        LineString::new(CoordinateSequence::empty(false, false), self)
    }

    /// Creates a linear ring. The sequence must be empty or closed with at least 4 points.
    pub fn create_linear_ring(
        self: &Arc<Self>,
        coordinates: impl Into<CoordinateSequence>,
    ) -> Result<LinearRing, GeometryError> {
        let coordinates = coordinates.into();
        if !coordinates.is_empty() {
            if !coordinates.is_closed() {
                return Err(GeometryError::invalid_argument(
                    "Points of LinearRing do not form a closed linestring",
                ));
            }

            if coordinates.size() < 4 {
                return Err(GeometryError::InvalidArgument(format!(
                    "Invalid number of points in LinearRing found {} - must be 0 or >= 4",
                    coordinates.size()
                )));
            }
        }

        log::trace!("Creating linear ring with {} points", coordinates.size());
        Ok(LinearRing::new(coordinates, self))
    }

    /// Creates an empty linear ring.
    pub fn create_empty_linear_ring(self: &Arc<Self>) -> LinearRing {
        LinearRing::new(CoordinateSequence::empty(false, false), self)
    }

    /// Creates a polygon. A polygon with an empty shell cannot have non-empty holes.
    pub fn create_polygon(
        self: &Arc<Self>,
        shell: LinearRing,
        holes: Vec<LinearRing>,
    ) -> Result<Polygon, GeometryError> {
        if shell.is_empty() && holes.iter().any(|hole| !hole.is_empty()) {
            return Err(GeometryError::invalid_argument(
                "shell is empty but holes are not",
            ));
        }

        log::trace!("Creating polygon with {} holes", holes.len());
        Ok(Polygon::new(shell, holes, self))
    }

    /// Creates an empty polygon.
    pub fn create_empty_polygon(self: &Arc<Self>) -> Polygon {
        Polygon::new(self.create_empty_linear_ring(), vec![], self)
    }

    /// Creates a circular string. The sequence must have 0 or an odd number (at least 3) of
    /// points: every consecutive triple of points starting at an even index defines an arc.
    pub fn create_circular_string(
        self: &Arc<Self>,
        coordinates: impl Into<CoordinateSequence>,
    ) -> Result<CircularString, GeometryError> {
        let coordinates = coordinates.into();
        let size = coordinates.size();
        if size != 0 && (size < 3 || size % 2 == 0) {
            return Err(GeometryError::InvalidArgument(format!(
                "Invalid number of points in CircularString found {size} - must be 0 or >= 3 and odd"
            )));
        }

        Ok(CircularString::new(coordinates, self))
    }

    /// Creates a multipoint.
    pub fn create_multi_point(self: &Arc<Self>, points: Vec<Point>) -> MultiPoint {
        GeometryCollection::new(points, self)
    }

    /// Creates a multipoint with a point at every coordinate of the sequence.
    pub fn create_multi_point_from_coords(
        self: &Arc<Self>,
        coordinates: &CoordinateSequence,
    ) -> MultiPoint {
        let points = coordinates
            .iter()
            .map(|c| {
                Point::new(
                    CoordinateSequence::new(vec![*c], coordinates.has_z(), coordinates.has_m()),
                    self,
                )
            })
            .collect();
        self.create_multi_point(points)
    }

    /// Creates a multilinestring.
    pub fn create_multi_line_string(self: &Arc<Self>, lines: Vec<LineString>) -> MultiLineString {
        GeometryCollection::new(lines, self)
    }

    /// Creates a multipolygon.
    pub fn create_multi_polygon(self: &Arc<Self>, polygons: Vec<Polygon>) -> MultiPolygon {
        GeometryCollection::new(polygons, self)
    }

    /// Creates a heterogeneous collection. The members take the SRID of the factory.
    pub fn create_geometry_collection(self: &Arc<Self>, geometries: Vec<Geom>) -> GeometryCollection {
        log::trace!("Creating geometry collection with {} members", geometries.len());
        GeometryCollection::new(geometries, self)
    }

    /// Creates a heterogeneous collection from a list that might contain absent members.
    ///
    /// Fails with [`GeometryError::InvalidArgument`] if any of the members is `None`.
    pub fn create_geometry_collection_from_parts(
        self: &Arc<Self>,
        parts: Vec<Option<Geom>>,
    ) -> Result<GeometryCollection, GeometryError> {
        let geometries = parts
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                GeometryError::invalid_argument("geometries must not contain null elements")
            })?;

        Ok(self.create_geometry_collection(geometries))
    }

    /// Creates an empty geometry of the given dimension: a point, a linestring, a polygon or a
    /// collection for [`Dimension::False`].
    pub fn create_empty(self: &Arc<Self>, dimension: Dimension) -> Geom {
        match dimension {
            Dimension::P => self.create_empty_point().into(),
            Dimension::L => self.create_empty_line_string().into(),
            Dimension::A => self.create_empty_polygon().into(),
            Dimension::False => self.create_geometry_collection(vec![]).into(),
        }
    }

    /// Builds the most specific geometry that can hold the given parts.
    ///
    /// No parts give an empty collection, a single part is returned unchanged, parts of the
    /// same basic kind become the corresponding `Multi*` geometry, and anything else becomes a
    /// heterogeneous collection.
    pub fn build_geometry(self: &Arc<Self>, mut parts: Vec<Geom>) -> Geom {
        if parts.is_empty() {
            return self.create_geometry_collection(vec![]).into();
        }

        let first_type = parts[0].geometry_type_id();
        let is_heterogeneous = parts
            .iter()
            .any(|part| part.geometry_type_id() != first_type || part.is_collection());

        if is_heterogeneous {
            return self.create_geometry_collection(parts).into();
        }

        if parts.len() == 1 {
            if let Some(part) = parts.pop() {
                return part;
            }
        }

        match first_type {
            GeometryTypeId::Point => self
                .create_multi_point(
                    parts
                        .into_iter()
                        .filter_map(|part| match part {
                            Geom::Point(v) => Some(v),
                            _ => None,
                        })
                        .collect(),
                )
                .into(),
            GeometryTypeId::LineString => self
                .create_multi_line_string(
                    parts
                        .into_iter()
                        .filter_map(|part| match part {
                            Geom::LineString(v) => Some(v),
                            _ => None,
                        })
                        .collect(),
                )
                .into(),
            GeometryTypeId::Polygon => self
                .create_multi_polygon(
                    parts
                        .into_iter()
                        .filter_map(|part| match part {
                            Geom::Polygon(v) => Some(v),
                            _ => None,
                        })
                        .collect(),
                )
                .into(),
            _ => self.create_geometry_collection(parts).into(),
        }
    }

    /// Converts an envelope to the simplest geometry covering the same area.
    pub fn to_geometry(self: &Arc<Self>, envelope: &Envelope) -> Geom {
        if envelope.is_null() {
            return self.create_empty_point().into();
        }

        let [lower_left, upper_left, upper_right, lower_right, _] = envelope.into_ring();
        if envelope.width() == 0.0 && envelope.height() == 0.0 {
            return self.create_point(lower_left).into();
        }

        if envelope.width() == 0.0 || envelope.height() == 0.0 {
            let line = CoordinateSequence::xy(vec![lower_left, upper_right]);
            return LineString::new(line, self).into();
        }

        let ring = CoordinateSequence::xy(vec![
            lower_left,
            upper_left,
            upper_right,
            lower_right,
            lower_left,
        ]);
        Polygon::new(LinearRing::new(ring, self), vec![], self).into()
    }
}

/// Configuration of a [`GeometryFactory`].
///
/// The builder can be deserialized, so factory settings can come from a configuration file:
///
/// ```
/// use sfgeom::{GeometryFactoryBuilder, PrecisionModel};
///
/// let builder: GeometryFactoryBuilder = serde_json::from_str(
///     r#"{ "srid": 4326, "precision_model": { "type": "fixed", "scale": 1000.0 } }"#,
/// ).unwrap();
/// let factory = builder.build();
///
/// assert_eq!(factory.srid(), 4326);
/// assert_eq!(*factory.precision_model(), PrecisionModel::Fixed { scale: 1000.0 });
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryFactoryBuilder {
    srid: Option<i32>,
    precision_model: Option<PrecisionModel>,
}

impl GeometryFactoryBuilder {
    /// Sets the SRID of the created geometries.
    ///
    /// Defaults to 0.
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    /// Sets the precision model.
    ///
    /// Defaults to [`PrecisionModel::Floating`].
    pub fn with_precision_model(mut self, precision_model: PrecisionModel) -> Self {
        self.precision_model = Some(precision_model);
        self
    }

    /// Creates the factory.
    pub fn build(self) -> Arc<GeometryFactory> {
        let factory = GeometryFactory {
            srid: self.srid.unwrap_or_default(),
            precision_model: self.precision_model.unwrap_or_default(),
        };
        log::debug!(
            "Created geometry factory with SRID {} and {:?} precision",
            factory.srid,
            factory.precision_model
        );

        Arc::new(factory)
    }
}
