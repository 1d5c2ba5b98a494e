//! Geometry type tags and the canonical order of geometry kinds.
use serde::{Deserialize, Serialize};

/// Kind of a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryTypeId {
    /// A point.
    Point,
    /// A linestring.
    LineString,
    /// A linear ring (linestring with the first point equal to the last one).
    LinearRing,
    /// A polygon.
    Polygon,
    /// A collection of points.
    MultiPoint,
    /// A collection of linestrings.
    MultiLineString,
    /// A collection of polygons.
    MultiPolygon,
    /// A collection of heterogeneous geometries.
    GeometryCollection,
    /// A sequence of circular arcs.
    CircularString,
    /// A curve built from linear and circular sections.
    CompoundCurve,
    /// A polygon with curved rings.
    CurvePolygon,
    /// A collection of curves.
    MultiCurve,
    /// A collection of surfaces.
    MultiSurface,
}

impl GeometryTypeId {
    /// Name of the geometry type as used in the OGC Simple Features specification.
    pub fn name(self) -> &'static str {
        match self {
            GeometryTypeId::Point => "Point",
            GeometryTypeId::LineString => "LineString",
            GeometryTypeId::LinearRing => "LinearRing",
            GeometryTypeId::Polygon => "Polygon",
            GeometryTypeId::MultiPoint => "MultiPoint",
            GeometryTypeId::MultiLineString => "MultiLineString",
            GeometryTypeId::MultiPolygon => "MultiPolygon",
            GeometryTypeId::GeometryCollection => "GeometryCollection",
            GeometryTypeId::CircularString => "CircularString",
            GeometryTypeId::CompoundCurve => "CompoundCurve",
            GeometryTypeId::CurvePolygon => "CurvePolygon",
            GeometryTypeId::MultiCurve => "MultiCurve",
            GeometryTypeId::MultiSurface => "MultiSurface",
        }
    }

    /// Position of the kind in the total order of geometries.
    pub fn sort_index(self) -> GeometrySortIndex {
        match self {
            GeometryTypeId::Point => GeometrySortIndex::Point,
            GeometryTypeId::MultiPoint => GeometrySortIndex::MultiPoint,
            GeometryTypeId::LineString => GeometrySortIndex::LineString,
            GeometryTypeId::LinearRing => GeometrySortIndex::LinearRing,
            GeometryTypeId::MultiLineString => GeometrySortIndex::MultiLineString,
            GeometryTypeId::Polygon => GeometrySortIndex::Polygon,
            GeometryTypeId::MultiPolygon => GeometrySortIndex::MultiPolygon,
            GeometryTypeId::GeometryCollection => GeometrySortIndex::GeometryCollection,
            GeometryTypeId::CircularString => GeometrySortIndex::CircularString,
            GeometryTypeId::CompoundCurve => GeometrySortIndex::CompoundCurve,
            GeometryTypeId::CurvePolygon => GeometrySortIndex::CurvePolygon,
            GeometryTypeId::MultiCurve => GeometrySortIndex::MultiCurve,
            GeometryTypeId::MultiSurface => GeometrySortIndex::MultiSurface,
        }
    }

    /// Returns true for the multi-part kinds: `GeometryCollection`, `MultiPoint`,
    /// `MultiLineString` and `MultiPolygon`.
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            GeometryTypeId::GeometryCollection
                | GeometryTypeId::MultiPoint
                | GeometryTypeId::MultiLineString
                | GeometryTypeId::MultiPolygon
        )
    }

    /// Returns true for the kinds that contain circular arcs.
    pub fn is_curved(self) -> bool {
        matches!(
            self,
            GeometryTypeId::CircularString
                | GeometryTypeId::CompoundCurve
                | GeometryTypeId::CurvePolygon
                | GeometryTypeId::MultiCurve
                | GeometryTypeId::MultiSurface
        )
    }

    /// Multi-part kind that holds parts of the given kind. Other kinds are returned unchanged.
    pub fn multi_type_id(self) -> GeometryTypeId {
        match self {
            GeometryTypeId::Point => GeometryTypeId::MultiPoint,
            GeometryTypeId::LineString => GeometryTypeId::MultiLineString,
            GeometryTypeId::Polygon => GeometryTypeId::MultiPolygon,
            other => other,
        }
    }
}

/// Sort index of a geometry kind. Geometries of different kinds are ordered by this index.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GeometrySortIndex {
    Point = 0,
    MultiPoint = 1,
    LineString = 2,
    LinearRing = 3,
    MultiLineString = 4,
    Polygon = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
    CircularString = 8,
    CompoundCurve = 9,
    CurvePolygon = 10,
    MultiCurve = 11,
    MultiSurface = 12,
}
