//! The geometry contract shared by every geometry kind.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::algorithm::{centroid, convex_hull, distance, interior_point, linear_referencing};
use crate::collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
use crate::coord::{Coordinate, CoordinateSequence};
use crate::dimension::Dimension;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::filter::{
    CoordinateFilter, CoordinateFilterMut, CoordinateSequenceFilter, GeometryComponentFilter,
    GeometryComponentFilterMut, GeometryFilter, GeometryFilterMut,
};
use crate::geometry_type::{GeometrySortIndex, GeometryTypeId};
use crate::line_string::{LineString, LinearRing};
use crate::operation::buffer::{self, BufferParameters, EndCapStyle};
use crate::operation::overlay::{self, OverlayOp};
use crate::operation::{predicate, relate, IntersectionMatrix};
use crate::point::Point;
use crate::polygon::Polygon;
use crate::precision::PrecisionModel;
use crate::CircularString;

/// Opaque value attached to a geometry by the application.
pub type UserData = Arc<dyn Any + Send + Sync>;

/// Data every geometry carries besides its shape.
pub struct GeometryBase {
    srid: i32,
    factory: Arc<GeometryFactory>,
    user_data: Option<UserData>,
}

impl GeometryBase {
    pub(crate) fn new(factory: &Arc<GeometryFactory>) -> Self {
        Self {
            srid: factory.srid(),
            factory: factory.clone(),
            user_data: None,
        }
    }

    /// Spatial reference identifier.
    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub(crate) fn set_srid(&mut self, srid: i32) {
        self.srid = srid;
    }

    /// Factory that created the geometry.
    pub fn factory(&self) -> &Arc<GeometryFactory> {
        &self.factory
    }
}

/// User data is not copied: a clone starts without it.
impl Clone for GeometryBase {
    fn clone(&self) -> Self {
        Self {
            srid: self.srid,
            factory: self.factory.clone(),
            user_data: None,
        }
    }
}

impl fmt::Debug for GeometryBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryBase")
            .field("srid", &self.srid)
            .field("factory", &self.factory)
            .field("has_user_data", &self.user_data.is_some())
            .finish()
    }
}

/// Common interface of all geometry kinds.
///
/// The trait is object safe: geometries of any kind are handled as `&dyn Geometry`, and binary
/// operations accept the other operand in the same form. Owned geometries of unknown kind are
/// stored as [`Geom`].
///
/// Operations that need an external engine (predicates, overlay, buffer) return
/// [`GeometryError::Unsupported`] for geometries with curved components.
pub trait Geometry: Any + fmt::Debug + Send + Sync {
    /// Upcast used for downcasting to the concrete kind.
    fn as_any(&self) -> &dyn Any;
    /// Returns the geometry as a trait object.
    fn as_geometry(&self) -> &dyn Geometry;
    /// Returns the geometry as a mutable trait object.
    fn as_geometry_mut(&mut self) -> &mut dyn Geometry;
    /// Common data of the geometry.
    fn base(&self) -> &GeometryBase;
    /// Mutable common data of the geometry.
    fn base_mut(&mut self) -> &mut GeometryBase;

    /// Deep copy of the geometry. The copy has the same SRID and factory but no user data.
    fn clone_geom(&self) -> Geom;

    /// Copy of the geometry with the order of coordinates reversed. Collections reverse every
    /// member but keep the member order.
    fn reverse(&self) -> Geom;

    /// Kind of the geometry.
    fn geometry_type_id(&self) -> GeometryTypeId;

    /// Name of the geometry kind, e.g. `"Polygon"`.
    fn geometry_type(&self) -> &'static str {
        self.geometry_type_id().name()
    }

    /// Position of the kind in the total order of geometries.
    fn sort_index(&self) -> GeometrySortIndex {
        self.geometry_type_id().sort_index()
    }

    /// True for collections of geometries, including the homogeneous `Multi*` kinds.
    fn is_collection(&self) -> bool {
        self.geometry_type_id().is_collection()
    }

    /// Factory that created the geometry.
    fn factory(&self) -> &Arc<GeometryFactory> {
        self.base().factory()
    }

    /// Precision model of the geometry factory.
    fn precision_model(&self) -> &PrecisionModel {
        self.factory().precision_model()
    }

    /// Spatial reference identifier.
    fn srid(&self) -> i32 {
        self.base().srid
    }

    /// Sets the spatial reference identifier. Collections also update all their members.
    fn set_srid(&mut self, srid: i32) {
        self.base_mut().set_srid(srid);
    }

    /// Application data attached to the geometry.
    fn user_data(&self) -> Option<&UserData> {
        self.base().user_data.as_ref()
    }

    /// Attaches application data to the geometry.
    fn set_user_data(&mut self, data: Option<UserData>) {
        self.base_mut().user_data = data;
    }

    /// Some vertex of the geometry, `None` if it is empty.
    fn coordinate(&self) -> Option<&Coordinate>;

    /// All vertices of the geometry in traversal order.
    fn coordinates(&self) -> CoordinateSequence;

    /// Number of vertices.
    fn num_points(&self) -> usize;

    /// Number of member geometries. 1 for non-collections.
    fn num_geometries(&self) -> usize {
        1
    }

    /// Member geometry at the given index. A non-collection returns itself for any index.
    ///
    /// # Panics
    ///
    /// Collections panic if `n` is out of bounds.
    fn geometry_n(&self, _n: usize) -> &dyn Geometry {
        self.as_geometry()
    }

    /// True if the geometry contains no points.
    fn is_empty(&self) -> bool;

    /// Topological dimension of the geometry.
    fn dimension(&self) -> Dimension;

    /// True if the geometry has components of the given dimension.
    fn has_dimension(&self, dimension: Dimension) -> bool {
        self.dimension() == dimension
    }

    /// True if all components have the given dimension. Empty collections are strict for any
    /// dimension.
    fn is_dimension_strict(&self, dimension: Dimension) -> bool {
        self.dimension() == dimension
    }

    /// True if all components are points.
    fn is_puntal(&self) -> bool {
        self.is_dimension_strict(Dimension::P)
    }

    /// True if all components are curves.
    fn is_lineal(&self) -> bool {
        self.is_dimension_strict(Dimension::L)
    }

    /// True if all components are surfaces.
    fn is_polygonal(&self) -> bool {
        self.is_dimension_strict(Dimension::A)
    }

    /// True if the leaf components of the geometry do not all have the same dimension.
    fn is_mixed_dimension(&self) -> bool {
        let mut base = None;
        is_mixed_dimension(self.as_geometry(), &mut base)
    }

    /// Number of ordinates of the coordinates: 2, 3 or 4.
    fn coordinate_dimension(&self) -> u8;

    /// True if the coordinates have elevation.
    fn has_z(&self) -> bool;

    /// True if the coordinates have a measure.
    fn has_m(&self) -> bool;

    /// True if the geometry has circular arcs.
    fn has_curved_components(&self) -> bool {
        false
    }

    /// Combinatorial boundary of the geometry.
    fn boundary(&self) -> Result<Geom, GeometryError>;

    /// Dimension of the boundary.
    fn boundary_dimension(&self) -> Dimension;

    /// Cached bounding box of the geometry.
    fn envelope_internal(&self) -> &Envelope;

    /// Bounding box as a geometry: an empty point, a point, a two-point linestring or a
    /// clockwise polygon depending on the box degeneracy.
    fn envelope(&self) -> Geom {
        self.factory().to_geometry(self.envelope_internal())
    }

    /// Computes the DE-9IM matrix of the two geometries.
    fn relate(&self, other: &dyn Geometry) -> Result<IntersectionMatrix, GeometryError> {
        relate::relate(self.as_geometry(), other)
    }

    /// Tests the DE-9IM matrix of the two geometries against a pattern like `"T*F**F***"`.
    fn relate_pattern(&self, other: &dyn Geometry, pattern: &str) -> Result<bool, GeometryError> {
        self.relate(other)?.matches(pattern)
    }

    /// True if the geometries have no point in common.
    fn disjoint(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::disjoint(self.as_geometry(), other)
    }

    /// True if the geometries have common points only on their boundaries.
    fn touches(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::touches(self.as_geometry(), other)
    }

    /// True if the geometries have at least one point in common.
    fn intersects(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::intersects(self.as_geometry(), other)
    }

    /// True if the geometries have some but not all interior points in common.
    fn crosses(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::crosses(self.as_geometry(), other)
    }

    /// True if this geometry lies in the interior of the other one.
    fn within(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::within(self.as_geometry(), other)
    }

    /// True if the other geometry lies in the interior of this one.
    fn contains(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::contains(self.as_geometry(), other)
    }

    /// True if the geometries share some interior points and the intersection has the same
    /// dimension as the operands.
    fn overlaps(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::overlaps(self.as_geometry(), other)
    }

    /// True if every point of the other geometry is a point of this one.
    fn covers(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::covers(self.as_geometry(), other)
    }

    /// True if every point of this geometry is a point of the other one.
    fn covered_by(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::covered_by(self.as_geometry(), other)
    }

    /// True if the geometries are topologically equal.
    fn equals(&self, other: &dyn Geometry) -> Result<bool, GeometryError> {
        predicate::equals(self.as_geometry(), other)
    }

    /// Buffer with the default parameters.
    fn buffer(&self, distance: f64) -> Result<Geom, GeometryError> {
        buffer::buffer(self.as_geometry(), distance, &BufferParameters::default())
    }

    /// Buffer approximating a quarter circle with the given number of segments.
    fn buffer_with_segments(
        &self,
        distance: f64,
        quadrant_segments: u32,
    ) -> Result<Geom, GeometryError> {
        let parameters = BufferParameters::default().with_quadrant_segments(quadrant_segments);
        buffer::buffer(self.as_geometry(), distance, &parameters)
    }

    /// Buffer with the given number of quadrant segments and line end style.
    fn buffer_with_style(
        &self,
        distance: f64,
        quadrant_segments: u32,
        end_cap_style: EndCapStyle,
    ) -> Result<Geom, GeometryError> {
        let parameters = BufferParameters::default()
            .with_quadrant_segments(quadrant_segments)
            .with_end_cap_style(end_cap_style);
        buffer::buffer(self.as_geometry(), distance, &parameters)
    }

    /// Smallest convex geometry containing all vertices.
    fn convex_hull(&self) -> Result<Geom, GeometryError> {
        convex_hull::convex_hull(self.as_geometry())
    }

    /// Point set union of the geometries.
    fn union(&self, other: &dyn Geometry) -> Result<Geom, GeometryError> {
        overlay::overlay(self.as_geometry(), other, OverlayOp::Union)
    }

    /// Point set intersection of the geometries.
    fn intersection(&self, other: &dyn Geometry) -> Result<Geom, GeometryError> {
        overlay::overlay(self.as_geometry(), other, OverlayOp::Intersection)
    }

    /// Points of this geometry that are not in the other one.
    fn difference(&self, other: &dyn Geometry) -> Result<Geom, GeometryError> {
        overlay::overlay(self.as_geometry(), other, OverlayOp::Difference)
    }

    /// Points that belong to exactly one of the geometries.
    fn sym_difference(&self, other: &dyn Geometry) -> Result<Geom, GeometryError> {
        overlay::overlay(self.as_geometry(), other, OverlayOp::SymDifference)
    }

    /// Union of all components of the geometry.
    fn unary_union(&self) -> Result<Geom, GeometryError> {
        overlay::unary_union(self.as_geometry())
    }

    /// True if both geometries have the same kind and structure and corresponding vertices are
    /// within the tolerance of each other.
    fn equals_exact(&self, other: &dyn Geometry, tolerance: f64) -> bool;

    /// True if both geometries have the same kind, structure, ordinate set and exactly the same
    /// ordinate values. `NaN` values are equal to each other.
    fn equals_identical(&self, other: &dyn Geometry) -> bool;

    /// Applies the filter to every vertex.
    fn apply_coordinate_filter(&self, filter: &mut dyn CoordinateFilter);

    /// Applies the filter to every vertex, allowing modification.
    fn apply_coordinate_filter_mut(&mut self, filter: &mut dyn CoordinateFilterMut);

    /// Applies the filter to the geometry and, for collections, to every member.
    fn apply_geometry_filter(&self, filter: &mut dyn GeometryFilter) {
        filter.filter(self.as_geometry());
    }

    /// Mutable version of [`Geometry::apply_geometry_filter`].
    fn apply_geometry_filter_mut(&mut self, filter: &mut dyn GeometryFilterMut) {
        filter.filter(self.as_geometry_mut());
        self.geometry_changed();
    }

    /// Applies the filter to every component, including polygon rings.
    fn apply_component_filter(&self, filter: &mut dyn GeometryComponentFilter) {
        filter.filter(self.as_geometry());
    }

    /// Mutable version of [`Geometry::apply_component_filter`].
    fn apply_component_filter_mut(&mut self, filter: &mut dyn GeometryComponentFilterMut) {
        filter.filter(self.as_geometry_mut());
        self.geometry_changed();
    }

    /// Applies the filter to every index of every coordinate sequence.
    fn apply_sequence_filter(&self, filter: &mut dyn CoordinateSequenceFilter);

    /// Mutable version of [`Geometry::apply_sequence_filter`].
    fn apply_sequence_filter_mut(&mut self, filter: &mut dyn CoordinateSequenceFilter);

    /// Converts the geometry to its canonical form, so that geometries equal up to vertex order
    /// become equal under [`Geometry::equals_exact`].
    fn normalize(&mut self);

    /// Total order of geometries: first by kind, then empty before non-empty, then by
    /// coordinates.
    fn compare_to(&self, other: &dyn Geometry) -> Ordering {
        let by_kind = self.sort_index().cmp(&other.sort_index());
        if by_kind != Ordering::Equal {
            return by_kind;
        }

        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.compare_to_same_class(other),
        }
    }

    /// Compares two non-empty geometries of the same kind.
    fn compare_to_same_class(&self, other: &dyn Geometry) -> Ordering;

    /// Area of the geometry, 0 for points and curves.
    fn area(&self) -> f64 {
        0.0
    }

    /// Length of curves or perimeter of surfaces, 0 for points.
    fn length(&self) -> f64 {
        0.0
    }

    /// Minimum distance between the geometries. 0 if either is empty.
    fn distance(&self, other: &dyn Geometry) -> Result<f64, GeometryError> {
        distance::distance(self.as_geometry(), other)
    }

    /// True if the distance between the geometries does not exceed `distance`.
    fn is_within_distance(&self, other: &dyn Geometry, distance: f64) -> Result<bool, GeometryError> {
        distance::is_within_distance(self.as_geometry(), other, distance)
    }

    /// Distance along this lineal geometry to the point of it nearest to `point`.
    ///
    /// Fails with [`GeometryError::InvalidArgument`] if this geometry is not lineal or `point` is
    /// not a non-empty point.
    fn project(&self, point: &dyn Geometry) -> Result<f64, GeometryError> {
        linear_referencing::project(self.as_geometry(), point)
    }

    /// [`Geometry::project`] as a fraction of the length of this geometry.
    fn project_normalized(&self, point: &dyn Geometry) -> Result<f64, GeometryError> {
        linear_referencing::project_normalized(self.as_geometry(), point)
    }

    /// Centre of mass of the highest-dimensional components. Empty for an empty geometry.
    fn centroid(&self) -> Result<Point, GeometryError> {
        centroid::centroid(self.as_geometry())
    }

    /// A point guaranteed to lie in the interior of the geometry if possible, or on it
    /// otherwise. Empty for an empty geometry.
    fn interior_point(&self) -> Result<Point, GeometryError> {
        interior_point::interior_point(self.as_geometry())
    }

    /// Refreshes the cached data of the geometry and all its components.
    fn geometry_changed(&mut self) {
        self.geometry_changed_action();
    }

    /// Refreshes the cached data of this geometry only.
    fn geometry_changed_action(&mut self);
}

fn is_mixed_dimension(geometry: &dyn Geometry, base: &mut Option<Dimension>) -> bool {
    if geometry.is_collection() {
        return (0..geometry.num_geometries())
            .any(|i| is_mixed_dimension(geometry.geometry_n(i), base));
    }

    match base {
        None => {
            *base = Some(geometry.dimension());
            false
        }
        Some(dimension) => *dimension != geometry.dimension(),
    }
}

/// Compares two sequences of geometries element-wise. A longer sequence with an equal prefix is
/// greater.
pub fn compare_geometry_sequences<'a, 'b>(
    a: impl IntoIterator<Item = &'a dyn Geometry>,
    b: impl IntoIterator<Item = &'b dyn Geometry>,
) -> Ordering {
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => {
                let comparison = x.compare_to(y);
                if comparison != Ordering::Equal {
                    return comparison;
                }
            }
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Owned geometry of any kind.
#[derive(Debug, Clone)]
pub enum Geom {
    /// Point.
    Point(Point),
    /// LineString.
    LineString(LineString),
    /// LinearRing.
    LinearRing(LinearRing),
    /// Polygon.
    Polygon(Polygon),
    /// CircularString.
    CircularString(CircularString),
    /// MultiPoint.
    MultiPoint(MultiPoint),
    /// MultiLineString.
    MultiLineString(MultiLineString),
    /// MultiPolygon.
    MultiPolygon(MultiPolygon),
    /// GeometryCollection.
    GeometryCollection(GeometryCollection),
}

impl Geom {
    /// Returns the point if the geometry is one.
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geom::Point(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the linestring if the geometry is one.
    pub fn as_line_string(&self) -> Option<&LineString> {
        match self {
            Geom::LineString(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the polygon if the geometry is one.
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Geom::Polygon(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the multipolygon if the geometry is one.
    pub fn as_multi_polygon(&self) -> Option<&MultiPolygon> {
        match self {
            Geom::MultiPolygon(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the heterogeneous collection if the geometry is one.
    pub fn as_geometry_collection(&self) -> Option<&GeometryCollection> {
        match self {
            Geom::GeometryCollection(v) => Some(v),
            _ => None,
        }
    }
}

impl Deref for Geom {
    type Target = dyn Geometry;

    fn deref(&self) -> &Self::Target {
        match self {
            Geom::Point(v) => v,
            Geom::LineString(v) => v,
            Geom::LinearRing(v) => v,
            Geom::Polygon(v) => v,
            Geom::CircularString(v) => v,
            Geom::MultiPoint(v) => v,
            Geom::MultiLineString(v) => v,
            Geom::MultiPolygon(v) => v,
            Geom::GeometryCollection(v) => v,
        }
    }
}

impl DerefMut for Geom {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Geom::Point(v) => v,
            Geom::LineString(v) => v,
            Geom::LinearRing(v) => v,
            Geom::Polygon(v) => v,
            Geom::CircularString(v) => v,
            Geom::MultiPoint(v) => v,
            Geom::MultiLineString(v) => v,
            Geom::MultiPolygon(v) => v,
            Geom::GeometryCollection(v) => v,
        }
    }
}

impl From<Point> for Geom {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geom {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<LinearRing> for Geom {
    fn from(value: LinearRing) -> Self {
        Self::LinearRing(value)
    }
}

impl From<Polygon> for Geom {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<CircularString> for Geom {
    fn from(value: CircularString) -> Self {
        Self::CircularString(value)
    }
}

impl From<MultiPoint> for Geom {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geom {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geom {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geom {
    fn from(value: GeometryCollection) -> Self {
        Self::GeometryCollection(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::GeometryFactoryBuilder;

    #[test]
    fn clone_drops_user_data() {
        let factory = GeometryFactoryBuilder::default().with_srid(4326).build();
        let mut point = factory.create_point(Coordinate::xy(1.0, 2.0));
        point.set_user_data(Some(Arc::new("label")));

        let copy = point.clone_geom();
        assert!(point.user_data().is_some());
        assert!(copy.user_data().is_none());
        assert_eq!(copy.srid(), 4326);
        assert!(copy.equals_exact(&point, 0.0));
    }

    #[test]
    fn user_data_is_opaque() {
        let factory = GeometryFactory::new();
        let mut point = factory.create_empty_point();
        point.set_user_data(Some(Arc::new(42u32)));

        let data = point.user_data().and_then(|d| d.downcast_ref::<u32>());
        assert_eq!(data, Some(&42));
    }

    #[test]
    fn compare_orders_by_kind_then_emptiness() {
        let factory = GeometryFactory::new();
        let point: Geom = factory.create_point(Coordinate::xy(5.0, 5.0)).into();
        let empty_point: Geom = factory.create_empty_point().into();
        let line: Geom = factory
            .create_line_string(CoordinateSequence::from_xy(&[(0.0, 0.0), (1.0, 1.0)]))
            .expect("valid line")
            .into();

        assert_eq!(point.compare_to(&*line), Ordering::Less);
        assert_eq!(line.compare_to(&*point), Ordering::Greater);
        assert_eq!(empty_point.compare_to(&*point), Ordering::Less);
        assert_eq!(empty_point.compare_to(&*empty_point.clone()), Ordering::Equal);
    }

    #[test]
    fn geom_dispatch() {
        let factory = GeometryFactory::new();
        let geom: Geom = factory.create_point(Coordinate::xy(1.0, 1.0)).into();
        assert_eq!(geom.geometry_type(), "Point");
        assert_eq!(geom.num_geometries(), 1);
        assert_eq!(geom.geometry_n(0).geometry_type_id(), GeometryTypeId::Point);
        assert!(geom.as_point().is_some());
        assert!(geom.as_polygon().is_none());
    }

    #[test]
    fn mixed_dimension() {
        let factory = GeometryFactory::new();
        let point: Geom = factory.create_point(Coordinate::xy(5.0, 5.0)).into();
        let line: Geom = factory
            .create_line_string(CoordinateSequence::from_xy(&[(0.0, 0.0), (1.0, 1.0)]))
            .expect("valid line")
            .into();

        let mixed = factory.create_geometry_collection(vec![point.clone(), line]);
        assert!(mixed.is_mixed_dimension());

        let points = factory.create_geometry_collection(vec![point.clone(), point]);
        assert!(!points.is_mixed_dimension());
    }
}
