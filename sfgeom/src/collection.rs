//! Collections of geometries.
//!
//! [`GeometryCollection`] is generic over the member type. The homogeneous `Multi*` kinds are
//! aliases for collections of a single member kind, and the heterogeneous collection holds
//! [`Geom`] values.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::coord::{Coordinate, CoordinateSequence};
use crate::dimension::Dimension;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::filter::{
    CoordinateFilter, CoordinateFilterMut, CoordinateSequenceFilter, GeometryComponentFilter,
    GeometryComponentFilterMut, GeometryFilter, GeometryFilterMut,
};
use crate::geometry::{compare_geometry_sequences, Geom, Geometry, GeometryBase};
use crate::geometry_type::GeometryTypeId;
use crate::line_string::LineString;
use crate::point::Point;
use crate::polygon::Polygon;

/// Collection of points.
pub type MultiPoint = GeometryCollection<Point>;
/// Collection of linestrings.
pub type MultiLineString = GeometryCollection<LineString>;
/// Collection of polygons.
pub type MultiPolygon = GeometryCollection<Polygon>;

/// A geometry kind that can be stored in a [`GeometryCollection`].
///
/// The trait connects the member kind with the behaviour of the collection that differs between
/// the collection kinds: the type id, the dimension and the boundary.
pub trait CollectionMember: Clone + fmt::Debug + Send + Sync + 'static {
    /// Type id of the collection of this member kind.
    const COLLECTION_TYPE_ID: GeometryTypeId;

    /// Dimension of every collection of this member kind, `None` if it depends on the members.
    const COLLECTION_DIMENSION: Option<Dimension>;

    /// The member as a geometry.
    fn member(&self) -> &dyn Geometry;

    /// The member as a mutable geometry.
    fn member_mut(&mut self) -> &mut dyn Geometry;

    /// Copy of the member with reversed coordinate order.
    fn reversed_member(&self) -> Self;

    /// Wraps a collection of this member kind into [`Geom`].
    fn collection_into_geom(collection: GeometryCollection<Self>) -> Geom;

    /// Boundary of a collection of this member kind.
    fn collection_boundary(collection: &GeometryCollection<Self>) -> Result<Geom, GeometryError>;

    /// Dimension of the boundary of a collection of this member kind.
    fn collection_boundary_dimension(collection: &GeometryCollection<Self>) -> Dimension;
}

impl CollectionMember for Point {
    const COLLECTION_TYPE_ID: GeometryTypeId = GeometryTypeId::MultiPoint;
    const COLLECTION_DIMENSION: Option<Dimension> = Some(Dimension::P);

    fn member(&self) -> &dyn Geometry {
        self
    }

    fn member_mut(&mut self) -> &mut dyn Geometry {
        self
    }

    fn reversed_member(&self) -> Self {
        self.clone()
    }

    fn collection_into_geom(collection: GeometryCollection<Self>) -> Geom {
        Geom::MultiPoint(collection)
    }

    fn collection_boundary(collection: &GeometryCollection<Self>) -> Result<Geom, GeometryError> {
        Ok(collection.factory().create_geometry_collection(vec![]).into())
    }

    fn collection_boundary_dimension(_collection: &GeometryCollection<Self>) -> Dimension {
        Dimension::False
    }
}

impl CollectionMember for LineString {
    const COLLECTION_TYPE_ID: GeometryTypeId = GeometryTypeId::MultiLineString;
    const COLLECTION_DIMENSION: Option<Dimension> = Some(Dimension::L);

    fn member(&self) -> &dyn Geometry {
        self
    }

    fn member_mut(&mut self) -> &mut dyn Geometry {
        self
    }

    fn reversed_member(&self) -> Self {
        self.reversed()
    }

    fn collection_into_geom(collection: GeometryCollection<Self>) -> Geom {
        Geom::MultiLineString(collection)
    }

    /// Endpoints that appear an odd number of times (the "mod-2" rule).
    fn collection_boundary(collection: &GeometryCollection<Self>) -> Result<Geom, GeometryError> {
        let mut endpoints: Vec<Coordinate> = vec![];
        for line in collection.geometries() {
            if let (Some(start), Some(end)) = (line.start_point(), line.end_point()) {
                endpoints.push(*start);
                endpoints.push(*end);
            }
        }
        endpoints.sort_by(|a, b| a.compare_to(b));

        let mut boundary = vec![];
        let mut i = 0;
        while i < endpoints.len() {
            let mut j = i + 1;
            while j < endpoints.len() && endpoints[j].equals_2d(&endpoints[i]) {
                j += 1;
            }
            if (j - i) % 2 == 1 {
                boundary.push(endpoints[i]);
            }
            i = j;
        }

        let coordinates =
            CoordinateSequence::new(boundary, collection.has_z(), collection.has_m());
        Ok(collection
            .factory()
            .create_multi_point_from_coords(&coordinates)
            .into())
    }

    fn collection_boundary_dimension(collection: &GeometryCollection<Self>) -> Dimension {
        if collection.is_closed() {
            Dimension::False
        } else {
            Dimension::P
        }
    }
}

impl CollectionMember for Polygon {
    const COLLECTION_TYPE_ID: GeometryTypeId = GeometryTypeId::MultiPolygon;
    const COLLECTION_DIMENSION: Option<Dimension> = Some(Dimension::A);

    fn member(&self) -> &dyn Geometry {
        self
    }

    fn member_mut(&mut self) -> &mut dyn Geometry {
        self
    }

    fn reversed_member(&self) -> Self {
        self.reversed()
    }

    fn collection_into_geom(collection: GeometryCollection<Self>) -> Geom {
        Geom::MultiPolygon(collection)
    }

    fn collection_boundary(collection: &GeometryCollection<Self>) -> Result<Geom, GeometryError> {
        let lines = collection
            .geometries()
            .iter()
            .flat_map(|polygon| polygon.rings())
            .filter(|ring| !ring.is_empty())
            .map(|ring| ring.to_line_string())
            .collect();
        Ok(collection.factory().create_multi_line_string(lines).into())
    }

    fn collection_boundary_dimension(_collection: &GeometryCollection<Self>) -> Dimension {
        Dimension::L
    }
}

impl CollectionMember for Geom {
    const COLLECTION_TYPE_ID: GeometryTypeId = GeometryTypeId::GeometryCollection;
    const COLLECTION_DIMENSION: Option<Dimension> = None;

    fn member(&self) -> &dyn Geometry {
        &**self
    }

    fn member_mut(&mut self) -> &mut dyn Geometry {
        &mut **self
    }

    fn reversed_member(&self) -> Self {
        self.reverse()
    }

    fn collection_into_geom(collection: GeometryCollection<Self>) -> Geom {
        Geom::GeometryCollection(collection)
    }

    fn collection_boundary(_collection: &GeometryCollection<Self>) -> Result<Geom, GeometryError> {
        Err(GeometryError::invalid_argument(
            "Operation not supported by GeometryCollection",
        ))
    }

    fn collection_boundary_dimension(collection: &GeometryCollection<Self>) -> Dimension {
        collection
            .geometries()
            .iter()
            .map(|g| g.boundary_dimension())
            .fold(Dimension::False, Dimension::max)
    }
}

/// Summary of the members, computed when the collection is created or changed.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
struct CollectionFlags {
    has_points: bool,
    has_lines: bool,
    has_polygons: bool,
    has_z: bool,
    has_m: bool,
    has_curves: bool,
}

/// An ordered collection of geometries.
///
/// The members always have the SRID of the collection. The envelope of the collection and the
/// summary of member dimensions are cached and refreshed whenever the collection is modified
/// through its API or a mutable filter.
#[derive(Debug, Clone)]
pub struct GeometryCollection<G = Geom> {
    base: GeometryBase,
    geometries: Vec<G>,
    envelope: Envelope,
    flags: CollectionFlags,
}

impl<G: CollectionMember> GeometryCollection<G> {
    pub(crate) fn new(geometries: Vec<G>, factory: &Arc<GeometryFactory>) -> Self {
        let mut collection = Self {
            base: GeometryBase::new(factory),
            geometries,
            envelope: Envelope::null(),
            flags: CollectionFlags::default(),
        };
        let srid = collection.base.srid();
        collection.set_srid(srid);
        collection.geometry_changed_action();
        collection
    }

    /// Members of the collection.
    pub fn geometries(&self) -> &[G] {
        &self.geometries
    }

    /// Iterates over the members.
    pub fn iter(&self) -> std::slice::Iter<'_, G> {
        self.geometries.iter()
    }

    /// Takes the members out of the collection, leaving it empty.
    pub fn release_geometries(&mut self) -> Vec<G> {
        let released = std::mem::take(&mut self.geometries);
        log::debug!(
            "Released {} members of {}",
            released.len(),
            G::COLLECTION_TYPE_ID.name()
        );
        self.geometry_changed();
        released
    }

    /// Consumes the collection and returns its members.
    pub fn into_geometries(self) -> Vec<G> {
        self.geometries
    }

    fn compute_envelope(&self) -> Envelope {
        self.geometries
            .iter()
            .map(|g| *g.member().envelope_internal())
            .collect()
    }

    fn compute_flags(&self) -> CollectionFlags {
        let mut flags = CollectionFlags::default();
        for g in &self.geometries {
            let g = g.member();
            flags.has_points |= g.has_dimension(Dimension::P);
            flags.has_lines |= g.has_dimension(Dimension::L);
            flags.has_polygons |= g.has_dimension(Dimension::A);
            flags.has_z |= g.has_z();
            flags.has_m |= g.has_m();
            flags.has_curves |= g.has_curved_components();
        }
        flags
    }

    fn members(&self) -> impl Iterator<Item = &dyn Geometry> {
        self.geometries.iter().map(|g| g.member())
    }
}

impl GeometryCollection<LineString> {
    /// True if the collection is not empty and all its linestrings are closed.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.geometries.iter().all(|line| line.is_closed())
    }
}

impl<G: CollectionMember> Geometry for GeometryCollection<G> {
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

    fn set_srid(&mut self, srid: i32) {
        self.base.set_srid(srid);
        for g in &mut self.geometries {
            g.member_mut().set_srid(srid);
        }
    }

    fn clone_geom(&self) -> Geom {
        G::collection_into_geom(self.clone())
    }

    fn reverse(&self) -> Geom {
        if self.is_empty() {
            return self.clone_geom();
        }

        let mut reversed = self.clone();
        reversed.geometries = self.geometries.iter().map(G::reversed_member).collect();
        reversed.geometry_changed();
        G::collection_into_geom(reversed)
    }

    fn geometry_type_id(&self) -> GeometryTypeId {
        G::COLLECTION_TYPE_ID
    }

    fn coordinate(&self) -> Option<&Coordinate> {
        self.members().find_map(|g| g.coordinate())
    }

    fn coordinates(&self) -> CoordinateSequence {
        let mut coordinates = CoordinateSequence::empty(self.has_z(), self.has_m());
        for g in self.members() {
            coordinates.extend_from(&g.coordinates());
        }
        coordinates
    }

    fn num_points(&self) -> usize {
        self.members().map(|g| g.num_points()).sum()
    }

    fn num_geometries(&self) -> usize {
        self.geometries.len()
    }

    fn geometry_n(&self, n: usize) -> &dyn Geometry {
        self.geometries[n].member()
    }

    fn is_empty(&self) -> bool {
        self.members().all(|g| g.is_empty())
    }

    fn dimension(&self) -> Dimension {
        if let Some(dimension) = G::COLLECTION_DIMENSION {
            return dimension;
        }

        if self.flags.has_polygons {
            Dimension::A
        } else if self.flags.has_lines {
            Dimension::L
        } else if self.flags.has_points {
            Dimension::P
        } else {
            Dimension::False
        }
    }

    fn has_dimension(&self, dimension: Dimension) -> bool {
        if let Some(own) = G::COLLECTION_DIMENSION {
            return own == dimension;
        }

        match dimension {
            Dimension::A => self.flags.has_polygons,
            Dimension::L => self.flags.has_lines,
            Dimension::P => self.flags.has_points,
            Dimension::False => false,
        }
    }

    fn is_dimension_strict(&self, dimension: Dimension) -> bool {
        if let Some(own) = G::COLLECTION_DIMENSION {
            return own == dimension;
        }

        if self.is_empty() {
            return true;
        }

        let CollectionFlags {
            has_points,
            has_lines,
            has_polygons,
            ..
        } = self.flags;
        match dimension {
            Dimension::A => has_polygons && !has_lines && !has_points,
            Dimension::L => has_lines && !has_polygons && !has_points,
            Dimension::P => has_points && !has_lines && !has_polygons,
            Dimension::False => false,
        }
    }

    fn coordinate_dimension(&self) -> u8 {
        self.members()
            .map(|g| g.coordinate_dimension())
            .fold(2, u8::max)
    }

    fn has_z(&self) -> bool {
        self.flags.has_z
    }

    fn has_m(&self) -> bool {
        self.flags.has_m
    }

    fn has_curved_components(&self) -> bool {
        self.flags.has_curves
    }

    fn boundary(&self) -> Result<Geom, GeometryError> {
        G::collection_boundary(self)
    }

    fn boundary_dimension(&self) -> Dimension {
        G::collection_boundary_dimension(self)
    }

    fn envelope_internal(&self) -> &Envelope {
        &self.envelope
    }

    fn equals_exact(&self, other: &dyn Geometry, tolerance: f64) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };

        self.geometries.len() == other.geometries.len()
            && self
                .members()
                .zip(other.members())
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }

    fn equals_identical(&self, other: &dyn Geometry) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };

        self.geometries.len() == other.geometries.len()
            && self.envelope == other.envelope
            && self
                .members()
                .zip(other.members())
                .all(|(a, b)| a.equals_identical(b))
    }

    fn apply_coordinate_filter(&self, filter: &mut dyn CoordinateFilter) {
        for g in self.members() {
            g.apply_coordinate_filter(filter);
        }
    }

    fn apply_coordinate_filter_mut(&mut self, filter: &mut dyn CoordinateFilterMut) {
        for g in &mut self.geometries {
            g.member_mut().apply_coordinate_filter_mut(filter);
        }
        self.geometry_changed_action();
    }

    fn apply_geometry_filter(&self, filter: &mut dyn GeometryFilter) {
        filter.filter(self);
        for g in self.members() {
            g.apply_geometry_filter(filter);
        }
    }

    fn apply_geometry_filter_mut(&mut self, filter: &mut dyn GeometryFilterMut) {
        filter.filter(self);
        for g in &mut self.geometries {
            g.member_mut().apply_geometry_filter_mut(filter);
        }
        self.geometry_changed_action();
    }

    fn apply_component_filter(&self, filter: &mut dyn GeometryComponentFilter) {
        filter.filter(self);
        for g in self.members() {
            if filter.is_done() {
                return;
            }
            g.apply_component_filter(filter);
        }
    }

    fn apply_component_filter_mut(&mut self, filter: &mut dyn GeometryComponentFilterMut) {
        filter.filter(self);
        for g in &mut self.geometries {
            if filter.is_done() {
                break;
            }
            g.member_mut().apply_component_filter_mut(filter);
        }
        self.geometry_changed_action();
    }

    fn apply_sequence_filter(&self, filter: &mut dyn CoordinateSequenceFilter) {
        for g in self.members() {
            g.apply_sequence_filter(filter);
            if filter.is_done() {
                break;
            }
        }
        debug_assert!(
            !filter.is_geometry_changed(),
            "read-only coordinate sequence filter reported a change"
        );
    }

    fn apply_sequence_filter_mut(&mut self, filter: &mut dyn CoordinateSequenceFilter) {
        for g in &mut self.geometries {
            g.member_mut().apply_sequence_filter_mut(filter);
            if filter.is_done() {
                break;
            }
        }

        if filter.is_geometry_changed() {
            self.geometry_changed_action();
        }
    }

    fn normalize(&mut self) {
        for g in &mut self.geometries {
            g.member_mut().normalize();
        }
        self.geometries
            .sort_by(|a, b| b.member().compare_to(a.member()));
    }

    fn compare_to_same_class(&self, other: &dyn Geometry) -> Ordering {
        debug_assert_eq!(self.sort_index(), other.sort_index());
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return self.sort_index().cmp(&other.sort_index());
        };
        compare_geometry_sequences(self.members(), other.members())
    }

    fn area(&self) -> f64 {
        self.members().map(|g| g.area()).sum()
    }

    fn length(&self) -> f64 {
        self.members().map(|g| g.length()).sum()
    }

    fn geometry_changed(&mut self) {
        for g in &mut self.geometries {
            g.member_mut().geometry_changed();
        }
        self.geometry_changed_action();
    }

    fn geometry_changed_action(&mut self) {
        self.envelope = self.compute_envelope();
        self.flags = self.compute_flags();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn square(factory: &Arc<GeometryFactory>, x: f64, y: f64) -> Polygon {
        let ring = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (x, y),
                (x + 1.0, y),
                (x + 1.0, y + 1.0),
                (x, y + 1.0),
                (x, y),
            ]))
            .expect("valid ring");
        factory.create_polygon(ring, vec![]).expect("valid polygon")
    }

    fn line(factory: &Arc<GeometryFactory>, pairs: &[(f64, f64)]) -> LineString {
        factory
            .create_line_string(CoordinateSequence::from_xy(pairs))
            .expect("valid line")
    }

    #[test]
    fn two_squares() {
        let factory = GeometryFactory::new();
        let collection = factory.create_geometry_collection(vec![
            square(&factory, 0.0, 0.0).into(),
            square(&factory, 2.0, 0.0).into(),
        ]);

        assert_abs_diff_eq!(collection.area(), 2.0);
        assert_eq!(collection.dimension(), Dimension::A);
        assert_eq!(collection.coordinate_dimension(), 2);
        assert!(collection.is_polygonal());
        assert!(!collection.is_lineal());
        assert_eq!(collection.num_points(), 10);
        assert_eq!(
            *collection.envelope_internal(),
            Envelope::new(0.0, 0.0, 3.0, 1.0)
        );
    }

    #[test]
    fn empty_collection() {
        let factory = GeometryFactory::new();
        let collection = factory.create_geometry_collection(vec![]);
        assert!(collection.is_empty());
        assert_eq!(collection.dimension(), Dimension::False);
        assert!(collection.is_puntal());
        assert!(collection.is_lineal());
        assert!(collection.is_polygonal());
        assert!(collection.envelope_internal().is_null());
        assert_eq!(collection.coordinate(), None);
    }

    #[test]
    fn heterogeneous_boundary_fails() {
        let factory = GeometryFactory::new();
        let collection =
            factory.create_geometry_collection(vec![square(&factory, 0.0, 0.0).into()]);
        assert_matches!(collection.boundary(), Err(GeometryError::InvalidArgument(_)));
        assert_eq!(collection.boundary_dimension(), Dimension::L);
    }

    #[test]
    fn multi_line_string_boundary_mod2() {
        let factory = GeometryFactory::new();
        let lines = factory.create_multi_line_string(vec![
            line(&factory, &[(0.0, 0.0), (1.0, 0.0)]),
            line(&factory, &[(1.0, 0.0), (2.0, 0.0)]),
        ]);

        let boundary = lines.boundary().expect("multilinestring boundary");
        assert_eq!(boundary.geometry_type_id(), GeometryTypeId::MultiPoint);
        assert_eq!(boundary.num_geometries(), 2);
        assert_eq!(lines.boundary_dimension(), Dimension::P);
        assert!(!lines.is_closed());
    }

    #[test]
    fn multi_polygon_boundary() {
        let factory = GeometryFactory::new();
        let polygons = factory.create_multi_polygon(vec![
            square(&factory, 0.0, 0.0),
            square(&factory, 2.0, 0.0),
        ]);

        let boundary = polygons.boundary().expect("multipolygon boundary");
        assert_eq!(boundary.geometry_type_id(), GeometryTypeId::MultiLineString);
        assert_abs_diff_eq!(boundary.length(), 8.0);
    }

    #[test]
    fn srid_is_pushed_to_members() {
        let factory = GeometryFactory::new();
        let mut collection = factory.create_geometry_collection(vec![
            factory.create_point(Coordinate::xy(0.0, 0.0)).into(),
            factory
                .create_multi_point(vec![factory.create_point(Coordinate::xy(1.0, 1.0))])
                .into(),
        ]);

        collection.set_srid(4326);
        assert_eq!(collection.srid(), 4326);
        assert_eq!(collection.geometry_n(0).srid(), 4326);
        assert_eq!(collection.geometry_n(1).geometry_n(0).srid(), 4326);
    }

    #[test]
    fn release_geometries() {
        let factory = GeometryFactory::new();
        let mut collection = factory.create_multi_polygon(vec![
            square(&factory, 0.0, 0.0),
            square(&factory, 2.0, 0.0),
        ]);

        let released = collection.release_geometries();
        assert_eq!(released.len(), 2);
        assert!(collection.is_empty());
        assert_eq!(collection.num_geometries(), 0);
        assert!(collection.envelope_internal().is_null());
    }

    #[test]
    fn normalize_sorts_descending() {
        let factory = GeometryFactory::new();
        let mut collection = factory.create_multi_point(vec![
            factory.create_point(Coordinate::xy(1.0, 1.0)),
            factory.create_point(Coordinate::xy(3.0, 0.0)),
            factory.create_point(Coordinate::xy(2.0, 5.0)),
        ]);

        collection.normalize();
        let xs: Vec<_> = collection.iter().filter_map(|p| p.x()).collect();
        assert_eq!(xs, vec![3.0, 2.0, 1.0]);

        let mut again = collection.clone();
        again.normalize();
        assert!(again.equals_exact(&collection, 0.0));
    }

    #[test]
    fn reverse_keeps_member_order() {
        let factory = GeometryFactory::new();
        let lines = factory.create_multi_line_string(vec![
            line(&factory, &[(0.0, 0.0), (1.0, 0.0)]),
            line(&factory, &[(5.0, 5.0), (6.0, 6.0)]),
        ]);

        let reversed = lines.reverse();
        assert_eq!(reversed.coordinate(), Some(&Coordinate::xy(1.0, 0.0)));
        assert!(reversed.reverse().equals_exact(&lines, 0.0));
    }

    struct FirstN {
        remaining: usize,
        changed: bool,
    }

    impl CoordinateSequenceFilter for FirstN {
        fn filter_rw(&mut self, sequence: &mut CoordinateSequence, index: usize) {
            if let Some(c) = sequence.get_mut(index) {
                c.y += 100.0;
                self.changed = true;
            }
            self.remaining -= 1;
        }

        fn is_done(&self) -> bool {
            self.remaining == 0
        }

        fn is_geometry_changed(&self) -> bool {
            self.changed
        }
    }

    #[test]
    fn sequence_filter_stops_early_and_refreshes() {
        let factory = GeometryFactory::new();
        let mut collection = factory.create_multi_point(vec![
            factory.create_point(Coordinate::xy(0.0, 0.0)),
            factory.create_point(Coordinate::xy(1.0, 0.0)),
            factory.create_point(Coordinate::xy(2.0, 0.0)),
        ]);

        collection.apply_sequence_filter_mut(&mut FirstN {
            remaining: 2,
            changed: false,
        });

        let ys: Vec<_> = collection.iter().filter_map(|p| p.y()).collect();
        assert_eq!(ys, vec![100.0, 100.0, 0.0]);
        assert_eq!(collection.envelope_internal().y_max(), 100.0);
    }

    #[test]
    fn sequence_filter_refreshes_nested_collections() {
        let factory = GeometryFactory::new();
        let inner = factory.create_geometry_collection(vec![square(&factory, 0.0, 0.0).into()]);
        let mut outer = factory.create_geometry_collection(vec![
            inner.into(),
            factory.create_point(Coordinate::xy(3.0, 0.0)).into(),
        ]);

        outer.apply_sequence_filter_mut(&mut FirstN {
            remaining: usize::MAX,
            changed: false,
        });

        assert_eq!(*outer.envelope_internal(), Envelope::new(0.0, 100.0, 3.0, 101.0));
        let inner = outer.geometry_n(0);
        assert_eq!(*inner.envelope_internal(), Envelope::new(0.0, 100.0, 1.0, 101.0));
        assert_eq!(
            *inner.geometry_n(0).envelope_internal(),
            Envelope::new(0.0, 100.0, 1.0, 101.0)
        );
    }

    #[test]
    fn geometry_filter_visits_members() {
        let factory = GeometryFactory::new();
        let collection = factory.create_geometry_collection(vec![
            factory.create_point(Coordinate::xy(0.0, 0.0)).into(),
            square(&factory, 0.0, 0.0).into(),
        ]);

        let mut names = vec![];
        collection.apply_geometry_filter(&mut |g: &dyn Geometry| names.push(g.geometry_type()));
        assert_eq!(names, vec!["GeometryCollection", "Point", "Polygon"]);
    }
}
