use std::any::Any;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::coord::{Coordinate, CoordinateSequence};
use crate::dimension::Dimension;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::filter::{
    CoordinateFilter, CoordinateFilterMut, CoordinateSequenceFilter, GeometryComponentFilter,
    GeometryComponentFilterMut,
};
use crate::geometry::{Geom, Geometry, GeometryBase};
use crate::geometry_type::GeometryTypeId;
use crate::line_string::LinearRing;

/// A surface bounded by an exterior ring (shell) with zero or more holes.
///
/// Rings are not validated beyond their own closedness: a shell that self-intersects or a hole
/// outside of the shell give a polygon whose derived values (area, relations) are undefined.
#[derive(Debug, Clone)]
pub struct Polygon {
    base: GeometryBase,
    shell: LinearRing,
    holes: Vec<LinearRing>,
}

impl Polygon {
    pub(crate) fn new(
        shell: LinearRing,
        holes: Vec<LinearRing>,
        factory: &Arc<GeometryFactory>,
    ) -> Self {
        Self {
            base: GeometryBase::new(factory),
            shell,
            holes,
        }
    }

    /// The exterior ring.
    pub fn exterior_ring(&self) -> &LinearRing {
        &self.shell
    }

    /// Number of holes.
    pub fn num_interior_rings(&self) -> usize {
        self.holes.len()
    }

    /// Hole at the given index.
    pub fn interior_ring_n(&self, n: usize) -> Option<&LinearRing> {
        self.holes.get(n)
    }

    /// All holes.
    pub fn interior_rings(&self) -> &[LinearRing] {
        &self.holes
    }

    /// Iterates over the shell and then the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    /// True if the polygon is an axis-aligned rectangle without holes.
    pub fn is_rectangle(&self) -> bool {
        if !self.holes.is_empty() || self.shell.num_points() != 5 {
            return false;
        }

        let envelope = self.envelope_internal();
        let points = self.shell.coordinate_sequence();
        for coord in points {
            if coord.x != envelope.x_min() && coord.x != envelope.x_max() {
                return false;
            }
            if coord.y != envelope.y_min() && coord.y != envelope.y_max() {
                return false;
            }
        }

        points.as_slice().windows(2).all(|pair| {
            let x_changed = pair[0].x != pair[1].x;
            let y_changed = pair[0].y != pair[1].y;
            x_changed != y_changed
        })
    }

    pub(crate) fn reversed(&self) -> Self {
        Self {
            base: self.base.clone(),
            shell: self.shell.reversed(),
            holes: self.holes.iter().map(LinearRing::reversed).collect(),
        }
    }
}

impl Geometry for Polygon {
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
        for ring in std::iter::once(&mut self.shell).chain(self.holes.iter_mut()) {
            ring.set_srid(srid);
        }
    }

    fn clone_geom(&self) -> Geom {
        Geom::Polygon(self.clone())
    }

    fn reverse(&self) -> Geom {
        Geom::Polygon(self.reversed())
    }

    fn geometry_type_id(&self) -> GeometryTypeId {
        GeometryTypeId::Polygon
    }

    fn coordinate(&self) -> Option<&Coordinate> {
        self.shell.coordinate()
    }

    fn coordinates(&self) -> CoordinateSequence {
        let mut coordinates = CoordinateSequence::empty(self.has_z(), self.has_m());
        for ring in self.rings() {
            coordinates.extend_from(ring.coordinate_sequence());
        }
        coordinates
    }

    fn num_points(&self) -> usize {
        self.rings().map(|ring| ring.num_points()).sum()
    }

    fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    fn dimension(&self) -> Dimension {
        Dimension::A
    }

    fn coordinate_dimension(&self) -> u8 {
        self.rings()
            .map(|ring| ring.coordinate_dimension())
            .fold(2, u8::max)
    }

    fn has_z(&self) -> bool {
        self.shell.has_z()
    }

    fn has_m(&self) -> bool {
        self.shell.has_m()
    }

    fn boundary(&self) -> Result<Geom, GeometryError> {
        let factory = self.factory();
        if self.is_empty() {
            return Ok(factory.create_multi_line_string(vec![]).into());
        }

        if self.holes.is_empty() {
            return Ok(self.shell.to_line_string().into());
        }

        let lines = self.rings().map(LinearRing::to_line_string).collect();
        Ok(factory.create_multi_line_string(lines).into())
    }

    fn boundary_dimension(&self) -> Dimension {
        Dimension::L
    }

    fn envelope_internal(&self) -> &Envelope {
        self.shell.envelope_internal()
    }

    fn equals_exact(&self, other: &dyn Geometry, tolerance: f64) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Polygon>() else {
            return false;
        };

        self.shell.equals_exact(&other.shell, tolerance)
            && self.holes.len() == other.holes.len()
            && self
                .holes
                .iter()
                .zip(&other.holes)
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }

    fn equals_identical(&self, other: &dyn Geometry) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Polygon>() else {
            return false;
        };

        self.shell.equals_identical(&other.shell)
            && self.holes.len() == other.holes.len()
            && self
                .holes
                .iter()
                .zip(&other.holes)
                .all(|(a, b)| a.equals_identical(b))
    }

    fn apply_coordinate_filter(&self, filter: &mut dyn CoordinateFilter) {
        for ring in self.rings() {
            ring.apply_coordinate_filter(filter);
        }
    }

    fn apply_coordinate_filter_mut(&mut self, filter: &mut dyn CoordinateFilterMut) {
        self.shell.apply_coordinate_filter_mut(filter);
        for hole in &mut self.holes {
            hole.apply_coordinate_filter_mut(filter);
        }
        self.geometry_changed_action();
    }

    fn apply_component_filter(&self, filter: &mut dyn GeometryComponentFilter) {
        filter.filter(self);
        for ring in self.rings() {
            if filter.is_done() {
                return;
            }
            ring.apply_component_filter(filter);
        }
    }

    fn apply_component_filter_mut(&mut self, filter: &mut dyn GeometryComponentFilterMut) {
        filter.filter(self);
        for ring in std::iter::once(&mut self.shell).chain(self.holes.iter_mut()) {
            if filter.is_done() {
                break;
            }
            ring.apply_component_filter_mut(filter);
        }
        self.geometry_changed_action();
    }

    fn apply_sequence_filter(&self, filter: &mut dyn CoordinateSequenceFilter) {
        for ring in self.rings() {
            ring.apply_sequence_filter(filter);
            if filter.is_done() {
                break;
            }
        }
    }

    fn apply_sequence_filter_mut(&mut self, filter: &mut dyn CoordinateSequenceFilter) {
        for ring in std::iter::once(&mut self.shell).chain(self.holes.iter_mut()) {
            ring.apply_sequence_filter_mut(filter);
            if filter.is_done() {
                break;
            }
        }

        if filter.is_geometry_changed() {
            self.geometry_changed_action();
        }
    }

    fn normalize(&mut self) {
        self.shell.normalize_oriented(true);
        for hole in &mut self.holes {
            hole.normalize_oriented(false);
        }
        self.holes.sort_by(|a, b| b.compare_to(a));
    }

    fn compare_to_same_class(&self, other: &dyn Geometry) -> Ordering {
        debug_assert_eq!(self.sort_index(), other.sort_index());
        let Some(other) = other.as_any().downcast_ref::<Polygon>() else {
            return self.sort_index().cmp(&other.sort_index());
        };

        let by_shell = self.shell.compare_to_same_class(&other.shell);
        if by_shell != Ordering::Equal {
            return by_shell;
        }

        let by_holes = self.holes.len().cmp(&other.holes.len());
        if by_holes != Ordering::Equal {
            return by_holes;
        }

        self.holes
            .iter()
            .zip(&other.holes)
            .map(|(a, b)| a.compare_to_same_class(b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| h.signed_area().abs()).sum();
        self.shell.signed_area().abs() - holes
    }

    fn length(&self) -> f64 {
        self.rings().map(|ring| ring.length()).sum()
    }

    fn geometry_changed(&mut self) {
        self.shell.geometry_changed();
        for hole in &mut self.holes {
            hole.geometry_changed();
        }
        self.geometry_changed_action();
    }

    fn geometry_changed_action(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ring(factory: &Arc<GeometryFactory>, pairs: &[(f64, f64)]) -> LinearRing {
        factory
            .create_linear_ring(CoordinateSequence::from_xy(pairs))
            .expect("valid ring")
    }

    fn square_with_hole(factory: &Arc<GeometryFactory>) -> Polygon {
        let shell = ring(
            factory,
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        );
        let hole = ring(
            factory,
            &[(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0), (2.0, 2.0)],
        );
        factory.create_polygon(shell, vec![hole]).expect("valid polygon")
    }

    #[test]
    fn area_and_perimeter() {
        let polygon = square_with_hole(&GeometryFactory::new());
        assert_abs_diff_eq!(polygon.area(), 96.0);
        assert_abs_diff_eq!(polygon.length(), 48.0);
        assert_eq!(polygon.num_points(), 10);
        assert!(!polygon.is_rectangle());
    }

    #[test]
    fn boundary_of_polygon_with_hole() {
        let polygon = square_with_hole(&GeometryFactory::new());
        let boundary = polygon.boundary().expect("polygon boundary");
        assert_eq!(boundary.geometry_type_id(), GeometryTypeId::MultiLineString);
        assert_eq!(boundary.num_geometries(), 2);
        assert_eq!(polygon.boundary_dimension(), Dimension::L);
    }

    #[test]
    fn normalize_orients_rings() {
        let mut polygon = square_with_hole(&GeometryFactory::new());
        polygon.normalize();
        assert!(!polygon.exterior_ring().is_ccw());
        assert!(polygon.interior_ring_n(0).is_some_and(|h| h.is_ccw()));
        assert_eq!(polygon.coordinate(), Some(&Coordinate::xy(0.0, 0.0)));

        let mut again = polygon.clone();
        again.normalize();
        assert!(again.equals_exact(&polygon, 0.0));
    }

    #[test]
    fn rectangle() {
        let factory = GeometryFactory::new();
        let shell = ring(
            &factory,
            &[(0.0, 0.0), (0.0, 1.0), (2.0, 1.0), (2.0, 0.0), (0.0, 0.0)],
        );
        let polygon = factory.create_polygon(shell, vec![]).expect("valid polygon");
        assert!(polygon.is_rectangle());
    }

    #[test]
    fn component_filter_visits_rings() {
        let polygon = square_with_hole(&GeometryFactory::new());
        let mut kinds = vec![];
        struct Collect<'a>(&'a mut Vec<GeometryTypeId>);
        impl GeometryComponentFilter for Collect<'_> {
            fn filter(&mut self, component: &dyn Geometry) {
                self.0.push(component.geometry_type_id());
            }
        }

        polygon.apply_component_filter(&mut Collect(&mut kinds));
        assert_eq!(
            kinds,
            vec![
                GeometryTypeId::Polygon,
                GeometryTypeId::LinearRing,
                GeometryTypeId::LinearRing
            ]
        );
    }

    #[test]
    fn mutation_refreshes_envelope() {
        let mut polygon = square_with_hole(&GeometryFactory::new());
        polygon.apply_coordinate_filter_mut(&mut |c: &mut Coordinate| {
            c.x *= 2.0;
        });
        assert_eq!(polygon.envelope_internal().x_max(), 20.0);
        assert_abs_diff_eq!(polygon.area(), 192.0);
    }
}
