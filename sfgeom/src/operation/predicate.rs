//! Named spatial predicates.
//!
//! Every predicate is defined through the DE-9IM matrix of the operands. Envelopes are checked
//! first, so that obviously disjoint geometries do not reach the relate engine.

use crate::algorithm::ensure_linear;
use crate::error::GeometryError;
use crate::geometry::Geometry;
use crate::geometry_type::GeometryTypeId;
use crate::operation::relate::relate;

fn check_operands(a: &dyn Geometry, b: &dyn Geometry, predicate: &str) -> Result<(), GeometryError> {
    for g in [a, b] {
        ensure_linear(g, predicate)?;
        if g.geometry_type_id() == GeometryTypeId::GeometryCollection && !g.is_empty() {
            return Err(GeometryError::InvalidArgument(format!(
                "{predicate} does not accept heterogeneous geometry collections"
            )));
        }
    }

    Ok(())
}

fn envelopes_intersect(a: &dyn Geometry, b: &dyn Geometry) -> bool {
    a.envelope_internal().intersects(b.envelope_internal())
}

/// True if the geometries have at least one point in common.
pub fn intersects(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    check_operands(a, b, "intersects")?;
    if !envelopes_intersect(a, b) {
        return Ok(false);
    }

    Ok(relate(a, b)?.is_intersects())
}

/// True if the geometries have no point in common.
pub fn disjoint(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    check_operands(a, b, "disjoint")?;
    Ok(!intersects(a, b)?)
}

/// True if the geometries have common points, but only on the boundaries.
pub fn touches(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    check_operands(a, b, "touches")?;
    if !envelopes_intersect(a, b) {
        return Ok(false);
    }

    Ok(relate(a, b)?.is_touches(a.dimension(), b.dimension()))
}

/// True if the geometries have some but not all interior points in common.
pub fn crosses(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    check_operands(a, b, "crosses")?;
    if !envelopes_intersect(a, b) {
        return Ok(false);
    }

    Ok(relate(a, b)?.is_crosses(a.dimension(), b.dimension()))
}

/// True if `b` lies in `a` and the interiors have a common point.
pub fn contains(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    check_operands(a, b, "contains")?;
    if b.is_empty() || !a.envelope_internal().covers(b.envelope_internal()) {
        return Ok(false);
    }

    Ok(relate(a, b)?.is_contains())
}

/// True if `a` lies in `b` and the interiors have a common point.
pub fn within(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    contains(b, a)
}

/// True if every point of `b` is a point of `a`.
pub fn covers(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    check_operands(a, b, "covers")?;
    if b.is_empty() || !a.envelope_internal().covers(b.envelope_internal()) {
        return Ok(false);
    }

    Ok(relate(a, b)?.is_covers())
}

/// True if every point of `a` is a point of `b`.
pub fn covered_by(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    covers(b, a)
}

/// True if the geometries have the same dimension, share interior points, and neither covers
/// the other.
pub fn overlaps(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    check_operands(a, b, "overlaps")?;
    if !envelopes_intersect(a, b) {
        return Ok(false);
    }

    Ok(relate(a, b)?.is_overlaps(a.dimension(), b.dimension()))
}

/// True if the geometries are topologically equal. Two empty geometries are equal.
pub fn equals(a: &dyn Geometry, b: &dyn Geometry) -> Result<bool, GeometryError> {
    check_operands(a, b, "equals")?;
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ok(true),
        (true, false) | (false, true) => return Ok(false),
        (false, false) => {}
    }

    if a.envelope_internal() != b.envelope_internal() {
        return Ok(false);
    }

    Ok(relate(a, b)?.is_equals(a.dimension(), b.dimension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{Coordinate, CoordinateSequence};
    use crate::factory::GeometryFactory;
    use crate::geometry::Geom;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    fn square(factory: &Arc<GeometryFactory>, x: f64, y: f64, size: f64) -> Geom {
        let shell = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (x, y),
                (x, y + size),
                (x + size, y + size),
                (x + size, y),
                (x, y),
            ]))
            .expect("valid ring");
        factory.create_polygon(shell, vec![]).expect("valid polygon").into()
    }

    fn line(factory: &Arc<GeometryFactory>, pairs: &[(f64, f64)]) -> Geom {
        factory
            .create_line_string(CoordinateSequence::from_xy(pairs))
            .expect("valid line")
            .into()
    }

    #[test]
    fn polygons() {
        let factory = GeometryFactory::new();
        let big = square(&factory, 0.0, 0.0, 4.0);
        let small = square(&factory, 1.0, 1.0, 1.0);
        let overlapping = square(&factory, 3.0, 3.0, 2.0);
        let far = square(&factory, 10.0, 10.0, 1.0);
        let adjacent = square(&factory, 4.0, 0.0, 1.0);

        assert_matches!(big.contains(&*small), Ok(true));
        assert_matches!(small.within(&*big), Ok(true));
        assert_matches!(big.covers(&*small), Ok(true));
        assert_matches!(small.covered_by(&*big), Ok(true));
        assert_matches!(big.overlaps(&*overlapping), Ok(true));
        assert_matches!(big.overlaps(&*small), Ok(false));
        assert_matches!(big.disjoint(&*far), Ok(true));
        assert_matches!(big.intersects(&*far), Ok(false));
        assert_matches!(big.touches(&*adjacent), Ok(true));
        assert_matches!(big.intersects(&*adjacent), Ok(true));
    }

    #[test]
    fn crossing_lines() {
        let factory = GeometryFactory::new();
        let a = line(&factory, &[(0.0, 0.0), (2.0, 2.0)]);
        let b = line(&factory, &[(0.0, 2.0), (2.0, 0.0)]);
        assert_matches!(a.crosses(&*b), Ok(true));
        assert_matches!(a.touches(&*b), Ok(false));

        let polygon = square(&factory, 1.0, -1.0, 3.0);
        assert_matches!(a.crosses(&*polygon), Ok(true));
    }

    #[test]
    fn equality_ignores_vertex_order() {
        let factory = GeometryFactory::new();
        let a = square(&factory, 0.0, 0.0, 1.0);
        let b = a.reverse();
        assert_matches!(a.equals(&*b), Ok(true));

        let empty_point = factory.create_empty_point();
        let empty_polygon = factory.create_empty_polygon();
        assert_matches!(empty_point.equals(&empty_polygon), Ok(true));
        assert_matches!(a.equals(&empty_point), Ok(false));
    }

    #[test]
    fn covers_boundary_point() {
        let factory = GeometryFactory::new();
        let polygon = square(&factory, 0.0, 0.0, 1.0);
        let corner = factory.create_point(Coordinate::xy(0.0, 0.0));
        assert_matches!(polygon.covers(&corner), Ok(true));
        assert_matches!(polygon.contains(&corner), Ok(false));
        assert_matches!(corner.touches(&*polygon), Ok(true));
    }

    #[test]
    fn heterogeneous_collections_are_rejected() {
        let factory = GeometryFactory::new();
        let polygon = square(&factory, 0.0, 0.0, 1.0);
        let collection = factory.create_geometry_collection(vec![polygon.clone_geom()]);
        assert_matches!(
            polygon.intersects(&collection),
            Err(GeometryError::InvalidArgument(_))
        );

        let empty = factory.create_geometry_collection(vec![]);
        assert_matches!(polygon.intersects(&empty), Ok(false));
    }
}
