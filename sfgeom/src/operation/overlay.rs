//! Overlay operations: union, intersection, difference and symmetric difference.

use std::cmp::Ordering;
use std::sync::Arc;

use geo::BooleanOps;
use serde::{Deserialize, Serialize};

use crate::algorithm::{ensure_linear, Components};
use crate::collection::MultiPolygon;
use crate::coord::Coordinate;
use crate::dimension::Dimension;
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::geo_types::to_geo_multi_polygon;
use crate::geometry::{Geom, Geometry};
use crate::geometry_type::GeometryTypeId;
use crate::operation::relate::relate;
use crate::operation::run_engine;

/// Kind of an overlay operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayOp {
    /// Points belonging to both geometries.
    Intersection,
    /// Points belonging to any of the geometries.
    Union,
    /// Points of the first geometry not belonging to the second one.
    Difference,
    /// Points belonging to exactly one of the geometries.
    SymDifference,
}

impl OverlayOp {
    fn name(self) -> &'static str {
        match self {
            OverlayOp::Intersection => "intersection",
            OverlayOp::Union => "union",
            OverlayOp::Difference => "difference",
            OverlayOp::SymDifference => "symmetric difference",
        }
    }

    /// Dimension of an empty result of the operation.
    fn empty_result_dimension(self, a: Dimension, b: Dimension) -> Dimension {
        match self {
            OverlayOp::Intersection => a.min(b),
            OverlayOp::Union | OverlayOp::SymDifference => a.max(b),
            OverlayOp::Difference => a,
        }
    }
}

/// Computes the overlay of two geometries.
///
/// Both operands must be homogeneous: a non-empty heterogeneous collection is rejected with
/// [`GeometryError::InvalidArgument`]. Polygonal operands are overlaid by the `geo` boolean
/// operations, puntal operands are handled directly, and other combinations of non-empty
/// operands fail with [`GeometryError::Unsupported`].
pub fn overlay(a: &dyn Geometry, b: &dyn Geometry, op: OverlayOp) -> Result<Geom, GeometryError> {
    for g in [a, b] {
        ensure_linear(g, op.name())?;
        if g.geometry_type_id() == GeometryTypeId::GeometryCollection && !g.is_empty() {
            return Err(GeometryError::InvalidArgument(format!(
                "{} does not accept heterogeneous geometry collections",
                op.name()
            )));
        }
    }

    let factory = a.factory();
    if let Some(result) = overlay_empty(factory, a, b, op) {
        return Ok(result);
    }

    log::debug!(
        "Computing {} of {} and {}",
        op.name(),
        a.geometry_type(),
        b.geometry_type()
    );

    if a.is_polygonal() && b.is_polygonal() {
        let geo_a = to_geo_multi_polygon(&polygons_of(factory, a));
        let geo_b = to_geo_multi_polygon(&polygons_of(factory, b));
        let result = run_engine(op.name(), || match op {
            OverlayOp::Intersection => geo_a.intersection(&geo_b),
            OverlayOp::Union => geo_a.union(&geo_b),
            OverlayOp::Difference => geo_a.difference(&geo_b),
            OverlayOp::SymDifference => geo_a.xor(&geo_b),
        })?;

        return polygonal_result(factory, &result);
    }

    if a.is_puntal() || b.is_puntal() {
        return overlay_points(factory, a, b, op);
    }

    Err(GeometryError::Unsupported(format!(
        "{} of {} and {}",
        op.name(),
        a.geometry_type(),
        b.geometry_type()
    )))
}

/// Result of the operation if at least one of the operands is empty.
fn overlay_empty(
    factory: &Arc<GeometryFactory>,
    a: &dyn Geometry,
    b: &dyn Geometry,
    op: OverlayOp,
) -> Option<Geom> {
    if !a.is_empty() && !b.is_empty() {
        return None;
    }

    let empty = || factory.create_empty(op.empty_result_dimension(a.dimension(), b.dimension()));
    let result = match op {
        OverlayOp::Intersection => empty(),
        OverlayOp::Union | OverlayOp::SymDifference => match (a.is_empty(), b.is_empty()) {
            (true, true) => empty(),
            (true, false) => b.clone_geom(),
            _ => a.clone_geom(),
        },
        OverlayOp::Difference => {
            if a.is_empty() {
                empty()
            } else {
                a.clone_geom()
            }
        }
    };

    Some(result)
}

fn polygons_of(factory: &Arc<GeometryFactory>, g: &dyn Geometry) -> MultiPolygon {
    let components = Components::extract(g);
    factory.create_multi_polygon(components.polygons.into_iter().cloned().collect())
}

/// Converts a result of the boolean engine: no polygons give an empty polygon, a single polygon
/// is returned as is, and several polygons become a multipolygon.
pub(crate) fn polygonal_result(
    factory: &Arc<GeometryFactory>,
    result: &geo_types::MultiPolygon<f64>,
) -> Result<Geom, GeometryError> {
    let mut polygons = result
        .iter()
        .map(|polygon| factory.from_geo_polygon(polygon))
        .collect::<Result<Vec<_>, _>>()?;
    polygons.retain(|polygon| !polygon.is_empty());

    Ok(match polygons.len() {
        0 => factory.create_empty_polygon().into(),
        1 => polygons.remove(0).into(),
        _ => factory.create_multi_polygon(polygons).into(),
    })
}

fn sorted_unique(mut coordinates: Vec<Coordinate>) -> Vec<Coordinate> {
    coordinates.sort_by(|a, b| a.compare_to(b));
    coordinates.dedup_by(|a, b| a.compare_to(b) == Ordering::Equal);
    coordinates
}

fn puntal_result(factory: &Arc<GeometryFactory>, coordinates: Vec<Coordinate>) -> Geom {
    let mut points: Vec<_> = sorted_unique(coordinates)
        .into_iter()
        .map(|c| factory.create_point(c))
        .collect();

    match points.len() {
        0 => factory.create_empty_point().into(),
        1 => points.remove(0).into(),
        _ => factory.create_multi_point(points).into(),
    }
}

/// Members of a homogeneous geometry as separate geometries.
fn push_parts(parts: &mut Vec<Geom>, g: &dyn Geometry) {
    if g.is_collection() {
        for i in 0..g.num_geometries() {
            push_parts(parts, g.geometry_n(i));
        }
    } else if !g.is_empty() {
        parts.push(g.clone_geom());
    }
}

fn points_not_in(points: &[&Coordinate], other: &Components) -> Vec<Coordinate> {
    points
        .iter()
        .filter(|c| !other.intersects_coordinate(c))
        .map(|c| **c)
        .collect()
}

fn points_in(points: &[&Coordinate], other: &Components) -> Vec<Coordinate> {
    points
        .iter()
        .filter(|c| other.intersects_coordinate(c))
        .map(|c| **c)
        .collect()
}

fn overlay_points(
    factory: &Arc<GeometryFactory>,
    a: &dyn Geometry,
    b: &dyn Geometry,
    op: OverlayOp,
) -> Result<Geom, GeometryError> {
    let components_a = Components::extract(a);
    let components_b = Components::extract(b);

    let result = match op {
        OverlayOp::Intersection => {
            let (points, other) = if a.is_puntal() {
                (&components_a.points, &components_b)
            } else {
                (&components_b.points, &components_a)
            };
            puntal_result(factory, points_in(points, other))
        }
        OverlayOp::Difference => {
            if a.is_puntal() {
                puntal_result(factory, points_not_in(&components_a.points, &components_b))
            } else {
                a.clone_geom()
            }
        }
        OverlayOp::Union | OverlayOp::SymDifference => {
            if a.is_puntal() && b.is_puntal() {
                let mut points = points_not_in(&components_a.points, &components_b);
                points.extend(points_not_in(&components_b.points, &components_a));
                if op == OverlayOp::Union {
                    points.extend(points_in(&components_a.points, &components_b));
                }
                return Ok(puntal_result(factory, points));
            }

            let (points, other_components, other) = if a.is_puntal() {
                (&components_a.points, &components_b, b)
            } else {
                (&components_b.points, &components_a, a)
            };

            let mut parts: Vec<Geom> = sorted_unique(points_not_in(points, other_components))
                .into_iter()
                .map(|c| factory.create_point(c).into())
                .collect();
            if parts.is_empty() {
                return Ok(other.clone_geom());
            }

            push_parts(&mut parts, other);
            factory.build_geometry(parts)
        }
    };

    Ok(result)
}

/// Dissolves all components of a geometry.
///
/// Polygons are unioned together, linestrings covered by the polygons are dropped as well as
/// duplicate linestrings, and points lying on any other component are dropped. The result has
/// the points first, then the lines, then the polygons. An empty input gives an empty geometry of
/// the same dimension.
pub fn unary_union(g: &dyn Geometry) -> Result<Geom, GeometryError> {
    ensure_linear(g, "unary union")?;
    let factory = g.factory();
    if g.is_empty() {
        return Ok(factory.create_empty(g.dimension()));
    }

    log::debug!("Computing unary union of {}", g.geometry_type());

    let components = Components::extract(g);

    let mut polygon_parts = Vec::new();
    if !components.polygons.is_empty() {
        let dissolved = union_all(
            components
                .polygons
                .iter()
                .map(|&polygon| {
                    to_geo_multi_polygon(&factory.create_multi_polygon(vec![polygon.clone()]))
                })
                .collect(),
        )?;
        push_parts(&mut polygon_parts, &*polygonal_result(factory, &dissolved)?);
    }

    let polygon_union = factory.build_geometry(polygon_parts.iter().map(|p| p.clone_geom()).collect());

    let mut line_parts: Vec<Geom> = Vec::new();
    for line in &components.lines {
        let candidate: Geom = factory.create_line_string((*line).clone())?.into();
        let mut normalized = candidate.clone_geom();
        normalized.normalize();

        let duplicate = line_parts.iter().any(|existing| {
            let mut existing = existing.clone_geom();
            existing.normalize();
            existing.equals_exact(&*normalized, 0.0)
        });
        if duplicate {
            continue;
        }

        if !polygon_union.is_empty() && relate(&*polygon_union, &*candidate)?.is_covers() {
            continue;
        }

        line_parts.push(candidate);
    }

    let higher = Components {
        points: Vec::new(),
        lines: components.lines.clone(),
        polygons: components.polygons.clone(),
    };
    let points = puntal_result(factory, points_not_in(&components.points, &higher));

    let mut parts = Vec::new();
    push_parts(&mut parts, &*points);
    parts.extend(line_parts);
    parts.extend(polygon_parts);

    Ok(factory.build_geometry(parts))
}

/// Unions the multipolygons pairwise until a single one is left.
pub(crate) fn union_all(
    mut parts: Vec<geo_types::MultiPolygon<f64>>,
) -> Result<geo_types::MultiPolygon<f64>, GeometryError> {
    while parts.len() > 1 {
        let mut merged = Vec::with_capacity(parts.len() / 2 + 1);
        let mut iter = parts.into_iter();
        while let Some(first) = iter.next() {
            match iter.next() {
                Some(second) => merged.push(run_engine("union", || first.union(&second))?),
                None => merged.push(first),
            }
        }
        parts = merged;
    }

    Ok(parts.pop().unwrap_or_else(|| geo_types::MultiPolygon(vec![])))
}
