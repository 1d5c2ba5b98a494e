//! Convex hull of a set of vertices.

use crate::algorithm::orientation::Orientation;
use crate::algorithm::ensure_linear;
use crate::coord::{Coordinate, CoordinateSequence};
use crate::error::GeometryError;
use crate::geometry::{Geom, Geometry};

/// Convex hull of all vertices of the geometry, computed with the monotone chain algorithm.
///
/// The result depends on the hull degeneracy: an empty collection for no vertices, a point for a
/// single distinct vertex, a two-point linestring for collinear vertices, and a polygon with a
/// clockwise shell otherwise.
pub fn convex_hull(g: &dyn Geometry) -> Result<Geom, GeometryError> {
    ensure_linear(g, "convex hull")?;
    let factory = g.factory();

    let mut points: Vec<Coordinate> = g
        .coordinates()
        .iter()
        .map(|c| Coordinate::xy(c.x, c.y))
        .collect();
    points.sort_by(|a, b| a.compare_to(b));
    points.dedup_by(|a, b| a.equals_2d(b));

    let result: Geom = match points.as_slice() {
        [] => factory.create_geometry_collection(vec![]).into(),
        [single] => factory.create_point(*single).into(),
        _ => {
            let hull = monotone_chain(&points);
            if hull.len() < 3 {
                let (Some(first), Some(last)) = (points.first(), points.last()) else {
                    return Ok(factory.create_geometry_collection(vec![]).into());
                };
                factory
                    .create_line_string(CoordinateSequence::xy(vec![*first, *last]))?
                    .into()
            } else {
                let mut shell: Vec<Coordinate> = hull.into_iter().rev().collect();
                shell.push(shell[0]);
                let shell = factory.create_linear_ring(CoordinateSequence::xy(shell))?;
                factory.create_polygon(shell, vec![])?.into()
            }
        }
    };

    Ok(result)
}

/// Counter-clockwise hull of sorted distinct points without collinear vertices.
fn monotone_chain(points: &[Coordinate]) -> Vec<Coordinate> {
    let mut lower: Vec<Coordinate> = Vec::with_capacity(points.len());
    for p in points {
        push_turning_left(&mut lower, p);
    }

    let mut upper: Vec<Coordinate> = Vec::with_capacity(points.len());
    for p in points.iter().rev() {
        push_turning_left(&mut upper, p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn push_turning_left(chain: &mut Vec<Coordinate>, p: &Coordinate) {
    while chain.len() >= 2 {
        let a = &chain[chain.len() - 2];
        let b = &chain[chain.len() - 1];
        if Orientation::triplet(a, b, p) == Orientation::Counterclockwise {
            break;
        }
        chain.pop();
    }
    chain.push(*p);
}
