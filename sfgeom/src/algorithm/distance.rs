//! Euclidean distance between geometries.

use crate::algorithm::locate::{locate_in_polygons, Location};
use crate::algorithm::{ensure_linear, Components, Segment};
use crate::coord::{Coordinate, CoordinateSequence};
use crate::error::GeometryError;
use crate::geometry::Geometry;

/// Minimum distance between the geometries, 0 if either of them is empty.
///
/// If a component of one geometry lies inside a polygon of the other, the distance is 0.
/// Otherwise it is the smallest distance between their vertices and segments.
pub fn distance(a: &dyn Geometry, b: &dyn Geometry) -> Result<f64, GeometryError> {
    ensure_linear(a, "distance")?;
    ensure_linear(b, "distance")?;
    if a.is_empty() || b.is_empty() {
        return Ok(0.0);
    }

    let components_a = Components::extract(a);
    let components_b = Components::extract(b);

    if is_inside(&components_a, &components_b) || is_inside(&components_b, &components_a) {
        return Ok(0.0);
    }

    let mut min = f64::INFINITY;
    for p in &components_a.points {
        for q in &components_b.points {
            min = min.min(p.distance(q));
        }
        for line in components_b.segment_sequences() {
            min = min.min(point_to_line(p, line));
        }
    }

    for line in components_a.segment_sequences() {
        for q in &components_b.points {
            min = min.min(point_to_line(q, line));
        }
        for other in components_b.segment_sequences() {
            min = min.min(line_to_line(line, other));
            if min == 0.0 {
                return Ok(0.0);
            }
        }
    }

    Ok(min)
}

/// True if the distance between the geometries does not exceed `max_distance`. False if either
/// of them is empty.
pub fn is_within_distance(
    a: &dyn Geometry,
    b: &dyn Geometry,
    max_distance: f64,
) -> Result<bool, GeometryError> {
    ensure_linear(a, "distance")?;
    ensure_linear(b, "distance")?;
    if a.is_empty() || b.is_empty() {
        return Ok(false);
    }

    if a.envelope_internal().distance(b.envelope_internal()) > max_distance {
        return Ok(false);
    }

    Ok(distance(a, b)? <= max_distance)
}

/// True if a vertex of any component of `inner` lies in or on a polygon of `outer`.
fn is_inside(inner: &Components, outer: &Components) -> bool {
    !outer.polygons.is_empty()
        && inner
            .representative_coordinates()
            .into_iter()
            .any(|c| locate_in_polygons(c, outer.polygons.iter().copied()) != Location::Exterior)
}

fn segments(line: &CoordinateSequence) -> impl Iterator<Item = Segment<'_>> {
    line.as_slice()
        .windows(2)
        .map(|pair| Segment(&pair[0], &pair[1]))
}

fn point_to_line(p: &Coordinate, line: &CoordinateSequence) -> f64 {
    if line.size() == 1 {
        return line[0].distance(p);
    }

    segments(line)
        .map(|segment| segment.distance_to_point(p))
        .fold(f64::INFINITY, f64::min)
}

fn line_to_line(a: &CoordinateSequence, b: &CoordinateSequence) -> f64 {
    let mut min = f64::INFINITY;
    for s in segments(a) {
        for t in segments(b) {
            min = min.min(s.distance_to_segment(&t));
            if min == 0.0 {
                return 0.0;
            }
        }
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::GeometryFactory;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn square(factory: &std::sync::Arc<GeometryFactory>, x: f64, y: f64, size: f64) -> crate::Polygon {
        let shell = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (x, y),
                (x, y + size),
                (x + size, y + size),
                (x + size, y),
                (x, y),
            ]))
            .expect("valid ring");
        factory.create_polygon(shell, vec![]).expect("valid polygon")
    }

    #[test]
    fn point_to_polygon() {
        let factory = GeometryFactory::new();
        let polygon = square(&factory, 0.0, 0.0, 2.0);
        let outside = factory.create_point(Coordinate::xy(5.0, 6.0));
        let inside = factory.create_point(Coordinate::xy(1.0, 1.0));

        assert_abs_diff_eq!(outside.distance(&polygon).expect("distance"), 5.0);
        assert_abs_diff_eq!(polygon.distance(&outside).expect("distance"), 5.0);
        assert_abs_diff_eq!(inside.distance(&polygon).expect("distance"), 0.0);
    }

    #[test]
    fn crossing_lines() {
        let factory = GeometryFactory::new();
        let a = factory
            .create_line_string(CoordinateSequence::from_xy(&[(0.0, 0.0), (2.0, 2.0)]))
            .expect("valid line");
        let b = factory
            .create_line_string(CoordinateSequence::from_xy(&[(0.0, 2.0), (2.0, 0.0)]))
            .expect("valid line");
        let c = factory
            .create_line_string(CoordinateSequence::from_xy(&[(0.0, 5.0), (2.0, 5.0)]))
            .expect("valid line");

        assert_abs_diff_eq!(a.distance(&b).expect("distance"), 0.0);
        assert_abs_diff_eq!(a.distance(&c).expect("distance"), 3.0);
    }

    #[test]
    fn empty_operands() {
        let factory = GeometryFactory::new();
        let polygon = square(&factory, 0.0, 0.0, 2.0);
        let empty = factory.create_empty_point();

        assert_abs_diff_eq!(polygon.distance(&empty).expect("distance"), 0.0);
        assert_matches!(polygon.is_within_distance(&empty, 100.0), Ok(false));
    }

    #[test]
    fn within_distance() {
        let factory = GeometryFactory::new();
        let a = square(&factory, 0.0, 0.0, 1.0);
        let b = square(&factory, 3.0, 0.0, 1.0);

        assert_matches!(a.is_within_distance(&b, 2.0), Ok(true));
        assert_matches!(a.is_within_distance(&b, 1.9), Ok(false));
        assert_matches!(a.is_within_distance(&b, 100.0), Ok(true));
    }
}
