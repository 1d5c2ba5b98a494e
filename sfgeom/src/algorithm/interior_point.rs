//! A point guaranteed to lie on a geometry.

use crate::algorithm::centroid::centroid_coordinate;
use crate::algorithm::Components;
use crate::coord::Coordinate;
use crate::error::GeometryError;
use crate::geometry::Geometry;
use crate::point::Point;
use crate::polygon::Polygon;

/// Computes an interior point of the geometry.
///
/// For areas the point is the middle of the widest interior section of a horizontal scan line
/// placed near the vertical centre of every polygon. For lines it is the inner vertex closest to
/// the centroid (an end point if there are no inner vertices), for points the point closest to
/// the centroid. Only the components of the highest dimension are considered.
pub fn interior_point(g: &dyn Geometry) -> Result<Point, GeometryError> {
    let factory = g.factory();
    let components = Components::extract(g);

    let found = area_interior_point(&components.polygons)
        .or_else(|| line_interior_point(g, &components))
        .or_else(|| nearest_to_centroid(g, components.points.iter().copied()));

    Ok(match found {
        Some(c) => factory.create_point(c),
        None => factory.create_empty_point(),
    })
}

fn area_interior_point(polygons: &[&Polygon]) -> Option<Coordinate> {
    let mut best: Option<(f64, Coordinate)> = None;
    for polygon in polygons {
        if let Some((width, c)) = widest_section(polygon) {
            if best.map_or(true, |(best_width, _)| width > best_width) {
                best = Some((width, c));
            }
        }
    }

    best.map(|(_, c)| c)
}

/// Y ordinate close to the centre of the polygon that does not go through any vertex.
fn scan_line_y(polygon: &Polygon) -> f64 {
    let envelope = polygon.envelope_internal();
    let centre = (envelope.y_min() + envelope.y_max()) / 2.0;
    let mut lo = envelope.y_min();
    let mut hi = envelope.y_max();

    for c in polygon.rings().flat_map(|ring| ring.coordinate_sequence().iter()) {
        if c.y <= centre {
            if c.y > lo {
                lo = c.y;
            }
        } else if c.y < hi {
            hi = c.y;
        }
    }

    (lo + hi) / 2.0
}

fn widest_section(polygon: &Polygon) -> Option<(f64, Coordinate)> {
    let y = scan_line_y(polygon);

    let mut crossings: Vec<f64> = polygon
        .rings()
        .flat_map(|ring| ring.coordinate_sequence().as_slice().windows(2))
        .filter(|pair| (pair[0].y > y) != (pair[1].y > y))
        .map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y)
        })
        .collect();
    crossings.sort_by(f64::total_cmp);

    crossings
        .chunks_exact(2)
        .map(|pair| (pair[1] - pair[0], Coordinate::xy((pair[0] + pair[1]) / 2.0, y)))
        .filter(|(width, _)| *width > 0.0)
        .max_by(|a, b| a.0.total_cmp(&b.0))
}

fn line_interior_point(g: &dyn Geometry, components: &Components) -> Option<Coordinate> {
    let lines: Vec<_> = components.segment_sequences().collect();
    if lines.is_empty() {
        return None;
    }

    let inner = lines.iter().flat_map(|line| {
        let slice = line.as_slice();
        let inner: &[Coordinate] = if slice.len() > 2 {
            &slice[1..slice.len() - 1]
        } else {
            &[]
        };
        inner.iter()
    });
    if let Some(c) = nearest_to_centroid(g, inner) {
        return Some(c);
    }

    let ends = lines
        .iter()
        .flat_map(|line| line.first().into_iter().chain(line.last()));
    nearest_to_centroid(g, ends)
}

fn nearest_to_centroid<'a>(
    g: &dyn Geometry,
    candidates: impl IntoIterator<Item = &'a Coordinate>,
) -> Option<Coordinate> {
    let centroid = centroid_coordinate(g)?;
    candidates
        .into_iter()
        .min_by(|a, b| a.distance(&centroid).total_cmp(&b.distance(&centroid)))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::CoordinateSequence;
    use crate::factory::GeometryFactory;
    use approx::assert_abs_diff_eq;

    #[test]
    fn concave_polygon() {
        let factory = GeometryFactory::new();
        // U shape: the centroid lies in the gap between the arms
        let shell = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (0.0, 10.0),
                (2.0, 10.0),
                (2.0, 2.0),
                (8.0, 2.0),
                (8.0, 10.0),
                (10.0, 10.0),
                (10.0, 0.0),
                (0.0, 0.0),
            ]))
            .expect("valid ring");
        let polygon = factory.create_polygon(shell, vec![]).expect("valid polygon");

        let point = polygon.interior_point().expect("interior point");
        assert_matches::assert_matches!(point.intersects(&polygon), Ok(true));
        assert_matches::assert_matches!(polygon.contains(&point), Ok(true));
    }

    #[test]
    fn square_interior_point_is_centre() {
        let factory = GeometryFactory::new();
        let shell = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (0.0, 2.0),
                (2.0, 2.0),
                (2.0, 0.0),
                (0.0, 0.0),
            ]))
            .expect("valid ring");
        let polygon = factory.create_polygon(shell, vec![]).expect("valid polygon");
        let point = polygon.interior_point().expect("interior point");
        assert_abs_diff_eq!(
            *point.coordinate().expect("not empty"),
            Coordinate::xy(1.0, 1.0)
        );
    }

    #[test]
    fn line_uses_inner_vertex() {
        let factory = GeometryFactory::new();
        let line = factory
            .create_line_string(CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (1.0, 0.0),
                (2.0, 0.0),
                (10.0, 0.0),
            ]))
            .expect("valid line");
        let point = line.interior_point().expect("interior point");
        assert_eq!(point.coordinate(), Some(&Coordinate::xy(2.0, 0.0)));

        let segment = factory
            .create_line_string(CoordinateSequence::from_xy(&[(0.0, 0.0), (4.0, 0.0)]))
            .expect("valid line");
        let point = segment.interior_point().expect("interior point");
        assert_eq!(point.coordinate(), Some(&Coordinate::xy(0.0, 0.0)));
    }

    #[test]
    fn empty_geometry() {
        let factory = GeometryFactory::new();
        let point = factory
            .create_empty_line_string()
            .interior_point()
            .expect("interior point");
        assert!(point.is_empty());
    }
}
