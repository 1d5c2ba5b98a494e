//! Centre of mass of a geometry.
//!
//! Only the components of the highest dimension contribute: polygons are weighted by area,
//! lines by length and points count equally. Components of zero area or zero length are
//! treated as the lower-dimensional geometry they collapse to.

use nalgebra::Vector2;

use crate::algorithm::Components;
use crate::coord::{Coordinate, CoordinateSequence};
use crate::error::GeometryError;
use crate::geometry::Geometry;
use crate::point::Point;

/// Centroid of the geometry as a point of the same factory. Empty for an empty geometry.
pub fn centroid(g: &dyn Geometry) -> Result<Point, GeometryError> {
    let factory = g.factory();
    Ok(match centroid_coordinate(g) {
        Some(c) => factory.create_point(c),
        None => factory.create_empty_point(),
    })
}

/// Centroid coordinate of the geometry, `None` for an empty geometry.
pub(crate) fn centroid_coordinate(g: &dyn Geometry) -> Option<Coordinate> {
    let components = Components::extract(g);

    let mut area = WeightedSum::default();
    for polygon in &components.polygons {
        add_ring(&mut area, polygon.exterior_ring().coordinate_sequence(), 1.0);
        for hole in polygon.interior_rings() {
            add_ring(&mut area, hole.coordinate_sequence(), -1.0);
        }
    }
    if let Some(c) = area.mean() {
        return Some(c);
    }

    let mut length = WeightedSum::default();
    for line in components.segment_sequences() {
        add_line(&mut length, line);
    }
    if let Some(c) = length.mean() {
        return Some(c);
    }

    let mut points = WeightedSum::default();
    let vertices = components
        .points
        .iter()
        .copied()
        .chain(components.segment_sequences().flat_map(|line| line.iter()));
    for c in vertices {
        points.add(c.vector(), 1.0);
    }

    points.mean()
}

#[derive(Debug, Default)]
struct WeightedSum {
    sum: Vector2<f64>,
    weight: f64,
}

impl WeightedSum {
    fn add(&mut self, value: Vector2<f64>, weight: f64) {
        self.sum += value * weight;
        self.weight += weight;
    }

    fn mean(&self) -> Option<Coordinate> {
        if self.weight == 0.0 {
            return None;
        }

        Some(Coordinate::from_vector(self.sum / self.weight))
    }
}

/// Adds the area of the ring with its centroid. The sign selects between shells and holes
/// regardless of the ring orientation.
fn add_ring(sum: &mut WeightedSum, ring: &CoordinateSequence, sign: f64) {
    let Some(base) = ring.first() else {
        return;
    };

    let base = base.vector();
    let mut twice_area = 0.0;
    let mut weighted = Vector2::zeros();
    for pair in ring.as_slice().windows(2) {
        let p = pair[0].vector() - base;
        let q = pair[1].vector() - base;
        let cross = p.x * q.y - q.x * p.y;
        twice_area += cross;
        weighted += (p + q) * cross;
    }

    if twice_area == 0.0 {
        return;
    }

    let ring_centroid = base + weighted / (3.0 * twice_area);
    sum.add(ring_centroid, sign * twice_area.abs() / 2.0);
}

fn add_line(sum: &mut WeightedSum, line: &CoordinateSequence) {
    for pair in line.as_slice().windows(2) {
        let (p, q) = (pair[0].vector(), pair[1].vector());
        let length = (q - p).norm();
        if length > 0.0 {
            sum.add((p + q) / 2.0, length);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::GeometryFactory;
    use approx::assert_abs_diff_eq;

    #[test]
    fn square_with_hole() {
        let factory = GeometryFactory::new();
        let shell = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (0.0, 4.0),
                (4.0, 4.0),
                (4.0, 0.0),
                (0.0, 0.0),
            ]))
            .expect("valid ring");
        let hole = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (2.0, 0.0),
                (2.0, 2.0),
                (0.0, 2.0),
                (0.0, 0.0),
            ]))
            .expect("valid ring");
        let polygon = factory.create_polygon(shell, vec![hole]).expect("valid polygon");

        let centroid = polygon.centroid().expect("centroid");
        // 16 * (2, 2) - 4 * (1, 1) over 12
        assert_abs_diff_eq!(centroid.x().unwrap_or_default(), 28.0 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(centroid.y().unwrap_or_default(), 28.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn line_is_length_weighted() {
        let factory = GeometryFactory::new();
        let line = factory
            .create_line_string(CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (3.0, 0.0),
                (3.0, 1.0),
            ]))
            .expect("valid line");
        let c = centroid_coordinate(&line).expect("not empty");
        assert_abs_diff_eq!(c, Coordinate::xy(1.5 * 3.0 / 4.0 + 3.0 / 4.0, 0.5 / 4.0), epsilon = 1e-12);
    }

    #[test]
    fn highest_dimension_wins() {
        let factory = GeometryFactory::new();
        let collection = factory.create_geometry_collection(vec![
            factory.create_point(Coordinate::xy(100.0, 100.0)).into(),
            factory
                .create_line_string(CoordinateSequence::from_xy(&[(0.0, 0.0), (2.0, 0.0)]))
                .expect("valid line")
                .into(),
        ]);
        let c = centroid_coordinate(&collection).expect("not empty");
        assert_abs_diff_eq!(c, Coordinate::xy(1.0, 0.0));
    }

    #[test]
    fn points_and_empty() {
        let factory = GeometryFactory::new();
        let points = factory.create_multi_point_from_coords(&CoordinateSequence::from_xy(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (1.0, 3.0),
        ]));
        let c = centroid_coordinate(&points).expect("not empty");
        assert_abs_diff_eq!(c, Coordinate::xy(1.0, 1.0));

        let empty = factory.create_empty_polygon();
        assert!(empty.centroid().expect("centroid").is_empty());
    }
}
