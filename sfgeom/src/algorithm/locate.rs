//! Location of a point relative to linear and areal components.

use serde::{Deserialize, Serialize};

use crate::algorithm::orientation::Orientation;
use crate::coord::Coordinate;
use crate::geometry::Geometry;
use crate::polygon::Polygon;

/// Position of a point relative to a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Inside the geometry, not on its boundary.
    Interior,
    /// On the boundary.
    Boundary,
    /// Outside of the geometry.
    Exterior,
}

impl Location {
    /// Row or column of the location in a DE-9IM matrix.
    pub fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }
}

/// True if the point lies on the segment `a`-`b`.
pub fn is_on_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> bool {
    Orientation::triplet(a, b, p) == Orientation::Collinear
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// True if the point lies on any segment of the line.
pub fn is_on_line(p: &Coordinate, line: &[Coordinate]) -> bool {
    match line {
        [] => false,
        [single] => single.equals_2d(p),
        _ => line.windows(2).any(|pair| is_on_segment(p, &pair[0], &pair[1])),
    }
}

/// Location of a point relative to the area enclosed by a closed ring.
pub fn locate_in_ring(p: &Coordinate, ring: &[Coordinate]) -> Location {
    let mut crossings = 0usize;
    for pair in ring.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if is_on_segment(p, a, b) {
            return Location::Boundary;
        }

        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                crossings += 1;
            }
        }
    }

    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Location of a point relative to a polygon, taking the holes into account.
pub fn locate_in_polygon(p: &Coordinate, polygon: &Polygon) -> Location {
    if polygon.is_empty() || !polygon.envelope_internal().contains_coordinate(p) {
        return Location::Exterior;
    }

    match locate_in_ring(p, polygon.exterior_ring().coordinate_sequence().as_slice()) {
        Location::Interior => {}
        other => return other,
    }

    for hole in polygon.interior_rings() {
        match locate_in_ring(p, hole.coordinate_sequence().as_slice()) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }

    Location::Interior
}

/// Location of a point relative to the union of the polygons, assuming their interiors do not
/// overlap.
pub fn locate_in_polygons<'a>(
    p: &Coordinate,
    polygons: impl IntoIterator<Item = &'a Polygon>,
) -> Location {
    let mut location = Location::Exterior;
    for polygon in polygons {
        match locate_in_polygon(p, polygon) {
            Location::Interior => return Location::Interior,
            Location::Boundary => location = Location::Boundary,
            Location::Exterior => {}
        }
    }

    location
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::CoordinateSequence;
    use crate::factory::GeometryFactory;

    fn triangle() -> Vec<Coordinate> {
        [(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]
            .iter()
            .map(|&p| Coordinate::from(p))
            .collect()
    }

    #[test]
    fn ring_location() {
        let ring = triangle();
        let locate = |x, y| locate_in_ring(&Coordinate::xy(x, y), &ring);

        assert_eq!(locate(0.0, 0.0), Location::Boundary);
        assert_eq!(locate(1.0, 1.0), Location::Boundary);
        assert_eq!(locate(0.5, 0.0), Location::Boundary);
        assert_eq!(locate(0.2, 0.1), Location::Interior);
        assert_eq!(locate(0.2, 0.3), Location::Exterior);
        assert_eq!(locate(0.2, -0.3), Location::Exterior);
        assert_eq!(locate(1.1, 0.0), Location::Exterior);
    }

    #[test]
    fn point_in_hole() {
        let factory = GeometryFactory::new();
        let shell = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ]))
            .expect("valid ring");
        let hole = factory
            .create_linear_ring(CoordinateSequence::from_xy(&[
                (2.0, 2.0),
                (2.0, 4.0),
                (4.0, 4.0),
                (4.0, 2.0),
                (2.0, 2.0),
            ]))
            .expect("valid ring");
        let polygon = factory.create_polygon(shell, vec![hole]).expect("valid polygon");

        assert_eq!(
            locate_in_polygon(&Coordinate::xy(3.0, 3.0), &polygon),
            Location::Exterior
        );
        assert_eq!(
            locate_in_polygon(&Coordinate::xy(2.0, 3.0), &polygon),
            Location::Boundary
        );
        assert_eq!(
            locate_in_polygon(&Coordinate::xy(5.0, 5.0), &polygon),
            Location::Interior
        );
        assert_eq!(
            locate_in_polygon(&Coordinate::xy(15.0, 5.0), &polygon),
            Location::Exterior
        );
    }
}
