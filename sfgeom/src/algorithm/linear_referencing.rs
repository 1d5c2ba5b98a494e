//! Positions along lineal geometries.

use crate::algorithm::{ensure_linear, Components, Segment};
use crate::coord::Coordinate;
use crate::error::GeometryError;
use crate::geometry::Geometry;
use crate::geometry_type::GeometryTypeId;

/// Distance along `line` from its start to the point of the line nearest to `point`.
///
/// The components of a multi-part line are measured one after another. If several positions are
/// equally near, the first one is returned. An empty line gives 0.
pub fn project(line: &dyn Geometry, point: &dyn Geometry) -> Result<f64, GeometryError> {
    ensure_linear(line, "project")?;
    if !line.is_lineal() {
        return Err(GeometryError::invalid_argument(format!(
            "projection requires a lineal geometry, got {}",
            line.geometry_type()
        )));
    }
    let target = target_coordinate(point)?;

    let components = Components::extract(line);
    let mut start = 0.0;
    let mut nearest: Option<(f64, f64)> = None;
    for sequence in &components.lines {
        for pair in sequence.as_slice().windows(2) {
            let segment = Segment(&pair[0], &pair[1]);
            let length = segment.length();
            let distance = segment.distance_to_point(target);
            if nearest.map_or(true, |(min, _)| distance < min) {
                nearest = Some((distance, start + length * segment.fraction_of(target)));
            }
            start += length;
        }
    }

    Ok(nearest.map_or(0.0, |(_, position)| position))
}

/// [`project`] as a fraction of the length of the line. Lines of zero length give 0.
pub fn project_normalized(
    line: &dyn Geometry,
    point: &dyn Geometry,
) -> Result<f64, GeometryError> {
    let position = project(line, point)?;
    let length = line.length();
    if length == 0.0 {
        return Ok(0.0);
    }

    Ok(position / length)
}

fn target_coordinate(point: &dyn Geometry) -> Result<&Coordinate, GeometryError> {
    if point.geometry_type_id() != GeometryTypeId::Point {
        return Err(GeometryError::invalid_argument(format!(
            "projection target must be a point, got {}",
            point.geometry_type()
        )));
    }

    point
        .coordinate()
        .ok_or_else(|| GeometryError::invalid_argument("projection target is empty"))
}
