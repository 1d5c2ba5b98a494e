//! Buffer: the set of points within a distance of a geometry.
//!
//! The buffer is assembled from simple pieces: a rectangle around every segment, a circle
//! around every vertex, and a cap at the ends of open lines. The pieces are then dissolved
//! together with the input polygons by the `geo` boolean operations. A negative distance erodes
//! the polygons by subtracting the pieces built around their rings.

use std::f64::consts::TAU;

use geo::BooleanOps;
use geo_types::{Coord, LineString as GeoLineString, MultiPolygon as GeoMultiPolygon, Polygon as GeoPolygon};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::algorithm::{ensure_linear, Components};
use crate::coord::{Coordinate, CoordinateSequence};
use crate::error::GeometryError;
use crate::geo_types::to_geo_multi_polygon;
use crate::geometry::{Geom, Geometry};
use crate::operation::overlay::{polygonal_result, union_all};
use crate::operation::run_engine;

/// Shape of the buffer at the ends of open lines.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCapStyle {
    /// Half circle around the end point.
    #[default]
    Round,
    /// The buffer ends exactly at the end point.
    Flat,
    /// Half square around the end point.
    Square,
}

/// Parameters of the buffer operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferParameters {
    /// Number of segments approximating a quarter of a circle.
    pub quadrant_segments: u32,
    /// Shape of the line ends.
    pub end_cap_style: EndCapStyle,
}

impl Default for BufferParameters {
    fn default() -> Self {
        Self {
            quadrant_segments: 8,
            end_cap_style: EndCapStyle::Round,
        }
    }
}

impl BufferParameters {
    /// Sets the number of segments per quarter circle. Values below 1 are treated as 1.
    pub fn with_quadrant_segments(mut self, quadrant_segments: u32) -> Self {
        self.quadrant_segments = quadrant_segments.max(1);
        self
    }

    /// Sets the end cap style.
    pub fn with_end_cap_style(mut self, end_cap_style: EndCapStyle) -> Self {
        self.end_cap_style = end_cap_style;
        self
    }
}

/// Computes the buffer of the geometry.
///
/// The result is always polygonal. A zero or negative distance applied to a geometry without
/// polygons gives an empty polygon.
pub fn buffer(
    g: &dyn Geometry,
    distance: f64,
    parameters: &BufferParameters,
) -> Result<Geom, GeometryError> {
    ensure_linear(g, "buffer")?;
    let factory = g.factory();
    if g.is_empty() || !distance.is_finite() {
        return Ok(factory.create_empty_polygon().into());
    }

    log::debug!(
        "Computing buffer of {} with distance {distance} and {parameters:?}",
        g.geometry_type()
    );

    let components = Components::extract(g);
    let polygons = to_geo_multi_polygon(
        &factory.create_multi_polygon(components.polygons.iter().map(|&p| p.clone()).collect()),
    );

    if distance <= 0.0 && polygons.0.is_empty() {
        return Ok(factory.create_empty_polygon().into());
    }

    let builder = PieceBuilder {
        distance: distance.abs(),
        parameters,
    };

    let result = if distance > 0.0 {
        let mut pieces = Vec::new();
        if !polygons.0.is_empty() {
            pieces.push(polygons);
        }
        for c in &components.points {
            pieces.extend(builder.point_piece(c));
        }
        for line in &components.lines {
            builder.line_pieces(line, &mut pieces);
        }
        for sequence in components.polygons.iter().flat_map(|p| p.rings()) {
            builder.line_pieces(sequence.coordinate_sequence(), &mut pieces);
        }
        union_all(pieces)?
    } else if distance == 0.0 {
        union_all(polygons.0.into_iter().map(|p| GeoMultiPolygon(vec![p])).collect())?
    } else {
        let mut pieces = Vec::new();
        for ring in components.polygons.iter().flat_map(|p| p.rings()) {
            builder.line_pieces(ring.coordinate_sequence(), &mut pieces);
        }
        let eroded_area = union_all(pieces)?;
        run_engine("buffer", || polygons.difference(&eroded_area))?
    };

    polygonal_result(factory, &result)
}

struct PieceBuilder<'a> {
    distance: f64,
    parameters: &'a BufferParameters,
}

impl PieceBuilder<'_> {
    fn circle(&self, centre: &Coordinate) -> GeoMultiPolygon<f64> {
        let count = 4 * self.parameters.quadrant_segments.max(1);
        let step = TAU / count as f64;
        let points = (0..count)
            .map(|i| {
                let angle = step * i as f64;
                Coord {
                    x: centre.x + self.distance * angle.cos(),
                    y: centre.y + self.distance * angle.sin(),
                }
            })
            .collect();

        single(GeoPolygon::new(GeoLineString(points), vec![]))
    }

    fn square(&self, centre: &Coordinate) -> GeoMultiPolygon<f64> {
        let d = self.distance;
        let corners = [(-d, -d), (d, -d), (d, d), (-d, d)]
            .iter()
            .map(|(dx, dy)| Coord {
                x: centre.x + dx,
                y: centre.y + dy,
            })
            .collect();

        single(GeoPolygon::new(GeoLineString(corners), vec![]))
    }

    /// Rectangle of half width `distance` along the segment, counter-clockwise.
    fn rectangle(&self, start: Vector2<f64>, end: Vector2<f64>) -> Option<GeoMultiPolygon<f64>> {
        let direction = end - start;
        let length = direction.norm();
        if length == 0.0 {
            return None;
        }

        let normal = Vector2::new(-direction.y, direction.x) / length * self.distance;
        let corners = [start - normal, end - normal, end + normal, start + normal]
            .iter()
            .map(|v| Coord { x: v.x, y: v.y })
            .collect();

        Some(single(GeoPolygon::new(GeoLineString(corners), vec![])))
    }

    fn point_piece(&self, c: &Coordinate) -> Option<GeoMultiPolygon<f64>> {
        match self.parameters.end_cap_style {
            EndCapStyle::Round => Some(self.circle(c)),
            EndCapStyle::Square => Some(self.square(c)),
            EndCapStyle::Flat => None,
        }
    }

    fn line_pieces(&self, line: &CoordinateSequence, pieces: &mut Vec<GeoMultiPolygon<f64>>) {
        let mut points = line.clone();
        points.remove_repeated();

        let vertices: Vec<Vector2<f64>> = points.iter().map(Coordinate::vector).collect();
        match vertices.len() {
            0 => return,
            1 => {
                pieces.extend(self.point_piece(&points[0]));
                return;
            }
            _ => {}
        }

        let is_closed = points.is_closed();
        let last = vertices.len() - 1;
        for (i, pair) in vertices.windows(2).enumerate() {
            let (mut start, mut end) = (pair[0], pair[1]);
            if !is_closed && self.parameters.end_cap_style == EndCapStyle::Square {
                let extension = (end - start).normalize() * self.distance;
                if i == 0 {
                    start -= extension;
                }
                if i + 1 == last {
                    end += extension;
                }
            }
            pieces.extend(self.rectangle(start, end));
        }

        for (i, vertex) in points.iter().enumerate() {
            let is_end = !is_closed && (i == 0 || i == last);
            if !is_end || self.parameters.end_cap_style == EndCapStyle::Round {
                pieces.push(self.circle(vertex));
            }
        }
    }
}

fn single(polygon: GeoPolygon<f64>) -> GeoMultiPolygon<f64> {
    GeoMultiPolygon(vec![polygon])
}
