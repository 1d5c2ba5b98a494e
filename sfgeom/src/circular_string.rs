use std::any::Any;
use std::cmp::Ordering;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::sync::Arc;

use crate::algorithm::orientation::Orientation;
use crate::coord::{Coordinate, CoordinateSequence};
use crate::curve::SimpleCurve;
use crate::dimension::Dimension;
use crate::envelope::Envelope;
use crate::error::GeometryError;
use crate::factory::GeometryFactory;
use crate::filter::{CoordinateFilter, CoordinateFilterMut, CoordinateSequenceFilter};
use crate::geometry::{Geom, Geometry, GeometryBase};
use crate::geometry_type::GeometryTypeId;
use crate::triangle::Triangle;

/// A curve made of circular arcs. Every arc is defined by three points: start, a point on the
/// arc, and end. Consecutive arcs share their end and start points.
#[derive(Debug, Clone)]
pub struct CircularString {
    curve: SimpleCurve,
}

/// A single arc of a circular string.
#[derive(Debug, Copy, Clone)]
struct Arc3<'a> {
    p0: &'a Coordinate,
    p1: &'a Coordinate,
    p2: &'a Coordinate,
}

impl Arc3<'_> {
    fn is_full_circle(&self) -> bool {
        self.p0.equals_2d(self.p2)
    }

    fn is_linear(&self) -> bool {
        !self.is_full_circle()
            && Orientation::triplet(self.p0, self.p1, self.p2) == Orientation::Collinear
    }

    fn centre(&self) -> Coordinate {
        if self.is_full_circle() {
            Coordinate::from_vector((self.p0.vector() + self.p1.vector()) / 2.0)
        } else {
            Triangle::new(*self.p0, *self.p1, *self.p2).circumcentre()
        }
    }

    /// Sweep angle in radians together with the direction (`true` for counter-clockwise).
    fn sweep(&self, centre: &Coordinate) -> (f64, bool) {
        if self.is_full_circle() {
            return (TAU, true);
        }

        let ccw = Orientation::triplet(self.p0, self.p1, self.p2) == Orientation::Counterclockwise;
        let a0 = angle(centre, self.p0);
        let a2 = angle(centre, self.p2);
        let sweep = if ccw { a2 - a0 } else { a0 - a2 };

        (sweep.rem_euclid(TAU), ccw)
    }

    fn length(&self) -> f64 {
        if self.is_linear() {
            return self.p0.distance(self.p1) + self.p1.distance(self.p2);
        }

        let centre = self.centre();
        let (sweep, _) = self.sweep(&centre);
        centre.distance(self.p0) * sweep
    }

    fn envelope(&self) -> Envelope {
        let mut envelope = Envelope::from_coordinate(self.p0);
        envelope.expand_to_include(self.p1);
        envelope.expand_to_include(self.p2);
        if self.is_linear() {
            return envelope;
        }

        let centre = self.centre();
        let radius = centre.distance(self.p0);
        let (sweep, ccw) = self.sweep(&centre);
        let start = angle(&centre, self.p0);

        for quadrant in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
            let offset = if ccw {
                quadrant - start
            } else {
                start - quadrant
            };
            if offset.rem_euclid(TAU) <= sweep {
                envelope.expand_to_include(&Coordinate::xy(
                    centre.x + radius * f64::cos(quadrant),
                    centre.y + radius * f64::sin(quadrant),
                ));
            }
        }

        envelope
    }
}

fn angle(centre: &Coordinate, p: &Coordinate) -> f64 {
    (p.y - centre.y).atan2(p.x - centre.x)
}

fn arcs(points: &CoordinateSequence) -> impl Iterator<Item = Arc3<'_>> {
    let slice = points.as_slice();
    (0..slice.len().saturating_sub(1) / 2).map(move |i| Arc3 {
        p0: &slice[2 * i],
        p1: &slice[2 * i + 1],
        p2: &slice[2 * i + 2],
    })
}

fn arc_envelope(points: &CoordinateSequence) -> Envelope {
    arcs(points).map(|arc| arc.envelope()).collect()
}

impl CircularString {
    pub(crate) fn new(points: CoordinateSequence, factory: &Arc<GeometryFactory>) -> Self {
        let mut curve = SimpleCurve::new(points, factory);
        curve.envelope = arc_envelope(&curve.points);
        Self { curve }
    }

    /// The control points of the arcs.
    pub fn coordinate_sequence(&self) -> &CoordinateSequence {
        &self.curve.points
    }

    /// Number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.curve.points.size().saturating_sub(1) / 2
    }

    /// True if the curve is not empty and its first and last points are equal.
    pub fn is_closed(&self) -> bool {
        self.curve.is_closed()
    }
}

impl Geometry for CircularString {
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
        &self.curve.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.curve.base
    }

    fn clone_geom(&self) -> Geom {
        Geom::CircularString(self.clone())
    }

    fn reverse(&self) -> Geom {
        let mut curve = self.curve.with_points(self.curve.points.reversed());
        curve.envelope = self.curve.envelope;
        Geom::CircularString(Self { curve })
    }

    fn geometry_type_id(&self) -> GeometryTypeId {
        GeometryTypeId::CircularString
    }

    fn coordinate(&self) -> Option<&Coordinate> {
        self.curve.start_point()
    }

    fn coordinates(&self) -> CoordinateSequence {
        self.curve.points.clone()
    }

    fn num_points(&self) -> usize {
        self.curve.points.size()
    }

    fn is_empty(&self) -> bool {
        self.curve.points.is_empty()
    }

    fn dimension(&self) -> Dimension {
        Dimension::L
    }

    fn coordinate_dimension(&self) -> u8 {
        self.curve.coordinate_dimension()
    }

    fn has_z(&self) -> bool {
        self.curve.points.has_z()
    }

    fn has_m(&self) -> bool {
        self.curve.points.has_m()
    }

    fn has_curved_components(&self) -> bool {
        true
    }

    fn boundary(&self) -> Result<Geom, GeometryError> {
        Ok(self.curve.boundary().into())
    }

    fn boundary_dimension(&self) -> Dimension {
        if self.is_closed() {
            Dimension::False
        } else {
            Dimension::P
        }
    }

    fn envelope_internal(&self) -> &Envelope {
        &self.curve.envelope
    }

    fn equals_exact(&self, other: &dyn Geometry, tolerance: f64) -> bool {
        other
            .as_any()
            .downcast_ref::<CircularString>()
            .is_some_and(|other| self.curve.equals_exact(&other.curve, tolerance))
    }

    fn equals_identical(&self, other: &dyn Geometry) -> bool {
        other
            .as_any()
            .downcast_ref::<CircularString>()
            .is_some_and(|other| self.curve.equals_identical(&other.curve))
    }

    fn apply_coordinate_filter(&self, filter: &mut dyn CoordinateFilter) {
        self.curve.apply_coordinate_filter(filter);
    }

    fn apply_coordinate_filter_mut(&mut self, filter: &mut dyn CoordinateFilterMut) {
        self.curve.apply_coordinate_filter_mut(filter);
        self.geometry_changed();
    }

    fn apply_sequence_filter(&self, filter: &mut dyn CoordinateSequenceFilter) {
        self.curve.apply_sequence_filter(filter);
    }

    fn apply_sequence_filter_mut(&mut self, filter: &mut dyn CoordinateSequenceFilter) {
        if self.curve.apply_sequence_filter_mut(filter) {
            self.geometry_changed();
        }
    }

    fn normalize(&mut self) {
        self.curve.normalize_direction();
    }

    fn compare_to_same_class(&self, other: &dyn Geometry) -> Ordering {
        debug_assert_eq!(self.sort_index(), other.sort_index());
        let Some(other) = other.as_any().downcast_ref::<CircularString>() else {
            return self.sort_index().cmp(&other.sort_index());
        };
        self.curve.compare(&other.curve)
    }

    fn length(&self) -> f64 {
        arcs(&self.curve.points).map(|arc| arc.length()).sum()
    }

    fn geometry_changed_action(&mut self) {
        self.curve.points.refresh_ordinates();
        self.curve.envelope = arc_envelope(&self.curve.points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn curve(pairs: &[(f64, f64)]) -> CircularString {
        GeometryFactory::new()
            .create_circular_string(CoordinateSequence::from_xy(pairs))
            .expect("valid circular string")
    }

    #[test]
    fn half_circle() {
        let arc = curve(&[(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
        assert_abs_diff_eq!(arc.length(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(
            *arc.envelope_internal(),
            Envelope::new(-1.0, 0.0, 1.0, 1.0),
            epsilon = 1e-12
        );
        assert!(arc.has_curved_components());
        assert_eq!(arc.num_arcs(), 1);
    }

    #[test]
    fn arc_envelope_includes_extremes() {
        // three quarters of the unit circle going counter-clockwise from (1, 0) to (0, -1)
        let arc = curve(&[(1.0, 0.0), (-1.0, 0.0), (0.0, -1.0)]);
        assert_abs_diff_eq!(
            *arc.envelope_internal(),
            Envelope::new(-1.0, -1.0, 1.0, 1.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(arc.length(), 1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn full_circle() {
        let circle = curve(&[(0.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);
        assert!(circle.is_closed());
        assert_abs_diff_eq!(circle.length(), TAU, epsilon = 1e-12);
        assert_abs_diff_eq!(
            *circle.envelope_internal(),
            Envelope::new(0.0, -1.0, 2.0, 1.0),
            epsilon = 1e-12
        );
        assert_eq!(circle.boundary_dimension(), Dimension::False);
    }

    #[test]
    fn collinear_arc_is_straight() {
        let arc = curve(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_abs_diff_eq!(arc.length(), 2.0);
    }

    #[test]
    fn topology_is_unsupported() {
        let factory = GeometryFactory::new();
        let arc = curve(&[(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
        let point = factory.create_point(Coordinate::xy(0.0, 0.5));
        assert_matches!(arc.intersects(&point), Err(GeometryError::Unsupported(_)));
        assert_matches!(arc.buffer(1.0), Err(GeometryError::Unsupported(_)));
        assert_matches!(arc.convex_hull(), Err(GeometryError::Unsupported(_)));
    }
}
