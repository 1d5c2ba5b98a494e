//! State and behaviour shared by the curves defined by a single coordinate sequence.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::algorithm::orientation;
use crate::collection::MultiPoint;
use crate::coord::{Coordinate, CoordinateSequence};
use crate::envelope::Envelope;
use crate::factory::GeometryFactory;
use crate::filter::{CoordinateFilter, CoordinateFilterMut, CoordinateSequenceFilter};
use crate::geometry::GeometryBase;

#[derive(Debug, Clone)]
pub(crate) struct SimpleCurve {
    pub(crate) base: GeometryBase,
    pub(crate) points: CoordinateSequence,
    pub(crate) envelope: Envelope,
}

impl SimpleCurve {
    pub(crate) fn new(points: CoordinateSequence, factory: &Arc<GeometryFactory>) -> Self {
        let envelope = points.envelope();
        Self {
            base: GeometryBase::new(factory),
            points,
            envelope,
        }
    }

    pub(crate) fn with_points(&self, points: CoordinateSequence) -> Self {
        let envelope = points.envelope();
        Self {
            base: self.base.clone(),
            points,
            envelope,
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.points.is_closed()
    }

    pub(crate) fn coordinate_dimension(&self) -> u8 {
        self.points.dimension()
    }

    pub(crate) fn start_point(&self) -> Option<&Coordinate> {
        self.points.first()
    }

    pub(crate) fn end_point(&self) -> Option<&Coordinate> {
        self.points.last()
    }

    /// Endpoints of an open curve, nothing for closed or empty ones.
    pub(crate) fn boundary(&self) -> MultiPoint {
        let factory = self.base.factory();
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) if !self.is_closed() => {
                let coords = CoordinateSequence::new(
                    vec![*start, *end],
                    self.points.has_z(),
                    self.points.has_m(),
                );
                factory.create_multi_point_from_coords(&coords)
            }
            _ => factory.create_multi_point(vec![]),
        }
    }

    pub(crate) fn equals_exact(&self, other: &SimpleCurve, tolerance: f64) -> bool {
        self.points.equals_exact(&other.points, tolerance)
    }

    pub(crate) fn equals_identical(&self, other: &SimpleCurve) -> bool {
        self.envelope == other.envelope && self.points.equals_identical(&other.points)
    }

    pub(crate) fn compare(&self, other: &SimpleCurve) -> Ordering {
        self.points.compare_to(&other.points)
    }

    pub(crate) fn apply_coordinate_filter(&self, filter: &mut dyn CoordinateFilter) {
        for coord in &self.points {
            filter.filter(coord);
        }
    }

    pub(crate) fn apply_coordinate_filter_mut(&mut self, filter: &mut dyn CoordinateFilterMut) {
        for coord in self.points.iter_mut() {
            filter.filter(coord);
        }
    }

    pub(crate) fn apply_sequence_filter(&self, filter: &mut dyn CoordinateSequenceFilter) {
        for index in 0..self.points.size() {
            filter.filter_ro(&self.points, index);
            if filter.is_done() {
                break;
            }
        }
        debug_assert!(
            !filter.is_geometry_changed(),
            "read-only coordinate sequence filter reported a change"
        );
    }

    /// Returns true if the filter reported a change.
    pub(crate) fn apply_sequence_filter_mut(
        &mut self,
        filter: &mut dyn CoordinateSequenceFilter,
    ) -> bool {
        for index in 0..self.points.size() {
            filter.filter_rw(&mut self.points, index);
            if filter.is_done() {
                break;
            }
        }

        filter.is_geometry_changed()
    }

    pub(crate) fn linear_length(&self) -> f64 {
        self.points
            .as_slice()
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// Puts an open curve into the direction in which the first differing pair of mirrored
    /// points is increasing.
    pub(crate) fn normalize_direction(&mut self) {
        let size = self.points.size();
        for i in 0..size / 2 {
            let j = size - 1 - i;
            match self.points[i].compare_to(&self.points[j]) {
                Ordering::Equal => continue,
                Ordering::Greater => {
                    self.points.reverse();
                    return;
                }
                Ordering::Less => return,
            }
        }
    }

    pub(crate) fn refresh(&mut self) {
        self.points.refresh_ordinates();
        self.envelope = self.points.envelope();
    }
}

/// Brings a closed sequence to the canonical ring form: starts at the minimum coordinate and has
/// the requested orientation.
pub(crate) fn normalize_ring(points: &mut CoordinateSequence, clockwise: bool) {
    if points.size() < 4 || !points.is_closed() {
        return;
    }

    let mut unique = CoordinateSequence::new(
        points.as_slice()[..points.size() - 1].to_vec(),
        points.has_z(),
        points.has_m(),
    );
    if let Some(min) = unique.min_coordinate().copied() {
        unique.scroll(&min);
    }
    unique.close_ring();

    if orientation::is_ccw(unique.as_slice()) == clockwise {
        unique.reverse();
    }

    *points = unique;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_scrolled_and_oriented() {
        let mut ring = CoordinateSequence::from_xy(&[
            (1.0, 1.0),
            (1.0, 0.0),
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
        ]);
        normalize_ring(&mut ring, true);
        assert_eq!(
            ring,
            CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (1.0, 0.0),
                (0.0, 0.0),
            ])
        );

        normalize_ring(&mut ring, false);
        assert_eq!(
            ring,
            CoordinateSequence::from_xy(&[
                (0.0, 0.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 1.0),
                (0.0, 0.0),
            ])
        );
    }
}
