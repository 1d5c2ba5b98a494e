//! Precision model used to round coordinates produced by constructive operations.

use serde::{Deserialize, Serialize};

/// Specifies how many significant digits the coordinates computed by overlay and buffer
/// operations keep.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrecisionModel {
    /// Full double precision.
    #[default]
    Floating,
    /// Single (`f32`) precision.
    FloatingSingle,
    /// Coordinates are rounded to multiples of `1 / scale`.
    Fixed {
        /// Number of grid cells per coordinate unit.
        scale: f64,
    },
}

impl PrecisionModel {
    /// Rounds the value according to the model.
    pub fn make_precise(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }

        match *self {
            PrecisionModel::Floating => value,
            PrecisionModel::FloatingSingle => value as f32 as f64,
            PrecisionModel::Fixed { scale } => (value * scale).round() / scale,
        }
    }

    /// Returns true if the model does not round coordinates.
    pub fn is_floating(&self) -> bool {
        !matches!(self, PrecisionModel::Fixed { .. })
    }
}
