//! Topological operations: relation matrix, named predicates, overlay and buffer.
//!
//! The heavy lifting is done by the `geo` crate. The functions here check the operands, handle
//! empty and degenerate inputs, convert the geometries through [`crate::geo_types`], and turn
//! engine failures into [`GeometryError::Topology`].

use std::panic::{self, AssertUnwindSafe};

use crate::error::GeometryError;

pub mod buffer;
mod intersection_matrix;
pub mod overlay;
pub mod predicate;
pub mod relate;

pub use intersection_matrix::IntersectionMatrix;

/// Runs a closure calling into the `geo` engine, converting a panic into a topology error.
pub(crate) fn run_engine<T>(operation: &str, f: impl FnOnce() -> T) -> Result<T, GeometryError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|_| {
        log::warn!("Geometry engine failed during {operation}");
        GeometryError::Topology(format!("{operation} failed"))
    })
}
