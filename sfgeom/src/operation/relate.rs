//! DE-9IM relation of two geometries.

use geo::Relate;

use crate::algorithm::{ensure_linear, Location};
use crate::dimension::Dimension;
use crate::error::GeometryError;
use crate::geo_types::to_geo;
use crate::geometry::Geometry;
use crate::operation::{run_engine, IntersectionMatrix};

const DIMENSIONS: [Dimension; 3] = [Dimension::A, Dimension::L, Dimension::P];

/// Computes the DE-9IM matrix of two geometries.
///
/// Heterogeneous collections are accepted. Fails with [`GeometryError::Unsupported`] for
/// geometries with circular arcs and with [`GeometryError::Topology`] if the relate engine fails.
pub fn relate(a: &dyn Geometry, b: &dyn Geometry) -> Result<IntersectionMatrix, GeometryError> {
    ensure_linear(a, "relate")?;
    ensure_linear(b, "relate")?;

    if a.is_empty() || b.is_empty() {
        return Ok(relate_empty(a, b));
    }

    let geo_a = to_geo(a)?;
    let geo_b = to_geo(b)?;

    let geo_matrix = run_engine("relate", || geo_a.relate(&geo_b))?;

    let matrix = IntersectionMatrix::from_fn(|row, column| cell_dimension(&geo_matrix, row, column));
    log::trace!("Relation of {} and {}: {matrix}", a.geometry_type(), b.geometry_type());

    Ok(matrix)
}

/// Matrix for the case when at least one of the geometries is empty: the only non-empty
/// intersections are those with the exterior of the empty geometry.
fn relate_empty(a: &dyn Geometry, b: &dyn Geometry) -> IntersectionMatrix {
    let mut matrix = IntersectionMatrix::default();
    matrix.set(Location::Exterior, Location::Exterior, Dimension::A);

    if a.is_empty() && !b.is_empty() {
        matrix.set(Location::Exterior, Location::Interior, b.dimension());
        matrix.set(Location::Exterior, Location::Boundary, b.boundary_dimension());
    }

    if b.is_empty() && !a.is_empty() {
        matrix.set(Location::Interior, Location::Exterior, a.dimension());
        matrix.set(Location::Boundary, Location::Exterior, a.boundary_dimension());
    }

    matrix
}

fn cell_dimension(
    matrix: &geo::relate::IntersectionMatrix,
    row: Location,
    column: Location,
) -> Dimension {
    let index = row.index() * 3 + column.index();
    DIMENSIONS
        .into_iter()
        .find(|dimension| {
            let mut pattern = ['*'; 9];
            pattern[index] = dimension.symbol();
            let pattern: String = pattern.iter().collect();
            matrix.matches(&pattern).unwrap_or(false)
        })
        .unwrap_or(Dimension::False)
}
