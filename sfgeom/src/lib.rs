//! `sfgeom` is a planar geometry model following the OGC Simple Features specification: points,
//! linestrings, linear rings, polygons, their homogeneous `Multi*` collections, heterogeneous
//! geometry collections and circular strings.
//!
//! Geometries are created by a [`GeometryFactory`], which carries the SRID and the
//! [`PrecisionModel`] shared by all geometries it creates. Every geometry implements the
//! [`Geometry`] trait, which provides
//!
//! * structural queries (`num_points`, `dimension`, `envelope`, `boundary`, ...),
//! * spatial predicates and the DE-9IM [`IntersectionMatrix`],
//! * constructive operations (overlay, buffer, convex hull),
//! * metrics (area, length, distance, centroid, interior point),
//! * visitor-style traversal with the [filters](filter).
//!
//! Topological computations are delegated to the [`geo`] crate.
//!
//! ```
//! use sfgeom::{Coordinate, CoordinateSequence, Geometry, GeometryFactory, GeometryTypeId};
//!
//! let factory = GeometryFactory::new();
//! let square = |x: f64, y: f64| {
//!     let shell = factory.create_linear_ring(CoordinateSequence::from_xy(&[
//!         (x, y),
//!         (x, y + 2.0),
//!         (x + 2.0, y + 2.0),
//!         (x + 2.0, y),
//!         (x, y),
//!     ]))?;
//!     factory.create_polygon(shell, vec![])
//! };
//!
//! let a = square(0.0, 0.0)?;
//! let b = square(1.0, 1.0)?;
//!
//! assert!(a.intersects(&b)?);
//! assert_eq!(a.relate(&b)?.to_string(), "212101212");
//!
//! let union = a.union(&b)?;
//! assert_eq!(union.geometry_type_id(), GeometryTypeId::Polygon);
//! assert!((union.area() - 7.0).abs() < 1e-9);
//!
//! let centre = factory.create_point(Coordinate::xy(1.5, 1.5));
//! assert!(union.contains(&centre)?);
//! # Ok::<(), sfgeom::GeometryError>(())
//! ```

pub mod algorithm;
mod circular_string;
mod collection;
mod coord;
mod curve;
mod dimension;
mod envelope;
mod error;
mod factory;
pub mod filter;
pub mod geo_types;
mod geometry;
mod geometry_type;
mod line_string;
pub mod operation;
mod point;
mod polygon;
mod precision;
mod triangle;

pub use circular_string::CircularString;
pub use collection::{
    CollectionMember, GeometryCollection, MultiLineString, MultiPoint, MultiPolygon,
};
pub use coord::{Coordinate, CoordinateSequence};
pub use dimension::Dimension;
pub use envelope::Envelope;
pub use error::GeometryError;
pub use factory::{GeometryFactory, GeometryFactoryBuilder};
pub use filter::{
    CoordinateFilter, CoordinateFilterMut, CoordinateSequenceFilter, GeometryComponentFilter,
    GeometryComponentFilterMut, GeometryFilter, GeometryFilterMut,
};
pub use geometry::{compare_geometry_sequences, Geom, Geometry, GeometryBase, UserData};
pub use geometry_type::{GeometrySortIndex, GeometryTypeId};
pub use line_string::{CoordinatesMut, LineString, LinearRing};
pub use operation::buffer::{BufferParameters, EndCapStyle};
pub use operation::overlay::OverlayOp;
pub use operation::IntersectionMatrix;
pub use point::Point;
pub use polygon::Polygon;
pub use precision::PrecisionModel;
pub use triangle::Triangle;
