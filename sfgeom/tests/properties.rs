use std::cmp::Ordering;
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use sfgeom::{
    Coordinate, CoordinateSequence, Dimension, Geom, Geometry, GeometryComponentFilter,
    GeometryError, GeometryFactory, GeometryFactoryBuilder, GeometryTypeId, Polygon,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn square(factory: &Arc<GeometryFactory>, x: f64, y: f64, size: f64) -> Polygon {
    let shell = factory
        .create_linear_ring(CoordinateSequence::from_xy(&[
            (x, y),
            (x, y + size),
            (x + size, y + size),
            (x + size, y),
            (x, y),
        ]))
        .expect("valid ring");
    factory.create_polygon(shell, vec![]).expect("valid polygon")
}

fn sample_geometries(factory: &Arc<GeometryFactory>) -> Vec<Geom> {
    let line = factory
        .create_line_string(CoordinateSequence::from_xy(&[
            (0.0, 0.0),
            (1.0, 2.0),
            (3.0, 1.0),
        ]))
        .expect("valid line");
    let ring = factory
        .create_linear_ring(CoordinateSequence::from_xy(&[
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (0.0, 0.0),
        ]))
        .expect("valid ring");
    let arc = factory
        .create_circular_string(CoordinateSequence::from_xy(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 0.0),
        ]))
        .expect("valid arc");

    vec![
        factory.create_point(Coordinate::xyz(1.0, 2.0, 3.0)).into(),
        line.clone().into(),
        ring.into(),
        square(factory, 0.0, 0.0, 1.0).into(),
        arc.into(),
        factory
            .create_multi_point_from_coords(&CoordinateSequence::from_xy(&[(0.0, 0.0), (5.0, 5.0)]))
            .into(),
        factory.create_multi_line_string(vec![line.clone()]).into(),
        factory
            .create_multi_polygon(vec![square(factory, 0.0, 0.0, 1.0), square(factory, 2.0, 2.0, 1.0)])
            .into(),
        factory
            .create_geometry_collection(vec![
                line.into(),
                factory
                    .create_geometry_collection(vec![square(factory, 5.0, 5.0, 2.0).into()])
                    .into(),
            ])
            .into(),
    ]
}

#[test]
fn clone_is_exact_and_independent() {
    init_logger();
    let factory = GeometryFactory::new();
    for g in sample_geometries(&factory) {
        let mut copy = g.clone_geom();
        assert!(copy.equals_exact(&*g, 0.0), "{}", g.geometry_type());
        assert!(copy.equals_identical(&*g), "{}", g.geometry_type());

        copy.apply_coordinate_filter_mut(&mut |c: &mut Coordinate| c.x += 100.0);
        assert!(!copy.equals_exact(&*g, 0.0), "{}", g.geometry_type());
        assert!(g.envelope_internal().x_min() < 100.0);
    }
}

#[test]
fn double_reverse_is_identity() {
    init_logger();
    let factory = GeometryFactory::new();
    for g in sample_geometries(&factory) {
        let twice = g.reverse().reverse();
        assert!(twice.equals_exact(&*g, 0.0), "{}", g.geometry_type());
    }
}

#[test]
fn collection_counts_and_sums() {
    init_logger();
    let factory = GeometryFactory::new();
    let a: Geom = square(&factory, 0.0, 0.0, 1.0).into();
    let b: Geom = factory
        .create_line_string(CoordinateSequence::from_xy(&[(0.0, 0.0), (3.0, 4.0)]))
        .expect("valid line")
        .into();
    let c: Geom = square(&factory, 5.0, 5.0, 2.0).into();

    let collection = factory.create_geometry_collection(vec![
        a.clone_geom(),
        b.clone_geom(),
        c.clone_geom(),
    ]);

    assert_eq!(collection.num_geometries(), 3);
    for (i, child) in [&a, &b, &c].into_iter().enumerate() {
        assert!(collection.geometry_n(i).equals_identical(&**child));
    }
    assert_eq!(
        collection.num_points(),
        a.num_points() + b.num_points() + c.num_points()
    );
    assert_abs_diff_eq!(collection.area(), a.area() + b.area() + c.area());
    assert_abs_diff_eq!(collection.area(), 5.0);
    assert_abs_diff_eq!(collection.length(), 4.0 + 5.0 + 8.0);
}

#[test]
fn absent_member_is_rejected() {
    init_logger();
    let factory = GeometryFactory::new();
    let result = factory.create_geometry_collection_from_parts(vec![
        Some(square(&factory, 0.0, 0.0, 1.0).into()),
        None,
        Some(factory.create_point(Coordinate::xy(0.0, 0.0)).into()),
    ]);
    assert_matches!(result, Err(GeometryError::InvalidArgument(_)));
}

#[derive(Default)]
struct SridCollector(Vec<i32>);

impl GeometryComponentFilter for SridCollector {
    fn filter(&mut self, component: &dyn Geometry) {
        self.0.push(component.srid());
    }
}

#[test]
fn srid_cascades_to_every_level() {
    init_logger();
    let factory = GeometryFactoryBuilder::default().with_srid(4326).build();
    let inner = factory.create_geometry_collection(vec![
        square(&factory, 0.0, 0.0, 1.0).into(),
        factory.create_point(Coordinate::xy(0.0, 0.0)).into(),
    ]);
    let mut outer = factory.create_geometry_collection(vec![
        inner.into(),
        factory
            .create_multi_polygon(vec![square(&factory, 2.0, 2.0, 1.0)])
            .into(),
    ]);
    assert_eq!(outer.srid(), 4326);

    outer.set_srid(42);

    let mut collector = SridCollector::default();
    outer.apply_component_filter(&mut collector);
    let srids = collector.0;
    assert_eq!(srids.len(), 8);
    assert!(srids.iter().all(|&srid| srid == 42), "{srids:?}");
}

#[test]
fn normalize_is_idempotent() {
    init_logger();
    let factory = GeometryFactory::new();
    for mut g in sample_geometries(&factory) {
        g.normalize();
        let snapshot = g.clone_geom();
        g.normalize();
        assert!(snapshot.equals_exact(&*g, 0.0), "{}", g.geometry_type());
    }
}

#[test]
fn dimension_strict_flags() {
    init_logger();
    let factory = GeometryFactory::new();
    let polygons = factory.create_geometry_collection(vec![
        square(&factory, 0.0, 0.0, 1.0).into(),
        square(&factory, 2.0, 0.0, 1.0).into(),
    ]);
    assert!(polygons.is_polygonal());
    assert!(!polygons.is_lineal());

    let mixed = factory.create_geometry_collection(vec![
        square(&factory, 0.0, 0.0, 1.0).into(),
        factory
            .create_line_string(CoordinateSequence::from_xy(&[(0.0, 0.0), (1.0, 1.0)]))
            .expect("valid line")
            .into(),
    ]);
    assert!(!mixed.is_polygonal());
    assert!(!mixed.is_lineal());
    assert!(mixed.is_mixed_dimension());

    let all_empty = factory.create_geometry_collection(vec![
        factory.create_empty_point().into(),
        factory.create_empty_polygon().into(),
    ]);
    assert!(all_empty.is_empty());
    assert!(all_empty.is_puntal());
    assert!(all_empty.is_lineal());
    assert!(all_empty.is_polygonal());

    let nested_points = factory.create_geometry_collection(vec![
        factory
            .create_geometry_collection(vec![factory.create_point(Coordinate::xy(1.0, 1.0)).into()])
            .into(),
        factory.create_point(Coordinate::xy(2.0, 2.0)).into(),
    ]);
    assert!(nested_points.is_puntal());
    assert!(!nested_points.is_lineal());
    assert!(!nested_points.is_polygonal());
}

#[test]
fn predicates_reject_non_empty_heterogeneous_collections() {
    init_logger();
    let factory = GeometryFactory::new();
    let polygon = square(&factory, 0.0, 0.0, 1.0);

    let collection = factory.create_geometry_collection(vec![
        factory.create_point(Coordinate::xy(0.5, 0.5)).into(),
    ]);
    assert_matches!(
        polygon.intersects(&collection),
        Err(GeometryError::InvalidArgument(_))
    );

    let empty = factory.create_geometry_collection(vec![]);
    assert_matches!(polygon.intersects(&empty), Ok(false));

    // relate accepts heterogeneous collections
    assert_matches!(polygon.relate(&collection), Ok(matrix) if matrix.is_contains());
}

#[test]
fn release_geometries_empties_collection() {
    init_logger();
    let factory = GeometryFactory::new();
    let mut collection = factory.create_multi_polygon(vec![
        square(&factory, 0.0, 0.0, 1.0),
        square(&factory, 2.0, 0.0, 1.0),
        square(&factory, 4.0, 0.0, 1.0),
    ]);

    let released = collection.release_geometries();
    assert_eq!(released.len(), 3);
    assert_eq!(collection.num_geometries(), 0);
    assert!(collection.is_empty());
    assert!(collection.envelope_internal().is_null());
}

#[test]
fn two_disjoint_squares() {
    init_logger();
    let factory = GeometryFactory::new();
    let collection = factory.create_multi_polygon(vec![
        square(&factory, 0.0, 0.0, 1.0),
        square(&factory, 2.0, 0.0, 1.0),
    ]);

    assert_abs_diff_eq!(collection.area(), 2.0);
    assert_eq!(collection.dimension(), Dimension::A);
    assert!(!collection.is_empty());
    assert_eq!(collection.coordinate_dimension(), 2);
    assert_eq!(collection.geometry_type_id(), GeometryTypeId::MultiPolygon);
}

#[test]
fn union_of_overlapping_squares() {
    init_logger();
    let factory = GeometryFactory::new();
    let a = square(&factory, 0.0, 0.0, 2.0);
    let b = square(&factory, 1.0, 1.0, 2.0);

    let union = a.union(&b).expect("union");
    assert_abs_diff_eq!(union.area(), 7.0, epsilon = 1e-9);
    assert_matches!(union.covers(&a), Ok(true));
    assert_matches!(union.covers(&b), Ok(true));

    let dissolved = factory
        .create_multi_polygon(vec![a, b])
        .unary_union()
        .expect("unary union");
    assert_matches!(dissolved.equals(&*union), Ok(true));
}

#[test]
fn ordering_is_by_kind_then_coordinates() {
    init_logger();
    let factory = GeometryFactory::new();
    let line = |pairs: &[(f64, f64)]| -> Geom {
        factory
            .create_line_string(CoordinateSequence::from_xy(pairs))
            .expect("valid line")
            .into()
    };

    let point: Geom = factory.create_point(Coordinate::xy(9.0, 9.0)).into();
    let low = line(&[(0.0, 0.0), (1.0, 1.0)]);
    let high = line(&[(0.0, 0.0), (2.0, 1.0)]);
    let empty: Geom = factory.create_empty_line_string().into();
    let polygon: Geom = square(&factory, 0.0, 0.0, 1.0).into();

    assert_eq!(point.compare_to(&*low), Ordering::Less);
    assert_eq!(polygon.compare_to(&*high), Ordering::Greater);
    assert_eq!(empty.compare_to(&*low), Ordering::Less);
    assert_eq!(low.compare_to(&*high), Ordering::Less);
    assert_eq!(high.compare_to(&*low), Ordering::Greater);
    assert_eq!(low.compare_to(&*low.clone_geom()), Ordering::Equal);

    let a = factory.create_multi_polygon(vec![square(&factory, 0.0, 0.0, 1.0)]);
    let b = factory.create_multi_polygon(vec![square(&factory, 0.0, 0.0, 2.0)]);
    assert_eq!(a.compare_to(&b), Ordering::Less);
    assert_eq!(b.compare_to(&a), Ordering::Greater);
}
