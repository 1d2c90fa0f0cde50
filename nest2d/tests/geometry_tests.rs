#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use test_case::test_case;

    use nest2d::error::GeometryError;
    use nest2d::geometry::DTransformation;
    use nest2d::geometry::convex_hull::convex_hull_from_points;
    use nest2d::geometry::edge_cache::EdgeCache;
    use nest2d::geometry::geo_enums::{GeoPosition, GeoRelation};
    use nest2d::geometry::geo_traits::{DistanceTo, Shape, Transformable};
    use nest2d::geometry::primitives::{Edge, Point, Polygon, Rect, SPolygon};
    use ordered_float::NotNan;

    fn poly(coords: &[(i64, i64)]) -> Polygon {
        Polygon::from_contours(coords.iter().map(|&p| p.into()).collect(), vec![]).unwrap()
    }

    fn square(x: i64, y: i64, size: i64) -> Polygon {
        poly(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    fn frame() -> Polygon {
        Polygon::from_contours(
            vec![Point(0, 0), Point(100, 0), Point(100, 100), Point(0, 100)],
            vec![vec![Point(20, 20), Point(80, 20), Point(80, 80), Point(20, 80)]],
        )
        .unwrap()
    }

    #[test_case(square(0, 0, 10), square(20, 0, 10), GeoRelation::Disjoint; "disjoint")]
    #[test_case(square(0, 0, 10), square(10, 0, 10), GeoRelation::Touching; "edge_contact")]
    #[test_case(square(0, 0, 10), square(10, 10, 10), GeoRelation::Touching; "corner_contact")]
    #[test_case(square(0, 0, 10), square(5, 5, 10), GeoRelation::Intersecting; "overlap")]
    #[test_case(square(2, 2, 5), square(0, 0, 10), GeoRelation::Enclosed; "enclosed")]
    #[test_case(square(0, 0, 10), square(0, 0, 10), GeoRelation::Enclosed; "identical")]
    #[test_case(square(0, 0, 10), square(2, 2, 5), GeoRelation::Surrounding; "surrounding")]
    #[test_case(square(20, 20, 60), frame(), GeoRelation::Touching; "fills_hole")]
    #[test_case(square(40, 40, 10), frame(), GeoRelation::Disjoint; "inside_hole")]
    #[test_case(square(10, 10, 20), frame(), GeoRelation::Intersecting; "crosses_hole_boundary")]
    fn relations(a: Polygon, b: Polygon, expected: GeoRelation) {
        assert_eq!(a.relation(&b), expected);
    }

    #[test_case(Point(50, 50), GeoPosition::Exterior; "in_hole")]
    #[test_case(Point(10, 10), GeoPosition::Interior; "in_ring")]
    #[test_case(Point(20, 50), GeoPosition::Boundary; "on_hole")]
    #[test_case(Point(100, 100), GeoPosition::Boundary; "outer_corner")]
    #[test_case(Point(101, 50), GeoPosition::Exterior; "outside")]
    fn position_in_frame(p: Point, expected: GeoPosition) {
        assert_eq!(frame().position_of(&p), expected);
    }

    #[test]
    fn orientation_is_normalized() {
        let cw = SPolygon::new(vec![Point(0, 0), Point(0, 10), Point(10, 10), Point(10, 0)]).unwrap();
        assert!(cw.is_ccw());
        assert_eq!(cw.area, 100.0);
        assert_eq!(cw.signed_area(), 100.0);

        let hole = SPolygon::new_hole(vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)]).unwrap();
        assert!(!hole.is_ccw());
        assert_eq!(frame().area(), 100.0 * 100.0 - 60.0 * 60.0);
    }

    #[test]
    fn invalid_contours() {
        assert_eq!(
            SPolygon::new(vec![Point(0, 0), Point(10, 0)]).err(),
            Some(GeometryError::TooFewVertices(2))
        );
        assert_eq!(
            SPolygon::new(vec![Point(0, 0), Point(10, 0), Point(20, 0)]).err(),
            Some(GeometryError::ZeroArea)
        );
        let bowtie = poly(&[(0, 0), (30, 20), (30, 0), (0, 10)]);
        assert!(matches!(
            bowtie.validate(),
            Err(GeometryError::SelfIntersection { .. })
        ));
        assert!(frame().validate().is_ok());

        let escaping_hole = Polygon::from_contours(
            vec![Point(0, 0), Point(10, 0), Point(10, 10), Point(0, 10)],
            vec![vec![Point(5, 5), Point(15, 5), Point(15, 8)]],
        )
        .unwrap();
        assert!(escaping_hole.validate().is_err());
    }

    #[test]
    fn reference_vertex_is_lowest_then_leftmost() {
        let p = poly(&[(10, 0), (20, 5), (15, 20), (0, 0)]);
        assert_eq!(p.reference_vertex(), Point(0, 0));
        let p = poly(&[(5, 3), (20, 3), (10, 20)]);
        assert_eq!(p.reference_vertex(), Point(5, 3));
    }

    #[test]
    fn convexity_and_hull() {
        let l = poly(&[(0, 0), (60, 0), (60, 20), (20, 20), (20, 60), (0, 60)]);
        assert!(!l.is_convex());
        assert!(square(0, 0, 10).is_convex());
        assert!(!frame().is_convex());

        let hull = convex_hull_from_points(l.outer.vertices.clone());
        let hull = SPolygon::new(hull).unwrap();
        assert!(hull.is_convex());
        assert_eq!(hull.n_vertices(), 5);
        assert_eq!(hull.area, 60.0 * 60.0 - 40.0 * 40.0 / 2.0);
    }

    #[test]
    fn axis_distances() {
        let edge = Edge::new(Point(10, 0), Point(10, 100));
        //positive when the edge lies to the left
        assert_eq!(Point(0, 50).horizontal_distance(&edge), Some(-10));
        assert_eq!(Point(25, 50).horizontal_distance(&edge), Some(15));
        assert_eq!(Point(0, 150).horizontal_distance(&edge), None);

        let floor = Edge::new(Point(0, 5), Point(100, 5));
        assert_eq!(Point(30, 40).vertical_distance(&floor), Some(35));

        assert_eq!(Point(0, 0).distance(&Point(3, 4)), 5.0);
        assert_eq!(Point(0, 50).distance(&edge), 10.0);
    }

    #[test]
    fn rotation_snaps_to_grid() {
        let t = DTransformation::new(NotNan::new(PI / 2.0).unwrap(), (100, 0));
        let rotated = square(0, 0, 10).transform_clone(&t);
        assert_eq!(rotated.bbox(), Rect::try_new(90, 0, 100, 10).unwrap());
        assert_eq!(rotated.area(), 100.0);
    }

    #[test]
    fn edge_cache_wraps_around() {
        let sq = square(0, 0, 10);
        let cache = EdgeCache::new(&sq.outer);
        assert_eq!(cache.circumference(), 40.0);
        assert_eq!(cache.coords(0.0), (0.0, 0.0));
        assert_eq!(cache.coords(1.0), (0.0, 0.0));
        assert_eq!(cache.coords(0.125), (5.0, 0.0));
        assert_eq!(cache.coords(0.5), (10.0, 10.0));
        assert_eq!(cache.samples(4).collect::<Vec<_>>(), sq.outer.vertices);
    }
}
