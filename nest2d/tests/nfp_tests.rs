#[cfg(test)]
mod tests {
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use nest2d::geometry::convex_hull::convex_hull_from_points;
    use nest2d::geometry::geo_enums::GeoPosition;
    use nest2d::geometry::geo_traits::Shape;
    use nest2d::geometry::primitives::{Point, Polygon, SPolygon};
    use nest2d::nfp::{NfpLevel, nfp_convex, no_fit_polygon};

    fn pts(coords: &[(i64, i64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point(x, y)).collect()
    }

    fn contour(coords: &[(i64, i64)]) -> SPolygon {
        SPolygon::new(pts(coords)).unwrap()
    }

    /// Orbiting and stationary convex pairs
    const CONVEX_PAIRS: [(&[(i64, i64)], &[(i64, i64)]); 6] = [
        (
            &[(80, 50), (100, 70), (120, 50)],
            &[(10, 10), (10, 40), (40, 40), (40, 10)],
        ),
        (
            &[(80, 50), (60, 70), (80, 90), (120, 90), (140, 70), (120, 50)],
            &[(10, 10), (10, 40), (40, 40), (40, 10)],
        ),
        (
            &[(40, 10), (30, 10), (20, 20), (20, 30), (30, 40), (40, 40), (50, 30), (50, 20)],
            &[(80, 0), (80, 30), (110, 30), (110, 0)],
        ),
        (
            &[
                (117, 107), (118, 109), (120, 112), (122, 113), (128, 113), (130, 112), (132, 109), (133, 107),
                (133, 103), (132, 101), (130, 98), (128, 97), (122, 97), (120, 98), (118, 101), (117, 103),
            ],
            &[(102, 116), (111, 126), (114, 126), (144, 106), (148, 100), (148, 85), (147, 84), (102, 84)],
        ),
        (
            &[
                (99, 122), (108, 140), (110, 142), (139, 142), (151, 122), (151, 102), (142, 70), (139, 68),
                (111, 68), (108, 70), (99, 102),
            ],
            &[
                (107, 124), (128, 125), (133, 125), (136, 124), (140, 121), (142, 119), (143, 116), (143, 109),
                (141, 93), (139, 89), (136, 86), (134, 85), (108, 85), (107, 86),
            ],
        ),
        (
            &[
                (91, 100), (94, 144), (117, 153), (118, 153), (159, 112), (159, 110), (156, 66), (133, 57),
                (132, 57), (91, 98),
            ],
            &[
                (101, 90), (103, 98), (107, 113), (114, 125), (115, 126), (135, 126), (136, 125), (144, 114),
                (149, 90), (149, 89), (148, 87), (145, 84), (105, 84), (102, 87), (101, 89),
            ],
        ),
    ];

    /// Every vertex of the no-fit polygon is a touching, non-overlapping position of the orbiting shape.
    fn check_convex_nfp(orbiting: &[(i64, i64)], stationary: &[(i64, i64)]) {
        let orbiting = Polygon::from(contour(orbiting)).translated(210, 0);
        let stationary = Polygon::from(contour(stationary));
        assert!(orbiting.outer.is_convex() && stationary.outer.is_convex());

        let nfp = nfp_convex(&stationary.outer, &orbiting.outer).unwrap();
        let nfp_poly = Polygon::from(SPolygon::new(nfp.clone()).unwrap());
        assert!(stationary.is_inside(&nfp_poly), "stationary shape not inside its no-fit polygon");

        let Point(rx, ry) = orbiting.reference_vertex();
        for Point(x, y) in nfp {
            let placed = orbiting.translated(x - rx, y - ry);
            assert!(placed.touches(&stationary), "no contact at ({x}, {y})");
            assert!(!placed.intersects(&stationary), "overlap at ({x}, {y})");
            assert!(!placed.is_inside(&stationary));
        }
    }

    #[test_case(0; "triangle_square")]
    #[test_case(1; "hexagon_square")]
    #[test_case(2; "octagon_square")]
    #[test_case(3; "round_octagon")]
    #[test_case(4; "round_polygons")]
    #[test_case(5; "round_polygons_2")]
    fn convex_nfp_vertices_touch(idx: usize) {
        let (orbiting, stationary) = CONVEX_PAIRS[idx];
        check_convex_nfp(orbiting, stationary);
        check_convex_nfp(stationary, orbiting);
    }

    #[test_case(0; "seed_0")]
    #[test_case(1; "seed_1")]
    #[test_case(2; "seed_2")]
    fn random_convex_nfp_vertices_touch(seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut random_convex = |n: usize| -> Vec<(i64, i64)> {
            let points = (0..n)
                .map(|_| Point(rng.random_range(0..100), rng.random_range(0..100)))
                .collect();
            convex_hull_from_points(points).into_iter().map(|Point(x, y)| (x, y)).collect()
        };
        for _ in 0..20 {
            let a = random_convex(12);
            let b = random_convex(8);
            if a.len() < 3 || b.len() < 3 {
                continue;
            }
            check_convex_nfp(&a, &b);
        }
    }

    /// Star with `n` spikes and random radii, snapped to the grid
    fn random_star(rng: &mut SmallRng, n: usize) -> Polygon {
        let points = (0..2 * n)
            .map(|i| {
                let a = std::f64::consts::PI * i as f64 / n as f64;
                let r = match i % 2 {
                    0 => rng.random_range(40.0..80.0),
                    _ => rng.random_range(12.0..30.0),
                };
                Point((r * a.cos()).round() as i64, (r * a.sin()).round() as i64)
            })
            .collect();
        Polygon::from(SPolygon::new(points).unwrap())
    }

    #[test_case(0; "seed_0")]
    #[test_case(1; "seed_1")]
    #[test_case(2; "seed_2")]
    #[test_case(3; "seed_3")]
    fn random_concave_nfp_vertices_touch(seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let n_stat = rng.random_range(4..7);
        let n_orb = rng.random_range(3..6);
        let stationary = random_star(&mut rng, n_stat);
        let orbiting = random_star(&mut rng, n_orb).translated(300, 120);

        let nfp = no_fit_polygon(&stationary, &orbiting, NfpLevel::Full).unwrap();
        assert!(!nfp.polygons.is_empty());

        let Point(rx, ry) = orbiting.reference_vertex();
        let mut n_checked = 0;
        for poly in &nfp.polygons {
            let vertices = poly.outer.vertices.iter().chain(poly.holes.iter().flat_map(|h| h.vertices.iter()));
            for &Point(x, y) in vertices.filter(|p| !nfp.inexact.contains(p)) {
                let placed = orbiting.translated(x - rx, y - ry);
                assert!(placed.touches(&stationary), "no contact at ({x}, {y})");
                assert!(!placed.intersects(&stationary), "overlap at ({x}, {y})");
                n_checked += 1;
            }
        }
        assert!(n_checked > 0);
    }

    #[test]
    fn hexagon_self_nfp() {
        let hexa = contour(&[(80, 50), (60, 70), (80, 90), (120, 90), (140, 70), (120, 50)]);
        let nfp = nfp_convex(&hexa, &hexa).unwrap();
        assert_eq!(
            nfp,
            pts(&[(40, 10), (120, 10), (160, 50), (120, 90), (40, 90), (0, 50)])
        );

        //two hexagons positioned at an NFP vertex touch without overlapping
        let hexa = Polygon::from(hexa);
        let Point(rx, ry) = hexa.reference_vertex();
        let Point(x, y) = nfp[2];
        let other = hexa.translated(x - rx, y - ry);
        assert!(other.touches(&hexa));
        assert!(!other.intersects(&hexa));
    }

    #[test]
    fn u_slot_yields_nfp_with_hole() {
        //the opening of the U is narrower than the square, the cavity becomes a hole of the no-fit polygon
        let u = Polygon::from(contour(&[
            (0, 0), (100, 0), (100, 100), (55, 100), (55, 80), (80, 80),
            (80, 20), (20, 20), (20, 80), (45, 80), (45, 100), (0, 100),
        ]));
        let square = Polygon::from(contour(&[(0, 0), (20, 0), (20, 20), (0, 20)]));

        let nfp = no_fit_polygon(&u, &square, NfpLevel::Full).unwrap();
        assert!(nfp.inexact.is_empty());
        assert_eq!(nfp.polygons.len(), 1);
        let poly = &nfp.polygons[0];
        assert_eq!(poly.holes.len(), 1);
        assert_eq!(poly.area(), 120.0 * 120.0 - 40.0 * 40.0);

        //the square fits in the cavity, exactly on the hole of the NFP
        assert_eq!(poly.position_of(&Point(40, 40)), GeoPosition::Exterior);
        assert_eq!(poly.position_of(&Point(20, 20)), GeoPosition::Boundary);
        let in_cavity = square.translated(40, 40);
        assert!(!in_cavity.intersects(&u));

        //filling the pockets closes the cavity
        let hull = no_fit_polygon(&u, &square, NfpLevel::ConvexHull).unwrap();
        assert!(hull.polygons[0].holes.is_empty());
        assert_eq!(hull.polygons[0].position_of(&Point(40, 40)), GeoPosition::Interior);
    }

    #[test]
    fn l_shapes_nfp() {
        let l = Polygon::from(contour(&[(0, 0), (60, 0), (60, 20), (20, 20), (20, 60), (0, 60)]));
        let square = Polygon::from(contour(&[(0, 0), (20, 0), (20, 20), (0, 20)]));

        let nfp = no_fit_polygon(&l, &square, NfpLevel::Full).unwrap();
        assert_eq!(nfp.polygons.len(), 1);
        assert_eq!(
            nfp.polygons[0].outer.vertices.len(),
            6,
            "concave corner of the L is preserved"
        );

        let nfp = no_fit_polygon(&l, &l, NfpLevel::Full).unwrap();
        assert_eq!(nfp.polygons.len(), 1);
        assert_eq!(nfp.polygons[0].outer.vertices.len(), 8);
        assert!(l.is_inside(&nfp.polygons[0]));
    }

    #[test]
    fn nfp_is_translation_covariant() {
        let l = Polygon::from(contour(&[(0, 0), (60, 0), (60, 20), (20, 20), (20, 60), (0, 60)]));
        let tri = Polygon::from(contour(&[(0, 0), (30, 0), (0, 30)]));

        let base = no_fit_polygon(&l, &tri, NfpLevel::Full).unwrap();
        let moved = no_fit_polygon(&l.translated(7, -3), &tri.translated(100, 100), NfpLevel::Full).unwrap();
        assert_eq!(base.polygons.len(), moved.polygons.len());
        for (a, b) in base.polygons.iter().zip(moved.polygons.iter()) {
            assert_eq!(&a.translated(7, -3), b);
        }
    }
}
