#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;
    use std::time::Instant;

    use test_case::test_case;

    use nest2d::arranger::{Arranger, ArrangerConfig};
    use nest2d::entities::Instance;
    use nest2d::geometry::geo_traits::Shape;
    use nest2d::geometry::primitives::Point;
    use nest2d::io::export::Exporter;
    use nest2d::io::ext_repr::{ExtInstance, ExtShape, ExtSolution};
    use nest2d::io::import::Importer;
    use nest2d::io::svg::{SvgDrawOptions, pile_to_svg};
    use nest2d::placement::NfpPlacer;
    use nest2d::selection::DjdSelection;

    fn read_instance(path: &str) -> ExtInstance {
        let file = File::open(Path::new(path)).unwrap();
        serde_json::from_reader(BufReader::new(file)).unwrap()
    }

    #[test_case("../assets/rects20.json", 1.0, 20; "rects20")]
    #[test_case("../assets/shapes.json", 1.0, 33; "shapes")]
    #[test_case("../assets/scaled_mm.json", 100.0, 23; "scaled_mm")]
    fn import_assets(path: &str, scale: f64, n_copies: usize) {
        let ext = read_instance(path);
        let instance = Importer::new(scale).import_instance(&ext).unwrap();
        assert_eq!(instance.total_item_qty(), n_copies);
        assert_eq!(instance.items.len(), ext.items.len());
        for (item, _) in &instance.items {
            assert!(item.shape_orig.validate().is_ok(), "item {} invalid", item.id);
            assert!(item.shape_orig.outer.is_ccw());
        }
    }

    #[test]
    fn coordinates_are_scaled_and_rounded() {
        let ext = read_instance("../assets/scaled_mm.json");
        let instance = Importer::new(100.0).import_instance(&ext).unwrap();
        let pentagon = &instance.item(0).shape_orig;
        assert!(pentagon.outer.vertices.contains(&Point(625, 850)));
        assert_eq!(instance.item(1).area, 750.0 * 320.0);
        assert_eq!(instance.bins[0].rect.width(), 5000);

        //orientations are given in degrees
        let rotations = instance.item(0).allowed_rotations.clone().unwrap();
        assert_eq!(rotations, vec![0.0, 180f64.to_radians()]);
        assert_eq!(instance.item(1).allowed_rotations, None);
    }

    #[test]
    fn polygon_holes_are_imported() {
        let ext = read_instance("../assets/shapes.json");
        assert!(matches!(ext.items[2].shape, ExtShape::Polygon(_)));
        let instance = Importer::new(1.0).import_instance(&ext).unwrap();
        let frame = &instance.item(2).shape_orig;
        assert_eq!(frame.holes.len(), 1);
        assert_eq!(frame.area(), 70.0 * 70.0 - 40.0 * 40.0);
    }

    #[test]
    fn invalid_instances_are_rejected() {
        let mut ext = read_instance("../assets/rects20.json");
        ext.items[3].id = 42;
        assert!(Importer::new(1.0).import_instance(&ext).is_err());

        let mut ext = read_instance("../assets/rects20.json");
        ext.items[0].allowed_orientations = Some(vec![]);
        assert!(Importer::new(1.0).import_instance(&ext).is_err());

        let ext = read_instance("../assets/rects20.json");
        assert!(Importer::new(0.0).import_instance(&ext).is_err());
        assert!(Importer::new(f64::NAN).import_instance(&ext).is_err());
    }

    fn solve(instance: &Instance) -> nest2d::entities::ArrangeResult {
        Arranger::<NfpPlacer, DjdSelection>::new(ArrangerConfig::default())
            .unwrap()
            .arrange(instance)
            .unwrap()
    }

    #[test]
    fn solution_is_exported_in_instance_units() {
        let ext = read_instance("../assets/scaled_mm.json");
        let scale = 100.0;
        let instance = Importer::new(scale).import_instance(&ext).unwrap();
        let result = solve(&instance);

        let solution = Exporter::new(scale).export_solution(&instance, &result, Instant::now());
        let n_exported: usize = solution.piles.iter().map(|p| p.items.len()).sum();
        assert_eq!(n_exported, result.n_placed());
        assert_eq!(n_exported + solution.unplaced.len(), instance.total_item_qty());
        //the strip of 60 mm does not fit a bin of 50 by 40 mm
        assert!(solution.unplaced.iter().any(|u| u.item_id == 2));
        assert!(solution.density > 0.0 && solution.density <= 1.0);

        for (ext_pile, pile) in solution.piles.iter().zip(result.piles.iter()) {
            for (ext_pi, (_, pi)) in ext_pile.items.iter().zip(pile.items()) {
                let (tx, ty) = pi.d_transf.translation();
                assert_eq!(ext_pi.transformation.translation, (tx as f64 / scale, ty as f64 / scale));
                assert_eq!(ext_pi.transformation.rotation, pi.d_transf.rotation().to_degrees());
            }
        }

        //the solution survives a trip through json
        let json = serde_json::to_string_pretty(&solution).unwrap();
        let parsed: ExtSolution = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.piles.len(), solution.piles.len());
        assert_eq!(parsed.unplaced.len(), solution.unplaced.len());
    }

    #[test]
    fn piles_render_as_svg() {
        let ext = read_instance("../assets/shapes.json");
        let instance = Importer::new(1.0).import_instance(&ext).unwrap();
        let result = solve(&instance);
        assert!(!result.piles.is_empty());
        for (i, pile) in result.piles.iter().enumerate() {
            let doc = pile_to_svg(pile, &instance, SvgDrawOptions::default(), &format!("pile {i}")).to_string();
            assert!(doc.contains("<svg"));
            assert_eq!(doc.matches("<use").count(), pile.len());
        }
    }
}
