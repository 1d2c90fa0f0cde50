#[cfg(test)]
mod tests {
    use std::path::Path;

    use itertools::Itertools;
    use log::LevelFilter;
    use test_case::test_case;

    use arrange::config::{ArrangeConfig, PlacerKind, SelectionKind};
    use arrange::io;
    use arrange::io::output::ArrangeOutput;
    use arrange::EPOCH;
    use nest2d::geometry::geo_traits::Shape;
    use nest2d::io::export::Exporter;
    use nest2d::io::import::Importer;
    use nest2d::io::svg::pile_to_svg;

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Info)
            .is_test(true)
            .try_init();
    }

    #[test_case("../assets/rects20.json", 1.0, PlacerKind::Nfp, SelectionKind::Djd; "rects20_nfp_djd")]
    #[test_case("../assets/rects20.json", 1.0, PlacerKind::BottomLeft, SelectionKind::FirstFit; "rects20_bl_ff")]
    #[test_case("../assets/shapes.json", 1.0, PlacerKind::Nfp, SelectionKind::FirstFit; "shapes_nfp_ff")]
    #[test_case("../assets/shapes.json", 1.0, PlacerKind::Nfp, SelectionKind::Djd; "shapes_nfp_djd")]
    #[test_case("../assets/shapes.json", 1.0, PlacerKind::BottomLeft, SelectionKind::Djd; "shapes_bl_djd")]
    #[test_case("../assets/scaled_mm.json", 100.0, PlacerKind::Nfp, SelectionKind::Djd; "scaled_mm_nfp_djd")]
    fn test_instance(instance_path: &str, scale: f64, placer: PlacerKind, selection: SelectionKind) {
        init_logger();
        let config = ArrangeConfig {
            placer,
            selection,
            scale,
            ..ArrangeConfig::default()
        };
        let ext_instance = io::read_instance(Path::new(instance_path)).unwrap();
        let instance = Importer::new(config.scale).import_instance(&ext_instance).unwrap();

        let result = arrange::arrange(&instance, &config).unwrap();

        // every copy is either placed or reported
        assert_eq!(result.n_placed() + result.unplaced.len(), instance.total_item_qty());
        assert!(!result.cancelled);

        for pile in &result.piles {
            assert!(!pile.is_empty());
            for (_, pi) in pile.items() {
                assert!(pile.rect.contains_rect(&pi.shape.bbox()), "item {} exceeds bin", pi.item_id);
            }
            for ((_, a), (_, b)) in pile.items().tuple_combinations() {
                assert!(!a.shape.intersects(&b.shape), "items {} and {} overlap", a.item_id, b.item_id);
            }
            let svg = pile_to_svg(pile, &instance, config.svg_draw_options, "test").to_string();
            assert_eq!(svg.matches("<use").count(), pile.len());
        }

        let solution = Exporter::new(config.scale).export_solution(&instance, &result, *EPOCH);
        assert_eq!(solution.piles.len(), result.piles.len());
        assert_eq!(solution.unplaced.len(), result.unplaced.len());
    }

    #[test]
    fn output_is_written_and_parsed_back() {
        init_logger();
        let config = ArrangeConfig::default();
        let ext_instance = io::read_instance(Path::new("../assets/rects20.json")).unwrap();
        let instance = Importer::new(config.scale).import_instance(&ext_instance).unwrap();
        let result = arrange::arrange(&instance, &config).unwrap();

        let output = ArrangeOutput {
            solution: Exporter::new(config.scale).export_solution(&instance, &result, *EPOCH),
            instance: ext_instance,
            config: config.clone(),
        };

        let folder = std::env::temp_dir().join("arrange_output_test");
        std::fs::create_dir_all(&folder).unwrap();
        let path = folder.join("sol_rects20.json");
        io::write_json(&output, &path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let parsed: ArrangeOutput = serde_json::from_reader(std::io::BufReader::new(file)).unwrap();
        assert_eq!(parsed.config, config);
        assert_eq!(parsed.instance.items.len(), 10);
        assert_eq!(parsed.solution.piles.len(), output.solution.piles.len());
        assert_eq!(
            parsed.solution.piles.iter().map(|p| p.items.len()).sum::<usize>(),
            result.n_placed()
        );
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: ArrangeConfig = serde_json::from_str(r#"{"placer": "bottom_left", "scale": 10.0}"#).unwrap();
        assert_eq!(config.placer, PlacerKind::BottomLeft);
        assert_eq!(config.selection, SelectionKind::Djd);
        assert_eq!(config.scale, 10.0);
        assert_eq!(config.arranger, ArrangeConfig::default().arranger);
    }
}
