use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use thousands::Separable;

use arrange::config::ArrangeConfig;
use arrange::io::cli::Cli;
use arrange::io::output::ArrangeOutput;
use arrange::{EPOCH, io};
use nest2d::io::ext_repr::ExtInstance;
use nest2d::io::export::Exporter;
use nest2d::io::import::Importer;
use nest2d::io::svg::pile_to_svg;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            ArrangeConfig::default()
        }
        Some(config_file) => io::read_config(config_file)?,
    };

    info!("[MAIN] Successfully parsed ArrangeConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid input file name: {}", args.input_file.display()))?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder)
            .with_context(|| format!("could not create solution folder: {}", args.solution_folder.display()))?;
    }

    let ext_instance = io::read_instance(args.input_file.as_path())?;
    main_arrange(ext_instance, config, &input_file_stem, args.solution_folder)
}

fn main_arrange(ext_instance: ExtInstance, config: ArrangeConfig, input_stem: &str, output_folder: PathBuf) -> Result<()> {
    let instance = Importer::new(config.scale).import_instance(&ext_instance)?;
    info!(
        "[MAIN] Imported instance \"{}\" with {} items ({} copies) and {} bins",
        ext_instance.name,
        instance.items.len(),
        instance.total_item_qty().separate_with_commas(),
        instance.bins.len()
    );

    let result = arrange::arrange(&instance, &config)?;
    info!(
        "[MAIN] Placed {} of {} items in {} piles",
        result.n_placed().separate_with_commas(),
        instance.total_item_qty().separate_with_commas(),
        result.piles.len()
    );
    for unplaced in &result.unplaced {
        warn!("[MAIN] Item {} not placed: {}", unplaced.item_id, unplaced.error);
    }

    {
        let output = ArrangeOutput {
            solution: Exporter::new(config.scale).export_solution(&instance, &result, *EPOCH),
            instance: ext_instance,
            config: config.clone(),
        };

        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));

        io::write_json(&output, Path::new(&solution_path))?;
    }

    {
        for (i, pile) in result.piles.iter().enumerate() {
            let svg_path = output_folder.join(format!("sol_{input_stem}_{i}.svg"));
            let title = format!("{input_stem} [{i}]");
            let svg = pile_to_svg(pile, &instance, config.svg_draw_options, &title);

            io::write_svg(&svg, Path::new(&svg_path))?;
        }
    }

    Ok(())
}
