use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Nests the items of a JSON instance into its bins
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON instance to arrange
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,
    /// Folder receiving the JSON solution and one SVG per pile
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    /// JSON configuration, defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(short, long, value_name = "[off, error, warn, info, debug, trace]", default_value = "info")]
    pub log_level: LevelFilter,
}
