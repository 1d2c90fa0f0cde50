use std::sync::LazyLock;
use std::time::Instant;

use nest2d::arranger::Arranger;
use nest2d::entities::{ArrangeResult, Instance};
use nest2d::error::NestError;
use nest2d::placement::{BottomLeftPlacer, NfpPlacer};
use nest2d::selection::{DjdSelection, FirstFitSelection};

use crate::config::{ArrangeConfig, PlacerKind, SelectionKind};

pub mod config;
pub mod io;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Arranges the instance with the placer and selection strategy chosen in `config`.
pub fn arrange(instance: &Instance, config: &ArrangeConfig) -> Result<ArrangeResult, NestError> {
    let arranger_config = config.arranger.clone();
    match (config.placer, config.selection) {
        (PlacerKind::Nfp, SelectionKind::FirstFit) => {
            Arranger::<NfpPlacer, FirstFitSelection>::new(arranger_config)?.arrange(instance)
        }
        (PlacerKind::Nfp, SelectionKind::Djd) => {
            Arranger::<NfpPlacer, DjdSelection>::new(arranger_config)?.arrange(instance)
        }
        (PlacerKind::BottomLeft, SelectionKind::FirstFit) => {
            Arranger::<BottomLeftPlacer, FirstFitSelection>::new(arranger_config)?.arrange(instance)
        }
        (PlacerKind::BottomLeft, SelectionKind::Djd) => {
            Arranger::<BottomLeftPlacer, DjdSelection>::new(arranger_config)?.arrange(instance)
        }
    }
}
