use serde::{Deserialize, Serialize};

use nest2d::arranger::ArrangerConfig;
use nest2d::io::svg::SvgDrawOptions;

/// Placement strategy used to position items inside a bin
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlacerKind {
    /// Candidates on the no-fit polygons of the placed items, scored by the objective function
    #[default]
    Nfp,
    /// Slides every item down and to the left until it hits an obstacle
    BottomLeft,
}

/// Strategy deciding which items are offered to the placer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    FirstFit,
    /// Djang and Finch heuristic
    #[default]
    Djd,
}

/// Configuration of a run of the command line tool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArrangeConfig {
    pub placer: PlacerKind,
    pub selection: SelectionKind,
    pub arranger: ArrangerConfig,
    /// Factor converting the coordinates of the instance to the integer grid
    pub scale: f64,
    /// Optional SVG drawing options
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            placer: PlacerKind::default(),
            selection: SelectionKind::default(),
            arranger: ArrangerConfig::default(),
            scale: 1.0,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
