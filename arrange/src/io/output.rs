use serde::{Deserialize, Serialize};

use nest2d::io::ext_repr::{ExtInstance, ExtSolution};

use crate::config::ArrangeConfig;

#[derive(Serialize, Deserialize, Clone)]
pub struct ArrangeOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: ArrangeConfig,
}
