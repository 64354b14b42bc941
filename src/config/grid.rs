//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;
use crate::grid::GridConfig;

use super::defaults;

/// Grid configuration section.
///
/// These five options are the only ones recognized; anything else in the
/// section is a parse error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSection {
    /// Grid width (cells)
    #[serde(default = "defaults::grid_size")]
    pub width: usize,

    /// Grid height (cells)
    #[serde(default = "defaults::grid_size")]
    pub height: usize,

    /// Cell resolution (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,

    /// World X of cell (0,0)'s lower corner
    #[serde(default = "defaults::origin")]
    pub origin_x: f32,

    /// World Y of cell (0,0)'s lower corner
    #[serde(default = "defaults::origin")]
    pub origin_y: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: 384,
            height: 384,
            resolution: 0.05,
            origin_x: -10.0,
            origin_y: -10.0,
        }
    }
}

impl GridSection {
    /// Convert to GridConfig
    pub fn to_grid_config(&self) -> GridConfig {
        GridConfig::new(
            self.width,
            self.height,
            self.resolution,
            WorldPoint::new(self.origin_x, self.origin_y),
        )
    }
}
