//! Output configuration section.

use serde::{Deserialize, Serialize};

use crate::grid::SnapshotOrder;

use super::defaults;

/// Snapshot tagging and map export settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Frame id stamped on snapshots
    #[serde(default = "defaults::frame_id")]
    pub frame_id: String,

    /// Snapshot cell order
    #[serde(default)]
    pub order: SnapshotOrder,

    /// Write the final map as PGM + YAML
    #[serde(default = "defaults::enabled")]
    pub export_pgm: bool,

    /// Output directory path
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// File stem of the exported map
    #[serde(default = "defaults::map_name")]
    pub map_name: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            frame_id: "map_laser".to_string(),
            order: SnapshotOrder::ColumnMajor,
            export_pgm: true,
            output_dir: "./output".to_string(),
            map_name: "laser_map".to_string(),
        }
    }
}
