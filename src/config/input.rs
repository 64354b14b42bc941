//! Input configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Where readings and poses come from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputSection {
    /// Recording to replay (overridden by `--recording`)
    #[serde(default)]
    pub recording: Option<String>,

    /// Largest gap (seconds) between a reading and the pose used for it
    #[serde(default = "defaults::pose_tolerance")]
    pub pose_tolerance: f64,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            recording: None,
            pose_tolerance: 0.1,
        }
    }
}
