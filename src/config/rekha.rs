//! Main RekhaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;
use crate::processor::ScanProcessor;

use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::input::InputSection;
use super::output::OutputSection;

/// Full RekhaGrid configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct RekhaConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Reading and pose input
    #[serde(default)]
    pub input: InputSection,

    /// Snapshot and export settings
    #[serde(default)]
    pub output: OutputSection,
}

impl RekhaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string. The grid section is validated here so a bad
    /// file fails at load time rather than at grid construction.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.to_grid_config().validate()?;
        Ok(config)
    }

    /// Convert to GridConfig
    pub fn to_grid_config(&self) -> GridConfig {
        self.grid.to_grid_config()
    }

    /// Build a processor with the configured grid, frame id and order
    pub fn build_processor(&self) -> Result<ScanProcessor, ConfigLoadError> {
        Ok(ScanProcessor::new(&self.to_grid_config())?
            .with_frame_id(self.output.frame_id.clone())
            .with_order(self.output.order))
    }
}
