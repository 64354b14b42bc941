//! Configuration loading errors.

use crate::grid::ConfigError;

/// Config load error
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML could not be parsed, or carried unrecognized options
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Values parsed but describe an unusable grid
    #[error("Invalid grid: {0}")]
    Invalid(#[from] ConfigError),
}
