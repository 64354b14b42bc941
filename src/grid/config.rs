//! Configuration types for the occupancy grid.

use crate::core::WorldPoint;
use serde::{Deserialize, Serialize};

/// Invalid grid configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Width or height of zero
    #[error("Grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
    },

    /// Resolution is zero, negative, or not finite
    #[error("Resolution must be a positive finite number, got {0}")]
    InvalidResolution(f32),

    /// Origin is not finite
    #[error("Origin must be finite, got ({0}, {1})")]
    InvalidOrigin(f32, f32),

    /// Cell count does not fit the `i32` index space used by ray tracing
    #[error("Grid of {width}x{height} cells exceeds the addressable index range")]
    TooLarge {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
    },
}

/// Grid configuration.
///
/// Fixed for the lifetime of the grid; the storage never resizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid width in cells (X axis, columns)
    pub width: usize,

    /// Grid height in cells (Y axis, rows)
    pub height: usize,

    /// Meters per cell (e.g., 0.05 = 5cm cells)
    pub resolution: f32,

    /// World coordinates of the lower corner of cell (0,0)
    pub origin: WorldPoint,
}

impl Default for GridConfig {
    fn default() -> Self {
        // 19.2m x 19.2m at 5cm, origin placed so (0,0) world lands at cell (200,200)
        Self {
            width: 384,
            height: 384,
            resolution: 0.05,
            origin: WorldPoint::new(-10.0, -10.0),
        }
    }
}

impl GridConfig {
    /// Create a configuration.
    pub fn new(width: usize, height: usize, resolution: f32, origin: WorldPoint) -> Self {
        Self {
            width,
            height,
            resolution,
            origin,
        }
    }

    /// Create a configuration for a grid centered on the world origin.
    pub fn centered(width: usize, height: usize, resolution: f32) -> Self {
        let half_width = (width as f32 * resolution) / 2.0;
        let half_height = (height as f32 * resolution) / 2.0;
        Self::new(
            width,
            height,
            resolution,
            WorldPoint::new(-half_width, -half_height),
        )
    }

    /// Check that the configuration describes a usable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > i32::MAX as usize
            || self.height > i32::MAX as usize
            || self.width.checked_mul(self.height).is_none()
        {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            return Err(ConfigError::InvalidOrigin(self.origin.x, self.origin.y));
        }
        Ok(())
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Covered area in world units (width_m, height_m)
    pub fn extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.resolution,
            self.height as f32 * self.resolution,
        )
    }
}
