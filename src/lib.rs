//! # RekhaGrid
//!
//! Deterministic laser occupancy-grid mapping.
//!
//! ## Overview
//!
//! Every returned beam of a planar laser reading is rasterized from the
//! robot's cell to the beam's endpoint cell. Cells on the way become
//! **Free**, the endpoint becomes **Occupied**, and everything never seen
//! stays **Unknown**. There are no probabilities: each cell holds the
//! outcome of the most recent write.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rekha_grid::{GridConfig, LaserReading, Pose2D, ScanProcessor};
//! use rekha_grid::io::{MemorySink, StaticPose};
//!
//! let mut processor = ScanProcessor::new(&GridConfig::default())?;
//! let reading = LaserReading::new(vec![2.0, 2.0], 0.01, 0.0)?;
//!
//! let mut poses = StaticPose(Pose2D::identity());
//! let mut sink = MemorySink::new();
//! let result = processor.process(&reading, &mut poses, &mut sink)?;
//!
//! println!("{} free, {} occupied", result.free_writes, result.occupied_writes);
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward (positive ahead of robot)
//! - Y: Left (positive to robot's left)
//! - Theta: Rotation in radians, CCW positive from +X axis

#![warn(missing_docs)]

// Core types
pub mod core;

// Grid storage, rasterization and update
pub mod grid;

// Configuration loading
pub mod config;

// Readings in, snapshots out
pub mod io;

// Per-reading orchestration
pub mod processor;

mod error;

pub use crate::core::{CellState, GridCoord, LaserReading, Pose2D, WorldPoint};

pub use grid::{CellCounts, ConfigError, GridConfig, GridSnapshot, GridStorage, SnapshotOrder};

pub use config::{ConfigLoadError, RekhaConfig};

pub use error::{Error, Result};

pub use processor::{ReplayStats, ScanProcessor};

/// Result of applying one reading (or one beam) to the grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Beams rasterized into the grid
    pub beams_applied: usize,
    /// Beams skipped because they carried no return
    pub beams_skipped: usize,
    /// Cells written Free
    pub free_writes: usize,
    /// Cells written Occupied
    pub occupied_writes: usize,
    /// Writes dropped because the cell was outside the grid
    pub dropped_writes: usize,
}

impl UpdateSummary {
    /// Merge another result into this one
    pub fn merge(&mut self, other: &UpdateSummary) {
        self.beams_applied += other.beams_applied;
        self.beams_skipped += other.beams_skipped;
        self.free_writes += other.free_writes;
        self.occupied_writes += other.occupied_writes;
        self.dropped_writes += other.dropped_writes;
    }

    /// Did any write land inside the grid?
    pub fn touched_grid(&self) -> bool {
        self.free_writes + self.occupied_writes > 0
    }
}
