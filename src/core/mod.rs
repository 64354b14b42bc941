//! Core types for the RekhaGrid library.
//!
//! All types follow the ROS REP-103 coordinate convention:
//! - **X-axis**: Forward (positive ahead of robot)
//! - **Y-axis**: Left (positive to robot's left)
//! - **Theta**: Counter-clockwise rotation from +X axis (radians)
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`GridCoord`]: Integer cell indices for occupancy grid access
//! - [`WorldPoint`]: Floating-point world coordinates in meters
//!
//! ### Robot State
//! - [`Pose2D`]: Robot position (x, y) and orientation (theta)
//!
//! ### Grid Cells
//! - [`CellState`]: Unknown / Free / Occupied with `i8` wire values
//!
//! ### Sensors
//! - [`LaserReading`]: One planar range sweep with a fixed angular step

mod cell;
mod point;
mod pose;
mod reading;

pub use cell::CellState;
pub use point::{GridCoord, WorldPoint};
pub use pose::{Pose2D, yaw_from_quaternion};
pub use reading::LaserReading;
