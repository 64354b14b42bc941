//! Test utilities for RekhaGrid integration tests.
//!
//! Grids, readings and collaborators shared by the test binaries.

#![allow(dead_code)]

use std::f32::consts::PI;

use rekha_grid::core::WorldPoint;
use rekha_grid::{Error, GridConfig, LaserReading, Pose2D, Result};

/// Path of the bundled sample recording.
pub const SAMPLE_RECORDING: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_recording.yaml");

/// The 384x384 reference grid at 5cm with origin (-10, -10).
pub fn reference_config() -> GridConfig {
    GridConfig::default()
}

/// A 10x10 grid of 1m cells with cell (0,0) at the world origin.
///
/// World coordinates map to cells by plain flooring, which keeps expected
/// cells easy to read in tests.
pub fn unit_config() -> GridConfig {
    GridConfig::new(10, 10, 1.0, WorldPoint::ZERO)
}

/// Reading with a fixed angular step and timestamp.
pub fn reading(ranges: Vec<f32>, angle_increment: f32, timestamp: f64) -> LaserReading {
    LaserReading::new(ranges, angle_increment, timestamp).unwrap()
}

/// Full 360° sweep taken inside an axis-aligned room spanning
/// `[0, room_width] x [0, room_height]`.
pub fn room_reading(
    room_width: f32,
    room_height: f32,
    robot_x: f32,
    robot_y: f32,
    num_points: usize,
) -> LaserReading {
    let angle_increment = 2.0 * PI / num_points as f32;

    let ranges = (0..num_points)
        .map(|i| {
            let angle = i as f32 * angle_increment;
            let (sin_a, cos_a) = angle.sin_cos();

            let tx = if cos_a > 1e-6 {
                (room_width - robot_x) / cos_a
            } else if cos_a < -1e-6 {
                -robot_x / cos_a
            } else {
                f32::INFINITY
            };
            let ty = if sin_a > 1e-6 {
                (room_height - robot_y) / sin_a
            } else if sin_a < -1e-6 {
                -robot_y / sin_a
            } else {
                f32::INFINITY
            };

            tx.min(ty)
        })
        .collect();

    reading(ranges, angle_increment, 0.0)
}

/// Pose provider that fails every lookup.
pub fn no_transform(timestamp: f64) -> Result<Pose2D> {
    Err(Error::transform_unavailable(timestamp, "tf tree empty"))
}
