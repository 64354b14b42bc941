//! 2D pose type for robot position and orientation.
//!
//! Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// A 2D pose representing position and orientation in the map frame.
///
/// The heading is kept exactly as supplied; beam bearings are computed as
/// `theta + i * angle_increment` without wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading angle in radians, CCW positive from X-axis.
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose.
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self { x, y, theta }
    }

    /// Create an identity pose (origin, facing forward).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Build a planar pose from a 3D transform (translation + unit quaternion).
    ///
    /// Only the yaw of the rotation is kept; roll and pitch are discarded,
    /// as is the z translation.
    pub fn from_translation_rotation(translation: [f64; 3], rotation: [f64; 4]) -> Self {
        Self::new(
            translation[0] as f32,
            translation[1] as f32,
            yaw_from_quaternion(rotation) as f32,
        )
    }

    /// Get the position as a WorldPoint.
    #[inline]
    pub fn position(self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Is every component finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

/// Extract yaw (rotation about Z) from a quaternion given as `[x, y, z, w]`.
///
/// Uses the ZYX Euler convention, matching `tf.transformations.euler_from_quaternion`.
pub fn yaw_from_quaternion(q: [f64; 4]) -> f64 {
    let [x, y, z, w] = q;
    let siny_cosp = 2.0 * (w * z + x * y);
    let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
    siny_cosp.atan2(cosy_cosp)
}
