//! YAML recordings of laser sweeps and robot poses.
//!
//! A recording replays a mapping session without the live sensor or the
//! localization service:
//!
//! ```yaml
//! poses:                       # optional, transforms at their own rate
//!   - timestamp: 0.0
//!     translation: [0.0, 0.0, 0.0]
//!     rotation: [0.0, 0.0, 0.0, 1.0]
//! frames:
//!   - timestamp: 0.0
//!     angle_increment: 0.0175
//!     angle_min: 0.0           # optional coverage check
//!     angle_max: 6.2657
//!     ranges: [1.2, .inf, 1.3]
//!     pose: { x: 0.0, y: 0.0, theta: 0.0 }   # optional inline pose
//! ```
//!
//! `.inf` is the YAML spelling of the no-return sentinel.

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{LaserReading, Pose2D};
use crate::error::{Error, Result};

use super::traits::{PoseProvider, ReadingSource};

/// Pose as written in a recording.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoseRecord {
    /// Planar pose
    Planar {
        /// X position in meters
        x: f32,
        /// Y position in meters
        y: f32,
        /// Heading in radians
        #[serde(default)]
        theta: f32,
    },
    /// 3D transform, only x, y and yaw are used
    Transform {
        /// Translation [x, y, z]
        translation: [f64; 3],
        /// Rotation quaternion [x, y, z, w]
        rotation: [f64; 4],
    },
}

impl PoseRecord {
    /// Reduce to a planar pose.
    pub fn to_pose(&self) -> Pose2D {
        match *self {
            PoseRecord::Planar { x, y, theta } => Pose2D::new(x, y, theta),
            PoseRecord::Transform {
                translation,
                rotation,
            } => Pose2D::from_translation_rotation(translation, rotation),
        }
    }
}

/// Timestamped pose entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseStamp {
    /// Time in seconds
    pub timestamp: f64,
    /// The pose at that time
    #[serde(flatten)]
    pub pose: PoseRecord,
}

/// One recorded sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Acquisition time in seconds
    pub timestamp: f64,
    /// Angle between consecutive beams in radians
    pub angle_increment: f32,
    /// Start of the declared coverage (radians)
    #[serde(default)]
    pub angle_min: Option<f32>,
    /// End of the declared coverage (radians)
    #[serde(default)]
    pub angle_max: Option<f32>,
    /// Ranges in meters, `.inf` for no return
    pub ranges: Vec<f32>,
    /// Pose at acquisition time, if recorded inline
    #[serde(default)]
    pub pose: Option<PoseRecord>,
}

impl Frame {
    /// Validate the frame into a reading.
    pub fn to_reading(&self) -> Result<LaserReading> {
        match (self.angle_min, self.angle_max) {
            (Some(min), Some(max)) => LaserReading::with_coverage(
                self.ranges.clone(),
                min,
                max,
                self.angle_increment,
                self.timestamp,
            ),
            (None, None) => {
                LaserReading::new(self.ranges.clone(), self.angle_increment, self.timestamp)
            }
            _ => Err(Error::MalformedReading(format!(
                "frame at t={} declares only one end of its coverage",
                self.timestamp
            ))),
        }
    }
}

/// A complete recording.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Standalone pose stream
    #[serde(default)]
    pub poses: Vec<PoseStamp>,
    /// Laser sweeps in playback order
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Recording {
    /// Load a recording from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let recording = Self::from_yaml(&contents)?;
        log::info!(
            "Loaded recording {}: {} frames, {} poses",
            path.display(),
            recording.frames.len(),
            recording.poses.len()
        );
        Ok(recording)
    }

    /// Parse a recording from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Every pose in the recording: the standalone stream plus inline frame poses.
    pub fn all_poses(&self) -> Vec<(f64, Pose2D)> {
        self.poses
            .iter()
            .map(|p| (p.timestamp, p.pose.to_pose()))
            .chain(
                self.frames
                    .iter()
                    .filter_map(|f| f.pose.as_ref().map(|p| (f.timestamp, p.to_pose()))),
            )
            .collect()
    }

    /// Split into a reading source and a pose provider.
    ///
    /// `tolerance` is the largest time gap (seconds) between a reading and
    /// the pose used for it.
    pub fn into_replay(self, tolerance: f64) -> (RecordingSource, RecordedPoses) {
        let poses = RecordedPoses::new(self.all_poses(), tolerance);
        let source = RecordingSource::new(self.frames);
        (source, poses)
    }
}

/// Replays recorded frames in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSource {
    frames: VecDeque<Frame>,
}

impl RecordingSource {
    /// Create a source over the given frames.
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Frames not yet delivered.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl ReadingSource for RecordingSource {
    fn next_reading(&mut self) -> Option<Result<LaserReading>> {
        self.frames.pop_front().map(|frame| frame.to_reading())
    }
}

/// Nearest-timestamp pose lookup over a recorded pose stream.
#[derive(Clone, Debug, Default)]
pub struct RecordedPoses {
    /// Sorted by timestamp
    poses: Vec<(f64, Pose2D)>,
    tolerance: f64,
}

impl RecordedPoses {
    /// Create a lookup table. Entries with non-finite timestamps are discarded.
    pub fn new(mut poses: Vec<(f64, Pose2D)>, tolerance: f64) -> Self {
        poses.retain(|(t, _)| t.is_finite());
        poses.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { poses, tolerance }
    }

    /// Number of recorded poses.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Is the pose stream empty?
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    fn nearest(&self, timestamp: f64) -> Option<(f64, Pose2D)> {
        let idx = self.poses.partition_point(|(t, _)| *t < timestamp);
        let after = self.poses.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.poses.get(i));

        match (before, after) {
            (Some(b), Some(a)) => {
                if timestamp - b.0 <= a.0 - timestamp {
                    Some(*b)
                } else {
                    Some(*a)
                }
            }
            (Some(b), None) => Some(*b),
            (None, Some(a)) => Some(*a),
            (None, None) => None,
        }
    }
}

impl PoseProvider for RecordedPoses {
    fn lookup(&mut self, timestamp: f64) -> Result<Pose2D> {
        let (t, pose) = self
            .nearest(timestamp)
            .ok_or_else(|| Error::transform_unavailable(timestamp, "no poses recorded"))?;

        let gap = (t - timestamp).abs();
        if gap > self.tolerance {
            return Err(Error::transform_unavailable(
                timestamp,
                format!("nearest pose is {:.3}s away", gap),
            ));
        }
        if !pose.is_finite() {
            return Err(Error::transform_unavailable(
                timestamp,
                "recorded pose is not finite",
            ));
        }

        Ok(pose)
    }
}
