//! Laser reading input type.
//!
//! A reading is one sweep of a planar range sensor: an ordered list of
//! ranges where beam `i` points at `pose.theta + i * angle_increment`.
//!
//! ```text
//!            beam 2
//!              ↑   ╱ beam 1
//!              │  ╱
//!              │ ╱
//!   robot ●────┼──────→ beam 0  (pose.theta)
//! ```
//!
//! `f32::INFINITY` is the "no return" sentinel: the beam saw nothing and is
//! skipped entirely. Readings are validated on construction so the grid
//! update never has to deal with NaN or negative ranges.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum mismatch (in beams) tolerated between the declared angular
/// coverage and the number of ranges. Sensor drivers commonly round the
/// last step, so one beam of slack is allowed.
const COVERAGE_TOLERANCE_BEAMS: i64 = 1;

/// One planar range-sensor sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaserReading {
    /// Range measurements in meters. `f32::INFINITY` means no return.
    ranges: Vec<f32>,
    /// Angle between consecutive beams in radians.
    angle_increment: f32,
    /// Acquisition time in seconds.
    timestamp: f64,
}

impl LaserReading {
    /// Create a validated reading.
    ///
    /// Rejects non-finite timestamps, zero or non-finite increments, NaN
    /// ranges and negative ranges (including `-inf`).
    pub fn new(ranges: Vec<f32>, angle_increment: f32, timestamp: f64) -> Result<Self> {
        if !timestamp.is_finite() {
            return Err(Error::MalformedReading(format!(
                "non-finite timestamp {}",
                timestamp
            )));
        }
        if !angle_increment.is_finite() || angle_increment == 0.0 {
            return Err(Error::MalformedReading(format!(
                "invalid angle increment {}",
                angle_increment
            )));
        }
        if let Some((i, r)) = ranges
            .iter()
            .enumerate()
            .find(|&(_, r)| r.is_nan() || *r < 0.0)
        {
            return Err(Error::MalformedReading(format!(
                "beam {} has invalid range {}",
                i, r
            )));
        }

        Ok(Self {
            ranges,
            angle_increment,
            timestamp,
        })
    }

    /// Create a reading and check its beam count against a declared
    /// angular coverage `[angle_min, angle_max]`.
    ///
    /// The expected count is `round((angle_max - angle_min) / angle_increment) + 1`.
    pub fn with_coverage(
        ranges: Vec<f32>,
        angle_min: f32,
        angle_max: f32,
        angle_increment: f32,
        timestamp: f64,
    ) -> Result<Self> {
        if angle_increment == 0.0 || !angle_min.is_finite() || !angle_max.is_finite() {
            return Err(Error::MalformedReading(format!(
                "invalid coverage [{}, {}] step {}",
                angle_min, angle_max, angle_increment
            )));
        }

        let span = ((angle_max - angle_min) / angle_increment).round();
        if span < 0.0 || !span.is_finite() {
            return Err(Error::MalformedReading(format!(
                "angle increment {} does not walk from {} to {}",
                angle_increment, angle_min, angle_max
            )));
        }

        let expected = span as i64 + 1;
        let actual = ranges.len() as i64;
        if (expected - actual).abs() > COVERAGE_TOLERANCE_BEAMS {
            return Err(Error::MalformedReading(format!(
                "expected {} beams for coverage, got {}",
                expected, actual
            )));
        }

        Self::new(ranges, angle_increment, timestamp)
    }

    /// Range measurements in meters.
    #[inline]
    pub fn ranges(&self) -> &[f32] {
        &self.ranges
    }

    /// Angle between consecutive beams in radians.
    #[inline]
    pub fn angle_increment(&self) -> f32 {
        self.angle_increment
    }

    /// Acquisition time in seconds.
    #[inline]
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Number of beams in the reading
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Is the reading empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Is this range the "no return" sentinel?
    #[inline]
    pub fn is_no_return(range: f32) -> bool {
        range == f32::INFINITY
    }

    /// World bearing of beam `index` for a sensor heading of `theta`.
    #[inline]
    pub fn bearing(&self, theta: f32, index: usize) -> f32 {
        theta + index as f32 * self.angle_increment
    }

    /// Beams that returned, as `(index, range)` in index order.
    pub fn returns(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.ranges
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, r)| !Self::is_no_return(r))
    }

    /// Number of beams carrying the no-return sentinel.
    pub fn no_return_count(&self) -> usize {
        self.ranges
            .iter()
            .filter(|&&r| Self::is_no_return(r))
            .count()
    }
}
