//! Collaborator interfaces around the grid update.
//!
//! The mapping core never talks to a transport directly. Readings come in
//! through a [`ReadingSource`], poses through a [`PoseProvider`], and
//! finished snapshots leave through a [`GridSink`].
//!
//! # Example
//!
//! ```ignore
//! use rekha_grid::io::{GridSink, PoseProvider, ReadingSource};
//! use rekha_grid::ScanProcessor;
//!
//! fn run<S: ReadingSource, P: PoseProvider, K: GridSink>(
//!     processor: &mut ScanProcessor,
//!     source: &mut S,
//!     poses: &mut P,
//!     sink: &mut K,
//! ) {
//!     while let Some(Ok(reading)) = source.next_reading() {
//!         let _ = processor.process(&reading, poses, sink);
//!     }
//! }
//! ```

use crate::core::{LaserReading, Pose2D};
use crate::error::Result;
use crate::grid::GridSnapshot;

/// Source of robot poses in the map frame.
///
/// A lookup is allowed to block. Failure is reported as
/// [`Error::TransformUnavailable`](crate::Error::TransformUnavailable); the
/// caller drops the reading in that case.
pub trait PoseProvider {
    /// Pose of the robot at `timestamp` (seconds).
    fn lookup(&mut self, timestamp: f64) -> Result<Pose2D>;
}

impl<F> PoseProvider for F
where
    F: FnMut(f64) -> Result<Pose2D>,
{
    fn lookup(&mut self, timestamp: f64) -> Result<Pose2D> {
        self(timestamp)
    }
}

/// Pose provider that always answers with the same pose.
///
/// Stands in for a static transform publisher (sensor frame bolted to the
/// map frame).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaticPose(pub Pose2D);

impl PoseProvider for StaticPose {
    fn lookup(&mut self, _timestamp: f64) -> Result<Pose2D> {
        Ok(self.0)
    }
}

/// Stream of laser readings, one per grid update.
pub trait ReadingSource {
    /// Next reading, `None` once the stream is exhausted.
    ///
    /// Malformed input is reported per reading so one bad sweep does not
    /// end the stream.
    fn next_reading(&mut self) -> Option<Result<LaserReading>>;
}

/// Consumer of finished grid snapshots.
pub trait GridSink {
    /// Receive the snapshot taken at the end of an update.
    fn publish(&mut self, snapshot: &GridSnapshot) -> Result<()>;

    /// Flush anything buffered. Called once when the stream ends.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: GridSink + ?Sized> GridSink for Box<T> {
    fn publish(&mut self, snapshot: &GridSnapshot) -> Result<()> {
        (**self).publish(snapshot)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
