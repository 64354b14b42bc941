//! Per-reading orchestration.
//!
//! [`ScanProcessor`] owns the grid and runs one update to completion:
//!
//! 1. look up the pose for the reading's timestamp
//! 2. rasterize every returned beam into the grid
//! 3. take a snapshot and hand it to the sink
//!
//! A failed pose lookup drops the reading before any cell is written.
//! Updates take `&mut self`, so two updates can never interleave.

use crate::UpdateSummary;
use crate::core::{LaserReading, Pose2D};
use crate::error::{Error, Result};
use crate::grid::{ConfigError, GridConfig, GridSnapshot, GridStorage, SnapshotOrder, scan_update};
use crate::io::{GridSink, PoseProvider, ReadingSource};

/// Frame id stamped on snapshots unless configured otherwise
pub const DEFAULT_FRAME_ID: &str = "map_laser";

/// Counters for a whole reading stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Readings pulled from the source
    pub readings: usize,
    /// Readings applied to the grid
    pub processed: usize,
    /// Readings dropped because no pose was available
    pub dropped: usize,
    /// Readings rejected as malformed
    pub rejected: usize,
    /// Accumulated write statistics of processed readings
    pub totals: UpdateSummary,
}

/// Owns the grid and applies readings to it.
#[derive(Clone, Debug)]
pub struct ScanProcessor {
    storage: GridStorage,
    frame_id: String,
    order: SnapshotOrder,
}

impl ScanProcessor {
    /// Create a processor over an all-Unknown grid.
    pub fn new(config: &GridConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::with_storage(GridStorage::new(config)?))
    }

    /// Wrap an existing grid.
    pub fn with_storage(storage: GridStorage) -> Self {
        Self {
            storage,
            frame_id: DEFAULT_FRAME_ID.to_string(),
            order: SnapshotOrder::default(),
        }
    }

    /// Set the frame id stamped on snapshots.
    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    /// Set the snapshot serialization order.
    pub fn with_order(mut self, order: SnapshotOrder) -> Self {
        self.order = order;
        self
    }

    /// The grid
    pub fn storage(&self) -> &GridStorage {
        &self.storage
    }

    /// Frame id stamped on snapshots
    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    /// Snapshot serialization order
    pub fn order(&self) -> SnapshotOrder {
        self.order
    }

    /// Apply a reading at a known pose. Never fails: out-of-grid writes are
    /// dropped and no-return beams skipped.
    pub fn apply(&mut self, pose: Pose2D, reading: &LaserReading) -> UpdateSummary {
        scan_update::update_from_reading(&mut self.storage, reading, pose)
    }

    /// Read-only copy of the current grid.
    pub fn snapshot(&self, timestamp: f64) -> GridSnapshot {
        self.storage.snapshot(timestamp, &self.frame_id, self.order)
    }

    /// Run one full update.
    ///
    /// The pose is acquired first; if that fails the error is returned and
    /// the grid is untouched. A sink failure is reported as [`Error::Sink`]
    /// after the grid has been updated.
    pub fn process<P, K>(
        &mut self,
        reading: &LaserReading,
        poses: &mut P,
        sink: &mut K,
    ) -> Result<UpdateSummary>
    where
        P: PoseProvider + ?Sized,
        K: GridSink + ?Sized,
    {
        let timestamp = reading.timestamp();

        let pose = match poses.lookup(timestamp) {
            Ok(pose) => pose,
            Err(e) => {
                log::warn!("Dropping reading at t={:.3}: {}", timestamp, e);
                return Err(e);
            }
        };

        let result = self.apply(pose, reading);
        log::debug!(
            "t={:.3}: {} beams ({} skipped), {} free, {} occupied, {} dropped writes",
            timestamp,
            result.beams_applied,
            result.beams_skipped,
            result.free_writes,
            result.occupied_writes,
            result.dropped_writes
        );

        let snapshot = self.snapshot(timestamp);
        sink.publish(&snapshot).map_err(|e| match e {
            Error::Sink(_) => e,
            other => Error::Sink(other.to_string()),
        })?;

        Ok(result)
    }

    /// Drain a reading source through [`process`](Self::process), then
    /// finish the sink.
    ///
    /// Dropped and malformed readings are counted and skipped. A sink
    /// failure stops the run.
    pub fn run<S, P, K>(
        &mut self,
        source: &mut S,
        poses: &mut P,
        sink: &mut K,
    ) -> Result<ReplayStats>
    where
        S: ReadingSource + ?Sized,
        P: PoseProvider + ?Sized,
        K: GridSink + ?Sized,
    {
        let mut stats = ReplayStats::default();

        while let Some(next) = source.next_reading() {
            stats.readings += 1;

            let reading = match next {
                Ok(reading) => reading,
                Err(e) => {
                    log::warn!("Rejecting reading #{}: {}", stats.readings, e);
                    stats.rejected += 1;
                    continue;
                }
            };

            match self.process(&reading, &mut *poses, &mut *sink) {
                Ok(result) => {
                    stats.processed += 1;
                    stats.totals.merge(&result);
                }
                Err(e) if e.is_dropped_update() => stats.dropped += 1,
                Err(e) => return Err(e),
            }
        }

        sink.finish()?;

        log::info!(
            "Processed {}/{} readings ({} dropped, {} rejected)",
            stats.processed,
            stats.readings,
            stats.dropped,
            stats.rejected
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellState, GridCoord, WorldPoint};
    use crate::io::{MemorySink, StaticPose};

    struct FailingSink;

    impl GridSink for FailingSink {
        fn publish(&mut self, _snapshot: &GridSnapshot) -> Result<()> {
            Err(Error::Io(std::io::Error::other("closed")))
        }
    }

    fn small_processor() -> ScanProcessor {
        ScanProcessor::new(&GridConfig::new(10, 10, 1.0, WorldPoint::ZERO)).unwrap()
    }

    #[test]
    fn test_process_publishes_snapshot() {
        let mut processor = small_processor();
        let reading = LaserReading::new(vec![3.0], 0.1, 4.5).unwrap();
        let mut poses = StaticPose(Pose2D::new(1.5, 1.5, 0.0));
        let mut sink = MemorySink::new();

        let result = processor.process(&reading, &mut poses, &mut sink).unwrap();
        assert_eq!(result.occupied_writes, 1);

        let snap = sink.latest().unwrap();
        assert_eq!(snap.timestamp, 4.5);
        assert_eq!(snap.frame_id, DEFAULT_FRAME_ID);
        assert_eq!(snap.order, SnapshotOrder::ColumnMajor);
        assert_eq!(snap.state(4, 1), Some(CellState::Occupied));
        assert_eq!(snap.state(2, 1), Some(CellState::Free));
    }

    #[test]
    fn test_pose_failure_leaves_grid_untouched() {
        let mut processor = small_processor();
        let reading = LaserReading::new(vec![3.0], 0.1, 0.0).unwrap();
        let mut poses =
            |t: f64| -> Result<Pose2D> { Err(Error::transform_unavailable(t, "no tf")) };
        let mut sink = MemorySink::new();

        let err = processor.process(&reading, &mut poses, &mut sink).unwrap_err();

        assert!(matches!(err, Error::TransformUnavailable { .. }));
        assert_eq!(processor.storage().count_by_state().known(), 0);
        assert_eq!(sink.published(), 0);
    }

    #[test]
    fn test_sink_failure_keeps_update() {
        let mut processor = small_processor();
        let reading = LaserReading::new(vec![2.0], 0.1, 0.0).unwrap();
        let mut poses = StaticPose(Pose2D::new(0.5, 0.5, 0.0));

        let err = processor
            .process(&reading, &mut poses, &mut FailingSink)
            .unwrap_err();

        assert!(matches!(err, Error::Sink(_)));
        assert_eq!(
            processor.storage().get(GridCoord::new(2, 0)),
            Some(CellState::Occupied)
        );
    }

    #[test]
    fn test_builder_options() {
        let processor = small_processor()
            .with_frame_id("map")
            .with_order(SnapshotOrder::Transposed);

        let snap = processor.snapshot(1.0);
        assert_eq!(snap.frame_id, "map");
        assert_eq!(snap.order, SnapshotOrder::Transposed);
        assert_eq!(snap.data.len(), 100);
    }
}
