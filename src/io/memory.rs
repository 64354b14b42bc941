//! In-memory grid sink.

use crate::error::Result;
use crate::grid::GridSnapshot;

use super::traits::GridSink;

/// Collects published snapshots in memory.
///
/// By default only the most recent snapshot is kept. [`MemorySink::keep_all`]
/// keeps the whole history, which is handy in tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    snapshots: Vec<GridSnapshot>,
    keep_all: bool,
    published: usize,
    finished: bool,
}

impl MemorySink {
    /// Sink that keeps only the latest snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that keeps every snapshot it receives.
    pub fn keep_all() -> Self {
        Self {
            keep_all: true,
            ..Self::default()
        }
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Option<&GridSnapshot> {
        self.snapshots.last()
    }

    /// Retained snapshots, oldest first.
    pub fn snapshots(&self) -> &[GridSnapshot] {
        &self.snapshots
    }

    /// Total number of snapshots published, retained or not.
    pub fn published(&self) -> usize {
        self.published
    }

    /// Has [`GridSink::finish`] been called?
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl GridSink for MemorySink {
    fn publish(&mut self, snapshot: &GridSnapshot) -> Result<()> {
        if !self.keep_all {
            self.snapshots.clear();
        }
        self.snapshots.push(snapshot.clone());
        self.published += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridConfig, GridStorage, SnapshotOrder};

    fn snapshot_at(timestamp: f64) -> GridSnapshot {
        GridStorage::new(&GridConfig::centered(4, 4, 0.5))
            .unwrap()
            .snapshot(timestamp, "map_laser", SnapshotOrder::ColumnMajor)
    }

    #[test]
    fn test_keeps_latest_only() {
        let mut sink = MemorySink::new();
        sink.publish(&snapshot_at(1.0)).unwrap();
        sink.publish(&snapshot_at(2.0)).unwrap();

        assert_eq!(sink.published(), 2);
        assert_eq!(sink.snapshots().len(), 1);
        assert_eq!(sink.latest().unwrap().timestamp, 2.0);
    }

    #[test]
    fn test_keep_all_history() {
        let mut sink = MemorySink::keep_all();
        sink.publish(&snapshot_at(1.0)).unwrap();
        sink.publish(&snapshot_at(2.0)).unwrap();
        sink.finish().unwrap();

        let times: Vec<f64> = sink.snapshots().iter().map(|s| s.timestamp).collect();
        assert_eq!(times, vec![1.0, 2.0]);
        assert!(sink.is_finished());
    }
}
