//! Immutable grid snapshots for publishing.
//!
//! A [`GridSnapshot`] is taken after the last write of an update and is
//! never touched by the grid again, so consumers always see a complete
//! update.
//!
//! ## Serialization order
//!
//! The default order is column-major over a grid indexed `[x][y]`: the
//! x index varies fastest, so cell (x, y) sits at `data[y * width + x]`.
//! Downstream consumers of the laser map depend on that layout, which is
//! also the one `nav_msgs/OccupancyGrid` uses. [`SnapshotOrder::Transposed`]
//! swaps the axes (`data[x * height + y]`) and is only used when asked for.

use serde::{Deserialize, Serialize};

use crate::core::{CellState, WorldPoint};

/// Cell ordering of [`GridSnapshot::data`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOrder {
    /// `data[y * width + x]`
    #[default]
    ColumnMajor,
    /// `data[x * height + y]`
    Transposed,
}

/// Point-in-time copy of the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Meters per cell
    pub resolution: f32,
    /// World coordinate of cell (0,0)'s lower corner
    pub origin: WorldPoint,
    /// Timestamp supplied by the caller (seconds)
    pub timestamp: f64,
    /// Frame the grid is expressed in
    pub frame_id: String,
    /// Layout of `data`
    pub order: SnapshotOrder,
    /// Cell values: -1 unknown, 0 free, 100 occupied
    pub data: Vec<i8>,
}

impl GridSnapshot {
    /// Position in `data` of cell (x, y), or None outside the grid.
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(match self.order {
            SnapshotOrder::ColumnMajor => y * self.width + x,
            SnapshotOrder::Transposed => x * self.height + y,
        })
    }

    /// Raw value of cell (x, y), whatever the layout.
    pub fn cell(&self, x: usize, y: usize) -> Option<i8> {
        self.index_of(x, y)
            .and_then(|idx| self.data.get(idx).copied())
    }

    /// State of cell (x, y), whatever the layout.
    pub fn state(&self, x: usize, y: usize) -> Option<CellState> {
        self.cell(x, y).map(CellState::from_i8)
    }

    /// Same grid contents, laid out in another order.
    pub fn reordered(&self, order: SnapshotOrder) -> GridSnapshot {
        if order == self.order {
            return self.clone();
        }

        let mut data = Vec::with_capacity(self.data.len());
        match order {
            SnapshotOrder::ColumnMajor => {
                for y in 0..self.height {
                    for x in 0..self.width {
                        data.extend(self.cell(x, y));
                    }
                }
            }
            SnapshotOrder::Transposed => {
                for x in 0..self.width {
                    for y in 0..self.height {
                        data.extend(self.cell(x, y));
                    }
                }
            }
        }

        GridSnapshot {
            order,
            data,
            frame_id: self.frame_id.clone(),
            ..*self
        }
    }

    /// Number of cells holding a given state.
    pub fn count(&self, state: CellState) -> usize {
        let value = state.as_i8();
        self.data.iter().filter(|&&v| v == value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridSnapshot {
        // 3 wide, 2 high, x fastest
        // y=1:  0  -1  -1
        // y=0: -1  -1 100
        GridSnapshot {
            width: 3,
            height: 2,
            resolution: 0.1,
            origin: WorldPoint::ZERO,
            timestamp: 1.0,
            frame_id: "map_laser".to_string(),
            order: SnapshotOrder::ColumnMajor,
            data: vec![-1, -1, 100, 0, -1, -1],
        }
    }

    #[test]
    fn test_cell_lookup() {
        let snap = sample();
        assert_eq!(snap.cell(0, 1), Some(0));
        assert_eq!(snap.cell(2, 0), Some(100));
        assert_eq!(snap.state(2, 0), Some(CellState::Occupied));
        assert_eq!(snap.cell(3, 0), None);
        assert_eq!(snap.cell(0, 2), None);
        assert_eq!(snap.index_of(2, 0), Some(2));
        assert_eq!(snap.index_of(0, 1), Some(3));
    }

    #[test]
    fn test_short_data_does_not_panic() {
        let mut snap = sample();
        snap.data.truncate(4);
        assert_eq!(snap.cell(0, 1), Some(0));
        assert_eq!(snap.cell(1, 1), None);
        assert_eq!(snap.state(2, 1), None);
        assert_eq!(snap.reordered(SnapshotOrder::Transposed).data.len(), 4);
    }

    #[test]
    fn test_reorder_round_trip() {
        let snap = sample();
        let transposed = snap.reordered(SnapshotOrder::Transposed);

        assert_eq!(transposed.data, vec![-1, 0, -1, -1, 100, -1]);
        for x in 0..3 {
            for y in 0..2 {
                assert_eq!(transposed.cell(x, y), snap.cell(x, y));
            }
        }

        assert_eq!(transposed.reordered(SnapshotOrder::ColumnMajor), snap);
    }

    #[test]
    fn test_count() {
        let snap = sample();
        assert_eq!(snap.count(CellState::Unknown), 4);
        assert_eq!(snap.count(CellState::Free), 1);
        assert_eq!(snap.count(CellState::Occupied), 1);
    }

    #[test]
    fn test_order_serde_names() {
        let yaml = serde_yaml::to_string(&SnapshotOrder::Transposed).unwrap();
        assert_eq!(yaml.trim(), "transposed");
        let parsed: SnapshotOrder = serde_yaml::from_str("column_major").unwrap();
        assert_eq!(parsed, SnapshotOrder::ColumnMajor);
    }
}
