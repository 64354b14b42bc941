//! Grid storage for the occupancy grid.
//!
//! A single contiguous array of [`CellState`](crate::core::CellState) values
//! with fixed dimensions. Narrowing to the `i8` wire domain only happens when
//! a snapshot is serialized.
//!
//! ## Key Types
//!
//! - [`GridStorage`]: cell array, coordinate conversion, bounds-checked writes
//! - [`CellCounts`]: statistics for each cell state

mod core;
mod types;

pub use self::core::GridStorage;
pub use types::CellCounts;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellState, GridCoord, WorldPoint};
    use crate::grid::{GridConfig, SnapshotOrder};

    fn grid(width: usize, height: usize) -> GridStorage {
        GridStorage::new(&GridConfig::new(width, height, 0.1, WorldPoint::ZERO)).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = grid(100, 50);
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 50);
        assert_eq!(grid.resolution(), 0.1);
        assert_eq!(grid.cell_count(), 5000);
        assert_eq!(grid.count_by_state().unknown, 5000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GridConfig::new(0, 10, 0.1, WorldPoint::ZERO);
        assert!(GridStorage::new(&config).is_err());
    }

    #[test]
    fn test_bounds() {
        let grid = GridStorage::new(&GridConfig::centered(100, 100, 0.05)).unwrap();
        let (min, max) = grid.bounds();

        assert!((min.x + 2.5).abs() < 1e-6);
        assert!((min.y + 2.5).abs() < 1e-6);
        assert!((max.x - 2.5).abs() < 1e-6);
        assert!((max.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_mark_and_get() {
        let mut grid = grid(10, 10);
        let coord = GridCoord::new(5, 5);

        assert_eq!(grid.get(coord), Some(CellState::Unknown));

        assert!(grid.mark_free(coord));
        assert_eq!(grid.get(coord), Some(CellState::Free));

        assert!(grid.mark_occupied(coord));
        assert_eq!(grid.get(coord), Some(CellState::Occupied));
    }

    #[test]
    fn test_last_write_wins_both_ways() {
        let mut grid = grid(4, 4);
        let coord = GridCoord::new(1, 2);

        grid.mark_occupied(coord);
        grid.mark_free(coord);
        assert_eq!(grid.get(coord), Some(CellState::Free));

        grid.mark_occupied(coord);
        assert_eq!(grid.get(coord), Some(CellState::Occupied));
    }

    #[test]
    fn test_out_of_bounds_writes_dropped() {
        let mut grid = grid(10, 10);

        for coord in [
            GridCoord::new(-1, 0),
            GridCoord::new(0, -1),
            GridCoord::new(10, 0),
            GridCoord::new(0, 10),
            GridCoord::new(i32::MAX, i32::MIN),
        ] {
            assert!(!grid.mark_free(coord));
            assert!(!grid.mark_occupied(coord));
            assert_eq!(grid.get(coord), None);
        }

        assert_eq!(grid.count_by_state().unknown, 100);
    }

    #[test]
    fn test_world_lookup() {
        let mut grid = grid(10, 10);
        grid.mark_occupied(GridCoord::new(3, 7));

        assert_eq!(grid.get_world(WorldPoint::new(0.35, 0.75)), CellState::Occupied);
        assert_eq!(grid.get_world(WorldPoint::new(-5.0, 0.0)), CellState::Unknown);
    }

    #[test]
    fn test_cell_counts() {
        let mut grid = grid(10, 10);

        grid.mark_free(GridCoord::new(0, 0));
        grid.mark_free(GridCoord::new(1, 0));
        grid.mark_occupied(GridCoord::new(2, 0));

        let counts = grid.count_by_state();
        assert_eq!(counts.free, 2);
        assert_eq!(counts.occupied, 1);
        assert_eq!(counts.unknown, 97);
        assert_eq!(counts.known(), 3);
        assert_eq!(counts.total(), 100);
    }

    #[test]
    fn test_iter_and_clear() {
        let mut grid = grid(10, 10);
        grid.mark_occupied(GridCoord::new(5, 6));

        let found: Vec<_> = grid
            .iter()
            .filter(|&(_, state)| state == CellState::Occupied)
            .map(|(coord, _)| coord)
            .collect();
        assert_eq!(found, vec![GridCoord::new(5, 6)]);

        grid.clear();
        assert_eq!(grid.count_by_state().known(), 0);
    }

    #[test]
    fn test_serialize_column_major() {
        // 3 columns x 2 rows
        let mut grid = grid(3, 2);
        grid.mark_free(GridCoord::new(0, 1));
        grid.mark_occupied(GridCoord::new(2, 0));

        // x fastest: y=0: x 0,1,2 | y=1: x 0,1,2
        let data = grid.serialize_cells(SnapshotOrder::ColumnMajor);
        assert_eq!(data, vec![-1, -1, 100, 0, -1, -1]);
        assert_eq!(data[2], 100);
        assert_eq!(data[3], 0);

        // y fastest: x=0: y 0,1 | x=1: y 0,1 | x=2: y 0,1
        assert_eq!(
            grid.serialize_cells(SnapshotOrder::Transposed),
            vec![-1, 0, -1, -1, 100, -1]
        );
    }

    #[test]
    fn test_ascii_render() {
        let mut grid = grid(3, 2);
        grid.mark_free(GridCoord::new(0, 0));
        grid.mark_occupied(GridCoord::new(2, 1));
        assert_eq!(grid.to_ascii(), "??#\n.??\n");
    }
}
