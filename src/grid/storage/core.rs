//! Grid storage core implementation.

use crate::core::{CellState, GridCoord, WorldPoint};
use crate::grid::config::{ConfigError, GridConfig};
use crate::grid::snapshot::{GridSnapshot, SnapshotOrder};
use crate::grid::transform::CoordinateTransformer;

use super::types::CellCounts;

/// Fixed-size occupancy grid.
///
/// The grid uses a coordinate system where:
/// - (0, 0) is at `origin` in world coordinates
/// - Positive X is to the right (columns)
/// - Positive Y is up (rows)
/// - Cell (x, y) covers the area from (origin + x*resolution) to (origin + (x+1)*resolution)
///
/// Cells are held x-fastest internally (`index = y * width + x`), which is
/// also the default wire order. The order is chosen when a [`GridSnapshot`]
/// is taken.
///
/// ## Write policy
///
/// [`mark_free`](Self::mark_free) and [`mark_occupied`](Self::mark_occupied)
/// are plain overwrites: the most recent write wins, whatever the cell held
/// before. Writes outside the grid are dropped and reported by returning
/// `false`.
#[derive(Clone, Debug)]
pub struct GridStorage {
    cells: Vec<CellState>,
    width: usize,
    height: usize,
    transform: CoordinateTransformer,
}

impl GridStorage {
    /// Create a grid with every cell Unknown.
    pub fn new(config: &GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        log::debug!(
            "Allocating {}x{} grid at {}m/cell, origin ({}, {})",
            config.width,
            config.height,
            config.resolution,
            config.origin.x,
            config.origin.y
        );

        Ok(Self {
            cells: vec![CellState::Unknown; config.cell_count()],
            width: config.width,
            height: config.height,
            transform: CoordinateTransformer::new(config.resolution, config.origin),
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Meters per cell
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.transform.resolution()
    }

    /// World coordinate of cell (0,0)'s lower corner
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.transform.origin()
    }

    /// Coordinate transformer for this grid.
    #[inline]
    pub fn transform(&self) -> &CoordinateTransformer {
        &self.transform
    }

    /// Configuration that reproduces this grid's geometry.
    pub fn config(&self) -> GridConfig {
        GridConfig::new(self.width, self.height, self.resolution(), self.origin())
    }

    /// World bounds: (min_point, max_point)
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        let min = self.origin();
        let max = self
            .transform
            .grid_to_world(GridCoord::new(self.width as i32, self.height as i32));
        (min, max)
    }

    /// Convert world coordinates to grid coordinates (may be out of bounds).
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        self.transform.world_to_grid(point)
    }

    /// Convert grid coordinates to world coordinates (cell lower corner).
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        self.transform.grid_to_world(coord)
    }

    /// Is the coordinate inside `[0, width) × [0, height)`?
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        self.is_valid_coord(coord)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    /// Cell state at a grid coordinate, or None outside the grid.
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<CellState> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Cell state at a world point; Unknown outside the grid.
    pub fn get_world(&self, point: WorldPoint) -> CellState {
        self.get(self.world_to_grid(point)).unwrap_or_default()
    }

    /// Overwrite a cell. Returns false if the coordinate is outside the grid.
    #[inline]
    pub fn set(&mut self, coord: GridCoord, state: CellState) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = state;
                true
            }
            None => false,
        }
    }

    /// Mark a cell as free space. Returns false if the write was dropped.
    #[inline]
    pub fn mark_free(&mut self, coord: GridCoord) -> bool {
        self.set(coord, CellState::Free)
    }

    /// Mark a cell as occupied. Returns false if the write was dropped.
    #[inline]
    pub fn mark_occupied(&mut self, coord: GridCoord) -> bool {
        self.set(coord, CellState::Occupied)
    }

    /// Reset every cell to Unknown.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Unknown);
    }

    /// Iterate over all cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellState)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(idx, &state)| {
            let coord = GridCoord::new((idx % width) as i32, (idx / width) as i32);
            (coord, state)
        })
    }

    /// Count cells by state.
    pub fn count_by_state(&self) -> CellCounts {
        self.cells
            .iter()
            .fold(CellCounts::default(), |mut counts, state| {
                match state {
                    CellState::Unknown => counts.unknown += 1,
                    CellState::Free => counts.free += 1,
                    CellState::Occupied => counts.occupied += 1,
                }
                counts
            })
    }

    /// Cell values narrowed to `i8`, serialized in the given order.
    ///
    /// - [`SnapshotOrder::ColumnMajor`]: x fastest, `data[y * width + x]`
    /// - [`SnapshotOrder::Transposed`]: y fastest, `data[x * height + y]`
    pub fn serialize_cells(&self, order: SnapshotOrder) -> Vec<i8> {
        match order {
            SnapshotOrder::ColumnMajor => self.cells.iter().map(|c| c.as_i8()).collect(),
            SnapshotOrder::Transposed => {
                let mut data = Vec::with_capacity(self.cells.len());
                for x in 0..self.width {
                    for y in 0..self.height {
                        data.push(self.cells[y * self.width + x].as_i8());
                    }
                }
                data
            }
        }
    }

    /// Take a read-only copy of the grid for publishing.
    pub fn snapshot(
        &self,
        timestamp: f64,
        frame_id: &str,
        order: SnapshotOrder,
    ) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            resolution: self.resolution(),
            origin: self.origin(),
            timestamp,
            frame_id: frame_id.to_string(),
            order,
            data: self.serialize_cells(order),
        }
    }

    /// Render the grid as text, top row first. Intended for debugging small grids.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(self.cells[y * self.width + x].as_char());
            }
            out.push('\n');
        }
        out
    }
}
