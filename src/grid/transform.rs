//! World ↔ grid coordinate conversion.
//!
//! ```text
//!   row
//!    ↑
//!  2 │ ┌───┬───┬───┐
//!  1 │ ├───┼───┼───┤     cell (c, r) covers
//!  0 │ ├───┼───┼───┤     [origin.x + c·res, origin.x + (c+1)·res) ×
//!    │ └───┴───┴───┘     [origin.y + r·res, origin.y + (r+1)·res)
//!    origin ──────────→ col
//! ```
//!
//! The mapping is pure: it never clamps and never fails. Results can lie
//! outside the grid; bounds are enforced where cells are written.

use crate::core::{GridCoord, WorldPoint};

/// Converts between world coordinates and grid cell indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransformer {
    resolution: f32,
    origin: WorldPoint,
}

impl CoordinateTransformer {
    /// Create a transformer for the given resolution (meters per cell) and
    /// origin (world coordinate of cell (0,0)'s lower corner).
    pub fn new(resolution: f32, origin: WorldPoint) -> Self {
        Self { resolution, origin }
    }

    /// Meters per cell
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World coordinate of cell (0,0)'s lower corner
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Convert world coordinates to the cell containing them.
    ///
    /// `col = floor((x - origin.x) / resolution)`, likewise for rows.
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            ((point.x - self.origin.x) / self.resolution).floor() as i32,
            ((point.y - self.origin.y) / self.resolution).floor() as i32,
        )
    }

    /// World coordinate of a cell's lower corner.
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + coord.x as f32 * self.resolution,
            self.origin.y + coord.y as f32 * self.resolution,
        )
    }

    /// World coordinate of a cell's center.
    #[inline]
    pub fn cell_center(&self, coord: GridCoord) -> WorldPoint {
        let half = self.resolution * 0.5;
        let corner = self.grid_to_world(coord);
        WorldPoint::new(corner.x + half, corner.y + half)
    }
}
