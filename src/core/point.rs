//! Point and coordinate types for the occupancy grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices)
///
/// Coordinates are signed so that rays leaving the grid can still be
/// rasterized; only the write layer rejects out-of-range cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (max of x and y distance) - used for 8-connected grids
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Are the two cells 8-connected neighbours (or the same cell)?
    #[inline]
    pub fn is_adjacent_8(&self, other: &GridCoord) -> bool {
        self.chebyshev_distance(other) <= 1
    }
}

impl From<(i32, i32)> for GridCoord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        GridCoord::new(x, y)
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// World coordinates (meters, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Create a point at a given angle and distance from this point
    #[inline]
    pub fn point_at(&self, angle: f32, distance: f32) -> WorldPoint {
        WorldPoint::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_adjacency() {
        let c = GridCoord::new(5, 5);
        assert!(c.is_adjacent_8(&GridCoord::new(6, 6)));
        assert!(c.is_adjacent_8(&GridCoord::new(4, 5)));
        assert!(!c.is_adjacent_8(&GridCoord::new(7, 5)));
        assert_eq!(c.chebyshev_distance(&GridCoord::new(2, 9)), 4);
    }

    #[test]
    fn test_grid_coord_arithmetic() {
        let a = GridCoord::new(3, -2);
        let b = GridCoord::from((1, 4));
        assert_eq!(a + b, GridCoord::new(4, 2));
        assert_eq!(a - b, GridCoord::new(2, -6));
    }

    #[test]
    fn test_world_point_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_at() {
        let p = WorldPoint::new(1.0, 1.0).point_at(std::f32::consts::FRAC_PI_2, 2.0);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 3.0).abs() < 1e-6);
    }
}
