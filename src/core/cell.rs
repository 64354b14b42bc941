//! Cell states for the occupancy grid.
//!
//! The grid is ternary: a cell has either never been touched by a beam,
//! was last crossed by a beam (free), or last terminated a beam (occupied).
//! The wire values follow the `nav_msgs/OccupancyGrid` convention.

use serde::{Deserialize, Serialize};

/// Occupancy state of a single grid cell.
///
/// ```text
/// Unknown  = -1   never observed
/// Free     =  0   a beam passed through
/// Occupied = 100  a beam ended here
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i8)]
pub enum CellState {
    /// Cell has never been written
    #[default]
    Unknown = -1,

    /// Most recent write was free-space traversal
    Free = 0,

    /// Most recent write was a beam endpoint
    Occupied = 100,
}

impl CellState {
    /// Narrow to the `i8` wire value.
    #[inline]
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Convert from the `i8` wire value. Anything outside the three known
    /// values reads as Unknown.
    #[inline]
    pub fn from_i8(value: i8) -> Self {
        match value {
            0 => CellState::Free,
            100 => CellState::Occupied,
            _ => CellState::Unknown,
        }
    }

    /// Has this cell been observed?
    #[inline]
    pub fn is_known(self) -> bool {
        self != CellState::Unknown
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellState::Unknown => '?',
            CellState::Free => '.',
            CellState::Occupied => '#',
        }
    }
}
