//! Types used by grid storage.

use serde::{Deserialize, Serialize};

/// Cell counts by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    /// Unknown cells (never written).
    pub unknown: usize,
    /// Free cells.
    pub free: usize,
    /// Occupied cells.
    pub occupied: usize,
}

impl CellCounts {
    /// Total known cells.
    pub fn known(&self) -> usize {
        self.free + self.occupied
    }

    /// Total cells.
    pub fn total(&self) -> usize {
        self.unknown + self.known()
    }
}
