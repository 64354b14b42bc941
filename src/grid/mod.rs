//! Occupancy grid storage and update mechanisms.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          LaserReading + Pose2D              │
//! └──────────────────────┬──────────────────────┘
//!                        ▼
//! ┌─────────────────────────────────────────────┐
//! │  scan_update   bearing → endpoint → cells   │
//! │    ├── transform   (world ↔ grid)           │
//! │    └── raycaster   (Bresenham)              │
//! └──────────────────────┬──────────────────────┘
//!                        ▼ mark_free / mark_occupied
//! ┌─────────────────────────────────────────────┐
//! │  GridStorage   (last write wins)            │
//! └──────────────────────┬──────────────────────┘
//!                        ▼
//!                  GridSnapshot
//! ```
//!
//! ## Key Components
//!
//! - [`GridStorage`]: fixed-size cell array with bounds-checked writes
//! - [`GridConfig`]: width, height, resolution and origin
//! - [`CoordinateTransformer`]: world ↔ grid index mapping
//! - [`GridSnapshot`]: immutable `i8` copy of the grid for publishing
//!
//! ## Example
//!
//! ```rust
//! use rekha_grid::core::{GridCoord, LaserReading, Pose2D, CellState};
//! use rekha_grid::grid::{GridConfig, GridStorage, scan_update};
//!
//! let mut storage = GridStorage::new(&GridConfig::default()).unwrap();
//! let reading = LaserReading::new(vec![2.0], 0.01, 0.0).unwrap();
//!
//! scan_update::update_from_reading(&mut storage, &reading, Pose2D::identity());
//!
//! assert_eq!(storage.get(GridCoord::new(240, 200)), Some(CellState::Occupied));
//! ```

mod config;
pub mod raycaster;
pub mod scan_update;
mod snapshot;
mod storage;
mod transform;

pub use config::{ConfigError, GridConfig};
pub use snapshot::{GridSnapshot, SnapshotOrder};
pub use storage::{CellCounts, GridStorage};
pub use transform::CoordinateTransformer;
