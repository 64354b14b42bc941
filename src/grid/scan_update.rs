//! Laser reading update for the occupancy grid.
//!
//! Each returned beam is handled as a pure pipeline
//!
//! ```text
//! bearing → endpoint (world) → endpoint cell → ray cells → writes
//! ```
//!
//! applied in beam index order. Writes within one beam:
//! 1. every cell on the ray, endpoint included, is marked Free
//! 2. the endpoint cell is then marked Occupied
//!
//! Because the grid is last-write-wins, a later beam passing through an
//! earlier beam's endpoint turns that cell Free again.
//!
//! Rays are only walked across the grid's extent. Cells beyond it count as
//! dropped writes without being visited, so a beam reporting an enormous
//! range costs no more than one crossing the whole grid.

use crate::UpdateSummary;
use crate::core::{GridCoord, LaserReading, Pose2D, WorldPoint};
use crate::grid::raycaster::cells_within;
use crate::grid::storage::GridStorage;
use crate::grid::transform::CoordinateTransformer;

/// A beam reduced to grid cells, ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamTrace {
    /// Beam index within the reading
    pub index: usize,
    /// World endpoint of the beam
    pub endpoint: WorldPoint,
    /// Grid cell of the endpoint
    pub endpoint_cell: GridCoord,
    /// Ray cells from the sensor cell to the endpoint cell, both inclusive,
    /// limited to the rows or columns the grid spans
    pub cells: Vec<GridCoord>,
    /// Ray cells outside the grid that were never walked
    pub skipped: usize,
}

/// World endpoint of beam `index` with measured `range`.
#[inline]
pub fn beam_endpoint(
    pose: Pose2D,
    reading: &LaserReading,
    index: usize,
    range: f32,
) -> WorldPoint {
    pose.position().point_at(reading.bearing(pose.theta, index), range)
}

/// Rasterize every returned beam of a reading without touching a grid.
///
/// No-return beams are left out; the remaining traces keep index order.
/// `width` and `height` are the grid extent in cells.
pub fn trace_reading<'a>(
    transform: &'a CoordinateTransformer,
    width: usize,
    height: usize,
    reading: &'a LaserReading,
    pose: Pose2D,
) -> impl Iterator<Item = BeamTrace> + 'a {
    let sensor_cell = transform.world_to_grid(pose.position());

    reading.returns().map(move |(index, range)| {
        let endpoint = beam_endpoint(pose, reading, index, range);
        let endpoint_cell = transform.world_to_grid(endpoint);
        let (cells, skipped) = cells_within(sensor_cell, endpoint_cell, width, height);
        BeamTrace {
            index,
            endpoint,
            endpoint_cell,
            cells,
            skipped,
        }
    })
}

/// Write one traced beam into the grid.
pub fn apply_beam(storage: &mut GridStorage, beam: &BeamTrace) -> UpdateSummary {
    let mut result = UpdateSummary {
        beams_applied: 1,
        dropped_writes: beam.skipped,
        ..Default::default()
    };

    for &coord in &beam.cells {
        if storage.mark_free(coord) {
            result.free_writes += 1;
        } else {
            result.dropped_writes += 1;
        }
    }

    if storage.mark_occupied(beam.endpoint_cell) {
        result.occupied_writes += 1;
    } else {
        result.dropped_writes += 1;
    }

    result
}

/// Update the grid with one laser reading taken at `pose`.
///
/// The sensor cell is not bounds-checked up front: a robot outside the
/// grid still clears whatever part of each ray crosses it.
pub fn update_from_reading(
    storage: &mut GridStorage,
    reading: &LaserReading,
    pose: Pose2D,
) -> UpdateSummary {
    let transform = *storage.transform();
    let (width, height) = (storage.width(), storage.height());

    let mut result = trace_reading(&transform, width, height, reading, pose).fold(
        UpdateSummary::default(),
        |mut acc, beam| {
            acc.merge(&apply_beam(storage, &beam));
            acc
        },
    );
    result.beams_skipped = reading.no_return_count();

    result
}
