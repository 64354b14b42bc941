//! Export to the ROS `map_server` format.
//!
//! A map is stored as two files next to each other:
//!
//! - `<name>.pgm`: binary greyscale image (P5), top row first
//! - `<name>.yaml`: image name, resolution, origin and thresholds
//!
//! Pixel values follow `map_server` conventions with `negate: 0`:
//! free = 254, occupied = 0, unknown = 205.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::CellState;
use crate::error::{Error, Result};
use crate::grid::GridSnapshot;

use super::traits::GridSink;

const PIXEL_FREE: u8 = 254;
const PIXEL_OCCUPIED: u8 = 0;
const PIXEL_UNKNOWN: u8 = 205;

/// Metadata file written next to the image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    /// Image file name, relative to the metadata file
    pub image: String,
    /// Meters per pixel
    pub resolution: f32,
    /// Pose of the lower-left pixel `[x, y, yaw]`
    pub origin: [f32; 3],
    /// 0 keeps white as free
    pub negate: u8,
    /// Occupancy probability above which a pixel is occupied
    pub occupied_thresh: f32,
    /// Occupancy probability below which a pixel is free
    pub free_thresh: f32,
}

impl MapMetadata {
    /// Metadata describing a snapshot stored in `image`.
    pub fn for_snapshot(snapshot: &GridSnapshot, image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            resolution: snapshot.resolution,
            origin: [snapshot.origin.x, snapshot.origin.y, 0.0],
            negate: 0,
            occupied_thresh: 0.65,
            free_thresh: 0.196,
        }
    }
}

fn pixel(state: CellState) -> u8 {
    match state {
        CellState::Free => PIXEL_FREE,
        CellState::Occupied => PIXEL_OCCUPIED,
        CellState::Unknown => PIXEL_UNKNOWN,
    }
}

/// Greyscale pixels of a snapshot, top row first.
pub fn to_pixels(snapshot: &GridSnapshot) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(snapshot.width * snapshot.height);

    for y in (0..snapshot.height).rev() {
        for x in 0..snapshot.width {
            let state = snapshot.state(x, y).unwrap_or(CellState::Unknown);
            pixels.push(pixel(state));
        }
    }

    pixels
}

/// Write a snapshot as a binary PGM image.
pub fn write_pgm<W: Write>(writer: &mut W, snapshot: &GridSnapshot) -> Result<()> {
    write!(writer, "P5\n{} {}\n255\n", snapshot.width, snapshot.height)?;
    writer.write_all(&to_pixels(snapshot))?;
    Ok(())
}

/// Write `<stem>.pgm` and `<stem>.yaml` into `directory`.
///
/// Returns the path of the metadata file.
pub fn export_ros_map(snapshot: &GridSnapshot, directory: &Path, stem: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(directory)?;

    let image_name = format!("{}.pgm", stem);
    let image_path = directory.join(&image_name);
    let mut writer = BufWriter::new(File::create(&image_path)?);
    write_pgm(&mut writer, snapshot)?;
    writer.flush()?;

    let metadata = MapMetadata::for_snapshot(snapshot, image_name);
    let yaml = serde_yaml::to_string(&metadata)?;
    let yaml_path = directory.join(format!("{}.yaml", stem));
    std::fs::write(&yaml_path, yaml)?;

    log::info!(
        "Exported {}x{} map to {}",
        snapshot.width,
        snapshot.height,
        yaml_path.display()
    );

    Ok(yaml_path)
}

/// Sink that writes the last published snapshot as a ROS map on finish.
#[derive(Clone, Debug)]
pub struct RosMapSink {
    directory: PathBuf,
    stem: String,
    latest: Option<GridSnapshot>,
}

impl RosMapSink {
    /// Sink writing `<stem>.pgm` / `<stem>.yaml` into `directory`.
    pub fn new(directory: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            stem: stem.into(),
            latest: None,
        }
    }

    /// Snapshot that will be written on finish.
    pub fn latest(&self) -> Option<&GridSnapshot> {
        self.latest.as_ref()
    }
}

impl GridSink for RosMapSink {
    fn publish(&mut self, snapshot: &GridSnapshot) -> Result<()> {
        self.latest = Some(snapshot.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        match &self.latest {
            Some(snapshot) => export_ros_map(snapshot, &self.directory, &self.stem)
                .map(|_| ())
                .map_err(|e| Error::Sink(format!("map export failed: {}", e))),
            None => {
                log::warn!("No snapshot published, skipping map export");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridCoord, WorldPoint};
    use crate::grid::{GridConfig, GridStorage, SnapshotOrder};

    fn sample(order: SnapshotOrder) -> GridSnapshot {
        let mut storage =
            GridStorage::new(&GridConfig::new(3, 2, 0.5, WorldPoint::new(-1.0, 2.0))).unwrap();
        storage.mark_free(GridCoord::new(0, 0));
        storage.mark_occupied(GridCoord::new(2, 1));
        storage.snapshot(0.0, "map_laser", order)
    }

    #[test]
    fn test_pixels_top_row_first() {
        let expected = vec![205, 205, 0, 254, 205, 205];
        assert_eq!(to_pixels(&sample(SnapshotOrder::ColumnMajor)), expected);
        assert_eq!(to_pixels(&sample(SnapshotOrder::Transposed)), expected);
    }

    #[test]
    fn test_pgm_header() {
        let mut buf = Vec::new();
        write_pgm(&mut buf, &sample(SnapshotOrder::ColumnMajor)).unwrap();

        let header = b"P5\n3 2\n255\n";
        assert_eq!(&buf[..header.len()], header);
        assert_eq!(buf.len(), header.len() + 6);
    }

    #[test]
    fn test_export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = export_ros_map(&sample(SnapshotOrder::ColumnMajor), dir.path(), "map")
            .unwrap();

        assert!(dir.path().join("map.pgm").exists());
        let metadata: MapMetadata =
            serde_yaml::from_str(&std::fs::read_to_string(yaml_path).unwrap()).unwrap();
        assert_eq!(metadata.image, "map.pgm");
        assert_eq!(metadata.origin, [-1.0, 2.0, 0.0]);
        assert_eq!(metadata.resolution, 0.5);
    }

    #[test]
    fn test_sink_writes_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = RosMapSink::new(dir.path(), "laser_map");

        sink.publish(&sample(SnapshotOrder::ColumnMajor)).unwrap();
        assert!(!dir.path().join("laser_map.pgm").exists());

        sink.finish().unwrap();
        assert!(dir.path().join("laser_map.pgm").exists());
        assert!(dir.path().join("laser_map.yaml").exists());
    }
}
