//! Input and output around the grid update.
//!
//! - [`traits`]: pose, reading and snapshot collaborator interfaces
//! - [`recording`]: YAML recordings replayed as a reading source and pose provider
//! - [`memory`]: in-memory snapshot sink
//! - [`pgm`]: ROS `map_server` export

pub mod memory;
pub mod pgm;
pub mod recording;
pub mod traits;

pub use memory::MemorySink;
pub use pgm::{MapMetadata, RosMapSink, export_ros_map, write_pgm};
pub use recording::{Recording, RecordedPoses, RecordingSource};
pub use traits::{GridSink, PoseProvider, ReadingSource, StaticPose};
