//! Configuration loading for RekhaGrid.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rekha_grid::config::RekhaConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = RekhaConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = RekhaConfig::default();
//!
//! let processor = config.build_processor()?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Width, height, resolution, origin |
//! | [`InputSection`] | Recording path and pose matching tolerance |
//! | [`OutputSection`] | Frame id, snapshot order, map export |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   width: 384
//!   height: 384
//!   resolution: 0.05    # 5cm cells
//!   origin_x: -10.0
//!   origin_y: -10.0
//!
//! input:
//!   recording: data/sample_recording.yaml
//!   pose_tolerance: 0.1  # seconds
//!
//! output:
//!   frame_id: map_laser
//!   order: column_major  # or transposed (y index fastest)
//!   export_pgm: true
//!   output_dir: ./output
//!   map_name: laser_map
//! ```

mod defaults;
mod error;
mod grid;
mod input;
mod output;
mod rekha;

// Re-export main types
pub use error::ConfigLoadError;
pub use rekha::RekhaConfig;

// Re-export section types
pub use grid::GridSection;
pub use input::InputSection;
pub use output::OutputSection;
