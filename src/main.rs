//! RekhaGrid replay tool
//!
//! Replays a recorded laser session through the grid update and writes the
//! resulting map in ROS `map_server` format.
//!
//! # Usage
//!
//! ```bash
//! # With default config (configs/config.yaml if present)
//! cargo run --release -- --recording data/sample_recording.yaml
//!
//! # With custom config file and output directory
//! cargo run --release -- --config my.yaml --output /tmp/maps
//!
//! # Sensor fixed at the map origin (no pose stream in the recording)
//! cargo run --release -- --recording scans.yaml --static-pose
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;

use rekha_grid::config::{ConfigLoadError, RekhaConfig};
use rekha_grid::io::{GridSink, MemorySink, PoseProvider, Recording, RosMapSink, StaticPose};
use rekha_grid::{Pose2D, ReplayStats, SnapshotOrder};

#[derive(Parser, Debug)]
#[command(name = "rekha-grid", about = "Build a laser occupancy grid from a recording")]
struct Args {
    /// YAML configuration file (defaults to configs/config.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recording to replay (overrides input.recording)
    #[arg(long)]
    recording: Option<PathBuf>,

    /// Output directory for the exported map (overrides output.output_dir)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Serialize snapshots with the y index varying fastest
    #[arg(long)]
    transposed: bool,

    /// Ignore recorded poses and keep the sensor at the map origin
    #[arg(long)]
    static_pose: bool,
}

fn load_config(args: &Args) -> Result<RekhaConfig, ConfigLoadError> {
    let mut config = match &args.config {
        Some(path) => {
            let config = RekhaConfig::load(path)?;
            log::info!("Loaded config from {}", path.display());
            config
        }
        None => RekhaConfig::load_default()?,
    };

    if let Some(recording) = &args.recording {
        config.input.recording = Some(recording.display().to_string());
    }
    if let Some(output) = &args.output {
        config.output.output_dir = output.display().to_string();
    }
    if args.transposed {
        config.output.order = SnapshotOrder::Transposed;
    }

    Ok(config)
}

fn run(args: &Args) -> Result<ReplayStats, Box<dyn std::error::Error>> {
    let config = load_config(args)?;

    let grid = &config.grid;
    log::info!("rekha-grid starting");
    log::info!(
        "  Grid: {}x{} @ {}m, origin ({}, {})",
        grid.width,
        grid.height,
        grid.resolution,
        grid.origin_x,
        grid.origin_y
    );
    log::info!(
        "  Snapshot: frame '{}', {:?}",
        config.output.frame_id,
        config.output.order
    );

    let recording_path = config
        .input
        .recording
        .as_deref()
        .ok_or("no recording given (use --recording or input.recording)")?;
    let recording = Recording::load(Path::new(recording_path))?;
    let (mut source, recorded_poses) = recording.into_replay(config.input.pose_tolerance);

    let mut poses: Box<dyn PoseProvider> = if args.static_pose {
        log::info!("  Poses: static at map origin");
        Box::new(StaticPose(Pose2D::identity()))
    } else {
        log::info!(
            "  Poses: {} recorded, tolerance {}s",
            recorded_poses.len(),
            config.input.pose_tolerance
        );
        Box::new(recorded_poses)
    };

    let mut sink: Box<dyn GridSink> = if config.output.export_pgm {
        log::info!(
            "  Output: {}/{}.pgm",
            config.output.output_dir,
            config.output.map_name
        );
        Box::new(RosMapSink::new(
            &config.output.output_dir,
            &config.output.map_name,
        ))
    } else {
        Box::new(MemorySink::new())
    };

    let mut processor = config.build_processor()?;
    let stats = processor.run(&mut source, poses.as_mut(), sink.as_mut())?;

    let counts = processor.storage().count_by_state();
    log::info!(
        "Final map: {} free, {} occupied, {} unknown",
        counts.free,
        counts.occupied,
        counts.unknown
    );

    Ok(stats)
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
