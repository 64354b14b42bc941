//! Default value functions for serde deserialization.

pub fn grid_size() -> usize {
    384
}

pub fn resolution() -> f32 {
    0.05
}

pub fn origin() -> f32 {
    -10.0
}

pub fn pose_tolerance() -> f64 {
    0.1
}

pub fn frame_id() -> String {
    "map_laser".to_string()
}

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn map_name() -> String {
    "laser_map".to_string()
}

pub fn enabled() -> bool {
    true
}
