//! Common utility functions.

pub mod data;
pub mod fs;

pub use data::{deep_merge, get_path, load_yaml_file, set_path};
pub use fs::expand_path;
