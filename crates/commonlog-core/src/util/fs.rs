//! Filesystem utilities.

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the home directory.
///
/// Paths without a leading `~`, or a `~` when the home directory is
/// unknown, are returned unchanged.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}
