//! Playlist loading.
//!
//! A playlist comes either from a TOML manifest listing the tracks
//! explicitly, or from scanning a directory for audio files.

mod error;
mod manifest;
mod model;
mod scan;

use std::path::Path;

pub use error::LibraryError;
pub use manifest::load_manifest;
pub use model::{Playlist, Track};
pub use scan::scan;

use crate::config::LibrarySettings;

/// Load a playlist from `path`: a `.toml` manifest or a directory to scan.
pub fn load(path: &Path, settings: &LibrarySettings) -> Result<Playlist, LibraryError> {
    if path.is_dir() {
        return Playlist::new(scan(path, settings));
    }
    if !path.exists() {
        return Err(LibraryError::NotFound(path.to_path_buf()));
    }
    load_manifest(path)
}
