//! TOML playlist manifests.
//!
//! ```toml
//! [[tracks]]
//! id = "1"
//! url = "audio/relaxing.mp3"
//! title = "Relaxing Life"
//! artist = "John Saxo"
//! artwork = "img/img1.jpg"
//! ```
//!
//! Relative `url` and `artwork` paths resolve against the manifest's directory.
//! Missing titles/artists fall back to the file's tags, then its file stem.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::LibraryError;
use super::model::{Playlist, Track};
use super::scan::{file_stem_title, read_tags};

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    tracks: Vec<ManifestTrack>,
}

#[derive(Debug, Deserialize)]
struct ManifestTrack {
    id: String,
    url: PathBuf,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    artwork: Option<PathBuf>,
}

fn resolve(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { base.join(p) }
}

fn parse(text: &str, path: &Path) -> Result<Playlist, LibraryError> {
    let manifest: Manifest = toml::from_str(text).map_err(|source| LibraryError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or(Path::new(""));

    let tracks = manifest
        .tracks
        .into_iter()
        .map(|entry| {
            let source = resolve(base, entry.url);
            let tags = read_tags(&source);
            Track {
                id: entry.id,
                title: entry
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .or(tags.title)
                    .unwrap_or_else(|| file_stem_title(&source)),
                artist: entry.artist.or(tags.artist),
                album: entry.album.or(tags.album),
                artwork: entry.artwork.map(|a| resolve(base, a)),
                duration: tags.duration,
                source,
            }
        })
        .collect();

    Playlist::new(tracks)
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Playlist, LibraryError> {
    let text = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, path)
}
