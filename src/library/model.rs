use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use super::error::LibraryError;

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique and stable within a playlist.
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Audio file handed to the engine.
    pub source: PathBuf,
    pub artwork: Option<PathBuf>,
    pub duration: Option<Duration>,
}

impl Track {
    /// `Artist - Title`, or just the title when the artist is unknown.
    pub fn display(&self) -> String {
        match self.artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("{} - {}", a, self.title),
            _ => self.title.clone(),
        }
    }
}

/// Ordered, index-addressable list of tracks, fixed once loaded.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist, rejecting duplicate track ids.
    pub fn new(tracks: Vec<Track>) -> Result<Self, LibraryError> {
        let mut seen = HashSet::new();
        for t in &tracks {
            if !seen.insert(t.id.as_str()) {
                return Err(LibraryError::DuplicateId(t.id.clone()));
            }
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Clamp `index` into `[0, len - 1]` (0 for an empty playlist).
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.tracks.len().saturating_sub(1))
    }
}
