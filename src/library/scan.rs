use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

/// Image names checked, in order, next to an audio file when looking for artwork.
const COVER_NAMES: [&str; 6] = [
    "cover.jpg",
    "cover.png",
    "folder.jpg",
    "folder.png",
    "front.jpg",
    "front.png",
];

/// Metadata read from an audio file's tags.
#[derive(Debug, Default)]
pub(super) struct TagInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

fn non_empty(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Read title/artist/album/duration; unreadable files yield an empty `TagInfo`.
pub(super) fn read_tags(path: &Path) -> TagInfo {
    let Ok(tagged) = lofty::read_from_path(path) else {
        debug!(?path, "no readable tags");
        return TagInfo::default();
    };

    let mut info = TagInfo {
        duration: Some(tagged.properties().duration()),
        ..TagInfo::default()
    };
    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        info.title = non_empty(tag.title());
        info.artist = non_empty(tag.artist());
        info.album = non_empty(tag.album());
    }
    info
}

pub(super) fn file_stem_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

/// Look for a conventional cover image in the directory holding `audio`.
pub(super) fn find_artwork(audio: &Path) -> Option<PathBuf> {
    let dir = audio.parent()?;
    COVER_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Scan `dir` for audio files, sorted by `artist - title` case-insensitively.
///
/// Ids are the 1-based positions in the sorted result.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let tags = read_tags(path);
            tracks.push(Track {
                id: String::new(),
                title: tags.title.unwrap_or_else(|| file_stem_title(path)),
                artist: tags.artist,
                album: tags.album,
                source: path.to_path_buf(),
                artwork: find_artwork(path),
                duration: tags.duration,
            });
        }
    }

    tracks.sort_by_key(|t| t.display().to_lowercase());
    for (i, t) in tracks.iter_mut().enumerate() {
        t.id = (i + 1).to_string();
    }
    tracks
}
