//! Utilities for creating `rodio` sinks from `Track` values.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::error::PlayerError;
use crate::library::Track;

/// Create a paused `Sink` for `track` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    track: &Track,
    start_at: Duration,
) -> Result<Sink, PlayerError> {
    let unavailable = |reason: String| PlayerError::TrackUnavailable {
        path: track.source.clone(),
        reason,
    };

    let file = File::open(&track.source).map_err(|e| unavailable(e.to_string()))?;
    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| unavailable(e.to_string()))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
