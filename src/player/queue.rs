//! Queue navigation rules for the engine thread.
//!
//! Kept free of `rodio` so the repeat-mode behaviour can be tested without
//! an audio device.

use super::types::RepeatMode;

/// What the engine should do when the current track runs out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum TrackEnd {
    /// Play the same index again from the start.
    Replay(usize),
    /// Load and play another index.
    Advance(usize),
    /// Nothing follows; stop and report the queue as ended.
    QueueEnded(usize),
}

pub(crate) fn on_track_end(repeat: RepeatMode, current: usize, len: usize) -> TrackEnd {
    match repeat {
        RepeatMode::Track => TrackEnd::Replay(current),
        RepeatMode::Queue => {
            if current + 1 >= len {
                TrackEnd::Advance(0)
            } else {
                TrackEnd::Advance(current + 1)
            }
        }
        RepeatMode::Off => {
            if current + 1 >= len {
                TrackEnd::QueueEnded(current)
            } else {
                TrackEnd::Advance(current + 1)
            }
        }
    }
}

/// Clamp a seek target to the known track length (if any).
pub(crate) fn clamp_seek(target_secs: f64, duration_secs: f64) -> f64 {
    let target = if target_secs.is_finite() {
        target_secs.max(0.0)
    } else {
        0.0
    };
    if duration_secs.is_finite() && duration_secs > 0.0 {
        target.min(duration_secs)
    } else {
        target
    }
}
