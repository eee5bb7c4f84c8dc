use std::time::Duration;

use super::error::Result;
use super::events::Subscription;
use super::types::{EventKind, PlaybackSnapshot, RepeatMode};
use crate::library::Track;

/// Imperative command surface of a playback engine.
///
/// Commands return once they are *issued*; their effect is observed later
/// through [`PlaybackSnapshot`] or the events of a [`Subscription`]. Commands
/// issued from one thread reach the engine in issuance order.
pub trait PlayerFacade {
    /// Start the engine session. Calling it again is a no-op.
    fn setup(&self) -> Result<()>;
    /// Append `tracks` to the queue. The first track of an empty queue becomes current.
    fn add_tracks(&self, tracks: Vec<Track>) -> Result<()>;
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
    /// Ramp the volume down over `duration`, then pause.
    fn fade_out(&self, duration: Duration) -> Result<()>;
    /// Stop and clear the queue.
    fn reset(&self) -> Result<()>;
    /// Jump to an absolute position, in seconds, within the current track.
    fn seek_to(&self, seconds: f64) -> Result<()>;
    fn skip_to_track(&self, index: usize) -> Result<()>;
    fn set_repeat_mode(&self, mode: RepeatMode) -> Result<()>;
    /// Latest mirrored state; never blocks on the engine.
    fn get_state(&self) -> PlaybackSnapshot;
    fn get_track(&self, index: usize) -> Option<Track>;
    fn subscribe(&self, kinds: &[EventKind]) -> Subscription;
}
