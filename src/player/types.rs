//! Playback-related small types and handles.
//!
//! Transport state, repeat mode, the snapshot mirror shared with the UI and
//! the events the engine publishes.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::Track;

/// Coarse classification of what the engine is doing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Nothing queued yet.
    #[default]
    Idle,
    /// A track is loaded but has not been started.
    Ready,
    Playing,
    Paused,
    /// Stopped explicitly or because the queue ran out.
    Stopped,
}

impl TransportState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Advance through the queue and stop after the last track.
    #[default]
    Off,
    /// Replay the current track when it ends.
    Track,
    /// Wrap around to the start of the queue.
    Queue,
}

impl RepeatMode {
    /// Next mode in the `Off -> Track -> Queue -> Off` cycle.
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::Track,
            Self::Track => Self::Queue,
            Self::Queue => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Track => "track",
            Self::Queue => "queue",
        }
    }
}

/// Engine-owned view of playback, mirrored for rendering.
///
/// `position` and `duration` are seconds; `duration` is `0.0` when the
/// length of the current track is unknown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSnapshot {
    pub track_index: Option<usize>,
    pub state: TransportState,
    pub position: f64,
    pub duration: f64,
    pub repeat: RepeatMode,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    TrackChanged,
    StateChanged,
    QueueEnded,
    SkipFailed,
    PlaybackError,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::TrackChanged,
        EventKind::StateChanged,
        EventKind::QueueEnded,
        EventKind::SkipFailed,
        EventKind::PlaybackError,
    ];
}

/// Notifications pushed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The current track changed (skip, auto-advance, reset).
    TrackChanged {
        previous: Option<usize>,
        next: Option<usize>,
    },
    StateChanged(TransportState),
    /// The last track finished with repeat off.
    QueueEnded { track: usize },
    /// A skip command could not be honoured; the current track is unchanged.
    SkipFailed { index: usize, reason: String },
    PlaybackError { message: String },
}

impl PlayerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TrackChanged { .. } => EventKind::TrackChanged,
            Self::StateChanged(_) => EventKind::StateChanged,
            Self::QueueEnded { .. } => EventKind::QueueEnded,
            Self::SkipFailed { .. } => EventKind::SkipFailed,
            Self::PlaybackError { .. } => EventKind::PlaybackError,
        }
    }
}

/// Commands understood by the engine thread, processed in FIFO order.
#[derive(Debug)]
pub(crate) enum EngineCmd {
    Add(Vec<Track>),
    Play,
    Pause,
    Stop,
    Reset,
    SeekTo(Duration),
    Skip(usize),
    SetRepeat(RepeatMode),
    /// Ramp the volume down over this many milliseconds, then pause.
    FadeOut(u64),
    /// Stop the engine thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

pub type SnapshotHandle = Arc<Mutex<PlaybackSnapshot>>;
