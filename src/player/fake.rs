//! Recording stand-in for the playback engine, used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::time::Duration;

use crate::library::Track;

use super::error::{PlayerError, Result};
use super::events::{EventHub, Subscription};
use super::facade::PlayerFacade;
use super::types::{EventKind, PlaybackSnapshot, PlayerEvent, RepeatMode};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Setup,
    AddTracks(usize),
    Play,
    Pause,
    Stop,
    FadeOut(Duration),
    Reset,
    SeekTo(f64),
    SkipTo(usize),
    SetRepeat(RepeatMode),
}

#[derive(Default)]
pub(crate) struct FakePlayer {
    pub commands: RefCell<Vec<Command>>,
    pub snapshot: RefCell<PlaybackSnapshot>,
    pub tracks: RefCell<Vec<Track>>,
    /// Skip targets that are rejected synchronously.
    pub reject_skips: RefCell<HashSet<usize>>,
    pub fail_setup: Cell<bool>,
    setup_done: Cell<bool>,
    hub: EventHub,
}

impl FakePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let player = Self::new();
        *player.tracks.borrow_mut() = tracks;
        player
    }

    /// Push an event to subscribers as if the engine had emitted it.
    pub fn emit(&self, event: PlayerEvent) {
        self.hub.publish(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }

    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    pub fn skips(&self) -> Vec<usize> {
        self.commands
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Command::SkipTo(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.commands
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Command::SeekTo(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    fn record(&self, cmd: Command) -> Result<()> {
        if !self.setup_done.get() {
            return Err(PlayerError::NotSetUp);
        }
        self.commands.borrow_mut().push(cmd);
        Ok(())
    }
}

impl PlayerFacade for FakePlayer {
    fn setup(&self) -> Result<()> {
        if self.fail_setup.get() {
            return Err(PlayerError::Output("no device".to_string()));
        }
        if !self.setup_done.replace(true) {
            self.commands.borrow_mut().push(Command::Setup);
        }
        Ok(())
    }

    fn add_tracks(&self, tracks: Vec<Track>) -> Result<()> {
        self.record(Command::AddTracks(tracks.len()))?;
        self.tracks.borrow_mut().extend(tracks);
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.record(Command::Play)
    }

    fn pause(&self) -> Result<()> {
        self.record(Command::Pause)
    }

    fn stop(&self) -> Result<()> {
        self.record(Command::Stop)
    }

    fn fade_out(&self, duration: Duration) -> Result<()> {
        self.record(Command::FadeOut(duration))
    }

    fn reset(&self) -> Result<()> {
        self.record(Command::Reset)
    }

    fn seek_to(&self, seconds: f64) -> Result<()> {
        self.record(Command::SeekTo(seconds))
    }

    fn skip_to_track(&self, index: usize) -> Result<()> {
        if self.reject_skips.borrow().contains(&index) {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.tracks.borrow().len(),
            });
        }
        self.record(Command::SkipTo(index))
    }

    fn set_repeat_mode(&self, mode: RepeatMode) -> Result<()> {
        self.record(Command::SetRepeat(mode))
    }

    fn get_state(&self) -> PlaybackSnapshot {
        self.snapshot.borrow().clone()
    }

    fn get_track(&self, index: usize) -> Option<Track> {
        self.tracks.borrow().get(index).cloned()
    }

    fn subscribe(&self, kinds: &[EventKind]) -> Subscription {
        self.hub.subscribe(kinds)
    }
}
