//! The player screen model.
//!
//! `PlayerScreen` owns the carousel, the synchronizer, the seek translator
//! and the player subscription. It never owns the player: every operation
//! that talks to it takes the facade by reference.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::library::Playlist;
use crate::player::{
    EventKind, PlaybackSnapshot, PlayerError, PlayerEvent, PlayerFacade, RepeatMode, Subscription,
};

use super::carousel::{Carousel, ScrollOrigin};
use super::seek::SeekTranslator;
use super::sync::{ScrollTo, Synchronizer};
use super::time::{format_time, remaining};

#[derive(Debug, Clone)]
pub struct ScreenOptions {
    pub repeat: RepeatMode,
    pub autoplay: bool,
    /// Duration of animated page scrolls.
    pub scroll_duration: Duration,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            repeat: RepeatMode::Off,
            autoplay: false,
            scroll_duration: Duration::from_millis(250),
        }
    }
}

/// Metadata shown under the carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub index: usize,
    pub title: String,
    pub artist: Option<String>,
    pub artwork: Option<PathBuf>,
}

pub struct PlayerScreen {
    pub playlist: Playlist,
    pub carousel: Carousel,
    pub sync: Synchronizer,
    pub seek: SeekTranslator,
    pub now_playing: Option<NowPlaying>,
    pub repeat: RepeatMode,
    /// Mirror of the player's snapshot, refreshed every tick.
    pub snapshot: PlaybackSnapshot,
    /// Last recoverable problem, shown in the status line.
    pub status: Option<String>,
    subscription: Option<Subscription>,
    scroll_duration: Duration,
}

impl PlayerScreen {
    /// Set up the player, subscribe to its events and queue the playlist.
    ///
    /// Failures are logged and surfaced in `status`; the screen is usable either way.
    pub fn mount<P: PlayerFacade + ?Sized>(
        playlist: Playlist,
        player: &P,
        options: ScreenOptions,
    ) -> Self {
        let len = playlist.len();
        let mut screen = Self {
            now_playing: None,
            carousel: Carousel::new(len),
            sync: Synchronizer::new(len),
            seek: SeekTranslator::new(0.0),
            repeat: options.repeat,
            snapshot: PlaybackSnapshot::default(),
            status: None,
            subscription: None,
            scroll_duration: options.scroll_duration,
            playlist,
        };

        if let Err(e) = player.setup() {
            warn!("player setup failed: {e}");
            screen.status = Some(format!("audio unavailable: {e}"));
            return screen;
        }

        // Subscribe before queueing so the initial track change is observed.
        screen.subscription = Some(player.subscribe(&EventKind::ALL));

        if !screen.playlist.is_empty() {
            if let Err(e) = player.add_tracks(screen.playlist.tracks().to_vec()) {
                screen.report("failed to queue tracks", &e);
            }
        }
        if let Err(e) = player.set_repeat_mode(options.repeat) {
            screen.report("failed to set repeat mode", &e);
        }
        if options.autoplay && !screen.playlist.is_empty() {
            if let Err(e) = player.play() {
                screen.report("autoplay failed", &e);
            }
        }

        screen.set_now_playing(Some(0), player);
        info!(tracks = len, "player screen mounted");
        screen
    }

    fn report(&mut self, what: &str, err: &dyn std::fmt::Display) {
        warn!("{what}: {err}");
        self.status = Some(format!("{what}: {err}"));
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Carousel page width and seek bar width, in cells.
    ///
    /// A resize cuts any scroll short and lands on its target page; if that
    /// scroll came from the user the synchronizer has to hear about it.
    pub fn set_viewport<P: PlayerFacade + ?Sized>(
        &mut self,
        page_width: f64,
        bar_width: f64,
        player: &P,
        now: Instant,
    ) {
        let user_motion = self.carousel.is_dragging()
            || (self.carousel.is_animating() && !self.carousel.is_following());
        if self.carousel.set_page_width(page_width) && user_motion {
            self.feed_offset(player, now);
        }
        self.seek.set_bar_width(bar_width);
    }

    /// Drain queued player events.
    pub fn pump_events<P: PlayerFacade + ?Sized>(&mut self, player: &P, now: Instant) {
        let events = match &self.subscription {
            Some(sub) => sub.drain(),
            None => return,
        };
        for event in events {
            self.handle_event(event, player, now);
        }
    }

    pub fn handle_event<P: PlayerFacade + ?Sized>(
        &mut self,
        event: PlayerEvent,
        player: &P,
        now: Instant,
    ) {
        debug!(?event, "player event");
        match event {
            PlayerEvent::TrackChanged { next, .. } => {
                self.set_now_playing(next, player);
                let scroll = self.sync.on_track_changed(next, player);
                self.follow(scroll, now);
            }
            PlayerEvent::StateChanged(state) => {
                self.snapshot.state = state;
            }
            PlayerEvent::QueueEnded { track } => {
                info!(track, "queue ended");
                let scroll = self.sync.on_queue_ended(track, player);
                self.follow(scroll, now);
            }
            PlayerEvent::SkipFailed { index, reason } => {
                warn!("player could not skip to {index}: {reason}");
                self.status = Some(format!("cannot play track {}: {reason}", index + 1));
                let scroll = self.sync.on_skip_failed(index, player);
                self.follow(scroll, now);
            }
            PlayerEvent::PlaybackError { message } => {
                warn!("playback error: {message}");
                self.status = Some(message);
            }
        }
    }

    fn set_now_playing<P: PlayerFacade + ?Sized>(&mut self, index: Option<usize>, player: &P) {
        self.now_playing = index.and_then(|i| {
            let i = self.playlist.clamp_index(i);
            let track = player
                .get_track(i)
                .or_else(|| self.playlist.get(i).cloned())?;
            Some(NowPlaying {
                index: i,
                title: track.title,
                artist: track.artist,
                artwork: track.artwork,
            })
        });
    }

    fn follow(&mut self, scroll: Option<ScrollTo>, now: Instant) {
        let Some(ScrollTo(page)) = scroll else {
            return;
        };
        // A swipe in progress is the most recent input; let it win.
        if self.carousel.is_dragging() {
            return;
        }
        self.carousel
            .scroll_to_page(page, self.scroll_duration, ScrollOrigin::Follow, now);
    }

    fn feed_offset<P: PlayerFacade + ?Sized>(&mut self, player: &P, now: Instant) {
        let scroll = self.sync.on_scroll(
            self.carousel.offset(),
            self.carousel.page_width(),
            player,
        );
        self.follow(scroll, now);
    }

    /// Per-frame update: refresh the snapshot mirror and advance the carousel.
    pub fn tick<P: PlayerFacade + ?Sized>(&mut self, player: &P, now: Instant) {
        self.snapshot = player.get_state();
        let following = self.carousel.is_following();
        if self.carousel.tick(now).is_some() && !following {
            self.feed_offset(player, now);
        }
    }

    pub fn next_page(&mut self, now: Instant) {
        self.carousel.step_pages(1, self.scroll_duration, now);
    }

    pub fn prev_page(&mut self, now: Instant) {
        self.carousel.step_pages(-1, self.scroll_duration, now);
    }

    pub fn first_page(&mut self, now: Instant) {
        self.carousel
            .scroll_to_page(0, self.scroll_duration, ScrollOrigin::User, now);
    }

    pub fn last_page(&mut self, now: Instant) {
        let last = self.playlist.len().saturating_sub(1);
        self.carousel
            .scroll_to_page(last, self.scroll_duration, ScrollOrigin::User, now);
    }

    pub fn begin_swipe(&mut self, column: f64) {
        self.carousel.begin_drag(column);
    }

    pub fn swipe_to<P: PlayerFacade + ?Sized>(&mut self, column: f64, player: &P, now: Instant) {
        if self.carousel.drag_to(column).is_some() {
            self.feed_offset(player, now);
        }
    }

    pub fn end_swipe(&mut self, now: Instant) {
        self.carousel.end_drag(self.scroll_duration, now);
    }

    /// Play when paused/ready/stopped, pause when playing. No-op without a current track.
    pub fn toggle_playback<P: PlayerFacade + ?Sized>(&mut self, player: &P) {
        let state = player.get_state();
        if state.track_index.is_none() {
            debug!("toggle ignored: no current track");
            return;
        }
        let result = if state.state.is_playing() {
            player.pause()
        } else {
            player.play()
        };
        if let Err(e) = result {
            self.report("play/pause failed", &e);
        }
    }

    /// `Off -> Track -> Queue -> Off`. The mode only changes if the player accepted it.
    pub fn cycle_repeat<P: PlayerFacade + ?Sized>(&mut self, player: &P) {
        let next = self.repeat.cycle();
        match player.set_repeat_mode(next) {
            Ok(()) => self.repeat = next,
            Err(e) => self.report("failed to change repeat mode", &e),
        }
    }

    /// Seek relative to the live position, clamped to the track.
    pub fn scrub<P: PlayerFacade + ?Sized>(&mut self, seconds: i64, player: &P) {
        let snap = player.get_state();
        if snap.track_index.is_none() {
            return;
        }
        let mut target = (snap.position + seconds as f64).max(0.0);
        if snap.duration > 0.0 {
            target = target.min(snap.duration);
        }
        if let Err(e) = player.seek_to(target) {
            self.report("seek failed", &e);
        }
    }

    pub fn begin_seek(&mut self, delta: f64) {
        self.seek.begin(delta);
    }

    pub fn seek_move(&mut self, delta: f64) {
        self.seek.move_to(delta);
    }

    pub fn end_seek<P: PlayerFacade + ?Sized>(&mut self, player: &P) -> Option<f64> {
        self.seek.release(self.snapshot.duration, player)
    }

    pub fn cancel_seek(&mut self) {
        self.seek.cancel();
    }

    pub fn displayed_fraction(&self) -> f64 {
        self.seek.displayed_fraction(&self.snapshot)
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.seek.displayed_position(&self.snapshot))
    }

    pub fn remaining_label(&self) -> String {
        let position = self.seek.displayed_position(&self.snapshot);
        format!("-{}", format_time(remaining(position, self.snapshot.duration)))
    }

    /// Tear down: release gestures, drop the subscription, stop and reset the player.
    pub fn unmount<P: PlayerFacade + ?Sized>(mut self, player: &P) {
        self.seek.cancel();
        self.carousel.end_drag(Duration::ZERO, Instant::now());
        self.subscription = None;
        for (what, result) in [("stop", player.stop()), ("reset", player.reset())] {
            match result {
                // Setup failed at mount; there is nothing to stop.
                Ok(()) | Err(PlayerError::NotSetUp) => {}
                Err(e) => warn!("{what} on unmount failed: {e}"),
            }
        }
        info!("player screen unmounted");
    }
}
