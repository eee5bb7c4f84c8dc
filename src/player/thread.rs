use std::sync::mpsc::{Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use crate::library::Track;

use super::events::EventHub;
use super::queue::{TrackEnd, clamp_seek, on_track_end};
use super::sink::create_sink_at;
use super::types::{EngineCmd, PlayerEvent, RepeatMode, SnapshotHandle, TransportState};

/// How often the engine refreshes the snapshot and checks for end of track.
const TICK: Duration = Duration::from_millis(100);

/// Spawn the engine thread. `ready` receives the outcome of opening the
/// audio output before any command is processed.
pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    snapshot: SnapshotHandle,
    hub: EventHub,
    ready: SyncSender<Result<(), String>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped; that would scribble over the TUI.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));
        info!("playback engine started");

        let mut engine = Engine::new(&stream, snapshot, hub);
        loop {
            match rx.recv_timeout(TICK) {
                Ok(EngineCmd::Quit { fade_out_ms }) => {
                    engine.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => engine.handle(cmd),
                Err(RecvTimeoutError::Timeout) => engine.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
            engine.publish_snapshot();
        }
        info!("playback engine stopped");
    })
}

struct Engine<'a> {
    stream: &'a OutputStream,
    snapshot: SnapshotHandle,
    hub: EventHub,

    queue: Vec<Track>,
    index: Option<usize>,
    sink: Option<Sink>,
    state: TransportState,
    repeat: RepeatMode,

    // Elapsed time = accumulated + time since started_at (while playing).
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl<'a> Engine<'a> {
    fn new(stream: &'a OutputStream, snapshot: SnapshotHandle, hub: EventHub) -> Self {
        Self {
            stream,
            snapshot,
            hub,
            queue: Vec::new(),
            index: None,
            sink: None,
            state: TransportState::Idle,
            repeat: RepeatMode::default(),
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    fn handle(&mut self, cmd: EngineCmd) {
        debug!(?cmd, "engine command");
        match cmd {
            EngineCmd::Add(tracks) => self.add(tracks),
            EngineCmd::Play => self.play(),
            EngineCmd::Pause => self.pause(),
            EngineCmd::Stop => self.stop(),
            EngineCmd::Reset => self.reset(),
            EngineCmd::SeekTo(pos) => self.seek(pos),
            EngineCmd::Skip(i) => self.skip(i),
            EngineCmd::SetRepeat(mode) => self.repeat = mode,
            EngineCmd::FadeOut(ms) => self.fade_out(ms),
            // Handled by the thread loop.
            EngineCmd::Quit { .. } => {}
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn current_duration(&self) -> f64 {
        self.index
            .and_then(|i| self.queue.get(i))
            .and_then(|t| t.duration)
            .map_or(0.0, |d| d.as_secs_f64())
    }

    fn publish_snapshot(&self) {
        let position = clamp_seek(self.elapsed().as_secs_f64(), self.current_duration());
        if let Ok(mut snap) = self.snapshot.lock() {
            snap.track_index = self.index;
            snap.state = self.state;
            snap.position = position;
            snap.duration = self.current_duration();
            snap.repeat = self.repeat;
        }
    }

    fn set_state(&mut self, state: TransportState) {
        if self.state != state {
            self.state = state;
            self.hub.publish(PlayerEvent::StateChanged(state));
        }
    }

    /// Replace the current sink with one for `i` starting at `start_at`.
    /// Keeps playing if the engine was playing.
    fn load(&mut self, i: usize, start_at: Duration) -> super::Result<()> {
        let new_sink = create_sink_at(self.stream, &self.queue[i], start_at)?;
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        if self.state.is_playing() {
            new_sink.play();
            self.started_at = Some(Instant::now());
        } else {
            self.started_at = None;
        }
        self.sink = Some(new_sink);
        self.index = Some(i);
        self.accumulated = start_at;
        Ok(())
    }

    /// Load `i` from the start and announce the change.
    fn change_track(&mut self, i: usize) -> super::Result<()> {
        let previous = self.index;
        self.load(i, Duration::ZERO)?;
        self.hub.publish(PlayerEvent::TrackChanged {
            previous,
            next: Some(i),
        });
        Ok(())
    }

    fn add(&mut self, tracks: Vec<Track>) {
        let was_empty = self.queue.is_empty();
        self.queue.extend(tracks);
        if was_empty && !self.queue.is_empty() {
            match self.change_track(0) {
                Ok(()) => self.set_state(TransportState::Ready),
                Err(e) => {
                    warn!("failed to load first track: {e}");
                    self.hub.publish(PlayerEvent::PlaybackError {
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    fn play(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if self.sink.is_none() {
            // After stop() the track is still current but its sink is gone.
            let i = self.index.unwrap_or(0);
            let announce = self.index != Some(i);
            let result = if announce {
                self.change_track(i)
            } else {
                self.load(i, Duration::ZERO)
            };
            if let Err(e) = result {
                warn!("cannot start playback: {e}");
                self.hub.publish(PlayerEvent::PlaybackError {
                    message: e.to_string(),
                });
                return;
            }
        }
        if let Some(ref s) = self.sink {
            s.play();
        }
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        self.set_state(TransportState::Playing);
    }

    fn pause(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        if let Some(ref s) = self.sink {
            s.pause();
        }
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
        self.set_state(TransportState::Paused);
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        if self.state != TransportState::Idle {
            self.set_state(TransportState::Stopped);
        }
    }

    fn reset(&mut self) {
        self.stop();
        self.queue.clear();
        if let Some(previous) = self.index.take() {
            self.hub.publish(PlayerEvent::TrackChanged {
                previous: Some(previous),
                next: None,
            });
        }
        self.set_state(TransportState::Idle);
    }

    fn seek(&mut self, pos: Duration) {
        let Some(i) = self.index else {
            return;
        };
        if self.sink.is_none() {
            return;
        }
        let target = Duration::from_secs_f64(clamp_seek(pos.as_secs_f64(), self.current_duration()));
        // Scrubbing: rebuild the current sink and skip into the file.
        if let Err(e) = self.load(i, target) {
            warn!("seek failed: {e}");
            self.hub.publish(PlayerEvent::PlaybackError {
                message: e.to_string(),
            });
        }
    }

    fn skip(&mut self, i: usize) {
        if i >= self.queue.len() {
            self.hub.publish(PlayerEvent::SkipFailed {
                index: i,
                reason: format!("no track at index {i}"),
            });
            return;
        }
        match self.change_track(i) {
            Ok(()) => {
                if matches!(self.state, TransportState::Idle | TransportState::Stopped) {
                    self.set_state(TransportState::Ready);
                }
            }
            Err(e) => {
                warn!("skip to {i} failed: {e}");
                self.hub.publish(PlayerEvent::SkipFailed {
                    index: i,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Periodic check for auto-advance.
    fn tick(&mut self) {
        let finished = self.state.is_playing() && self.sink.as_ref().is_some_and(|s| s.empty());
        if !finished {
            return;
        }
        let Some(current) = self.index else {
            return;
        };

        let outcome = match on_track_end(self.repeat, current, self.queue.len()) {
            TrackEnd::Replay(i) => self.load(i, Duration::ZERO),
            TrackEnd::Advance(i) => self.change_track(i),
            TrackEnd::QueueEnded(i) => {
                if let Some(s) = self.sink.take() {
                    s.stop();
                }
                self.started_at = None;
                self.accumulated = Duration::ZERO;
                self.set_state(TransportState::Stopped);
                self.hub.publish(PlayerEvent::QueueEnded { track: i });
                Ok(())
            }
        };
        if let Err(e) = outcome {
            warn!("auto-advance failed: {e}");
            self.stop();
            self.hub.publish(PlayerEvent::PlaybackError {
                message: e.to_string(),
            });
        }
    }

    fn fade_out(&mut self, fade_out_ms: u64) {
        if !self.state.is_playing() {
            return;
        }
        if let Some(ref s) = self.sink {
            fade_out_sink(s, fade_out_ms);
        }
        self.pause();
        // Paused at zero volume; the next play must be audible.
        if let Some(ref s) = self.sink {
            s.set_volume(1.0);
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.take() {
            if self.state.is_playing() {
                fade_out_sink(&s, fade_out_ms);
            }
            s.stop();
        }
        self.started_at = None;
        self.state = TransportState::Stopped;
        self.publish_snapshot();
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
