use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::library::Track;

use super::error::{PlayerError, Result};
use super::events::{EventHub, Subscription};
use super::facade::PlayerFacade;
use super::thread::spawn_engine_thread;
use super::types::{EngineCmd, EventKind, PlaybackSnapshot, RepeatMode, SnapshotHandle};

struct Session {
    tx: Sender<EngineCmd>,
    join: Option<JoinHandle<()>>,
}

/// [`PlayerFacade`] backed by a `rodio` engine thread.
pub struct RodioPlayer {
    session: Mutex<Option<Session>>,
    // Facade-side copy of the queue, for `get_track` and index validation.
    tracks: Mutex<Vec<Track>>,
    snapshot: SnapshotHandle,
    hub: EventHub,
}

impl RodioPlayer {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
            tracks: Mutex::new(Vec::new()),
            snapshot: Arc::new(Mutex::new(PlaybackSnapshot::default())),
            hub: EventHub::new(),
        }
    }

    fn send(&self, cmd: EngineCmd) -> Result<()> {
        let session = self.session.lock().map_err(|_| PlayerError::Disconnected)?;
        let Some(session) = session.as_ref() else {
            return Err(PlayerError::NotSetUp);
        };
        session.tx.send(cmd).map_err(|_| PlayerError::Disconnected)
    }

    fn queue_len(&self) -> usize {
        self.tracks.lock().map(|t| t.len()).unwrap_or(0)
    }

    /// Stop the engine thread, fading out over `fade_out`, and wait for it.
    ///
    /// Facade commands issued after this return [`PlayerError::NotSetUp`].
    pub fn shutdown(&self, fade_out: Duration) {
        let session = self.session.lock().ok().and_then(|mut s| s.take());
        if let Some(mut session) = session {
            let _ = session.tx.send(EngineCmd::Quit {
                fade_out_ms: fade_out.as_millis() as u64,
            });
            if let Some(h) = session.join.take() {
                if h.join().is_err() {
                    warn!("playback engine thread panicked");
                }
            }
        }
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioPlayer {
    fn drop(&mut self) {
        self.shutdown(Duration::ZERO);
    }
}

impl PlayerFacade for RodioPlayer {
    fn setup(&self) -> Result<()> {
        let mut session = self.session.lock().map_err(|_| PlayerError::Disconnected)?;
        if session.is_some() {
            debug!("player already set up");
            return Ok(());
        }

        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let join = spawn_engine_thread(rx, self.snapshot.clone(), self.hub.clone(), ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(reason)) => {
                let _ = join.join();
                return Err(PlayerError::Output(reason));
            }
            Err(_) => {
                let _ = join.join();
                return Err(PlayerError::Output("engine exited during setup".to_string()));
            }
        }

        *session = Some(Session {
            tx,
            join: Some(join),
        });
        info!("player set up");
        Ok(())
    }

    fn add_tracks(&self, tracks: Vec<Track>) -> Result<()> {
        if let Ok(mut mirror) = self.tracks.lock() {
            mirror.extend(tracks.iter().cloned());
        }
        self.send(EngineCmd::Add(tracks))
    }

    fn play(&self) -> Result<()> {
        self.send(EngineCmd::Play)
    }

    fn pause(&self) -> Result<()> {
        self.send(EngineCmd::Pause)
    }

    fn stop(&self) -> Result<()> {
        self.send(EngineCmd::Stop)
    }

    fn fade_out(&self, duration: Duration) -> Result<()> {
        self.send(EngineCmd::FadeOut(duration.as_millis() as u64))
    }

    fn reset(&self) -> Result<()> {
        if let Ok(mut mirror) = self.tracks.lock() {
            mirror.clear();
        }
        self.send(EngineCmd::Reset)
    }

    fn seek_to(&self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(PlayerError::InvalidSeek(seconds));
        }
        self.send(EngineCmd::SeekTo(Duration::from_secs_f64(seconds)))
    }

    fn skip_to_track(&self, index: usize) -> Result<()> {
        let len = self.queue_len();
        if index >= len {
            return Err(PlayerError::IndexOutOfRange { index, len });
        }
        self.send(EngineCmd::Skip(index))
    }

    fn set_repeat_mode(&self, mode: RepeatMode) -> Result<()> {
        self.send(EngineCmd::SetRepeat(mode))
    }

    fn get_state(&self) -> PlaybackSnapshot {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn get_track(&self, index: usize) -> Option<Track> {
        self.tracks.lock().ok()?.get(index).cloned()
    }

    fn subscribe(&self, kinds: &[EventKind]) -> Subscription {
        self.hub.subscribe(kinds)
    }
}
