//! Keeps the carousel page and the player's current track converged.
//!
//! Scroll samples turn into `skip_to_track` commands; track-changed
//! notifications from the player move the carousel. At most one skip is in
//! flight: candidates that arrive meanwhile are coalesced into the latest
//! one and issued when the in-flight skip is acknowledged or fails.

use tracing::{debug, warn};

use crate::player::PlayerFacade;

/// Request for the carousel to show a page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScrollTo(pub usize);

/// Page index under `offset`, clamped to `[0, len - 1]`.
///
/// `None` when there is nothing to index: no pages, a non-positive page
/// width, or a non-finite offset.
pub fn candidate_index(offset: f64, page_width: f64, len: usize) -> Option<usize> {
    if len == 0 || !page_width.is_finite() || page_width <= 0.0 || !offset.is_finite() {
        return None;
    }
    let raw = (offset / page_width).round();
    if raw <= 0.0 {
        return Some(0);
    }
    Some((raw as usize).min(len - 1))
}

#[derive(Debug, Clone)]
pub struct Synchronizer {
    len: usize,
    /// Index the screen shows.
    index: usize,
    /// Last index the player confirmed as current.
    acknowledged: usize,
    in_flight: Option<usize>,
    queued: Option<usize>,
}

impl Synchronizer {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            acknowledged: 0,
            in_flight: None,
            queued: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    #[cfg(test)]
    pub fn acknowledged(&self) -> usize {
        self.acknowledged
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> Option<usize> {
        self.in_flight
    }

    fn clamp(&self, index: usize) -> usize {
        let clamped = index.min(self.len.saturating_sub(1));
        if clamped != index {
            debug!(index, clamped, "clamped out-of-range track index");
        }
        clamped
    }

    /// A new carousel offset was sampled.
    pub fn on_scroll<P: PlayerFacade + ?Sized>(
        &mut self,
        offset: f64,
        page_width: f64,
        player: &P,
    ) -> Option<ScrollTo> {
        let candidate = candidate_index(offset, page_width, self.len)?;
        if candidate == self.index {
            return None;
        }
        self.request(candidate, player)
    }

    /// The player reports a new current track.
    pub fn on_track_changed<P: PlayerFacade + ?Sized>(
        &mut self,
        next: Option<usize>,
        player: &P,
    ) -> Option<ScrollTo> {
        if self.len == 0 {
            return None;
        }
        let next = self.clamp(next?);
        self.acknowledged = next;

        match self.in_flight {
            Some(pending) if pending == next => {
                self.in_flight = None;
                match self.queued.take() {
                    Some(q) if q != next => self.issue(q, player),
                    _ => {
                        self.index = next;
                        None
                    }
                }
            }
            // Our own skip is still on its way; it will land after this.
            Some(_) => None,
            None => {
                if next == self.index {
                    return None;
                }
                debug!(from = self.index, to = next, "following player track change");
                self.index = next;
                Some(ScrollTo(next))
            }
        }
    }

    /// The player could not honour a skip to `index`.
    pub fn on_skip_failed<P: PlayerFacade + ?Sized>(
        &mut self,
        index: usize,
        player: &P,
    ) -> Option<ScrollTo> {
        if self.in_flight != Some(index) {
            return None;
        }
        self.in_flight = None;
        if let Some(q) = self.queued.take() {
            if q != index {
                return self.issue(q, player);
            }
        }
        self.restore()
    }

    /// The queue ran out on `track`: wrap to the first one.
    ///
    /// Ignored when a skip is pending or `track` is no longer the
    /// acknowledged one; the user's later choice stands.
    pub fn on_queue_ended<P: PlayerFacade + ?Sized>(
        &mut self,
        track: usize,
        player: &P,
    ) -> Option<ScrollTo> {
        if self.len == 0 {
            return None;
        }
        if self.in_flight.is_some() || self.queued.is_some() || track != self.acknowledged {
            debug!(track, "stale queue end, keeping the current selection");
            return None;
        }
        let restored = self.request(0, player);
        restored.or(Some(ScrollTo(0)))
    }

    fn request<P: PlayerFacade + ?Sized>(&mut self, target: usize, player: &P) -> Option<ScrollTo> {
        self.index = target;
        if self.in_flight.is_some() {
            debug!(target, "skip in flight, coalescing");
            self.queued = Some(target);
            return None;
        }
        self.issue(target, player)
    }

    fn issue<P: PlayerFacade + ?Sized>(&mut self, target: usize, player: &P) -> Option<ScrollTo> {
        self.index = target;
        match player.skip_to_track(target) {
            Ok(()) => {
                debug!(target, "skip issued");
                self.in_flight = Some(target);
                None
            }
            Err(e) => {
                warn!("skip to track {target} failed: {e}");
                self.queued = None;
                self.restore()
            }
        }
    }

    fn restore(&mut self) -> Option<ScrollTo> {
        self.index = self.acknowledged;
        Some(ScrollTo(self.acknowledged))
    }
}
