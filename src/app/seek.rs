//! Drag-to-seek over a fixed-width progress bar.
//!
//! While a drag is active the bar previews the pointer position and ignores
//! live position updates; releasing issues exactly one `seek_to`.

use tracing::{debug, warn};

use crate::player::{PlaybackSnapshot, PlayerFacade};

/// `position / duration` clamped to `[0, 1]`; 0 when the duration is unknown.
pub fn progress_fraction(position: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    (position / duration).clamp(0.0, 1.0)
}

/// `pending / bar_width` clamped to `[0, 1]`; 0 for a zero-width bar.
pub fn bar_fraction(pending: f64, bar_width: f64) -> f64 {
    progress_fraction(pending, bar_width)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SeekState {
    Idle,
    /// `pending` is in cells from the left edge of the bar.
    Seeking { pending: f64 },
}

#[derive(Debug, Clone)]
pub struct SeekTranslator {
    bar_width: f64,
    state: SeekState,
}

impl SeekTranslator {
    pub fn new(bar_width: f64) -> Self {
        Self {
            bar_width: bar_width.max(0.0),
            state: SeekState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SeekState {
        self.state
    }

    pub fn is_seeking(&self) -> bool {
        matches!(self.state, SeekState::Seeking { .. })
    }

    pub fn set_bar_width(&mut self, width: f64) {
        self.bar_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        if let SeekState::Seeking { pending } = self.state {
            self.state = SeekState::Seeking {
                pending: self.clamp(pending),
            };
        }
    }

    fn clamp(&self, delta: f64) -> f64 {
        if delta.is_finite() {
            delta.clamp(0.0, self.bar_width)
        } else {
            0.0
        }
    }

    /// Gesture start at `delta` cells from the bar's left edge.
    pub fn begin(&mut self, delta: f64) {
        self.state = SeekState::Seeking {
            pending: self.clamp(delta),
        };
    }

    /// Pointer moved; ignored unless a drag is active.
    pub fn move_to(&mut self, delta: f64) {
        if self.is_seeking() {
            self.state = SeekState::Seeking {
                pending: self.clamp(delta),
            };
        }
    }

    /// Drop the gesture without seeking.
    pub fn cancel(&mut self) {
        self.state = SeekState::Idle;
    }

    /// Finish the gesture: issue one seek to `fraction × duration` and go idle.
    ///
    /// Returns the target in seconds, or `None` if no drag was active.
    pub fn release<P: PlayerFacade + ?Sized>(&mut self, duration: f64, player: &P) -> Option<f64> {
        let SeekState::Seeking { pending } = self.state else {
            return None;
        };
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        let target = bar_fraction(pending, self.bar_width) * duration;
        debug!(target, "seek released");
        if let Err(e) = player.seek_to(target) {
            warn!("seek to {target:.1}s failed: {e}");
        }
        self.state = SeekState::Idle;
        Some(target)
    }

    /// Fraction the bar should show.
    pub fn displayed_fraction(&self, live: &PlaybackSnapshot) -> f64 {
        match self.state {
            SeekState::Idle => progress_fraction(live.position, live.duration),
            SeekState::Seeking { pending } => bar_fraction(pending, self.bar_width),
        }
    }

    /// Position, in seconds, the time labels should show.
    pub fn displayed_position(&self, live: &PlaybackSnapshot) -> f64 {
        match self.state {
            SeekState::Idle => live.position.max(0.0),
            SeekState::Seeking { pending } => {
                let duration = if live.duration.is_finite() { live.duration.max(0.0) } else { 0.0 };
                bar_fraction(pending, self.bar_width) * duration
            }
        }
    }
}
