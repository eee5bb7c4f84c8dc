//! Horizontally paged carousel: one page per track.
//!
//! The offset is continuous (in terminal cells) and is moved by drags,
//! wheel steps or animated page scrolls. Every change is sampled by the
//! screen and fed to the synchronizer.

use std::time::{Duration, Instant};

/// Who asked for an animated scroll.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScrollOrigin {
    /// Buttons, keys, snap after a drag: the synchronizer follows the offset.
    User,
    /// The synchronizer catching up with the player: offset samples are not fed back.
    Follow,
}

#[derive(Debug, Clone)]
struct Animation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
    origin: ScrollOrigin,
}

#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    column: f64,
    offset: f64,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    pages: usize,
    page_width: f64,
    offset: f64,
    animation: Option<Animation>,
    drag: Option<DragAnchor>,
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

impl Carousel {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            page_width: 0.0,
            offset: 0.0,
            animation: None,
            drag: None,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    fn max_offset(&self) -> f64 {
        self.pages.saturating_sub(1) as f64 * self.page_width
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Page nearest to the current offset.
    pub fn current_page(&self) -> usize {
        if self.page_width <= 0.0 || self.pages == 0 {
            return 0;
        }
        let page = (self.offset / self.page_width).round().max(0.0) as usize;
        page.min(self.pages - 1)
    }

    /// Resize pages, keeping the current page in view. Returns true if the offset moved.
    pub fn set_page_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width < 0.0 || width == self.page_width {
            return false;
        }
        let page = self.animation.as_ref().map_or_else(
            || self.current_page(),
            |a| {
                if self.page_width > 0.0 {
                    (a.to / self.page_width).round() as usize
                } else {
                    0
                }
            },
        );
        self.page_width = width;
        self.animation = None;
        self.drag = None;
        let before = self.offset;
        self.offset = self.clamp_offset(page as f64 * width);
        before != self.offset
    }

    /// Animate towards `page` over `duration`; a zero duration jumps.
    pub fn scroll_to_page(
        &mut self,
        page: usize,
        duration: Duration,
        origin: ScrollOrigin,
        now: Instant,
    ) {
        let to = self.clamp_offset(page as f64 * self.page_width);
        if duration.is_zero() || to == self.offset {
            self.animation = None;
            self.offset = to;
            return;
        }
        self.animation = Some(Animation {
            from: self.offset,
            to,
            started: now,
            duration,
            origin,
        });
    }

    /// Nudge by whole pages from the current (or target) page, without wrapping.
    pub fn step_pages(&mut self, delta: isize, duration: Duration, now: Instant) {
        let base = match &self.animation {
            Some(a) if self.page_width > 0.0 => (a.to / self.page_width).round() as isize,
            _ => self.current_page() as isize,
        };
        let max = self.pages.saturating_sub(1) as isize;
        let page = (base + delta).clamp(0, max) as usize;
        self.scroll_to_page(page, duration, ScrollOrigin::User, now);
    }

    /// Advance any running animation. Returns the new offset if it moved.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let anim = self.animation.as_ref()?;
        let elapsed = now.saturating_duration_since(anim.started);
        let t = if anim.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / anim.duration.as_secs_f64()).min(1.0)
        };
        let next = anim.from + (anim.to - anim.from) * ease_out_cubic(t);
        if t >= 1.0 {
            self.animation = None;
        }
        let next = self.clamp_offset(next);
        if next == self.offset {
            return None;
        }
        self.offset = next;
        Some(next)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// True while a synchronizer-initiated scroll is running.
    pub fn is_following(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|a| a.origin == ScrollOrigin::Follow)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a swipe at `column`. Interrupts any animation.
    pub fn begin_drag(&mut self, column: f64) {
        self.animation = None;
        self.drag = Some(DragAnchor {
            column,
            offset: self.offset,
        });
    }

    /// Follow the pointer. Returns the new offset if it moved.
    pub fn drag_to(&mut self, column: f64) -> Option<f64> {
        let anchor = self.drag?;
        let next = self.clamp_offset(anchor.offset - (column - anchor.column));
        if next == self.offset {
            return None;
        }
        self.offset = next;
        Some(next)
    }

    /// Release the swipe and snap to the nearest page.
    pub fn end_drag(&mut self, duration: Duration, now: Instant) {
        if self.drag.take().is_some() {
            let page = self.current_page();
            self.scroll_to_page(page, duration, ScrollOrigin::User, now);
        }
    }
}
