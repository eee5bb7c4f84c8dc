//! Application module: the player screen model and the logic it is built on.
//!
//! `PlayerScreen` (in `app::screen`) ties together the paged carousel, the
//! carousel/player synchronizer and the drag-to-seek translator.

mod carousel;
mod screen;
mod seek;
mod sync;
mod time;

pub use screen::{PlayerScreen, ScreenOptions};

#[cfg(test)]
mod tests;
