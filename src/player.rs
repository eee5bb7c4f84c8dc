//! Playback engine boundary.
//!
//! Everything the screen knows about audio goes through [`PlayerFacade`]:
//! imperative commands that return as soon as they are issued, a cached
//! [`PlaybackSnapshot`] mirror and an event [`Subscription`]. [`RodioPlayer`]
//! is the real implementation, backed by an engine thread that owns the
//! `rodio` sinks.

mod engine;
mod error;
mod events;
mod facade;
mod queue;
mod sink;
mod thread;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use engine::RodioPlayer;
pub use error::{PlayerError, Result};
pub use events::Subscription;
pub use facade::PlayerFacade;
pub use types::*;
