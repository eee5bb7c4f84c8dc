//! Event fan-out from the engine to its subscribers.
//!
//! Each subscription owns a channel receiver. Publishing never blocks: the
//! UI drains its receiver once per frame. Dropping a [`Subscription`]
//! unregisters it.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, Weak};

use super::types::{EventKind, PlayerEvent};

struct Subscriber {
    id: u64,
    kinds: Vec<EventKind>,
    tx: Sender<PlayerEvent>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

#[derive(Clone, Default)]
pub struct EventHub {
    registry: Arc<Mutex<Registry>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `kinds`. Events of other kinds are not queued.
    pub fn subscribe(&self, kinds: &[EventKind]) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let mut id = 0;
        if let Ok(mut reg) = self.registry.lock() {
            id = reg.next_id;
            reg.next_id += 1;
            reg.subscribers.push(Subscriber {
                id,
                kinds: kinds.to_vec(),
                tx,
            });
        }
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
            rx,
        }
    }

    /// Deliver `event` to every subscriber interested in its kind.
    pub fn publish(&self, event: PlayerEvent) {
        let kind = event.kind();
        if let Ok(mut reg) = self.registry.lock() {
            // A failed send means the receiver is gone; forget that subscriber.
            reg.subscribers
                .retain(|s| !s.kinds.contains(&kind) || s.tx.send(event.clone()).is_ok());
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .map(|reg| reg.subscribers.len())
            .unwrap_or(0)
    }
}

/// Scoped handle on a stream of player events.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
    rx: Receiver<PlayerEvent>,
}

impl Subscription {
    /// Take every event queued so far, oldest first.
    pub fn drain(&self) -> Vec<PlayerEvent> {
        self.rx.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut reg) = registry.lock() {
                reg.subscribers.retain(|s| s.id != self.id);
            }
        }
    }
}
