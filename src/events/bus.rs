//! # Event bus for session events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. The session
//! loop, the connector and the interface monitor publish onto it; the sidecar
//! runs one listener that forwards into the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ```text
//! Publishers:                         Listener (one):
//!   session loop ──┐
//!   connector    ──┼──► Bus ──► Sidecar listener ──► SubscriberSet
//!   monitor      ──┘
//! ```
//!
//! ## Rules
//! - `publish()` never blocks.
//! - Slow receivers observe `RecvError::Lagged(n)` and skip `n` events.
//! - Events published with no receiver are dropped.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for session events.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus whose ring buffer holds `capacity` events (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver for subsequently published events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
