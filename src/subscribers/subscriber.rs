//! # Event subscriber trait.
//!
//! [`Subscribe`] is the extension point for reacting to session events
//! (logging, metrics, health files). Each subscriber gets its own bounded queue
//! and worker inside a [`SubscriberSet`](crate::SubscriberSet), so a slow
//! subscriber never delays the registration session.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use nsc_sidecar::{Event, EventKind, Subscribe};
//!
//! struct LossCounter(std::sync::atomic::AtomicU32);
//!
//! #[async_trait]
//! impl Subscribe for LossCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::InterfaceLost {
//!             self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "loss-counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for session observability.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; panics are caught and logged.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event, in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Short name used when the subscriber's queue overflows or it panics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Bounded queue capacity for this subscriber. Clamped to at least 1.
    fn queue_capacity(&self) -> usize {
        256
    }
}
