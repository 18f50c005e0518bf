//! Session events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: the session loop, `core::connector::connect`, the interface monitor.
//! - **Consumers**: the `Sidecar` listener (fans out to `SubscriberSet`), and
//!   anything holding a receiver from `Sidecar::subscribe`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{BackoffSource, Event, EventKind};
