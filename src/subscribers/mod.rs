//! # Event subscribers.
//!
//! ```text
//! Sidecar listener ──► SubscriberSet::emit(&Event)
//!                          ├──► LogWriter (tracing)
//!                          └──► user subscribers
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
