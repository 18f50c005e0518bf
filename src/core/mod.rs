//! Runtime core: the registration session and its lifecycle.
//!
//! The public entry point is [`Sidecar`], built with [`SidecarBuilder`]. The
//! building blocks are re-exported too so they can be driven on their own.
//!
//! Internal modules:
//! - `connector`: dials a controller until it succeeds or is cancelled;
//! - `monitor`: polls for the managed interface beside `ProcessPod`;
//! - `session`: the attempt state machine and restart loop;
//! - `shutdown`: cross-platform termination signals.

mod builder;
mod connector;
mod monitor;
mod outcome;
mod session;
mod shutdown;
mod sidecar;

pub use builder::SidecarBuilder;
pub use connector::connect;
pub use monitor::{MonitorExit, monitor};
pub use outcome::SessionOutcome;
pub use session::Session;
pub use shutdown::ShutdownSignals;
pub use sidecar::Sidecar;
