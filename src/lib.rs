//! # nsc-sidecar
//!
//! **nsc-sidecar** runs inside a pod and keeps that pod registered with a
//! network-service controller.
//!
//! Each registration reports who the pod is and which network namespace it
//! lives in (as an `inode://4/<n>` URL). While the controller holds the
//! registration open, the sidecar watches for the virtual interface the
//! controller plumbs into the pod (name prefix `nsm`). When the interface is
//! gone, or the controller ends the call, the registration is started again.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  Config::from_env()
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Sidecar                                                          │
//! │  - Bus (broadcast events)                                         │
//! │  - SubscriberSet (fans out to subscribers)                        │
//! │  - Session (attempt loop)                                         │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!  ┌────────────┐   ┌────────────────┐   ┌──────────────┐
//!  │ Connector  │   │NamespaceResolver│  │InterfaceProbe│
//!  │ (tonic)    │   │ (/proc/self/ns) │  │(if_nameindex)│
//!  └─────┬──────┘   └────────────────┘   └──────────────┘
//!        ▼
//!  Controller: DiscoverServer / ProcessPod
//!
//!  Session, connector and monitor publish ──► Bus ──► listener ──► SubscriberSet
//!                                                                    ├─► LogWriter
//!                                                                    └─► user subscribers
//! ```
//!
//! ### Lifecycle
//! ```text
//! loop {
//!   ├─► attempt += 1, publish SessionStarting{ attempt, retry }
//!   ├─► connect(initial endpoint)              (1s between dials, forever)
//!   ├─► resolve namespace identity             Err ─► 1s, retry unchanged
//!   ├─► discover(node) → endpoint, reconnect   Err ─► 1s, retry unchanged
//!   ├─► ProcessPod(request{ retry })  ║  monitor every 10s
//!   │       ├─ interface lost ─► 1s, retry + 1
//!   │       ├─ Err            ─► 1s, retry + 1
//!   │       └─ Ok             ─► 60s, retry unchanged
//!   └─ exit: termination signal (cancels whatever is in flight)
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Sidecar**       | Owns the session, the bus and signal handling.              | [`Sidecar`], [`SidecarBuilder`]             |
//! | **Controller**    | Transport seam and the gRPC implementation.                  | [`Connector`], [`Controller`], [`GrpcConnector`] |
//! | **Host probes**   | Namespace identity and interface presence.                   | [`NamespaceResolver`], [`InterfaceProbe`]   |
//! | **Policies**      | Dial backoff and restart delays.                             | [`BackoffPolicy`], [`RestartPolicy`]        |
//! | **Subscriber API**| Hook into session events (logging, custom subscribers).      | [`Subscribe`]                               |
//! | **Errors**        | Typed reasons an attempt ended.                              | [`SessionError`]                            |
//! | **Configuration** | Pod identity and timings, read from the environment.         | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], rendering events through `tracing`.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use nsc_sidecar::{Config, Sidecar, SessionError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SessionError> {
//!     let cfg = Config::from_env();
//!
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn nsc_sidecar::Subscribe>> = vec![Arc::new(nsc_sidecar::LogWriter::new())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn nsc_sidecar::Subscribe>> = Vec::new();
//!
//!     Sidecar::builder(cfg)
//!         .with_subscribers(subs)
//!         .build()
//!         .run_until_signal()
//!         .await
//! }
//! ```
pub mod config;
pub mod controller;
mod core;
mod error;
mod events;
pub mod iface;
pub mod netns;
mod pod;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use controller::{Connector, ConnectorRef, Controller, GrpcConnector, GrpcController, discover};
pub use core::{
    MonitorExit, Session, SessionOutcome, ShutdownSignals, Sidecar, SidecarBuilder, connect,
    monitor,
};
pub use error::{Result, SessionError};
pub use events::{BackoffSource, Bus, Event, EventKind};
pub use iface::{InterfaceProbe, SystemInterfaces, has_interface};
pub use netns::{NamespaceHandle, NamespaceIdentity, NamespaceResolver, ProcNamespace};
pub use pod::{ControllerEndpoint, PodIdentity, RegistrationRequest};
pub use policies::{BackoffPolicy, JitterPolicy, RestartPlan, RestartPolicy};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose the built-in tracing subscriber.
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
