//! # Remote controller access.
//!
//! Two seams separate the session from the transport:
//! - [`Connector`] dials an address and yields a live connection;
//! - [`Controller`] is that connection: the two RPCs the sidecar issues.
//!
//! A connection is an owned `Box<dyn Controller>`; dropping it closes the
//! transport. [`GrpcConnector`] / [`GrpcController`] implement both over tonic
//! with plaintext HTTP/2.
//!
//! ```text
//! Connector::connect(addr) ──► Box<dyn Controller>
//!                                 ├─► discover_server(node)  (one-shot, then dropped)
//!                                 └─► process_pod(request)   (long-lived)
//! ```

mod discovery;
mod grpc;
pub mod proto;

pub use discovery::discover;
pub use grpc::{GrpcConnector, GrpcController};

use std::sync::Arc;

use async_trait::async_trait;

use crate::{error::Result, pod::RegistrationRequest};

/// An open connection to one controller instance.
#[async_trait]
pub trait Controller: Send {
    /// Asks a well-known controller which instance serves `node_name`.
    ///
    /// Returns the raw address, which may be empty.
    async fn discover_server(&mut self, node_name: &str) -> Result<String>;

    /// Registers the pod. Returns when the controller ends the registration.
    async fn process_pod(&mut self, request: &RegistrationRequest) -> Result<()>;
}

/// Dials controller endpoints.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Makes one connection attempt. Fails with `TransportUnavailable`.
    async fn connect(&self, address: &str) -> Result<Box<dyn Controller>>;
}

/// Shared handle to a connector.
pub type ConnectorRef = Arc<dyn Connector>;
