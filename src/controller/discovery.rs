//! Discovery handshake with the well-known controller.

use super::Controller;
use crate::{
    error::{Result, SessionError},
    pod::ControllerEndpoint,
};

/// Asks the controller behind `conn` which instance should handle pods on
/// `node_name`.
///
/// The connection is consumed and closed before returning on every path. A
/// remote error and an empty address both yield
/// [`SessionError::DiscoveryFailed`].
pub async fn discover(mut conn: Box<dyn Controller>, node_name: &str) -> Result<ControllerEndpoint> {
    let result = conn.discover_server(node_name).await;
    drop(conn);

    match result {
        Ok(address) if address.trim().is_empty() => Err(SessionError::DiscoveryFailed {
            reason: "empty server address".to_string(),
        }),
        Ok(address) => Ok(ControllerEndpoint::new(address.trim())),
        Err(err @ SessionError::DiscoveryFailed { .. }) => Err(err),
        Err(other) => Err(SessionError::DiscoveryFailed {
            reason: other.to_string(),
        }),
    }
}
