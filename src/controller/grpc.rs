//! tonic-backed [`Connector`] and [`Controller`].

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::Endpoint;

use super::proto::{ClientNode, NscServiceClient, PodRequest};
use super::{Connector, Controller};
use crate::{
    error::{Result, SessionError},
    pod::RegistrationRequest,
};

/// Default bound on establishing one TCP + HTTP/2 connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Dials controllers over plaintext gRPC.
#[derive(Clone, Debug)]
pub struct GrpcConnector {
    connect_timeout: Duration,
}

impl GrpcConnector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl Default for GrpcConnector {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds the plaintext scheme when the address is a bare `host:port`.
fn endpoint_uri(address: &str) -> String {
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}

#[async_trait]
impl Connector for GrpcConnector {
    async fn connect(&self, address: &str) -> Result<Box<dyn Controller>> {
        let unavailable = |reason: String| SessionError::TransportUnavailable {
            address: address.to_string(),
            reason,
        };

        let endpoint = Endpoint::from_shared(endpoint_uri(address))
            .map_err(|e| unavailable(e.to_string()))?
            .connect_timeout(self.connect_timeout);
        let channel = endpoint
            .connect()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        Ok(Box::new(GrpcController {
            client: NscServiceClient::new(channel),
        }))
    }
}

/// One gRPC connection to a controller.
#[derive(Debug)]
pub struct GrpcController {
    client: NscServiceClient,
}

#[async_trait]
impl Controller for GrpcController {
    async fn discover_server(&mut self, node_name: &str) -> Result<String> {
        let request = ClientNode {
            node_name: node_name.to_string(),
        };
        let response = self
            .client
            .discover_server(request)
            .await
            .map_err(|status| SessionError::DiscoveryFailed {
                reason: status.message().to_string(),
            })?;
        Ok(response.into_inner().server_ip)
    }

    async fn process_pod(&mut self, request: &RegistrationRequest) -> Result<()> {
        let message = PodRequest {
            name: request.pod.name.clone(),
            namespace: request.pod.namespace.clone(),
            node_name: request.pod.node_name.clone(),
            network_service: request.pod.network_service.clone(),
            inode_url: request.identity.to_string(),
            retry_count: i32::try_from(request.retry_count).unwrap_or(i32::MAX),
        };
        self.client
            .process_pod(message)
            .await
            .map_err(|status| SessionError::RegistrationFailed {
                reason: format!("{}: {}", status.code(), status.message()),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_address_gets_plaintext_scheme() {
        assert_eq!(endpoint_uri("10.0.0.5:50051"), "http://10.0.0.5:50051");
        assert_eq!(endpoint_uri("http://ctl:50052"), "http://ctl:50052");
    }

    #[tokio::test]
    async fn test_unreachable_controller_is_transport_unavailable() {
        // Port 1 on loopback is never served in test environments.
        let connector = GrpcConnector::new().with_connect_timeout(Duration::from_millis(500));
        let err = match connector.connect("127.0.0.1:1").await {
            Ok(_) => panic!("connected to a closed port"),
            Err(e) => e,
        };
        assert_eq!(err.as_label(), "transport_unavailable");
        assert!(err.to_string().contains("127.0.0.1:1"));
    }
}
